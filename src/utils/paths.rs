use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

// Maximum size of an uploaded record file: 64MB
const MAX_FILE_SIZE_BYTES: u64 = 64 * 1024 * 1024;

/// Opens an upload for reading after checking it is a regular file within the size cap
///
/// Checks are made on the open handle, so the file cannot be swapped between the
/// check and the read.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, is not a regular file, or is
/// larger than 64MB.
pub fn safe_open_file(path: &Path) -> Result<File> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;
    if !metadata.is_file() {
        bail!("Not a regular file: {}", path.display());
    }

    validate_file_size(&file, path)?;
    Ok(file)
}

/// Validates that a file's size is within acceptable limits (64MB)
///
/// # Errors
///
/// Returns an error if:
/// - The file metadata cannot be read
/// - The file is larger than 64MB
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > MAX_FILE_SIZE_BYTES {
        bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            file_size,
            MAX_FILE_SIZE_BYTES
        );
    }

    Ok(())
}

/// Expands a leading `~` in user-typed paths to the home directory
pub fn expand_tilde(input: &str) -> PathBuf {
    expand_tilde_internal(input, dirs::home_dir().as_deref())
}

fn expand_tilde_internal(input: &str, home: Option<&Path>) -> PathBuf {
    match (input.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(&rest[1..]),
        _ => PathBuf::from(input),
    }
}

/// Formats a path with ~ substitution for the home directory
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use chat_record_viewer::utils::format_path_with_tilde;
///
/// let path = PathBuf::from("/Users/alice/data/batch.jsonl");
/// // Returns "~/data/batch.jsonl" if the home directory is /Users/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, dirs::home_dir().as_deref())
}

/// Internal helper for path formatting with an explicit home (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home: Option<&Path>) -> String {
    if let Some(home) = home
        && let Ok(rest) = path.strip_prefix(home)
    {
        if rest.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~/{}", rest.display());
    }

    path.display().to_string()
}
