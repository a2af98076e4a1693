use anyhow::{Context, Result, bail};
use arboard::Clipboard;

use crate::models::Record;

/// Largest record rendering we will place on the clipboard (10MB)
const MAX_CLIPBOARD_SIZE: usize = 10 * 1024 * 1024;

/// Clipboard backend (mocked in tests)
trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard via arboard
struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.is_empty() {
        bail!("Cannot copy empty text to clipboard");
    }

    if text.len() > MAX_CLIPBOARD_SIZE {
        bail!("Record too large for clipboard ({} bytes, max {})", text.len(), MAX_CLIPBOARD_SIZE);
    }

    Ok(())
}

fn copy_with_provider(text: &str, provider: &mut dyn ClipboardProvider) -> Result<usize> {
    validate_clipboard_text(text)?;
    provider.set_text(text)?;
    Ok(text.len())
}

/// Copy a record's pretty-printed JSON to the system clipboard
///
/// Returns the number of bytes copied.
///
/// # Errors
///
/// Returns error if the rendering exceeds 10MB or the system clipboard is
/// unavailable (headless session, permissions, locked by another process).
pub fn copy_record_json(record: &Record) -> Result<usize> {
    let json = record.to_pretty_json();
    // Validate before touching the clipboard so size errors are reported even headless
    validate_clipboard_text(&json)?;

    let mut clipboard = SystemClipboard::new()?;
    copy_with_provider(&json, &mut clipboard)
}
