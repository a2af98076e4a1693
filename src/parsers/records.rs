use std::fmt;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::models::Record;
use crate::utils::safe_open_file;

/// Accepted upload types, from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Json,
    JsonLines,
}

impl SourceKind {
    /// Determine the declared kind of a file from its extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Ok(SourceKind::Json),
            "jsonl" => Ok(SourceKind::JsonLines),
            _ => bail!("Unsupported file type: {} (expected .json or .jsonl)", path.display()),
        }
    }
}

/// How the loaded records were laid out in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// A single JSON object, wrapped as one record
    Document,
    /// A JSON array, one record per element
    Array,
    /// Newline-delimited JSON, one record per parseable line
    Lines,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Document => f.write_str("JSON object"),
            SourceFormat::Array => f.write_str("JSON array"),
            SourceFormat::Lines => f.write_str("JSONL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// One JSONL line failed to decode (1-based line number)
    LineParse { line: usize },
    /// The document parsed but is neither an object nor an array
    UnsupportedShape,
    /// The input could not be read at all
    Unreadable,
}

/// Advisory message produced while loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn line_parse(line: usize, message: impl Into<String>) -> Self {
        Self { kind: DiagnosticKind::LineParse { line }, message: message.into() }
    }

    pub fn unsupported_shape(message: impl Into<String>) -> Self {
        Self { kind: DiagnosticKind::UnsupportedShape, message: message.into() }
    }

    pub fn unreadable(message: impl Into<String>) -> Self {
        Self { kind: DiagnosticKind::Unreadable, message: message.into() }
    }

    /// Fatal diagnostics mean nothing from this upload can be used
    pub fn is_fatal(&self) -> bool {
        !matches!(self.kind, DiagnosticKind::LineParse { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::LineParse { line } => {
                write!(f, "Error parsing line {}: {}", line, self.message)
            }
            DiagnosticKind::UnsupportedShape | DiagnosticKind::Unreadable => {
                f.write_str(&self.message)
            }
        }
    }
}

/// Result of loading one upload. Always an ordered (possibly empty) record list.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub records: Vec<Record>,
    pub diagnostics: Vec<Diagnostic>,
    /// None when nothing usable could be read
    pub format: Option<SourceFormat>,
}

impl LoadReport {
    fn failed(diagnostic: Diagnostic) -> Self {
        Self { records: Vec::new(), diagnostics: vec![diagnostic], format: None }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn fatal_diagnostic(&self) -> Option<&Diagnostic> {
        self.diagnostics.iter().find(|d| d.is_fatal())
    }

    /// Number of JSONL lines that were skipped
    pub fn skipped_lines(&self) -> usize {
        self.diagnostics.iter().filter(|d| !d.is_fatal()).count()
    }
}

/// Byte-order mark written by some Windows tools at the start of UTF-8 files
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parse an uploaded byte stream into records
///
/// Tries a single JSON document first, falling back to JSONL. Never fails: problems
/// are reported through [`LoadReport::diagnostics`].
pub fn load_records(bytes: &[u8]) -> LoadReport {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Array(items)) => {
            debug!(records = items.len(), "Parsed input as a JSON array");
            LoadReport {
                records: items.into_iter().map(Record::new).collect(),
                diagnostics: Vec::new(),
                format: Some(SourceFormat::Array),
            }
        }
        Ok(value @ Value::Object(_)) => {
            debug!("Parsed input as a single JSON object");
            LoadReport {
                records: vec![Record::new(value)],
                diagnostics: Vec::new(),
                format: Some(SourceFormat::Document),
            }
        }
        Ok(other) => {
            let diagnostic = Diagnostic::unsupported_shape(format!(
                "Unsupported top-level JSON value ({}): expected an object or an array",
                json_type_name(&other)
            ));
            warn!("{}", diagnostic);
            LoadReport::failed(diagnostic)
        }
        Err(e) => {
            debug!(error = %e, "Input is not a single JSON document, reading as JSONL");
            parse_lines(bytes)
        }
    }
}

fn parse_lines(bytes: &[u8]) -> LoadReport {
    let mut records = Vec::new();
    let mut diagnostics = Vec::new();
    let mut saw_content = false;

    for (line_idx, raw_line) in bytes.split(|b| *b == b'\n').enumerate() {
        let line_number = line_idx + 1;
        let raw_line = raw_line.strip_suffix(b"\r").unwrap_or(raw_line);

        let line = match std::str::from_utf8(raw_line) {
            Ok(line) => line,
            Err(e) => {
                saw_content = true;
                warn!(line = line_number, error = %e, "Invalid UTF-8 in JSONL line");
                diagnostics.push(Diagnostic::line_parse(line_number, format!("invalid UTF-8: {}", e)));
                continue;
            }
        };

        // Skip empty lines
        if line.trim().is_empty() {
            continue;
        }
        saw_content = true;

        match serde_json::from_str::<Value>(line) {
            Ok(value) => records.push(Record::new(value)),
            Err(e) => {
                warn!(line = line_number, error = %e, "Failed to parse JSONL line");
                diagnostics.push(Diagnostic::line_parse(line_number, e.to_string()));
            }
        }
    }

    if !diagnostics.is_empty() {
        info!(records = records.len(), skipped = diagnostics.len(), "Parsed JSONL with skipped lines");
    }

    // Blank input holds no JSONL either
    let format = saw_content.then_some(SourceFormat::Lines);
    LoadReport { records, diagnostics, format }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Read and parse a `.json` / `.jsonl` file
///
/// The file handle is released before parsing starts.
///
/// # Errors
///
/// Returns an error if the extension is not `.json`/`.jsonl`, or the file cannot be
/// opened, validated or read. Parse problems are reported in the returned
/// [`LoadReport`] instead.
pub fn load_file(path: &Path) -> Result<LoadReport> {
    let kind = SourceKind::from_path(path)?;

    let bytes = {
        let mut file = safe_open_file(path)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        bytes
    };

    debug!(path = %path.display(), ?kind, bytes = bytes.len(), "Read upload");
    let report = load_records(&bytes);
    info!(
        path = %path.display(),
        records = report.records.len(),
        diagnostics = report.diagnostics.len(),
        "Loaded records"
    );
    Ok(report)
}

/// Like [`load_file`], but an unreadable file becomes an empty report with a fatal
/// [`DiagnosticKind::Unreadable`] diagnostic
pub fn read_records(path: &Path) -> LoadReport {
    match load_file(path) {
        Ok(report) => report,
        Err(e) => {
            let diagnostic = Diagnostic::unreadable(format!("{:#}", e));
            warn!("{}", diagnostic);
            LoadReport::failed(diagnostic)
        }
    }
}
