//! Chat Record Viewer - browse, filter and compare chat-style training records
//!
//! This library loads conversation records from `.json` / `.jsonl` files and turns
//! them into a browsable, filterable sequence. It supports:
//!
//! - Loading a JSON array, a single JSON object or JSON Lines, with per-line diagnostics
//! - Filtering on the two categorical fields `tag1` and `tag2`
//! - Bounded navigation over the filtered entries
//! - Normalizing the legacy record shapes into one renderer-ready entry
//!
//! # Example
//!
//! ```
//! use chat_record_viewer::{Session, load_records, normalize};
//!
//! let report = load_records(br#"[{"id": "x1", "prompt": [{"role": "user", "content": "Hi"}]}]"#);
//! let entry = normalize(&report.records[0]);
//! assert_eq!(entry.original_content(), "Hi");
//!
//! let session = Session::from_records(report.records);
//! assert_eq!(session.navigation().position_label(), "Entry 1 / 1");
//! ```

pub mod cli;
pub mod clipboard;
pub mod filters;
pub mod models;
pub mod navigator;
pub mod normalizer;
pub mod parsers;
pub mod session;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use filters::{FilterState, TagSelection, apply_filters, tag_options};
pub use models::{NormalizedEntry, Record, TagField, TagValue};
pub use navigator::NavigationState;
pub use normalizer::normalize;
pub use parsers::{LoadReport, load_file, load_records};
pub use session::{Session, SessionView};
pub use utils::format_path_with_tilde;
