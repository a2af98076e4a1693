//! Data models for uploaded conversation records.
//!
//! - [`Record`] - One raw uploaded JSON value, kept verbatim for raw display
//! - [`TagField`] / [`TagValue`] - The two categorical fields used for filtering
//! - [`ChatTurn`] - A single `{role, content}` pair
//! - [`EntryBody`] - The resolved shape of a record's conversation
//! - [`NormalizedEntry`] - The renderer-ready view produced by the normalizer

pub mod entry;
pub mod record;

pub use entry::{
    ChatTurn, EntryBody, ID_NOT_AVAILABLE, NO_CONTENT_FOUND, NO_REVISED_CONTENT,
    NO_REVISED_REASONING, NormalizedEntry,
};
pub use record::{Record, TagField, TagValue};
