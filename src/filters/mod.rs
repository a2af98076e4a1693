//! Tag index and filter engine.
//!
//! - [`tags`] derives the selectable values of `tag1` / `tag2` from the loaded records
//! - [`selection`] holds the closed set of selections and the [`FilterState`]
//! - [`apply`] narrows the loaded records to those matching the current state

pub mod apply;
pub mod selection;
pub mod tags;

pub use apply::{apply_filters, filter_indices};
pub use selection::{FilterState, TagSelection};
pub use tags::{tag_counts, tag_options};
