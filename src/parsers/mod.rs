//! Record loader for uploaded `.json` / `.jsonl` files
//!
//! # Error Handling Strategy
//!
//! Loading never aborts part-way through a file:
//!
//! - **Whole document first**: the input is parsed as one JSON document. An array yields
//!   one record per element, an object yields a single record.
//!
//! - **JSONL fallback**: if the document parse fails, each line is parsed on its own.
//!   Lines that fail become [`Diagnostic`]s and loading continues with the next line.
//!
//! - **Fatal shapes**: a top-level scalar, or a file that cannot be read, yields no
//!   records and a fatal diagnostic. Callers decide whether to keep their prior state.
//!
//! Every diagnostic is also emitted through `tracing` at `warn` level.

pub mod deserializers;
pub mod records;

pub use records::{
    Diagnostic, DiagnosticKind, LoadReport, SourceFormat, SourceKind, load_file, load_records,
    read_records,
};
