//! Command-line entry points: the interactive viewer and the `stats` / `show` commands
pub mod commands;

pub use commands::{Cli, Commands, run};
