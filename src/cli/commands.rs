use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::filters::{TagSelection, tag_counts};
use crate::models::{NormalizedEntry, Record, TagField, TagValue};
use crate::session::{Session, SessionView};
use crate::tui::run_interactive;
use crate::utils::{format_path_with_tilde, sanitize_for_terminal};

#[derive(Parser)]
#[command(name = "chat-record-viewer")]
#[command(version = "0.1.0")]
#[command(about = "Browse, filter and compare chat records from .json/.jsonl files", long_about = None)]
pub struct Cli {
    /// Write log output to this file (the interactive viewer logs nowhere otherwise)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// File to open in the interactive viewer
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show record counts, load diagnostics and tag distributions
    Stats {
        /// .json or .jsonl file
        file: PathBuf,
    },
    /// Print one entry as plain text
    Show {
        /// .json or .jsonl file
        file: PathBuf,

        /// Only entries whose tag1 equals this value
        #[arg(long, value_name = "VALUE")]
        tag1: Option<String>,

        /// Only entries whose tag2 equals this value
        #[arg(long, value_name = "VALUE")]
        tag2: Option<String>,

        /// 1-based entry number within the filtered entries (clamped)
        #[arg(long, default_value_t = 1)]
        index: usize,

        /// Print the raw record as pretty JSON
        #[arg(long)]
        raw: bool,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref(), cli.command.is_none())?;

    match cli.command {
        Some(Commands::Stats { file }) => show_stats(&file),
        Some(Commands::Show { file, tag1, tag2, index, raw }) => {
            show_entry(&file, tag1.as_deref(), tag2.as_deref(), index, raw)
        }
        None => {
            let session = match cli.file {
                Some(path) => open_session(&path)?,
                None => Session::new(),
            };
            run_interactive(session)
        }
    }
}

/// Install the `tracing` subscriber
///
/// `RUST_LOG` controls the level (default `warn`). Output goes to `log_file` when
/// given, otherwise to stderr for commands and nowhere for the interactive viewer,
/// which owns the terminal.
fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None if interactive => {}
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .try_init();
        }
    }

    Ok(())
}

/// Load a file, reporting skipped lines on stderr
fn open_session(path: &Path) -> Result<Session> {
    let session = Session::open(path)?;
    for diagnostic in session.diagnostics() {
        eprintln!("Warning: {}", diagnostic);
    }
    Ok(session)
}

fn show_stats(path: &Path) -> Result<()> {
    let session = open_session(path)?;
    let records = session.records();

    println!("Record File Statistics");
    println!("======================");
    println!("File: {}", format_path_with_tilde(path));
    if let Some(format) = session.format() {
        println!("Format: {}", format);
    }
    println!("Total records: {}", records.len());
    println!("Skipped lines: {}", session.diagnostics().len());

    for field in TagField::ALL {
        println!();
        println!("{} values:", field);
        print!("{}", format_tag_counts(records, field));
    }

    Ok(())
}

fn format_tag_counts(records: &[Record], field: TagField) -> String {
    let counts = tag_counts(records, field);
    if counts.is_empty() {
        return "  none in file\n".to_string();
    }

    counts
        .iter()
        .map(|(value, count)| format!("  {}: {}\n", sanitize_for_terminal(&value.to_string()), count))
        .collect()
}

fn show_entry(
    path: &Path,
    tag1: Option<&str>,
    tag2: Option<&str>,
    index: usize,
    raw: bool,
) -> Result<()> {
    let mut session = open_session(path)?;

    for (field, label) in [(TagField::Tag1, tag1), (TagField::Tag2, tag2)] {
        if let Some(label) = label {
            let selection = TagSelection::from_label(label, field, session.tag_options(field));
            debug!(%field, ?selection, "Applying tag filter");
            session.set_filter(field, selection);
        }
    }
    session.jump_to(index.saturating_sub(1));

    match session.view() {
        SessionView::NoRecords => println!("No entries loaded from file."),
        SessionView::NoMatches => println!("No entries match your filter."),
        SessionView::Entry { record, entry } => {
            if raw {
                println!("{}", sanitize_for_terminal(&record.to_pretty_json()));
            } else {
                println!("{}", session.navigation().position_label());
                print!("{}", format_entry(&entry));
            }
        }
    }

    Ok(())
}

fn tag_text(value: Option<&TagValue>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Plain-text rendering of an entry: chat history, then the comparison fields
fn format_entry(entry: &NormalizedEntry) -> String {
    let mut lines = vec![
        format!("ID: {}", entry.id_text()),
        format!("Tag1: {}", tag_text(entry.tag1.as_ref())),
        format!("Tag2: {}", tag_text(entry.tag2.as_ref())),
        String::new(),
        "Chat History".to_string(),
        "------------".to_string(),
    ];

    if entry.turns().is_empty() {
        lines.push("No chat messages found.".to_string());
    }
    for turn in entry.turns() {
        lines.push(format!("{}:", turn.display_role()));
        lines.extend(turn.content.lines().map(|line| format!("  {}", line)));
    }

    if !entry.reasoning().is_empty() {
        lines.push(String::new());
        lines.push("Reasoning / Analysis:".to_string());
        lines.extend(entry.reasoning().lines().map(|line| format!("  {}", line)));
    }

    lines.push(String::new());
    lines.push("Revised Content:".to_string());
    lines.extend(entry.revised_content_text().lines().map(|line| format!("  {}", line)));
    lines.push("Revised Reasoning:".to_string());
    lines.extend(entry.revised_reasoning_text().lines().map(|line| format!("  {}", line)));

    let mut text = sanitize_for_terminal(&lines.join("\n"));
    text.push('\n');
    text
}
