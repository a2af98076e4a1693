//! TUI application state and event handling.
//!
//! The [`App`] wraps a [`Session`] and adds the purely presentational state:
//! which page is showing, whether the raw JSON pane is open, the detail scroll
//! offset, the active text prompt and a transient status message.
//!
//! # Pages
//!
//! - **Entry**: chat history for the current record, optionally beside its raw JSON
//! - **Comparison**: original vs revised content and reasoning in a 2x2 grid
//!
//! `Tab` toggles between them. Navigation, filters and reloads all go through the
//! session so both pages always show the same record.

use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::{debug, warn};

use super::events::{Action, InputMode, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::clipboard::copy_record_json;
use crate::session::Session;
use crate::utils::{expand_tilde, format_path_with_tilde};

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for warning and error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Entries skipped by PageUp/PageDown
const PAGE_STEP: isize = 10;
/// Longest text accepted in a prompt
const MAX_PROMPT_LEN: usize = 1024;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Warning,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Entry,
    Comparison,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// 1-based entry number within the filtered set
    Jump,
    /// Path of a .json or .jsonl file to load
    Open,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub buffer: String,
}

pub struct App {
    session: Session,
    view_mode: ViewMode,
    show_raw: bool,
    scroll: u16,
    prompt: Option<Prompt>,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(session: Session) -> Self {
        let mut app = Self {
            session,
            view_mode: ViewMode::default(),
            show_raw: false,
            scroll: 0,
            prompt: None,
            should_quit: false,
            status_message: None,
            needs_redraw: true, // Initial draw needed
            last_draw_time: Instant::now(),
        };

        let skipped = app.session.diagnostics().len();
        if skipped > 0 {
            app.set_status(
                format!("Skipped {} malformed line(s)", skipped),
                MessageType::Warning,
                STATUS_ERROR_DURATION_MS,
            );
        }

        app
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn set_error(&mut self, text: impl Into<String>) {
        self.set_status(text, MessageType::Error, STATUS_ERROR_DURATION_MS);
    }

    /// Check and clear expired status messages
    fn check_and_clear_expired_status(&mut self) {
        let should_clear = self
            .status_message
            .as_ref()
            .map(|msg| Instant::now() >= msg.expires_at)
            .unwrap_or(false);
        if should_clear {
            self.status_message = None;
        }
    }

    fn input_mode(&self) -> InputMode {
        if self.prompt.is_some() { InputMode::Prompt } else { InputMode::Browse }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            // Clear expired status messages (marks dirty if cleared)
            let had_status = self.status_message.is_some();
            self.check_and_clear_expired_status();
            if had_status && self.status_message.is_none() {
                self.needs_redraw = true;
            }

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_draw_time);
            if self.needs_redraw || elapsed >= Duration::from_millis(100) {
                terminal.draw(|f| {
                    let state = RenderState {
                        session: &self.session,
                        view_mode: self.view_mode,
                        show_raw: self.show_raw,
                        scroll: self.scroll,
                        prompt: self.prompt.as_ref(),
                        status_message: self.status_message.as_ref(),
                    };
                    render_ui(f, &state);
                })?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100), self.input_mode())?;
            self.handle_action(action);
        }

        Ok(())
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Cancel => {
                if self.prompt.take().is_some() {
                    self.needs_redraw = true;
                } else {
                    self.should_quit = true;
                }
            }
            Action::PrevEntry => self.navigate(Session::step_back),
            Action::NextEntry => self.navigate(Session::step_forward),
            Action::PageBack => self.navigate(|s| s.step_by(-PAGE_STEP)),
            Action::PageForward => self.navigate(|s| s.step_by(PAGE_STEP)),
            Action::FirstEntry => self.navigate(Session::first),
            Action::LastEntry => self.navigate(Session::last),
            Action::ScrollUp => {
                if self.scroll > 0 {
                    self.scroll -= 1;
                    self.needs_redraw = true;
                }
            }
            Action::ScrollDown => {
                self.scroll = self.scroll.saturating_add(1);
                self.needs_redraw = true;
            }
            Action::CycleFilter { field, forward } => {
                self.session.cycle_filter(field, forward);
                self.scroll = 0;
                self.needs_redraw = true;
            }
            Action::ResetFilters => {
                self.session.reset_filters();
                self.scroll = 0;
                self.needs_redraw = true;
            }
            Action::ToggleView => {
                self.view_mode = match self.view_mode {
                    ViewMode::Entry => ViewMode::Comparison,
                    ViewMode::Comparison => ViewMode::Entry,
                };
                self.scroll = 0;
                self.needs_redraw = true;
            }
            Action::ToggleRaw => {
                self.show_raw = !self.show_raw;
                self.needs_redraw = true;
            }
            Action::StartJump => {
                if self.session.navigation().is_empty() {
                    self.set_error("No entries to jump to");
                } else {
                    self.start_prompt(PromptKind::Jump, String::new());
                }
            }
            Action::StartOpen => {
                let current = self.session.source().map(format_path_with_tilde).unwrap_or_default();
                self.start_prompt(PromptKind::Open, current);
            }
            Action::Reload => self.reload(),
            Action::CopyToClipboard => self.copy_current(),
            Action::InputChar(c) => {
                if let Some(prompt) = self.prompt.as_mut()
                    && prompt.buffer.chars().count() < MAX_PROMPT_LEN
                {
                    prompt.buffer.push(c);
                    self.needs_redraw = true;
                }
            }
            Action::DeleteChar => {
                if let Some(prompt) = self.prompt.as_mut()
                    && prompt.buffer.pop().is_some()
                {
                    self.needs_redraw = true;
                }
            }
            Action::Submit => {
                if let Some(prompt) = self.prompt.take() {
                    self.needs_redraw = true;
                    match prompt.kind {
                        PromptKind::Jump => self.submit_jump(&prompt.buffer),
                        PromptKind::Open => self.submit_open(&prompt.buffer),
                    }
                }
            }
            Action::None => {}
        }
    }

    fn navigate(&mut self, step: impl FnOnce(&mut Session) -> bool) {
        if step(&mut self.session) {
            self.scroll = 0;
            self.needs_redraw = true;
        }
    }

    fn start_prompt(&mut self, kind: PromptKind, buffer: String) {
        self.prompt = Some(Prompt { kind, buffer });
        self.needs_redraw = true;
    }

    fn submit_jump(&mut self, input: &str) {
        let total = self.session.navigation().total();
        match input.trim().parse::<usize>() {
            Ok(number) if (1..=total).contains(&number) => {
                debug!(number, "Jumping to entry");
                self.navigate(|s| s.jump_to(number - 1));
            }
            _ => self.set_error(format!("Invalid entry number: '{}' (expected 1-{})", input, total)),
        }
    }

    fn submit_open(&mut self, input: &str) {
        let input = input.trim();
        if input.is_empty() {
            self.set_error("No file path given");
            return;
        }

        let path = expand_tilde(input);
        match self.session.load(&path) {
            Ok(()) => {
                self.scroll = 0;
                self.report_loaded("Loaded");
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to open file");
                self.set_error(format!("Failed to load: {:#}", e));
            }
        }
    }

    fn reload(&mut self) {
        match self.session.reload() {
            Ok(()) => {
                self.scroll = 0;
                self.report_loaded("Reloaded");
            }
            Err(e) => self.set_error(format!("Reload failed: {:#}", e)),
        }
    }

    fn report_loaded(&mut self, verb: &str) {
        let records = self.session.records().len();
        let skipped = self.session.diagnostics().len();
        if skipped > 0 {
            self.set_status(
                format!("{} {} records ({} malformed line(s) skipped)", verb, records, skipped),
                MessageType::Warning,
                STATUS_ERROR_DURATION_MS,
            );
        } else {
            self.set_status(
                format!("{} {} records", verb, records),
                MessageType::Success,
                STATUS_SUCCESS_DURATION_MS,
            );
        }
    }

    fn copy_current(&mut self) {
        let Some(record) = self.session.current_record() else {
            self.set_error("No entry to copy");
            return;
        };

        match copy_record_json(record) {
            Ok(bytes) => self.set_status(
                format!("Copied record JSON ({} bytes)", bytes),
                MessageType::Success,
                STATUS_SUCCESS_DURATION_MS,
            ),
            Err(e) => self.set_error(format!("Clipboard error: {}", e)),
        }
    }
}
