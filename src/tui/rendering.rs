use std::borrow::Cow;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::app::{MessageType, Prompt, PromptKind, StatusMessage, ViewMode};
use super::layout::{AppLayout, comparison_grid, split_entry_body};
use crate::models::{NormalizedEntry, Record, TagField, TagValue};
use crate::session::{Session, SessionView};
use crate::utils::{format_path_with_tilde, sanitize_for_terminal};

const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const BAR_BG: Color = Color::Rgb(24, 24, 27);
const EMERALD: Color = Color::Rgb(16, 185, 129);
const SKY: Color = Color::Rgb(96, 165, 250);
const AMBER: Color = Color::Rgb(245, 158, 11);
const RED: Color = Color::Rgb(239, 68, 68);

const NO_CHAT_MESSAGES: &str = "No chat messages found.";
const NO_REASONING_FOUND: &str = "No reasoning found";

/// Everything the renderer needs for one frame
pub struct RenderState<'a> {
    pub session: &'a Session,
    pub view_mode: ViewMode,
    pub show_raw: bool,
    pub scroll: u16,
    pub prompt: Option<&'a Prompt>,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());
    let view = state.session.view();

    render_header(frame, layout.header_area, state.session, &view, state.view_mode);

    match &view {
        SessionView::NoRecords => {
            let message = if state.session.source().is_some() {
                "No entries loaded from file."
            } else {
                "No file loaded. Press o to open a .json or .jsonl file."
            };
            render_notice(frame, layout.body_area, message);
        }
        SessionView::NoMatches => {
            render_notice(frame, layout.body_area, "No entries match your filter.");
        }
        SessionView::Entry { record, entry } => match state.view_mode {
            ViewMode::Entry => {
                render_entry_page(frame, layout.body_area, record, entry, state.show_raw, state.scroll)
            }
            ViewMode::Comparison => {
                render_comparison_page(frame, layout.body_area, entry, state.scroll)
            }
        },
    }

    render_status_bar(frame, layout.status_area, state);
}

fn bordered(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MUTED))
        .title(title)
}

fn label<'a>(text: impl Into<Cow<'a, str>>) -> Span<'a> {
    Span::styled(text, Style::default().fg(MUTED))
}

fn tag_text(value: Option<&TagValue>) -> String {
    value.map(|v| sanitize_for_terminal(&v.to_string())).unwrap_or_default()
}

/// Sanitized text split into owned lines
fn text_lines(text: &str) -> Vec<Line<'static>> {
    sanitize_for_terminal(text).lines().map(|line| Line::from(line.to_string())).collect()
}

fn render_header(
    frame: &mut Frame,
    area: Rect,
    session: &Session,
    view: &SessionView,
    view_mode: ViewMode,
) {
    let file_line = match session.source() {
        Some(path) => {
            let format = session.format().map(|f| format!(" ({})", f)).unwrap_or_default();
            Line::from(vec![
                label("File: "),
                Span::raw(format!("{}{}", sanitize_for_terminal(&format_path_with_tilde(path)), format)),
                label("  |  "),
                Span::styled(
                    session.navigation().position_label(),
                    Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD),
                ),
                label(format!("  ({} of {} records)", session.filtered_len(), session.records().len())),
            ])
        }
        None => Line::from(label("No file loaded")),
    };

    let entry_line = match view {
        SessionView::Entry { entry, .. } => {
            Line::from(vec![
                label("ID: "),
                Span::styled(
                    sanitize_for_terminal(entry.id_text()),
                    Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD),
                ),
                label("  Tag1: "),
                Span::raw(tag_text(entry.tag1.as_ref())),
                label("  Tag2: "),
                Span::raw(tag_text(entry.tag2.as_ref())),
            ])
        }
        SessionView::NoRecords | SessionView::NoMatches => Line::from(label("ID: -")),
    };

    let filter = session.filter();
    let page = match view_mode {
        ViewMode::Entry => "Entry",
        ViewMode::Comparison => "Comparison",
    };
    let filter_style = |active: bool| {
        if active { Style::default().fg(AMBER) } else { Style::default() }
    };
    let filter_line = Line::from(vec![
        label("Filter tag1: "),
        Span::styled(
            sanitize_for_terminal(&filter.tag1.label(TagField::Tag1)),
            filter_style(filter.tag1.is_filtering()),
        ),
        label("  tag2: "),
        Span::styled(
            sanitize_for_terminal(&filter.tag2.label(TagField::Tag2)),
            filter_style(filter.tag2.is_filtering()),
        ),
        label("  |  Page: "),
        Span::raw(page),
    ]);

    let paragraph = Paragraph::new(Text::from(vec![file_line, entry_line, filter_line]))
        .block(bordered(" Record Viewer "));
    frame.render_widget(paragraph, area);
}

fn render_notice(frame: &mut Frame, area: Rect, message: &str) {
    let paragraph = Paragraph::new(Line::from(Span::styled(message, Style::default().fg(AMBER))))
        .block(bordered(" Entry "))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Chat turns followed by the reasoning block
fn chat_lines(entry: &NormalizedEntry) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if entry.turns().is_empty() {
        lines.push(Line::from(Span::styled(NO_CHAT_MESSAGES, Style::default().fg(MUTED))));
    }

    for (idx, turn) in entry.turns().iter().enumerate() {
        if idx > 0 {
            lines.push(Line::from(""));
        }
        let color = if turn.is_user() { SKY } else { EMERALD };
        lines.push(Line::from(Span::styled(
            format!("{}:", sanitize_for_terminal(&turn.display_role())),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.extend(text_lines(&turn.content));
    }

    if !entry.reasoning().is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Reasoning / Analysis:",
            Style::default().fg(AMBER).add_modifier(Modifier::BOLD),
        )));
        lines.extend(text_lines(entry.reasoning()));
    }

    lines
}

fn render_entry_page(
    frame: &mut Frame,
    area: Rect,
    record: &Record,
    entry: &NormalizedEntry,
    show_raw: bool,
    scroll: u16,
) {
    let (chat_area, raw_area) = split_entry_body(area, show_raw);

    let chat = Paragraph::new(Text::from(chat_lines(entry)))
        .block(bordered(" Chat History "))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(chat, chat_area);

    if let Some(raw_area) = raw_area {
        let raw = Paragraph::new(Text::from(text_lines(&record.to_pretty_json())))
            .block(bordered(" Raw JSON "))
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        frame.render_widget(raw, raw_area);
    }
}

fn render_comparison_page(frame: &mut Frame, area: Rect, entry: &NormalizedEntry, scroll: u16) {
    let [original_area, revised_area, reasoning_area, revised_reasoning_area] =
        comparison_grid(area);

    let reasoning = if entry.reasoning().is_empty() { NO_REASONING_FOUND } else { entry.reasoning() };

    render_panel(
        frame,
        original_area,
        " Original Content ",
        entry.original_content(),
        entry.turns().is_empty(),
        scroll,
    );
    render_panel(
        frame,
        revised_area,
        " Revised Content ",
        entry.revised_content_text(),
        entry.revised_content.is_none(),
        scroll,
    );
    render_panel(
        frame,
        reasoning_area,
        " Original Reasoning ",
        reasoning,
        entry.reasoning().is_empty(),
        scroll,
    );
    render_panel(
        frame,
        revised_reasoning_area,
        " Revised Reasoning ",
        entry.revised_reasoning_text(),
        entry.revised_reasoning.is_none(),
        scroll,
    );
}

fn render_panel(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    text: &str,
    is_placeholder: bool,
    scroll: u16,
) {
    let style = if is_placeholder { Style::default().fg(MUTED) } else { Style::default() };
    let paragraph = Paragraph::new(Text::from(text_lines(text)))
        .style(style)
        .block(bordered(title))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let bar = Style::default().fg(BRIGHT).bg(BAR_BG);

    let (status_text, style) = if let Some(prompt) = state.prompt {
        let question = match prompt.kind {
            PromptKind::Jump => {
                format!("Jump to entry (1-{})", state.session.navigation().total())
            }
            PromptKind::Open => "Open file".to_string(),
        };
        (
            format!(" {}: {}_ | Enter: confirm | Esc: cancel ", question, prompt.buffer),
            Style::default().fg(BRIGHT).bg(BAR_BG).add_modifier(Modifier::BOLD),
        )
    } else if let Some(message) = state.status_message {
        let fg = match message.message_type {
            MessageType::Success => EMERALD,
            MessageType::Warning => AMBER,
            MessageType::Error => RED,
        };
        (format!(" {} ", message.text), Style::default().fg(fg).bg(BAR_BG))
    } else {
        let mode = match state.view_mode {
            ViewMode::Entry => "[ENTRY]",
            ViewMode::Comparison => "[COMPARE]",
        };
        let parts = [
            mode.to_string(),
            state.session.navigation().position_label(),
            "←/→: entry".to_string(),
            "↑/↓: scroll".to_string(),
            "1/2: filter".to_string(),
            "Tab: page".to_string(),
            "r: raw".to_string(),
            "g: jump".to_string(),
            "o: open".to_string(),
            "q: quit".to_string(),
        ];
        (format!(" {} ", parts.join(" | ")), bar)
    };

    let paragraph = Paragraph::new(sanitize_for_terminal(&status_text)).style(style);
    frame.render_widget(paragraph, area);
}
