use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::models::TagField;

/// Whether keystrokes drive navigation or fill a text prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    Prompt,
}

/// User actions from keyboard events
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    Cancel,
    PrevEntry,
    NextEntry,
    PageBack,
    PageForward,
    FirstEntry,
    LastEntry,
    ScrollUp,
    ScrollDown,
    CycleFilter { field: TagField, forward: bool },
    ResetFilters,
    ToggleView,
    ToggleRaw,
    StartJump,
    StartOpen,
    Reload,
    CopyToClipboard,
    InputChar(char),
    DeleteChar,
    Submit,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration, mode: InputMode) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
        && key.kind != KeyEventKind::Release
    {
        return Ok(key_to_action(key, mode));
    }
    Ok(Action::None)
}

fn key_to_action(key: KeyEvent, mode: InputMode) -> Action {
    match mode {
        InputMode::Browse => browse_key_to_action(key),
        InputMode::Prompt => prompt_key_to_action(key),
    }
}

fn browse_key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Cancel,

        // Entry navigation (Vim/Emacs style)
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => Action::PrevEntry,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::NextEntry,
        (KeyCode::Left, _) => Action::PrevEntry,
        (KeyCode::Right, _) => Action::NextEntry,
        (KeyCode::PageUp, _) => Action::PageBack,
        (KeyCode::PageDown, _) => Action::PageForward,
        (KeyCode::Home, _) => Action::FirstEntry,
        (KeyCode::End, _) => Action::LastEntry,

        // Detail scrolling
        (KeyCode::Up, _) => Action::ScrollUp,
        (KeyCode::Down, _) => Action::ScrollDown,

        // Actions
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => Action::Reload,
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => Action::CopyToClipboard,
        (KeyCode::Tab, _) => Action::ToggleView,

        (KeyCode::Char(c), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
            char_to_action(c)
        }

        _ => Action::None,
    }
}

fn char_to_action(c: char) -> Action {
    match c {
        'q' => Action::Quit,
        'h' => Action::PrevEntry,
        'l' => Action::NextEntry,
        'k' => Action::ScrollUp,
        'j' => Action::ScrollDown,
        '1' => Action::CycleFilter { field: TagField::Tag1, forward: true },
        '!' => Action::CycleFilter { field: TagField::Tag1, forward: false },
        '2' => Action::CycleFilter { field: TagField::Tag2, forward: true },
        '@' => Action::CycleFilter { field: TagField::Tag2, forward: false },
        '0' => Action::ResetFilters,
        'r' => Action::ToggleRaw,
        'g' => Action::StartJump,
        'o' => Action::StartOpen,
        _ => Action::None,
    }
}

fn prompt_key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Cancel,
        (KeyCode::Enter, _) => Action::Submit,
        (KeyCode::Backspace, _) => Action::DeleteChar,
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::InputChar(c)
        }
        _ => Action::None,
    }
}
