use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{Mode, Section};

/// High-level action derived from a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    HalfPageDown,
    HalfPageUp,
    JumpToTop,
    JumpToBottom,
    JumpSection(Section),
    Refresh,
    StartFilter,
    InputChar(char),
    Backspace,
    Confirm,
    Cancel,
    None,
}

/// Map a key press to an action, depending on the current mode.
pub fn handle_key_event(key: KeyEvent, mode: Mode) -> Action {
    match mode {
        Mode::Filter => match key.code {
            KeyCode::Esc => Action::Cancel,
            KeyCode::Enter => Action::Confirm,
            KeyCode::Backspace => Action::Backspace,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Action::InputChar(c)
            }
            _ => Action::None,
        },
        Mode::Normal => match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Action::HalfPageDown
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Action::HalfPageUp
            }
            KeyCode::Char('g') => Action::JumpToTop,
            KeyCode::Char('G') => Action::JumpToBottom,
            KeyCode::Char('1') => Action::JumpSection(Section::Overview),
            KeyCode::Char('2') => Action::JumpSection(Section::Performance),
            KeyCode::Char('3') => Action::JumpSection(Section::Clusters),
            KeyCode::Char('4') => Action::JumpSection(Section::Recommendations),
            KeyCode::Char('r') => Action::Refresh,
            KeyCode::Char('/') => Action::StartFilter,
            KeyCode::Esc => Action::Cancel,
            _ => Action::None,
        },
    }
}
