//! Keybindings: Enter search, arrows/Tab suggestions, Esc dismiss, PgUp/PgDn/Home/End scroll,
//! Ctrl+T theme, Ctrl+Y copy, Ctrl+X clear history, Alt+digit rerun, Ctrl+C quit.

use crate::actions::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

pub const TICK_RATE: Duration = Duration::from_millis(80);

pub fn key_to_action(event: &KeyEvent, suggestions_visible: bool) -> Option<Action> {
    // Accept Press and Repeat (hold key); ignore Release so we don't double-handle.
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let (code, mods) = (event.code, event.modifiers);

    if mods.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('l') => Some(Action::ClearInput),
            KeyCode::Char('t') => Some(Action::ToggleTheme),
            KeyCode::Char('y') => Some(Action::CopyResult),
            KeyCode::Char('x') => Some(Action::ClearHistory),
            _ => None,
        };
    }

    if mods.contains(KeyModifiers::ALT) {
        if let KeyCode::Char(c) = code {
            if let Some(d) = c.to_digit(10) {
                // Alt+1 is the most recent entry, Alt+0 the tenth.
                let index = if d == 0 { 9 } else { d as usize - 1 };
                return Some(Action::RunHistory(index));
            }
        }
    }

    match code {
        KeyCode::Esc => Some(Action::DismissSuggestions),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Up if suggestions_visible => Some(Action::SuggestionPrev),
        KeyCode::Down if suggestions_visible => Some(Action::SuggestionNext),
        KeyCode::Tab if suggestions_visible => Some(Action::SuggestionNext),
        KeyCode::BackTab if suggestions_visible => Some(Action::SuggestionPrev),
        KeyCode::Up => Some(Action::ScrollUp),
        KeyCode::Down => Some(Action::ScrollDown),
        KeyCode::PageUp => Some(Action::ScrollPageUp),
        KeyCode::PageDown => Some(Action::ScrollPageDown),
        KeyCode::Home => Some(Action::ScrollTop),
        KeyCode::End => Some(Action::ScrollBottom),
        // Any other character goes to input (allow Alt for accented chars; only block Cmd).
        KeyCode::Char(c) if !mods.contains(KeyModifiers::SUPER) => Some(Action::Char(c)),
        _ => None,
    }
}
