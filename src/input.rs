//! Keyboard input handling.
//!
//! Maps crossterm key events onto viewer actions:
//! - `n g e s b d t` select a filter mode
//! - `q` quits
//! - Ctrl+C interrupts (raw mode swallows the signal, so it arrives as a key)

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::filters::FilterMode;

/// Result of handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Switch to a filter mode
    SetMode(FilterMode),
    /// Stop the viewer
    Quit,
    /// Stop the viewer because the user interrupted it
    Interrupt,
    /// Key is not bound
    None,
}

/// Handle a key event.
///
/// Only plain lowercase keys are bound; anything with Ctrl or Alt held,
/// other than Ctrl+C, is ignored. Key releases are ignored too.
pub fn handle_key_event(event: KeyEvent) -> KeyAction {
    let KeyEvent {
        code,
        modifiers,
        kind,
        ..
    } = event;

    if kind == KeyEventKind::Release {
        return KeyAction::None;
    }

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') | KeyCode::Char('C') => KeyAction::Interrupt,
            _ => KeyAction::None,
        };
    }

    if modifiers.contains(KeyModifiers::ALT) {
        return KeyAction::None;
    }

    match code {
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char(c) => FilterMode::from_key(c)
            .map(KeyAction::SetMode)
            .unwrap_or(KeyAction::None),
        _ => KeyAction::None,
    }
}
