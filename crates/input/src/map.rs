//! Key mapping from terminal events to game actions.

use crate::types::{GameAction, Signal, UiAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Map keyboard input to front-end actions.
pub fn handle_key_event(key: KeyEvent) -> Option<UiAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Pads (numbers follow the 2x2 layout, letters the color names)
        KeyCode::Char('1') | KeyCode::Char('r') | KeyCode::Char('R') => {
            Some(UiAction::Game(GameAction::Press(Signal::Red)))
        }
        KeyCode::Char('2') | KeyCode::Char('b') | KeyCode::Char('B') => {
            Some(UiAction::Game(GameAction::Press(Signal::Blue)))
        }
        KeyCode::Char('3') | KeyCode::Char('g') | KeyCode::Char('G') => {
            Some(UiAction::Game(GameAction::Press(Signal::Green)))
        }
        KeyCode::Char('4') | KeyCode::Char('y') | KeyCode::Char('Y') => {
            Some(UiAction::Game(GameAction::Press(Signal::Yellow)))
        }

        // Controls
        KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N') => {
            Some(UiAction::Game(GameAction::Start))
        }
        KeyCode::Char('p') | KeyCode::Char('P') => Some(UiAction::Game(GameAction::Pause)),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(UiAction::Game(GameAction::Resume)),
        KeyCode::Char(' ') => Some(UiAction::TogglePause),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(UiAction::ToggleMute),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Terminal cell of a left-button press, if this is one.
pub fn left_click(event: &MouseEvent) -> Option<(u16, u16)> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some((event.column, event.row)),
        _ => None,
    }
}
