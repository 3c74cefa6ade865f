use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
};
use std::time::Instant;

use crate::app::App;
use crate::command::Command;

/// Keyboard protocol flags pushed while the popup is shown. Without them most
/// terminals send auto-repeat as plain presses and drop Shift on Enter.
pub fn keyboard_enhancement_flags() -> KeyboardEnhancementFlags {
    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
}

/// Map a key press to the command it triggers. Shift keeps the popup open
/// when opening a folder.
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    let keep_open = key.modifiers.contains(KeyModifiers::SHIFT);

    let command = match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Command::EnterParent,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Command::EnterSelected,
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Command::SelectionUp,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Command::SelectionDown,
        KeyCode::Char('e') | KeyCode::Char('E') => Command::OpenCurrent { keep_open },
        KeyCode::Enter | KeyCode::Char(' ') => Command::OpenSelected { keep_open },
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Apply a terminal event to the app. Returns true when a redraw is needed.
pub fn handle_event(event: Event, app: &mut App) -> bool {
    match event {
        Event::Key(key) => match key.kind {
            KeyEventKind::Press => dispatch_key(key, app),
            KeyEventKind::Repeat => {
                if app.accept_repeat(Instant::now()) {
                    dispatch_key(key, app)
                } else {
                    false
                }
            }
            KeyEventKind::Release => false,
        },
        Event::Resize(_, _) => {
            app.needs_resize = true;
            true
        }
        Event::FocusGained | Event::FocusLost => true,
        _ => false,
    }
}

fn dispatch_key(key: KeyEvent, app: &mut App) -> bool {
    match command_for_key(key) {
        Some(command) => {
            log::debug!("Key {:?} -> {}", key.code, command);
            app.execute(command)
        }
        None => false,
    }
}
