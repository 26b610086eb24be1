//! Text buffer editing shared by every input field.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Apply a character or backspace key to `buffer`.
///
/// Returns `true` if the key edited the buffer. Control and Alt chords are
/// left for the caller.
pub fn edit_buffer(buffer: &mut String, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !has_command_modifier(key) => {
            buffer.push(c);
            true
        }
        KeyCode::Backspace => {
            buffer.pop();
            true
        }
        _ => false,
    }
}

/// True for `ctrl+<c>`.
pub fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

fn has_command_modifier(key: &KeyEvent) -> bool {
    key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
