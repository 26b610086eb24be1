//! Keyboard handler for the log list.

use crossterm::event::{KeyCode, KeyEvent};

use crate::state::app_state::{cursor_down, cursor_up, AppState, Focus, Screen};
use crate::state::event::Effect;

/// Handle a key on the log list while the list has focus.
///
/// # Key Bindings
/// - Up/k, Down/j: move one entry
/// - PageUp/PageDown: move one page
/// - Home/End: jump to first/last entry
/// - e: save the displayed entries (only when there are any)
/// - Tab: focus the filter box (forced off in CoreProtect mode)
/// - Esc: back to the menu
/// - q: quit
pub fn handle_log_list_key(state: &mut AppState, key: KeyEvent) -> Vec<Effect> {
    let len = state.active_entry_count();
    let page = state.geometry.page_size();
    let cursor = &mut state.log_view.cursor;

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => cursor_up(cursor, 1),
        KeyCode::Down | KeyCode::Char('j') => cursor_down(cursor, 1, len),
        KeyCode::PageUp => cursor_up(cursor, page),
        KeyCode::PageDown => cursor_down(cursor, page, len),
        KeyCode::Home => *cursor = 0,
        KeyCode::End => *cursor = len.saturating_sub(1),
        KeyCode::Char('e') => {
            if len > 0 {
                state.previous_screen = Screen::LogList;
                state.save.filename.clear();
                state.save.message = None;
                state.go_to(Screen::SaveFilenameInput);
            }
        }
        KeyCode::Tab => {
            state.focus = if state.coreprotect_mode {
                Focus::LogFileList
            } else {
                Focus::FilterInput
            };
        }
        KeyCode::Esc => {
            state.save.message = None;
            state.go_to(Screen::Menu);
        }
        KeyCode::Char('q') => return vec![Effect::Quit],
        _ => {}
    }
    Vec::new()
}
