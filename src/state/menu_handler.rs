//! Keyboard handler for the main menu.

use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

use crate::model::MenuEntry;
use crate::state::app_state::{cursor_down, cursor_up, AppState, Focus, Screen};
use crate::state::event::Effect;

/// Handle a key on the menu while the file list has focus.
///
/// # Key Bindings
/// - Up/k, Down/j: move the cursor (clamped)
/// - Tab: focus the filter box (not in CoreProtect mode)
/// - Enter: activate the selected entry
/// - q: quit
pub fn handle_menu_key(state: &mut AppState, key: KeyEvent) -> Vec<Effect> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            cursor_up(&mut state.menu.cursor, 1);
            Vec::new()
        }
        KeyCode::Down | KeyCode::Char('j') => {
            cursor_down(&mut state.menu.cursor, 1, state.menu.entries.len());
            Vec::new()
        }
        KeyCode::Tab => {
            if !state.coreprotect_mode {
                state.focus = Focus::FilterInput;
            }
            Vec::new()
        }
        KeyCode::Char('q') => vec![Effect::Quit],
        KeyCode::Enter => activate_selected(state),
        _ => Vec::new(),
    }
}

fn activate_selected(state: &mut AppState) -> Vec<Effect> {
    let Some(entry) = state.menu.selected().cloned() else {
        return Vec::new();
    };
    debug!(?entry, "Menu entry activated");

    match entry {
        MenuEntry::Exit => vec![Effect::Quit],
        MenuEntry::Macros => {
            state.macro_cursor = 0;
            state.save.message = None;
            state.last_error = None;
            state.go_to(Screen::MacroList);
            Vec::new()
        }
        MenuEntry::CoreProtectToggle => {
            state.toggle_coreprotect();
            Vec::new()
        }
        MenuEntry::LogFile(path) => open_log(state, path),
    }
}

/// Switch to the log list and start loading `path`.
pub fn open_log(state: &mut AppState, path: String) -> Vec<Effect> {
    state.go_to(Screen::LogList);
    state.last_error = None;
    state.save.message = None;
    state.log_view.active_log = Some(path);
    state.begin_load().into_iter().collect()
}
