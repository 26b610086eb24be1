//! Keyboard handler for the macro list.

use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

use crate::model::MacroCatalog;
use crate::state::app_state::{cursor_down, cursor_up, AppState, CountdownState, MacroWizard, Screen};
use crate::state::event::Effect;

/// Handle a key on the macro list.
///
/// Enter on a macro without any parameters goes straight to the countdown
/// prompt; otherwise the parameter form opens with defaults filled in.
pub fn handle_macro_list_key(
    state: &mut AppState,
    key: KeyEvent,
    catalog: &MacroCatalog,
) -> Vec<Effect> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => cursor_up(&mut state.macro_cursor, 1),
        KeyCode::Down | KeyCode::Char('j') => {
            cursor_down(&mut state.macro_cursor, 1, catalog.len())
        }
        KeyCode::Esc => state.go_to(Screen::Menu),
        KeyCode::Enter => {
            if let Some(selected) = catalog.get(state.macro_cursor) {
                debug!(name = %selected.name, "Macro selected");
                state.wizard = MacroWizard::for_macro(selected);
                state.countdown = CountdownState::default();
                if selected.needs_no_input() {
                    state.previous_screen = Screen::MacroList;
                    state.go_to(Screen::CountdownInput);
                } else {
                    state.go_to(Screen::MacroParameterInput);
                }
            }
        }
        _ => {}
    }
    Vec::new()
}
