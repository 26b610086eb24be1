//! Keyboard handler for the filter text box.
//!
//! Active on the menu and log list whenever focus is [`Focus::FilterInput`].

use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

use crate::state::app_state::{AppState, Focus, Screen};
use crate::state::event::Effect;
use crate::state::input::{edit_buffer, is_ctrl};

/// Handle a key while the filter box has focus.
///
/// `q` quits only while the buffer is empty; otherwise it is typed.
/// Enter commits the buffer as a new filter. Ctrl+U clears all filters.
pub fn handle_filter_key(state: &mut AppState, key: KeyEvent) -> Vec<Effect> {
    if is_ctrl(&key, 'u') {
        state.filters.active.clear();
        debug!("Filters cleared");
        return reload_if_viewing(state);
    }

    match key.code {
        KeyCode::Tab | KeyCode::Esc => {
            state.focus = Focus::LogFileList;
            Vec::new()
        }
        KeyCode::Char('q') if state.filters.input.is_empty() => vec![Effect::Quit],
        KeyCode::Enter => {
            if state.filters.input.is_empty() {
                return Vec::new();
            }
            let filter = std::mem::take(&mut state.filters.input);
            debug!(filter = %filter, "Filter added");
            state.filters.active.push(filter);
            reload_if_viewing(state)
        }
        _ => {
            edit_buffer(&mut state.filters.input, &key);
            Vec::new()
        }
    }
}

fn reload_if_viewing(state: &mut AppState) -> Vec<Effect> {
    if state.screen == Screen::LogList && !state.coreprotect_mode {
        state.begin_load().into_iter().collect()
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn typing(screen: Screen) -> AppState {
        let mut state = AppState::new(false);
        state.screen = screen;
        state.focus = Focus::FilterInput;
        state
    }

    #[test]
    fn q_with_empty_buffer_quits() {
        let mut state = typing(Screen::Menu);
        assert_eq!(
            handle_filter_key(&mut state, key(KeyCode::Char('q'))),
            vec![Effect::Quit]
        );
    }

    #[test]
    fn q_with_text_is_typed() {
        let mut state = typing(Screen::Menu);
        handle_filter_key(&mut state, key(KeyCode::Char('s')));
        let effects = handle_filter_key(&mut state, key(KeyCode::Char('q')));
        assert!(effects.is_empty());
        assert_eq!(state.filters.input, "sq");
    }

    #[test]
    fn enter_on_menu_commits_without_reload() {
        let mut state = typing(Screen::Menu);
        state.filters.input = "steve".into();
        let effects = handle_filter_key(&mut state, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(state.filters.active, vec!["steve"]);
        assert!(state.filters.input.is_empty());
    }

    #[test]
    fn enter_on_log_list_reloads_with_new_filters() {
        let mut state = typing(Screen::LogList);
        state.log_view.active_log = Some("logs/latest.log".into());
        state.filters.active = vec!["warn".into()];
        state.filters.input = "steve".into();

        let effects = handle_filter_key(&mut state, key(KeyCode::Enter));

        assert!(matches!(
            effects.as_slice(),
            [Effect::LoadLog { filters, .. }] if filters == &vec!["warn".to_string(), "steve".to_string()]
        ));
    }

    #[test]
    fn enter_with_empty_buffer_does_nothing() {
        let mut state = typing(Screen::LogList);
        state.log_view.active_log = Some("logs/latest.log".into());
        assert!(handle_filter_key(&mut state, key(KeyCode::Enter)).is_empty());
        assert!(state.filters.active.is_empty());
    }

    #[test]
    fn tab_and_esc_return_focus() {
        for code in [KeyCode::Tab, KeyCode::Esc] {
            let mut state = typing(Screen::Menu);
            handle_filter_key(&mut state, key(code));
            assert_eq!(state.focus, Focus::LogFileList);
        }
    }

    #[test]
    fn ctrl_u_clears_filters() {
        let mut state = typing(Screen::Menu);
        state.filters.active = vec!["a".into(), "b".into()];
        handle_filter_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
        );
        assert!(state.filters.active.is_empty());
    }
}
