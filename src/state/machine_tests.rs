//! Tests for the view state machine dispatch and background results.

use super::*;
use crate::macros::default_catalog;
use crate::model::{CoreProtectLogEntry, Elapsed, LogEntry, MenuEntry};
use chrono::NaiveTime;
use crossterm::event::{KeyCode, KeyModifiers};

fn machine() -> ViewStateMachine {
    ViewStateMachine::new(Arc::new(default_catalog()))
}

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn std_entries(n: usize) -> Vec<LogEntry> {
    (0..n)
        .map(|i| LogEntry::new("10:00:00", "main", "INFO", format!("line {i}")))
        .collect()
}

/// Open `path` through the menu and return the issued request id.
fn open(m: &ViewStateMachine, state: &mut AppState, path: &str) -> u64 {
    m.update(state, AppEvent::ScanCompleted(Ok(vec![path.to_string()])));
    state.menu.cursor = 0;
    let effects = m.update(state, key(KeyCode::Enter));
    match effects.as_slice() {
        [Effect::LoadLog { request_id, .. }] => *request_id,
        other => panic!("expected LoadLog, got {other:?}"),
    }
}

mod global {
    use super::*;

    #[test]
    fn ctrl_c_quits_from_every_screen() {
        let m = machine();
        for screen in [
            Screen::Menu,
            Screen::LogList,
            Screen::SaveFilenameInput,
            Screen::MacroList,
            Screen::MacroParameterInput,
            Screen::ParameterSelection,
            Screen::ParameterValueInput,
            Screen::CountdownInput,
            Screen::CountdownDisplay,
        ] {
            let mut state = AppState::new(false);
            state.screen = screen;
            let effects = m.update(
                &mut state,
                AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            );
            assert_eq!(effects, vec![Effect::Quit], "screen {screen:?}");
        }
    }

    #[test]
    fn resize_recomputes_geometry() {
        let m = machine();
        let mut state = AppState::new(false);
        m.update(&mut state, AppEvent::Resize(120, 40));
        assert_eq!(state.geometry, Geometry::new(120, 40));
        assert_eq!(state.geometry.left_pane_width, 40);
    }

    #[test]
    fn rescan_tick_requests_scan() {
        let m = machine();
        let mut state = AppState::new(false);
        assert_eq!(m.update(&mut state, AppEvent::RescanTick), vec![Effect::Scan]);
    }

    #[test]
    fn filter_focus_routes_keys_to_filter_box() {
        let m = machine();
        let mut state = AppState::new(false);
        m.update(&mut state, key(KeyCode::Tab));
        m.update(&mut state, key(KeyCode::Char('j')));
        assert_eq!(state.filters.input, "j");
        assert_eq!(state.menu.cursor, 0);
    }
}

mod scanning {
    use super::*;

    #[test]
    fn scan_rebuilds_menu_and_clamps_cursor() {
        let m = machine();
        let mut state = AppState::new(false);
        m.update(
            &mut state,
            AppEvent::ScanCompleted(Ok(vec!["a.log".into(), "b.log".into(), "c.log".into()])),
        );
        state.menu.cursor = 5;
        m.update(&mut state, AppEvent::ScanCompleted(Ok(vec!["a.log".into()])));
        assert_eq!(state.menu.cursor, 3);
        assert_eq!(state.menu.entries.last(), Some(&MenuEntry::Exit));
    }

    #[test]
    fn scan_error_is_surfaced_then_cleared() {
        let m = machine();
        let mut state = AppState::new(false);
        m.update(&mut state, AppEvent::ScanCompleted(Err("permission denied".into())));
        let notice = state.last_error.clone().expect("error");
        assert_eq!(notice.origin, ErrorOrigin::Scan);
        assert!(notice.message.contains("permission denied"));

        m.update(&mut state, AppEvent::ScanCompleted(Ok(vec![])));
        assert!(state.last_error.is_none());
    }

    #[test]
    fn scan_success_keeps_load_errors() {
        let m = machine();
        let mut state = AppState::new(false);
        state.set_error(ErrorOrigin::Load, "bad file");
        m.update(&mut state, AppEvent::ScanCompleted(Ok(vec![])));
        assert!(state.last_error.is_some());
    }
}

mod loading {
    use super::*;

    #[test]
    fn matching_result_fills_standard_entries() {
        let m = machine();
        let mut state = AppState::new(false);
        let id = open(&m, &mut state, "logs/latest.log");

        m.update(
            &mut state,
            AppEvent::EntriesLoaded {
                request_id: id,
                path: "logs/latest.log".into(),
                result: Ok(LoadedEntries::Standard(std_entries(3))),
            },
        );

        assert_eq!(state.log_view.standard.len(), 3);
        assert!(state.log_view.coreprotect.is_empty());
        assert!(!state.log_view.loading);
    }

    #[test]
    fn stale_request_is_ignored() {
        let m = machine();
        let mut state = AppState::new(false);
        let first = open(&m, &mut state, "logs/latest.log");
        state.focus = Focus::FilterInput;
        state.filters.input = "warn".into();
        m.update(&mut state, key(KeyCode::Enter));
        assert_ne!(state.log_view.request_id, first);

        m.update(
            &mut state,
            AppEvent::EntriesLoaded {
                request_id: first,
                path: "logs/latest.log".into(),
                result: Ok(LoadedEntries::Standard(std_entries(5))),
            },
        );
        assert!(state.log_view.standard.is_empty());
        assert!(state.log_view.loading);
    }

    #[test]
    fn result_for_other_mode_is_ignored() {
        let m = machine();
        let mut state = AppState::new(true);
        let id = open(&m, &mut state, "logs/latest.log");
        m.update(
            &mut state,
            AppEvent::EntriesLoaded {
                request_id: id,
                path: "logs/latest.log".into(),
                result: Ok(LoadedEntries::Standard(std_entries(2))),
            },
        );
        assert!(state.log_view.standard.is_empty());
    }

    #[test]
    fn coreprotect_result_fills_coreprotect_entries() {
        let m = machine();
        let mut state = AppState::new(true);
        let id = open(&m, &mut state, "logs/latest.log");
        let entry =
            CoreProtectLogEntry::new(Elapsed::Hours(1.0), "steve", "hi", "raw", NaiveTime::MIN, 0);
        m.update(
            &mut state,
            AppEvent::EntriesLoaded {
                request_id: id,
                path: "logs/latest.log".into(),
                result: Ok(LoadedEntries::CoreProtect(vec![entry])),
            },
        );
        assert_eq!(state.log_view.coreprotect.len(), 1);
        assert_eq!(state.active_entry_count(), 1);
    }

    #[test]
    fn load_error_is_surfaced() {
        let m = machine();
        let mut state = AppState::new(false);
        let id = open(&m, &mut state, "logs/gone.log");
        m.update(
            &mut state,
            AppEvent::EntriesLoaded {
                request_id: id,
                path: "logs/gone.log".into(),
                result: Err("file not found".into()),
            },
        );
        let notice = state.last_error.expect("error");
        assert_eq!(notice.origin, ErrorOrigin::Load);
        assert_eq!(state.screen, Screen::LogList);
    }

    #[test]
    fn log_list_filter_reload_keeps_screen() {
        let m = machine();
        let mut state = AppState::new(false);
        open(&m, &mut state, "logs/latest.log");
        m.update(&mut state, key(KeyCode::Tab));
        for c in "steve".chars() {
            m.update(&mut state, key(KeyCode::Char(c)));
        }
        let effects = m.update(&mut state, key(KeyCode::Enter));
        assert!(matches!(
            effects.as_slice(),
            [Effect::LoadLog { filters, .. }] if filters == &vec!["steve".to_string()]
        ));
        assert_eq!(state.screen, Screen::LogList);
    }
}

mod macro_events {
    use super::*;

    #[test]
    fn macro_failure_sets_error() {
        let m = machine();
        let mut state = AppState::new(false);
        m.update(
            &mut state,
            AppEvent::MacroFinished {
                name: "CoreProtect Pager".into(),
                result: Err("invalid page range".into()),
            },
        );
        let notice = state.last_error.expect("error");
        assert_eq!(notice.origin, ErrorOrigin::Macro);
        assert_eq!(
            notice.message,
            "Macro 'CoreProtect Pager' failed: invalid page range"
        );
    }

    #[test]
    fn parameterless_macro_goes_straight_to_countdown() {
        let m = machine();
        let mut state = AppState::new(false);
        let macros_index = state
            .menu
            .entries
            .iter()
            .position(|e| *e == MenuEntry::Macros)
            .expect("macros entry");
        state.menu.cursor = macros_index;

        m.update(&mut state, key(KeyCode::Enter));
        assert_eq!(state.screen, Screen::MacroList);
        m.update(&mut state, key(KeyCode::Enter));
        assert_eq!(state.screen, Screen::CountdownInput);
    }
}
