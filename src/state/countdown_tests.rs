//! Tests for the countdown screens.

use super::*;
use crate::macros::{default_catalog, hello, pager};
use crate::model::MacroParams;
use crossterm::event::KeyModifiers;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn prompt_for(name: &str) -> AppState {
    let catalog = default_catalog();
    let mut state = AppState::new(false);
    state.wizard = MacroWizard::for_macro(catalog.find(name).expect("macro"));
    state.previous_screen = Screen::MacroList;
    state.go_to(Screen::CountdownInput);
    state
}

fn type_str(state: &mut AppState, text: &str) {
    for c in text.chars() {
        handle_countdown_input_key(state, key(KeyCode::Char(c)));
    }
}

mod prompt {
    use super::*;

    #[test]
    fn empty_input_is_rejected() {
        let mut state = prompt_for(hello::NAME);
        let effects = handle_countdown_input_key(&mut state, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(state.screen, Screen::CountdownInput);
        assert_eq!(
            state.countdown.message,
            Some(StatusMessage::error(EMPTY_TIME_MESSAGE))
        );
    }

    #[test]
    fn non_positive_input_is_rejected() {
        for bad in ["0", "-2", "abc", "1.5"] {
            let mut state = prompt_for(hello::NAME);
            type_str(&mut state, bad);
            handle_countdown_input_key(&mut state, key(KeyCode::Enter));
            assert_eq!(state.screen, Screen::CountdownInput, "input {bad:?}");
            assert_eq!(
                state.countdown.message,
                Some(StatusMessage::error(INVALID_TIME_MESSAGE))
            );
        }
    }

    #[test]
    fn valid_input_starts_timer() {
        let mut state = prompt_for(hello::NAME);
        type_str(&mut state, "3");
        let effects = handle_countdown_input_key(&mut state, key(KeyCode::Enter));
        assert_eq!(effects, vec![Effect::StartCountdown]);
        assert_eq!(state.screen, Screen::CountdownDisplay);
        assert_eq!(state.countdown.remaining, 3);
    }

    #[test]
    fn esc_restores_previous_screen() {
        let mut state = prompt_for(hello::NAME);
        type_str(&mut state, "9");
        handle_countdown_input_key(&mut state, key(KeyCode::Esc));
        assert_eq!(state.screen, Screen::MacroList);
        assert!(state.countdown.input.is_empty());
    }
}

mod running {
    use super::*;

    fn running(name: &str, seconds: &str) -> AppState {
        let mut state = prompt_for(name);
        type_str(&mut state, seconds);
        handle_countdown_input_key(&mut state, key(KeyCode::Enter));
        state
    }

    #[test]
    fn three_ticks_run_macro_exactly_once() {
        let catalog = default_catalog();
        let mut state = running(hello::NAME, "3");

        assert!(handle_countdown_tick(&mut state, &catalog).is_empty());
        assert_eq!(state.countdown.remaining, 2);
        assert!(handle_countdown_tick(&mut state, &catalog).is_empty());
        assert_eq!(state.countdown.remaining, 1);

        let effects = handle_countdown_tick(&mut state, &catalog);
        assert_eq!(
            effects,
            vec![
                Effect::StopCountdown,
                Effect::RunMacro {
                    name: hello::NAME.to_string(),
                    params: MacroParams::new(),
                },
            ]
        );
        assert_eq!(state.screen, Screen::Menu);
        assert!(state.wizard.macro_name.is_none());

        // Late tick after completion only stops the timer.
        assert_eq!(
            handle_countdown_tick(&mut state, &catalog),
            vec![Effect::StopCountdown]
        );
    }

    #[test]
    fn pager_runs_with_default_paging_params() {
        let catalog = default_catalog();
        let mut state = prompt_for(pager::NAME);
        type_str(&mut state, "1");
        handle_countdown_input_key(&mut state, key(KeyCode::Enter));

        let effects = handle_countdown_tick(&mut state, &catalog);

        let Some(Effect::RunMacro { params, .. }) = effects.last() else {
            panic!("expected RunMacro, got {effects:?}");
        };
        let expected: MacroParams = [("startPage", "1"), ("endPage", "5"), ("delayMs", "500")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(params, &expected);
    }

    #[test]
    fn esc_cancels_without_running() {
        let mut state = running(hello::NAME, "5");
        handle_countdown_display_key(&mut state, key(KeyCode::Char('x')));
        assert_eq!(state.screen, Screen::CountdownDisplay);

        let effects = handle_countdown_display_key(&mut state, key(KeyCode::Esc));
        assert_eq!(effects, vec![Effect::StopCountdown]);
        assert_eq!(state.screen, Screen::Menu);
        assert_eq!(state.countdown, CountdownState::default());
        assert_eq!(state.wizard, MacroWizard::default());
    }
}
