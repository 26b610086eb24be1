//! Countdown prompt and running countdown.

use crossterm::event::{KeyCode, KeyEvent};
use tracing::{debug, info};

use crate::model::MacroCatalog;
use crate::state::app_state::{AppState, CountdownState, MacroWizard, Screen, StatusMessage};
use crate::state::event::Effect;
use crate::state::input::edit_buffer;

/// Shown when Enter is pressed on an empty prompt.
pub const EMPTY_TIME_MESSAGE: &str = "Time cannot be empty";
/// Shown when the prompt is not a positive whole number.
pub const INVALID_TIME_MESSAGE: &str = "Invalid time - must be positive number";

/// Handle a key on the countdown prompt.
pub fn handle_countdown_input_key(state: &mut AppState, key: KeyEvent) -> Vec<Effect> {
    match key.code {
        KeyCode::Esc => {
            state.countdown = CountdownState::default();
            state.go_to(state.previous_screen);
            Vec::new()
        }
        KeyCode::Enter => {
            let raw = state.countdown.input.trim();
            if raw.is_empty() {
                state.countdown.message = Some(StatusMessage::error(EMPTY_TIME_MESSAGE));
                return Vec::new();
            }
            match raw.parse::<u32>() {
                Ok(seconds) if seconds > 0 => {
                    debug!(seconds, "Countdown started");
                    state.countdown.remaining = seconds;
                    state.countdown.message = None;
                    state.go_to(Screen::CountdownDisplay);
                    vec![Effect::StartCountdown]
                }
                _ => {
                    state.countdown.message = Some(StatusMessage::error(INVALID_TIME_MESSAGE));
                    Vec::new()
                }
            }
        }
        _ => {
            edit_buffer(&mut state.countdown.input, &key);
            Vec::new()
        }
    }
}

/// Handle a key while the countdown runs. Only Esc does anything.
pub fn handle_countdown_display_key(state: &mut AppState, key: KeyEvent) -> Vec<Effect> {
    if key.code != KeyCode::Esc {
        return Vec::new();
    }
    info!("Countdown cancelled");
    reset_to_menu(state);
    vec![Effect::StopCountdown]
}

/// Advance the countdown by one second.
///
/// At zero the selected macro runs with its merged parameters and the UI
/// returns to the menu. A tick outside the countdown screen only stops the
/// timer.
pub fn handle_countdown_tick(state: &mut AppState, catalog: &MacroCatalog) -> Vec<Effect> {
    if state.screen != Screen::CountdownDisplay {
        return vec![Effect::StopCountdown];
    }

    state.countdown.remaining = state.countdown.remaining.saturating_sub(1);
    if state.countdown.remaining > 0 {
        return Vec::new();
    }

    let run = state
        .wizard
        .macro_name
        .as_deref()
        .and_then(|name| catalog.find(name))
        .map(|m| Effect::RunMacro {
            name: m.name.clone(),
            params: state.wizard.execution_params(m),
        });

    reset_to_menu(state);
    std::iter::once(Effect::StopCountdown).chain(run).collect()
}

fn reset_to_menu(state: &mut AppState) {
    state.countdown = CountdownState::default();
    state.wizard = MacroWizard::default();
    state.go_to(Screen::Menu);
}

#[cfg(test)]
#[path = "countdown_tests.rs"]
mod tests;
