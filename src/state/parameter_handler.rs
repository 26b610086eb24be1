//! Macro parameter wizard.
//!
//! Three screens share the [`MacroWizard`](crate::state::MacroWizard) state:
//! - the form of declared parameters (plus the add-parameter slot),
//! - the extra parameter picker,
//! - the value prompt for the picked extra parameter.
//!
//! Declared parameter buffers and lookup constraints never mix here; they
//! are merged only when the countdown finishes.

use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

use crate::macros::pager::{parse_radius, validate_time};
use crate::model::{ExtraKind, Macro, MacroCatalog};
use crate::state::app_state::{
    cursor_down, cursor_up, AppState, CountdownState, MacroWizard, Screen, StatusMessage,
};
use crate::state::event::Effect;
use crate::state::input::{edit_buffer, is_ctrl};

/// Shown when Enter is pressed on an empty value prompt.
pub const EMPTY_VALUE_MESSAGE: &str = "Value cannot be empty.";

fn selected_macro<'a>(state: &AppState, catalog: &'a MacroCatalog) -> Option<&'a Macro> {
    state
        .wizard
        .macro_name
        .as_deref()
        .and_then(|name| catalog.find(name))
}

/// Drop the wizard and go back to the macro list.
fn abandon(state: &mut AppState) {
    state.wizard = MacroWizard::default();
    state.go_to(Screen::MacroList);
}

/// Finalize declared parameters and open the countdown prompt.
fn finish(state: &mut AppState, m: &Macro) {
    state.wizard.finalize(m);
    state.countdown = CountdownState::default();
    state.previous_screen = Screen::MacroParameterInput;
    state.go_to(Screen::CountdownInput);
}

fn open_selection(state: &mut AppState) {
    state.wizard.selection_cursor = 0;
    state.go_to(Screen::ParameterSelection);
}

// ===== Parameter form =====

/// Handle a key on the parameter form.
///
/// # Key Bindings
/// - Tab / Shift+Tab: next / previous field, wrapping
/// - Up / Down: previous / next field, clamped
/// - Enter: on the add slot opens the picker; elsewhere finalizes
/// - Ctrl+E: open the picker (macros with extra parameters only)
/// - Esc: discard and return to the macro list
pub fn handle_form_key(state: &mut AppState, key: KeyEvent, catalog: &MacroCatalog) -> Vec<Effect> {
    let Some(m) = selected_macro(state, catalog) else {
        abandon(state);
        return Vec::new();
    };
    let declared = m.parameters.len();
    let field_count = declared + usize::from(m.supports_extra_parameters());
    let cursor = state.wizard.field_cursor;

    if is_ctrl(&key, 'e') {
        if m.supports_extra_parameters() {
            open_selection(state);
        }
        return Vec::new();
    }

    match key.code {
        KeyCode::Esc => abandon(state),
        KeyCode::Tab if field_count > 0 => {
            state.wizard.field_cursor = (cursor + 1) % field_count;
        }
        KeyCode::BackTab if field_count > 0 => {
            state.wizard.field_cursor = (cursor + field_count - 1) % field_count;
        }
        KeyCode::Up => cursor_up(&mut state.wizard.field_cursor, 1),
        KeyCode::Down => cursor_down(&mut state.wizard.field_cursor, 1, field_count),
        KeyCode::Enter => {
            if cursor >= declared && m.supports_extra_parameters() {
                open_selection(state);
            } else {
                debug!(name = %m.name, "Parameters finalized");
                finish(state, m);
            }
        }
        _ => {
            if let Some(param) = m.parameters.get(cursor) {
                let buffer = state
                    .wizard
                    .field_inputs
                    .entry(param.name.clone())
                    .or_default();
                edit_buffer(buffer, &key);
            }
        }
    }
    Vec::new()
}

// ===== Parameter selection =====

/// Handle a key on the extra parameter picker.
///
/// Enter on an action tag adds it right away; other kinds open the value
/// prompt. Ctrl+D finalizes and jumps to the countdown prompt.
pub fn handle_selection_key(
    state: &mut AppState,
    key: KeyEvent,
    catalog: &MacroCatalog,
) -> Vec<Effect> {
    let Some(m) = selected_macro(state, catalog) else {
        abandon(state);
        return Vec::new();
    };

    if is_ctrl(&key, 'd') {
        finish(state, m);
        return Vec::new();
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => cursor_up(&mut state.wizard.selection_cursor, 1),
        KeyCode::Down | KeyCode::Char('j') => cursor_down(
            &mut state.wizard.selection_cursor,
            1,
            m.extra_parameters.len(),
        ),
        KeyCode::Esc => state.go_to(Screen::MacroParameterInput),
        KeyCode::Enter => {
            let Some(extra) = m.extra_parameters.get(state.wizard.selection_cursor) else {
                return Vec::new();
            };
            match &extra.kind {
                ExtraKind::Action(tag) => {
                    state.wizard.message = Some(if state.wizard.lookup.add_action(tag) {
                        StatusMessage::success(format!("Added action: {tag}"))
                    } else {
                        StatusMessage::info(format!("Action already added: {tag}"))
                    });
                    state.go_to(Screen::MacroParameterInput);
                }
                _ => {
                    state.wizard.selected_extra = Some(extra.clone());
                    state.wizard.value_input.clear();
                    state.wizard.value_message = None;
                    state.go_to(Screen::ParameterValueInput);
                }
            }
        }
        _ => {}
    }
    Vec::new()
}

// ===== Parameter value =====

/// Handle a key on the value prompt.
///
/// Users accumulate and keep the prompt open. Radius and time overwrite
/// their single value after validation. Plain extras go straight into the
/// resolved parameter map.
pub fn handle_value_key(state: &mut AppState, key: KeyEvent) -> Vec<Effect> {
    match key.code {
        KeyCode::Esc => {
            state.wizard.value_input.clear();
            state.wizard.value_message = None;
            state.go_to(Screen::ParameterSelection);
        }
        KeyCode::Enter => submit_value(state),
        _ => {
            edit_buffer(&mut state.wizard.value_input, &key);
        }
    }
    Vec::new()
}

fn submit_value(state: &mut AppState) {
    let value = state.wizard.value_input.trim().to_string();
    if value.is_empty() {
        state.wizard.value_message = Some(StatusMessage::error(EMPTY_VALUE_MESSAGE));
        return;
    }
    let Some(extra) = state.wizard.selected_extra.clone() else {
        state.go_to(Screen::ParameterSelection);
        return;
    };

    let wizard = &mut state.wizard;
    let done = match extra.kind {
        ExtraKind::Users => {
            wizard.lookup.users.push(value.clone());
            wizard.value_input.clear();
            wizard.value_message = Some(StatusMessage::success(format!("Added user: {value}")));
            false
        }
        ExtraKind::Radius => match parse_radius(&value) {
            Ok(radius) => {
                wizard.lookup.radius = Some(radius);
                wizard.message = Some(StatusMessage::success(format!("Radius set to {radius}")));
                true
            }
            Err(err) => {
                wizard.value_message = Some(StatusMessage::error(err.to_string()));
                false
            }
        },
        ExtraKind::Time => match validate_time(&value) {
            Ok(()) => {
                wizard.message = Some(StatusMessage::success(format!("Time set to {value}")));
                wizard.lookup.time = Some(value);
                true
            }
            Err(err) => {
                wizard.value_message = Some(StatusMessage::error(err.to_string()));
                false
            }
        },
        ExtraKind::Action(_) => {
            wizard.lookup.add_action(&value);
            true
        }
        ExtraKind::Plain(name) => {
            wizard.message = Some(StatusMessage::success(format!("Set {name}")));
            wizard.resolved.insert(name, value);
            true
        }
    };

    if done {
        state.wizard.value_input.clear();
        state.wizard.value_message = None;
        state.wizard.selected_extra = None;
        state.go_to(Screen::ParameterSelection);
    }
}

#[cfg(test)]
#[path = "macro_wizard_tests.rs"]
mod tests;
