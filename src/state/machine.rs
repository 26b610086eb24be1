//! The view state machine.
//!
//! [`ViewStateMachine::update`] consumes one [`AppEvent`], mutates the
//! [`AppState`] in place and returns the effects the shell must perform.
//! It never blocks and never performs I/O.

use std::sync::Arc;

use crossterm::event::KeyEvent;
use tracing::{debug, warn};

use crate::model::MacroCatalog;
use crate::state::app_state::{AppState, ErrorOrigin, Focus, Geometry, Screen};
use crate::state::countdown_handler::{
    handle_countdown_display_key, handle_countdown_input_key, handle_countdown_tick,
};
use crate::state::event::{AppEvent, Effect, LoadedEntries};
use crate::state::filter_handler::handle_filter_key;
use crate::state::input::is_ctrl;
use crate::state::log_list_handler::handle_log_list_key;
use crate::state::macro_handler::handle_macro_list_key;
use crate::state::menu_handler::handle_menu_key;
use crate::state::parameter_handler::{handle_form_key, handle_selection_key, handle_value_key};
use crate::state::save_handler::{handle_save_completed, handle_save_key};

/// Transition function over [`AppState`], holding the injected macro catalog.
#[derive(Debug, Clone)]
pub struct ViewStateMachine {
    catalog: Arc<MacroCatalog>,
}

impl ViewStateMachine {
    /// Machine over the given catalog.
    pub fn new(catalog: Arc<MacroCatalog>) -> Self {
        Self { catalog }
    }

    /// The catalog the macro screens list.
    pub fn catalog(&self) -> &MacroCatalog {
        &self.catalog
    }

    /// Process one event.
    pub fn update(&self, state: &mut AppState, event: AppEvent) -> Vec<Effect> {
        match event {
            AppEvent::Key(key) => self.handle_key(state, key),
            AppEvent::Resize(width, height) => {
                state.geometry = Geometry::new(width, height);
                Vec::new()
            }
            AppEvent::RescanTick => vec![Effect::Scan],
            AppEvent::ScanCompleted(result) => {
                apply_scan(state, result);
                Vec::new()
            }
            AppEvent::EntriesLoaded {
                request_id,
                path,
                result,
            } => {
                apply_loaded(state, request_id, &path, result);
                Vec::new()
            }
            AppEvent::SaveCompleted(result) => {
                handle_save_completed(state, result);
                Vec::new()
            }
            AppEvent::CountdownTick => handle_countdown_tick(state, &self.catalog),
            AppEvent::MacroFinished { name, result } => {
                match result {
                    Ok(()) => state.clear_error_from(ErrorOrigin::Macro),
                    Err(err) => {
                        warn!(name = %name, error = %err, "Macro failed");
                        state.set_error(ErrorOrigin::Macro, format!("Macro '{name}' failed: {err}"));
                    }
                }
                Vec::new()
            }
        }
    }

    fn handle_key(&self, state: &mut AppState, key: KeyEvent) -> Vec<Effect> {
        if is_ctrl(&key, 'c') {
            return vec![Effect::Quit];
        }

        let screen = state.screen;
        let effects = match screen {
            Screen::Menu | Screen::LogList if state.focus == Focus::FilterInput => {
                handle_filter_key(state, key)
            }
            Screen::Menu => handle_menu_key(state, key),
            Screen::LogList => handle_log_list_key(state, key),
            Screen::SaveFilenameInput => handle_save_key(state, key),
            Screen::MacroList => handle_macro_list_key(state, key, &self.catalog),
            Screen::MacroParameterInput => handle_form_key(state, key, &self.catalog),
            Screen::ParameterSelection => handle_selection_key(state, key, &self.catalog),
            Screen::ParameterValueInput => handle_value_key(state, key),
            Screen::CountdownInput => handle_countdown_input_key(state, key),
            Screen::CountdownDisplay => handle_countdown_display_key(state, key),
        };

        if state.screen != screen {
            debug!(from = ?screen, to = ?state.screen, "Screen transition");
        }
        effects
    }
}

fn apply_scan(state: &mut AppState, result: Result<Vec<String>, String>) {
    match result {
        Ok(files) => {
            state.menu.set_files(files);
            state.clear_error_from(ErrorOrigin::Scan);
        }
        Err(err) => {
            warn!(error = %err, "Scan failed");
            state.set_error(ErrorOrigin::Scan, format!("Error scanning logs: {err}"));
        }
    }
}

fn apply_loaded(
    state: &mut AppState,
    request_id: u64,
    path: &str,
    result: Result<LoadedEntries, String>,
) {
    if request_id != state.log_view.request_id
        || state.log_view.active_log.as_deref() != Some(path)
    {
        debug!(request_id, path, "Ignoring stale load result");
        return;
    }
    state.log_view.loading = false;

    match result {
        Ok(LoadedEntries::Standard(entries)) if !state.coreprotect_mode => {
            debug!(path, count = entries.len(), "Standard entries loaded");
            state.log_view.coreprotect.clear();
            state.log_view.standard = entries;
            state.log_view.cursor = 0;
            state.last_error = None;
        }
        Ok(LoadedEntries::CoreProtect(entries)) if state.coreprotect_mode => {
            debug!(path, count = entries.len(), "CoreProtect entries loaded");
            state.log_view.standard.clear();
            state.log_view.coreprotect = entries;
            state.log_view.cursor = 0;
            state.last_error = None;
        }
        Ok(_) => debug!(path, "Ignoring load result parsed under the other mode"),
        Err(err) => {
            warn!(path, error = %err, "Load failed");
            state.set_error(ErrorOrigin::Load, format!("Error loading {path}: {err}"));
        }
    }
}

#[cfg(test)]
#[path = "machine_tests.rs"]
mod tests;
