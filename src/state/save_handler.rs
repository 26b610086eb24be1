//! Save dialog handling.

use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::state::app_state::{AppState, Screen, StatusMessage};
use crate::state::event::Effect;
use crate::state::input::edit_buffer;

/// Shown when Enter is pressed with an empty filename.
pub const EMPTY_FILENAME_MESSAGE: &str = "Filename cannot be empty.";

/// Handle a key in the filename prompt.
pub fn handle_save_key(state: &mut AppState, key: KeyEvent) -> Vec<Effect> {
    match key.code {
        KeyCode::Esc => {
            state.save.filename.clear();
            state.save.message = None;
            state.go_to(state.previous_screen);
            Vec::new()
        }
        KeyCode::Enter => submit(state),
        _ => {
            edit_buffer(&mut state.save.filename, &key);
            Vec::new()
        }
    }
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    let filename = state.save.filename.trim().to_string();
    if filename.is_empty() {
        state.save.message = Some(StatusMessage::error(EMPTY_FILENAME_MESSAGE));
        return Vec::new();
    }
    match state.save_request() {
        Some(request) => vec![Effect::Save { request, filename }],
        None => {
            state.save.message = Some(StatusMessage::error("Error saving: no entries to save"));
            Vec::new()
        }
    }
}

/// Apply the outcome of a save.
///
/// Navigation only happens if the dialog is still open; a late result after
/// Esc just updates the message.
pub fn handle_save_completed(state: &mut AppState, result: Result<PathBuf, String>) {
    match result {
        Ok(path) => {
            let shown = path.to_string_lossy().replace('\\', "/");
            info!(path = %shown, "Save completed");
            state.save.message = Some(StatusMessage::success(format!("Logs saved to {shown}")));
            state.save.filename.clear();
        }
        Err(err) => {
            warn!(error = %err, "Save failed");
            state.save.message = Some(StatusMessage::error(format!("Error saving: {err}")));
        }
    }
    if state.screen == Screen::SaveFilenameInput {
        state.go_to(state.previous_screen);
    }
}
