//! Keystroke delivery backends.
//!
//! Macros never talk to the OS directly. They drive a [`Keyboard`], which
//! decides where keystrokes go.

use crate::model::MacroError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

/// Sink for macro keystrokes.
pub trait Keyboard: Send + Sync {
    /// Type a string as individual key presses.
    fn type_text(&self, text: &str) -> Result<(), MacroError>;

    /// Press and release Enter.
    fn tap_enter(&self) -> Result<(), MacroError>;

    /// Wait between commands.
    fn pause(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// One recorded keyboard action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keystroke {
    /// Text typed.
    Text(String),
    /// Enter pressed.
    Enter,
    /// Pause requested.
    Pause(Duration),
}

// ===== TranscriptKeyboard =====

/// Appends every keystroke to a transcript file and traces it.
///
/// This is the shipped backend: injecting keys into another window is
/// platform-specific and left to an external tool tailing the transcript.
#[derive(Debug)]
pub struct TranscriptKeyboard {
    path: PathBuf,
    lock: Mutex<()>,
}

impl TranscriptKeyboard {
    /// Transcript written to `path`. The parent directory is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Transcript location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, line: &str) -> Result<(), MacroError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| MacroError::Keyboard("transcript lock poisoned".into()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| MacroError::Keyboard(e.to_string()))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| MacroError::Keyboard(e.to_string()))?;
        writeln!(file, "{line}").map_err(|e| MacroError::Keyboard(e.to_string()))
    }
}

impl Keyboard for TranscriptKeyboard {
    fn type_text(&self, text: &str) -> Result<(), MacroError> {
        info!(text, "Macro typed text");
        self.append(&format!("TYPE {text}"))
    }

    fn tap_enter(&self) -> Result<(), MacroError> {
        info!("Macro pressed enter");
        self.append("ENTER")
    }
}

// ===== RecordingKeyboard =====

/// Keeps keystrokes in memory. Pauses are recorded, not slept.
#[derive(Debug, Default)]
pub struct RecordingKeyboard {
    strokes: Mutex<Vec<Keystroke>>,
}

impl RecordingKeyboard {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, in order.
    pub fn strokes(&self) -> Vec<Keystroke> {
        self.strokes
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    fn push(&self, stroke: Keystroke) -> Result<(), MacroError> {
        self.strokes
            .lock()
            .map_err(|_| MacroError::Keyboard("recorder lock poisoned".into()))?
            .push(stroke);
        Ok(())
    }
}

impl Keyboard for RecordingKeyboard {
    fn type_text(&self, text: &str) -> Result<(), MacroError> {
        self.push(Keystroke::Text(text.to_string()))
    }

    fn tap_enter(&self) -> Result<(), MacroError> {
        self.push(Keystroke::Enter)
    }

    fn pause(&self, duration: Duration) {
        let _ = self.push(Keystroke::Pause(duration));
    }
}
