//! Events consumed and effects produced by the state machine.

use crate::model::{CoreProtectLogEntry, LogEntry, MacroParams};
use crate::source::SaveRequest;
use crossterm::event::KeyEvent;
use std::path::PathBuf;

/// Parsed content of a loaded log.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedEntries {
    /// Output of the standard parser.
    Standard(Vec<LogEntry>),
    /// Output of the CoreProtect parser.
    CoreProtect(Vec<CoreProtectLogEntry>),
}

/// Everything that can drive a transition.
///
/// Background results carry errors as display strings: the state only
/// ever shows them.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Key press.
    Key(KeyEvent),
    /// Terminal resized to (width, height).
    Resize(u16, u16),
    /// Periodic rescan timer fired.
    RescanTick,
    /// Directory scan finished.
    ScanCompleted(Result<Vec<String>, String>),
    /// File read and parse finished.
    EntriesLoaded {
        /// Request this answers.
        request_id: u64,
        /// File that was loaded.
        path: String,
        /// Parsed entries or failure.
        result: Result<LoadedEntries, String>,
    },
    /// Save finished with the written path.
    SaveCompleted(Result<PathBuf, String>),
    /// One-second countdown tick.
    CountdownTick,
    /// Macro action returned.
    MacroFinished {
        /// Macro name.
        name: String,
        /// Outcome.
        result: Result<(), String>,
    },
}

/// Work the shell performs after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Leave the event loop.
    Quit,
    /// Rescan the logs directory.
    Scan,
    /// Read and parse a log file.
    LoadLog {
        /// Echoed back in [`AppEvent::EntriesLoaded`].
        request_id: u64,
        /// File to read.
        path: String,
        /// Filters for the standard parser.
        filters: Vec<String>,
        /// Use the CoreProtect parser.
        coreprotect: bool,
    },
    /// Write entries to the output directory.
    Save {
        /// Entries snapshot.
        request: SaveRequest,
        /// Target file name.
        filename: String,
    },
    /// Start the one-second countdown timer.
    StartCountdown,
    /// Stop the countdown timer.
    StopCountdown,
    /// Run a macro on a background thread.
    RunMacro {
        /// Catalog name.
        name: String,
        /// Fully merged parameters.
        params: MacroParams,
    },
}
