//! Error types for mclogview.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from `main`
//!   - [`ConfigError`](crate::config::ConfigError) - config file read/parse failures
//!   - [`LoggingError`](crate::logging::LoggingError) - tracing subscriber setup
//!   - [`TuiError`](crate::view::TuiError) - terminal initialization and drawing
//! - [`ScanError`], [`ReadError`], [`SaveError`] - log store operations
//! - [`MacroError`] - macro validation and execution
//!
//! # Recovery Strategy
//!
//! Lines that do not parse are skipped silently and never become errors.
//! Store and macro failures are non-fatal: they come back to the state
//! machine as events and are shown in the UI. Only failures surfaced through
//! [`AppError`] terminate the program.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Anything that reaches this type ends the session with a non-zero exit code.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// The tracing subscriber could not be installed.
    #[error(transparent)]
    Logging(#[from] crate::logging::LoggingError),

    /// The terminal could not be initialized or drawn to.
    #[error(transparent)]
    Tui(#[from] crate::view::TuiError),
}

/// Failure to enumerate the logs directory.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The logs directory is missing and could not be created.
    #[error("failed to create logs directory {path:?}: {source}")]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Walking the directory tree failed.
    #[error("failed to scan {path:?}: {source}")]
    Walk {
        /// Root of the walk.
        path: PathBuf,
        /// Underlying walk error.
        #[source]
        source: walkdir::Error,
    },
}

/// Failure to read a log file.
#[derive(Debug, Error)]
pub enum ReadError {
    /// File does not exist.
    #[error("file not found: {path:?}")]
    NotFound {
        /// Requested path.
        path: PathBuf,
    },

    /// Open, read or decompression failed.
    #[error("failed to read {path:?}: {source}")]
    Io {
        /// Requested path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Failure to write entries to the output directory.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Nothing to write.
    #[error("no entries to save")]
    Empty,

    /// Filename would escape the output directory or is otherwise unusable.
    #[error("invalid filename: {0:?}")]
    InvalidFilename(String),

    /// Creating the directory or writing the file failed.
    #[error("failed to write {path:?}: {source}")]
    Io {
        /// Target path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Failure while validating or running a macro.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MacroError {
    /// No macro with this name in the catalog.
    #[error("unknown macro: {0}")]
    UnknownMacro(String),

    /// A parameter value failed validation.
    #[error("invalid {name}: {reason}")]
    InvalidParameter {
        /// Parameter key.
        name: String,
        /// Human-readable reason.
        reason: String,
    },

    /// The keyboard backend failed to deliver keystrokes.
    #[error("keyboard backend failed: {0}")]
    Keyboard(String),
}
