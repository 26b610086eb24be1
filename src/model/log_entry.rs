//! Standard server log entry.
//!
//! A `LogEntry` is one line of the form `[HH:MM:SS] [thread/level]: message`.
//! Entries are produced by the standard parser and never mutated afterwards.

use std::fmt;

// ===== LogEntry =====

/// A parsed standard log line.
///
/// Invariant: `timestamp` is always a two-digit `HH:MM:SS` string as it
/// appeared in the source; it is not validated as a real time of day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    timestamp: String,
    thread: String,
    level: String,
    message: String,
}

impl LogEntry {
    /// Create a new entry from its four captured fields.
    pub fn new(
        timestamp: impl Into<String>,
        thread: impl Into<String>,
        level: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            thread: thread.into(),
            level: level.into(),
            message: message.into(),
        }
    }

    // ===== Accessors (read-only) =====

    /// Bracketed time of day, `HH:MM:SS`.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Thread name, e.g. `Server thread`.
    pub fn thread(&self) -> &str {
        &self.thread
    }

    /// Level name, e.g. `INFO`.
    pub fn level(&self) -> &str {
        &self.level
    }

    /// Message body after the `]: ` separator.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Case-insensitive substring match against every field.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn contains_ignore_case(&self, needle_lower: &str) -> bool {
        [
            &self.message,
            &self.thread,
            &self.level,
            &self.timestamp,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle_lower))
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [{}/{}]: {}",
            self.timestamp, self.thread, self.level, self.message
        )
    }
}
