//! CoreProtect lookup result entry.

use chrono::NaiveTime;
use std::cmp::Ordering;

/// One CoreProtect lookup line recovered from the chat log.
///
/// `hours_ago` is the uniform sort key: entries reported in days carry
/// `days * 24` here and keep the raw day count in `days_ago`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreProtectLogEntry {
    hours_ago: f64,
    days_ago: Option<f64>,
    username: String,
    message: String,
    raw_line: String,
    time: NaiveTime,
    accepted_index: usize,
}

/// Elapsed time as reported by the lookup line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Elapsed {
    /// `N/h ago`
    Hours(f64),
    /// `N/d ago`
    Days(f64),
}

impl CoreProtectLogEntry {
    /// Build an entry. The acceptance index must be assigned in parse order.
    pub fn new(
        elapsed: Elapsed,
        username: impl Into<String>,
        message: impl Into<String>,
        raw_line: impl Into<String>,
        time: NaiveTime,
        accepted_index: usize,
    ) -> Self {
        let (hours_ago, days_ago) = match elapsed {
            Elapsed::Hours(h) => (h, None),
            Elapsed::Days(d) => (d * 24.0, Some(d)),
        };
        Self {
            hours_ago,
            days_ago,
            username: username.into(),
            message: message.into(),
            raw_line: raw_line.into(),
            time,
            accepted_index,
        }
    }

    /// Elapsed hours, converted from days when the source used day units.
    pub fn hours_ago(&self) -> f64 {
        self.hours_ago
    }

    /// Raw day count for day-unit entries.
    pub fn days_ago(&self) -> Option<f64> {
        self.days_ago
    }

    /// Whether the source line used `/d ago`.
    pub fn is_days(&self) -> bool {
        self.days_ago.is_some()
    }

    /// Player name, trimmed.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Action text, trimmed.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The unmodified source line.
    pub fn raw_line(&self) -> &str {
        &self.raw_line
    }

    /// Client-side time of day from the bracketed timestamp (midnight if unparsable).
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Zero-based parse order.
    pub fn accepted_index(&self) -> usize {
        self.accepted_index
    }

    /// Display ordering: larger elapsed time first, later acceptance first on ties.
    pub fn display_order(a: &Self, b: &Self) -> Ordering {
        b.hours_ago
            .total_cmp(&a.hours_ago)
            .then(b.accepted_index.cmp(&a.accepted_index))
    }

    /// Short elapsed label used by the log pane, e.g. `14.20/h ago`.
    pub fn elapsed_label(&self) -> String {
        match self.days_ago {
            Some(days) => format!("{days:.2}/d ago"),
            None => format!("{:.2}/h ago", self.hours_ago),
        }
    }
}
