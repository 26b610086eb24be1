//! CoreProtect lookup output parser.
//!
//! CoreProtect prints lookup results into chat as lines such as
//!
//! ```text
//! [14:37:37] [Render thread/INFO]: [System] [CHAT] 14.20/h ago §f- steve: §fplaced dirt
//! ```
//!
//! Older results use day units (`1023.18/d ago`). Banner lines around the
//! results (header, "searching" notice, page indicator) are skipped, as is
//! every other log line.

use crate::model::{CoreProtectLogEntry, Elapsed};
use chrono::NaiveTime;
use regex::Regex;
use std::sync::LazyLock;

static HOURS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(\d{2}:\d{2}:\d{2})\] .*? (\d+\.\d+)/h ago §f- ([^:]+): §f(.*)$")
        .expect("hours pattern is valid")
});

static DAYS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(\d{2}:\d{2}:\d{2})\] .*? (\d+\.\d+)/d ago §f- ([^:]+): §f(.*)$")
        .expect("days pattern is valid")
});

/// Banners count only right after the chat prefix, so a chat lookup whose
/// message quotes one is still an entry.
static META_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\[\d{2}:\d{2}:\d{2}\] \[[^\]]+\]: (?:\[System\] )?\[CHAT\] (?:",
        r"----- CoreProtect \| +Lookup Results -----",
        r"|CoreProtect - Lookup searching\. Please wait\.\.\.",
        r"|§f◀ Page §f\d+/\d+ ▶",
        r")",
    ))
    .expect("meta pattern is valid")
});

/// Parse raw log text into display-ordered CoreProtect entries.
///
/// Never fails: input with no recognizable lookup lines yields an empty list.
pub fn parse_log_content(text: &str) -> Vec<CoreProtectLogEntry> {
    let mut entries = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() || META_LINE.is_match(line) {
            continue;
        }
        if let Some(entry) = parse_lookup_line(line, entries.len()) {
            entries.push(entry);
        }
    }

    entries.sort_by(CoreProtectLogEntry::display_order);
    entries
}

fn parse_lookup_line(line: &str, accepted_index: usize) -> Option<CoreProtectLogEntry> {
    let (caps, elapsed) = if let Some(caps) = HOURS_LINE.captures(line) {
        let hours = caps[2].parse::<f64>().ok()?;
        (caps, Elapsed::Hours(hours))
    } else {
        let caps = DAYS_LINE.captures(line)?;
        let days = caps[2].parse::<f64>().ok()?;
        (caps, Elapsed::Days(days))
    };

    let time = NaiveTime::parse_from_str(&caps[1], "%H:%M:%S").unwrap_or(NaiveTime::MIN);

    Some(CoreProtectLogEntry::new(
        elapsed,
        caps[3].trim(),
        caps[4].trim(),
        line,
        time,
        accepted_index,
    ))
}

#[cfg(test)]
#[path = "coreprotect_tests.rs"]
mod tests;
