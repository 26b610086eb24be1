//! Line-oriented log parsers.
//!
//! Two parsers live here:
//! - the standard server log parser in this module, for
//!   `[HH:MM:SS] [thread/level]: message` lines with OR-filtering;
//! - [`coreprotect`], which recovers CoreProtect lookup results from chat lines.
//!
//! Both are pure functions over text. Lines that do not match are skipped,
//! never reported as errors.

pub mod coreprotect;

use crate::model::LogEntry;
use regex::Regex;
use std::sync::LazyLock;

pub use coreprotect::parse_log_content;

static STANDARD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(\d{2}:\d{2}:\d{2})\] \[([^/]+)/([^\]]+)\]: (.*)$")
        .expect("standard log pattern is valid")
});

/// Parse one line. `None` means the line is not a standard log line.
pub fn parse_line(line: &str) -> Option<LogEntry> {
    let caps = STANDARD_LINE.captures(line)?;
    Some(LogEntry::new(&caps[1], &caps[2], &caps[3], &caps[4]))
}

/// Parse a whole file's text, keeping entries that match any filter.
///
/// An empty filter list keeps every parsed entry. Otherwise an entry is kept
/// iff at least one filter is a case-insensitive substring of its message,
/// thread, level or timestamp. Input order is preserved.
pub fn parse_content(text: &str, filters: &[String]) -> Vec<LogEntry> {
    let needles: Vec<String> = filters.iter().map(|f| f.to_lowercase()).collect();

    text.lines()
        .filter_map(parse_line)
        .filter(|entry| {
            needles.is_empty() || needles.iter().any(|n| entry.contains_ignore_case(n))
        })
        .collect()
}

/// Render an entry back to its canonical line form.
pub fn format_line(entry: &LogEntry) -> String {
    entry.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SAMPLE: &str = "\
[10:00:00] [Server thread/INFO]: Starting minecraft server version 1.20.4
[10:00:01] [Server thread/WARN]: Can't keep up! Is the server overloaded?
not a log line
[10:00:02] [User Authenticator #1/INFO]: UUID of player Steve is 1234
[10:00:03] [Server thread/INFO]: Steve joined the game
";

    // ===== parse_line =====

    #[test]
    fn parse_line_captures_all_fields() {
        let entry = parse_line("[10:00:02] [User Authenticator #1/INFO]: UUID of player Steve")
            .expect("line should parse");
        assert_eq!(entry.timestamp(), "10:00:02");
        assert_eq!(entry.thread(), "User Authenticator #1");
        assert_eq!(entry.level(), "INFO");
        assert_eq!(entry.message(), "UUID of player Steve");
    }

    #[test]
    fn parse_line_allows_empty_message() {
        let entry = parse_line("[10:00:00] [main/INFO]: ").expect("line should parse");
        assert_eq!(entry.message(), "");
    }

    #[test]
    fn parse_line_rejects_other_shapes() {
        for line in [
            "",
            "hello",
            "[1:00:00] [main/INFO]: short hour",
            "[10:00:00] [mainINFO]: no slash",
            "[10:00:00] [main/INFO] missing colon",
            " [10:00:00] [main/INFO]: leading space",
            "[10:00:00][main/INFO]: no space",
        ] {
            assert!(parse_line(line).is_none(), "should reject {line:?}");
        }
    }

    // ===== parse_content =====

    #[test]
    fn parse_content_without_filters_keeps_every_parsed_line_in_order() {
        let entries = parse_content(SAMPLE, &[]);
        let stamps: Vec<&str> = entries.iter().map(|e| e.timestamp()).collect();
        assert_eq!(stamps, vec!["10:00:00", "10:00:01", "10:00:02", "10:00:03"]);
    }

    #[test]
    fn parse_content_filters_are_or_combined_and_case_insensitive() {
        let filters = vec!["STEVE".to_string(), "warn".to_string()];
        let entries = parse_content(SAMPLE, &filters);
        let stamps: Vec<&str> = entries.iter().map(|e| e.timestamp()).collect();
        assert_eq!(stamps, vec!["10:00:01", "10:00:02", "10:00:03"]);
    }

    #[test]
    fn parse_content_filter_matches_thread_and_timestamp() {
        let by_thread = parse_content(SAMPLE, &["authenticator".to_string()]);
        assert_eq!(by_thread.len(), 1);
        let by_time = parse_content(SAMPLE, &["10:00:00".to_string()]);
        assert_eq!(by_time.len(), 1);
    }

    #[test]
    fn parse_content_handles_crlf() {
        let text = "[10:00:00] [main/INFO]: a\r\n[10:00:01] [main/INFO]: b\r\n";
        let entries = parse_content(text, &[]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message(), "a");
    }

    #[test]
    fn format_line_round_trips_through_parse_line() {
        let line = "[10:00:01] [Server thread/WARN]: Can't keep up!";
        let entry = parse_line(line).expect("line should parse");
        assert_eq!(format_line(&entry), line);
    }

    // ===== Properties =====

    proptest! {
        #[test]
        fn well_formed_lines_are_accepted(
            h in 0u8..100, m in 0u8..100, s in 0u8..100,
            thread in "[a-zA-Z #0-9]{1,12}",
            level in "[A-Z]{1,6}",
            message in "[ -~]{0,40}",
        ) {
            let line = format!("[{h:02}:{m:02}:{s:02}] [{thread}/{level}]: {message}");
            let entry = parse_line(&line).expect("well-formed line");
            prop_assert_eq!(entry.thread(), thread.as_str());
            prop_assert_eq!(entry.level(), level.as_str());
            prop_assert_eq!(entry.message(), message.as_str());
        }

        #[test]
        fn lines_without_bracket_prefix_are_rejected(line in "[^\\[].{0,40}") {
            prop_assert!(parse_line(&line).is_none());
        }

        #[test]
        fn filtered_output_is_subset_matching_some_filter(
            filters in proptest::collection::vec("[a-z]{1,3}", 1..3),
        ) {
            let entries = parse_content(SAMPLE, &filters);
            let all = parse_content(SAMPLE, &[]);
            prop_assert!(entries.len() <= all.len());
            for entry in &entries {
                prop_assert!(filters
                    .iter()
                    .any(|f| entry.contains_ignore_case(&f.to_lowercase())));
            }
            for entry in &all {
                let matches = filters
                    .iter()
                    .any(|f| entry.contains_ignore_case(&f.to_lowercase()));
                prop_assert_eq!(matches, entries.contains(entry));
            }
        }
    }
}
