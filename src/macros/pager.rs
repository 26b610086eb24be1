//! CoreProtect pager macro.
//!
//! Types `/co page N` for a range of pages, optionally preceded by a
//! `/co lookup` built from the wizard's lookup filter.
//!
//! The macro receives a flat string map. Paging keys (`startPage`,
//! `endPage`, `delayMs`) and lookup keys (`users`, `actions`, `radius`,
//! `time`) are parsed into [`PagingConfig`] and [`LookupFilter`] up front so
//! nothing downstream looks at raw strings.

use super::Keyboard;
use crate::model::{ExtraKind, ExtraParameter, Macro, MacroError, MacroParameter, MacroParams};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tracing::info;

/// Catalog name.
pub const NAME: &str = "CoreProtect Pager";

/// Parameter keys.
pub mod keys {
    /// First page to request.
    pub const START_PAGE: &str = "startPage";
    /// Last page to request, inclusive.
    pub const END_PAGE: &str = "endPage";
    /// Milliseconds between pages.
    pub const DELAY_MS: &str = "delayMs";
    /// Comma-separated player names.
    pub const USERS: &str = "users";
    /// Comma-separated action tags.
    pub const ACTIONS: &str = "actions";
    /// Lookup radius in blocks.
    pub const RADIUS: &str = "radius";
    /// Lookup time span.
    pub const TIME: &str = "time";
}

const DEFAULT_DELAY_MS: u64 = 500;

/// Action tags offered on the parameter selection screen.
pub const ACTION_TAGS: [&str; 10] = [
    "block",
    "+block",
    "-block",
    "chat",
    "command",
    "container",
    "kill",
    "session",
    "sign",
    "click",
];

static TIME_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(\.\d+)?[wdhms])+$").expect("time span pattern is valid")
});

// ===== PagingConfig =====

/// Validated page range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingConfig {
    /// First page, at least 1.
    pub start_page: u32,
    /// Last page, at least `start_page`.
    pub end_page: u32,
    /// Pause after each page.
    pub delay: Duration,
}

impl PagingConfig {
    /// Parse and validate paging keys. An unusable delay falls back to 500 ms.
    pub fn from_params(params: &MacroParams) -> Result<Self, MacroError> {
        let start_page = parse_page(params, keys::START_PAGE)?;
        let end_page = parse_page(params, keys::END_PAGE)?;

        if start_page == 0 || end_page < start_page {
            return Err(MacroError::InvalidParameter {
                name: "page range".into(),
                reason: "startPage must be > 0 and endPage >= startPage".into(),
            });
        }

        let delay_ms = params
            .get(keys::DELAY_MS)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_DELAY_MS);

        Ok(Self {
            start_page,
            end_page,
            delay: Duration::from_millis(delay_ms),
        })
    }
}

fn parse_page(params: &MacroParams, key: &str) -> Result<u32, MacroError> {
    let raw = params.get(key).ok_or_else(|| MacroError::InvalidParameter {
        name: key.into(),
        reason: "parameter is required".into(),
    })?;
    raw.trim()
        .parse::<u32>()
        .map_err(|e| MacroError::InvalidParameter {
            name: key.into(),
            reason: e.to_string(),
        })
}

// ===== LookupFilter =====

/// Optional `/co lookup` constraints collected by the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupFilter {
    /// Player names, in entry order.
    pub users: Vec<String>,
    /// Action tags, no duplicates.
    pub actions: Vec<String>,
    /// Radius in blocks.
    pub radius: Option<u32>,
    /// Time span such as `2d12h`.
    pub time: Option<String>,
}

impl LookupFilter {
    /// True when no constraint is set.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
            && self.actions.is_empty()
            && self.radius.is_none()
            && self.time.is_none()
    }

    /// Add an action tag unless already present. Returns whether it was added.
    pub fn add_action(&mut self, tag: &str) -> bool {
        if self.actions.iter().any(|a| a == tag) {
            return false;
        }
        self.actions.push(tag.to_string());
        true
    }

    /// Merge into a macro parameter map. Lists are comma-joined.
    pub fn merge_into(&self, params: &mut MacroParams) {
        if !self.users.is_empty() {
            params.insert(keys::USERS.into(), self.users.join(","));
        }
        if !self.actions.is_empty() {
            params.insert(keys::ACTIONS.into(), self.actions.join(","));
        }
        if let Some(radius) = self.radius {
            params.insert(keys::RADIUS.into(), radius.to_string());
        }
        if let Some(time) = &self.time {
            params.insert(keys::TIME.into(), time.clone());
        }
    }

    /// Parse lookup keys back out of a parameter map.
    pub fn from_params(params: &MacroParams) -> Result<Self, MacroError> {
        let list = |key: &str| -> Vec<String> {
            params
                .get(key)
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default()
        };

        let radius = params.get(keys::RADIUS).map(|r| parse_radius(r)).transpose()?;
        let time = params
            .get(keys::TIME)
            .map(|t| validate_time(t).map(|()| t.trim().to_string()))
            .transpose()?;

        Ok(Self {
            users: list(keys::USERS),
            actions: list(keys::ACTIONS),
            radius,
            time,
        })
    }

    /// `/co lookup` command, or `None` when the filter is empty.
    pub fn command(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let mut parts = vec!["/co lookup".to_string()];
        if !self.users.is_empty() {
            parts.push(format!("u:{}", self.users.join(",")));
        }
        if !self.actions.is_empty() {
            parts.push(format!("a:{}", self.actions.join(",")));
        }
        if let Some(radius) = self.radius {
            parts.push(format!("r:{radius}"));
        }
        if let Some(time) = &self.time {
            parts.push(format!("t:{time}"));
        }
        Some(parts.join(" "))
    }
}

/// Radius must be a positive integer.
pub fn parse_radius(raw: &str) -> Result<u32, MacroError> {
    match raw.trim().parse::<u32>() {
        Ok(r) if r > 0 => Ok(r),
        _ => Err(MacroError::InvalidParameter {
            name: keys::RADIUS.into(),
            reason: "must be a positive whole number".into(),
        }),
    }
}

/// Time spans are one or more `<number><w|d|h|m|s>` groups.
pub fn validate_time(raw: &str) -> Result<(), MacroError> {
    if TIME_SPAN.is_match(raw.trim()) {
        Ok(())
    } else {
        Err(MacroError::InvalidParameter {
            name: keys::TIME.into(),
            reason: "expected a span like 1d, 12h or 2w3d".into(),
        })
    }
}

// ===== Macro =====

/// Run the pager against a keyboard.
pub fn run(params: &MacroParams, keyboard: &dyn Keyboard) -> Result<(), MacroError> {
    let paging = PagingConfig::from_params(params)?;
    let lookup = LookupFilter::from_params(params)?;

    info!(
        start = paging.start_page,
        end = paging.end_page,
        delay_ms = paging.delay.as_millis() as u64,
        lookup = ?lookup,
        "Running CoreProtect pager"
    );

    if let Some(command) = lookup.command() {
        keyboard.type_text(&command)?;
        keyboard.tap_enter()?;
        keyboard.pause(paging.delay);
    }

    for page in paging.start_page..=paging.end_page {
        keyboard.type_text(&format!("/co page {page}"))?;
        keyboard.tap_enter()?;
        keyboard.pause(paging.delay);
    }

    info!("CoreProtect pager completed");
    Ok(())
}

/// Catalog entry.
pub fn definition() -> Macro {
    let mut extra_parameters = vec![
        ExtraParameter::new("users", ExtraKind::Users),
        ExtraParameter::new("radius", ExtraKind::Radius),
        ExtraParameter::new("time", ExtraKind::Time),
    ];
    extra_parameters.extend(ACTION_TAGS.iter().map(|tag| ExtraParameter::action(tag)));

    Macro {
        name: NAME.to_string(),
        description: "Runs /co page X commands from a start page to an end page.".to_string(),
        parameters: vec![
            MacroParameter::new(keys::START_PAGE, "Starting page number", "1"),
            MacroParameter::new(keys::END_PAGE, "Ending page number", "5"),
            MacroParameter::new(
                keys::DELAY_MS,
                "Delay in milliseconds between commands (optional)",
                "500",
            ),
        ],
        extra_parameters,
        action: Arc::new(run),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::macros::{Keystroke, RecordingKeyboard};

    fn params(pairs: &[(&str, &str)]) -> MacroParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn typed(strokes: &[Keystroke]) -> Vec<String> {
        strokes
            .iter()
            .filter_map(|s| match s {
                Keystroke::Text(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn pages_through_inclusive_range() {
        let keyboard = RecordingKeyboard::new();
        run(
            &params(&[("startPage", "2"), ("endPage", "4"), ("delayMs", "10")]),
            &keyboard,
        )
        .expect("run");

        let strokes = keyboard.strokes();
        assert_eq!(typed(&strokes), vec!["/co page 2", "/co page 3", "/co page 4"]);
        assert_eq!(
            &strokes[..3],
            &[
                Keystroke::Text("/co page 2".into()),
                Keystroke::Enter,
                Keystroke::Pause(Duration::from_millis(10)),
            ]
        );
    }

    #[test]
    fn lookup_command_is_typed_first() {
        let keyboard = RecordingKeyboard::new();
        run(
            &params(&[
                ("startPage", "1"),
                ("endPage", "1"),
                ("users", "Steve,Alex"),
                ("actions", "block"),
                ("radius", "10"),
                ("time", "2d"),
            ]),
            &keyboard,
        )
        .expect("run");

        assert_eq!(
            typed(&keyboard.strokes()),
            vec!["/co lookup u:Steve,Alex a:block r:10 t:2d", "/co page 1"]
        );
    }

    #[test]
    fn invalid_range_is_rejected() {
        let keyboard = RecordingKeyboard::new();
        for (start, end) in [("0", "3"), ("5", "4")] {
            let err = run(&params(&[("startPage", start), ("endPage", end)]), &keyboard)
                .unwrap_err();
            assert!(matches!(err, MacroError::InvalidParameter { .. }));
        }
        assert!(keyboard.strokes().is_empty());
    }

    #[test]
    fn missing_page_is_rejected() {
        let err = PagingConfig::from_params(&params(&[("startPage", "1")])).unwrap_err();
        assert_eq!(
            err,
            MacroError::InvalidParameter {
                name: "endPage".into(),
                reason: "parameter is required".into(),
            }
        );
    }

    #[test]
    fn bad_delay_falls_back_to_default() {
        for delay in ["abc", "0", "-5"] {
            let config = PagingConfig::from_params(&params(&[
                ("startPage", "1"),
                ("endPage", "1"),
                ("delayMs", delay),
            ]))
            .expect("valid range");
            assert_eq!(config.delay, Duration::from_millis(500));
        }
    }

    #[test]
    fn radius_and_time_validation() {
        assert_eq!(parse_radius("10"), Ok(10));
        assert!(parse_radius("0").is_err());
        assert!(parse_radius("-3").is_err());
        assert!(parse_radius("ten").is_err());

        for ok in ["1d", "12h", "2w3d", "1.5h", "30m", "45s"] {
            assert!(validate_time(ok).is_ok(), "{ok} should be valid");
        }
        for bad in ["", "d", "12", "1y", "-1d", "1d2"] {
            assert!(validate_time(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn add_action_skips_duplicates() {
        let mut filter = LookupFilter::default();
        assert!(filter.add_action("block"));
        assert!(!filter.add_action("block"));
        assert!(filter.add_action("chat"));
        assert_eq!(filter.actions, vec!["block", "chat"]);
    }

    #[test]
    fn empty_filter_has_no_command() {
        assert_eq!(LookupFilter::default().command(), None);
    }
}
