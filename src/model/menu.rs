//! Left-pane menu entries.

/// Label of the macro launcher entry.
pub const MACROS_LABEL: &str = "Macros";
/// Label prefix of the CoreProtect toggle entry.
pub const COREPROTECT_TOGGLE_LABEL: &str = "Toggle CoreProtect Parsing";
/// Label of the exit entry.
pub const EXIT_LABEL: &str = "Exit";

/// One row of the main menu.
///
/// The menu is always the discovered log files followed by
/// [`MenuEntry::trailing`] in that fixed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    /// A discovered log file, forward-slash path.
    LogFile(String),
    /// Opens the macro list.
    Macros,
    /// Flips CoreProtect parsing mode.
    CoreProtectToggle,
    /// Quits the application.
    Exit,
}

impl MenuEntry {
    /// The fixed entries that end every menu.
    pub fn trailing() -> [MenuEntry; 3] {
        [MenuEntry::Macros, MenuEntry::CoreProtectToggle, MenuEntry::Exit]
    }

    /// Build the full menu for a set of discovered files.
    pub fn build(files: impl IntoIterator<Item = String>) -> Vec<MenuEntry> {
        files
            .into_iter()
            .map(MenuEntry::LogFile)
            .chain(Self::trailing())
            .collect()
    }

    /// Display text. The toggle label reflects the live mode flag.
    pub fn label(&self, coreprotect_mode: bool) -> String {
        match self {
            MenuEntry::LogFile(path) => path.clone(),
            MenuEntry::Macros => MACROS_LABEL.to_string(),
            MenuEntry::CoreProtectToggle => {
                let state = if coreprotect_mode { "ON" } else { "OFF" };
                format!("{COREPROTECT_TOGGLE_LABEL} ({state})")
            }
            MenuEntry::Exit => EXIT_LABEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_appends_trailing_entries_in_order() {
        let menu = MenuEntry::build(vec!["logs/latest.log".to_string()]);
        assert_eq!(
            menu,
            vec![
                MenuEntry::LogFile("logs/latest.log".into()),
                MenuEntry::Macros,
                MenuEntry::CoreProtectToggle,
                MenuEntry::Exit,
            ]
        );
    }

    #[test]
    fn toggle_label_tracks_mode() {
        assert_eq!(
            MenuEntry::CoreProtectToggle.label(true),
            "Toggle CoreProtect Parsing (ON)"
        );
        assert_eq!(
            MenuEntry::CoreProtectToggle.label(false),
            "Toggle CoreProtect Parsing (OFF)"
        );
    }
}
