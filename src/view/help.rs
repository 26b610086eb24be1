//! Key hints shown under each screen.

use crate::state::{Focus, Screen};

const BASE_HINTS: [&str; 2] = ["TAB: Focus", "Q/^C: Quit"];

/// Left pane narrower than this joins all hints on one line.
const LOG_LIST_SINGLE_LINE_BELOW: u16 = 45;
const MENU_SINGLE_LINE_BELOW: u16 = 40;

/// Parameter form hints for macros that accept extra parameters.
pub const FORM_HELP_WITH_EXTRAS: &str =
    "TAB: Next field • SHIFT+TAB: Previous field • CTRL+E: Add Parameter • ENTER: Confirm • ESC: Cancel";
/// Parameter form hints.
pub const FORM_HELP: &str =
    "TAB: Next field • SHIFT+TAB: Previous field • ENTER: Confirm • ESC: Cancel";
/// Parameter selection hints.
pub const SELECTION_HELP: &str = "UP/DOWN: Navigate • ENTER: Select • ESC: Back • CTRL+D: Done";
/// Value prompt hints.
pub const VALUE_HELP: &str = "ENTER: Add Value • ESC: Back";

/// Hint lines for the left pane of the two-pane screens.
pub fn left_pane_hints(screen: Screen, focus: Focus, left_pane_width: u16) -> Vec<String> {
    let (specific, single_line_below): (&[&str], u16) = match screen {
        Screen::LogList => (&["E: Save", "ESC: Menu"], LOG_LIST_SINGLE_LINE_BELOW),
        Screen::Menu if focus == Focus::FilterInput => {
            (&["ENTER: Add", "^U: Clear", "ESC: Unfocus"], MENU_SINGLE_LINE_BELOW)
        }
        Screen::Menu => (&["ESC: Unfocus"], MENU_SINGLE_LINE_BELOW),
        Screen::MacroList => (&["ENTER: Select", "ESC: Menu"], MENU_SINGLE_LINE_BELOW),
        Screen::SaveFilenameInput => {
            return vec!["Enter filename. ENTER: Save, ESC: Cancel.".to_string()]
        }
        _ => return Vec::new(),
    };

    if left_pane_width < single_line_below {
        vec![BASE_HINTS.iter().chain(specific).copied().collect::<Vec<_>>().join(" | ")]
    } else {
        vec![BASE_HINTS.join(" | "), specific.join(" | ")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_state::left_pane_width;

    fn hints(screen: Screen, width: u16) -> Vec<String> {
        left_pane_hints(screen, Focus::LogFileList, left_pane_width(width))
    }

    #[test]
    fn wide_log_list_splits_hints() {
        let hints = hints(Screen::LogList, 180);
        assert_eq!(hints, vec!["TAB: Focus | Q/^C: Quit", "E: Save | ESC: Menu"]);
    }

    #[test]
    fn narrow_log_list_joins_hints() {
        let hints = hints(Screen::LogList, 80);
        assert_eq!(hints, vec!["TAB: Focus | Q/^C: Quit | E: Save | ESC: Menu"]);
    }

    #[test]
    fn focused_filter_box_lists_its_keys() {
        let hints = left_pane_hints(Screen::Menu, Focus::FilterInput, 60);
        assert_eq!(hints[1], "ENTER: Add | ^U: Clear | ESC: Unfocus");
    }

    #[test]
    fn wizard_screens_have_no_left_pane_hints() {
        assert!(hints(Screen::ParameterSelection, 120).is_empty());
    }
}
