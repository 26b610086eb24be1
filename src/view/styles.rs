//! Shared styles for every screen.

use crate::state::MessageKind;
use ratatui::style::{Color, Modifier, Style};

/// Accent used for borders and titles.
pub const ACCENT: Color = Color::Indexed(63);

/// Section headings ("Log Files", "Active Filters").
pub const SECTION_HEADER: Style = Style::new().fg(ACCENT).add_modifier(Modifier::BOLD);

/// Selected row.
pub const HIGHLIGHT: Style = Style::new().fg(Color::Indexed(205)).add_modifier(Modifier::BOLD);

/// Help text and placeholders.
pub const MUTED_TEXT: Style = Style::new().fg(Color::Indexed(240));

/// Failed operations and validation errors.
pub const ERROR_TEXT: Style = Style::new().fg(Color::Red);

/// Completed operations.
pub const SUCCESS_TEXT: Style = Style::new().fg(Color::Green);

/// Unfocused input box border.
pub const INPUT_BORDER: Style = Style::new().fg(Color::Indexed(240));

/// Focused input box border.
pub const FOCUSED_INPUT_BORDER: Style = Style::new().fg(ACCENT);

/// Style for a status line of the given tone.
pub fn message_style(kind: MessageKind) -> Style {
    match kind {
        MessageKind::Success => SUCCESS_TEXT,
        MessageKind::Error => ERROR_TEXT,
        MessageKind::Info => MUTED_TEXT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_tones_map_to_distinct_styles() {
        assert_eq!(message_style(MessageKind::Error).fg, Some(Color::Red));
        assert_eq!(message_style(MessageKind::Success).fg, Some(Color::Green));
        assert_eq!(message_style(MessageKind::Info), MUTED_TEXT);
    }
}
