//! Macro configuration screens.
//!
//! The parameter form, the extra-parameter picker and the value prompt share
//! one centered, full-screen form layout.

use crate::macros::LookupFilter;
use crate::model::{ExtraKind, Macro, MacroCatalog};
use crate::state::{AppState, MacroWizard, Screen};
use crate::view::help::{FORM_HELP, FORM_HELP_WITH_EXTRAS, SELECTION_HELP, VALUE_HELP};
use crate::view::helpers::{centered_rect, empty_line, truncate_with_ellipsis};
use crate::view::styles::{message_style, ACCENT, HIGHLIGHT, MUTED_TEXT, SECTION_HEADER, SUCCESS_TEXT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

const MAX_FORM_WIDTH: u16 = 80;
const MIN_FORM_WIDTH: u16 = 40;

/// Label of the virtual field that opens the parameter picker.
pub const ADD_PARAMETER_LABEL: &str = "+ Add Parameter";

/// Render whichever wizard screen is active.
pub fn render_wizard(frame: &mut Frame, state: &AppState, catalog: &MacroCatalog) {
    let area = frame.area();
    let wizard = &state.wizard;
    let Some(m) = wizard.macro_name.as_deref().and_then(|name| catalog.find(name)) else {
        frame.render_widget(
            Paragraph::new("Error: Selected macro not found.").alignment(Alignment::Center),
            area,
        );
        return;
    };

    let width = form_width(area.width);
    let text_width = usize::from(width.saturating_sub(6));
    let (body, help, lookup_box) = match state.screen {
        Screen::MacroParameterInput => {
            let help = if m.supports_extra_parameters() {
                FORM_HELP_WITH_EXTRAS
            } else {
                FORM_HELP
            };
            let lookup = m
                .supports_extra_parameters()
                .then(|| active_parameter_lines(&wizard.lookup));
            (form_lines(m, wizard, text_width), help, lookup)
        }
        Screen::ParameterSelection => (selection_lines(m, wizard), SELECTION_HELP, None),
        Screen::ParameterValueInput => (value_lines(wizard), VALUE_HELP, None),
        _ => return,
    };

    let mut title = vec![
        Line::styled(format!("Configure Macro: {}", m.name), SECTION_HEADER)
            .alignment(Alignment::Center),
        empty_line(),
    ];
    title.extend(body);

    let lookup_height = lookup_box.as_ref().map_or(0, |l| l.len() as u16 + 2);
    let help_rows = help_rows(help, text_width);
    let height = (title.len() as u16)
        .saturating_add(lookup_height)
        .saturating_add(help_rows + 1)
        .saturating_add(4);

    let form_area = centered_rect(width, height, area);
    frame.render_widget(Clear, form_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT))
        .padding(Padding::new(2, 2, 1, 1));
    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(lookup_height),
            Constraint::Length(1),
            Constraint::Length(help_rows),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(title), chunks[0]);
    if let Some(lines) = lookup_box {
        let lookup_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT))
            .title("Active Parameters");
        frame.render_widget(Paragraph::new(lines).block(lookup_block), chunks[1]);
    }
    frame.render_widget(
        Paragraph::new(Line::styled(help, MUTED_TEXT))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[3],
    );
}

/// Form width: up to 80 columns with a margin, at least 40 when the screen allows.
fn form_width(screen_width: u16) -> u16 {
    let width = screen_width.saturating_sub(10).min(MAX_FORM_WIDTH);
    if width < MIN_FORM_WIDTH {
        screen_width.min(MIN_FORM_WIDTH)
    } else {
        width
    }
}

fn help_rows(help: &str, width: usize) -> u16 {
    let columns = unicode_width::UnicodeWidthStr::width(help);
    u16::try_from(columns.div_ceil(width.max(1)).max(1)).unwrap_or(1)
}

fn form_lines(m: &Macro, wizard: &MacroWizard, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if !m.description.is_empty() {
        lines.push(Line::from(truncate_with_ellipsis(&m.description, width)));
        lines.push(empty_line());
    }

    if m.parameters.is_empty() {
        lines.push(Line::styled("This macro has no parameters.", MUTED_TEXT));
    } else {
        lines.push(Line::from("Parameters:"));
        let name_width = m.parameters.iter().map(|p| p.name.len()).max().unwrap_or(0);
        for (i, p) in m.parameters.iter().enumerate() {
            let selected = i == wizard.field_cursor;
            let value = wizard.field_inputs.get(&p.name).map_or("", String::as_str);
            let (marker, name_style, cursor) = if selected {
                ("> ", HIGHLIGHT, "▌")
            } else {
                ("  ", Style::default().add_modifier(Modifier::BOLD), "")
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{marker}{:<name_width$}", p.name), name_style),
                Span::raw(" : "),
                Span::raw(format!("{value}{cursor}")),
                Span::styled(format!("  {}", p.description), MUTED_TEXT),
            ]));
        }
    }

    if m.supports_extra_parameters() {
        let slot_selected = wizard.field_cursor == m.parameters.len();
        lines.push(empty_line());
        lines.push(if slot_selected {
            Line::styled(format!("> {ADD_PARAMETER_LABEL}"), HIGHLIGHT)
        } else {
            Line::styled(format!("  {ADD_PARAMETER_LABEL}"), MUTED_TEXT)
        });
    }

    for (name, value) in &wizard.resolved {
        if m.parameters.iter().all(|p| &p.name != name) {
            lines.push(Line::styled(format!("  {name}: {value}"), SUCCESS_TEXT));
        }
    }

    if let Some(message) = &wizard.message {
        lines.push(empty_line());
        lines.push(Line::styled(message.text.clone(), message_style(message.kind)));
    }
    lines
}

/// Contents of the "Active Parameters" box.
pub fn active_parameter_lines(lookup: &LookupFilter) -> Vec<Line<'static>> {
    if lookup.is_empty() {
        return vec![Line::styled("None", MUTED_TEXT)];
    }
    let mut lines: Vec<Line> = lookup
        .users
        .iter()
        .map(|u| Line::styled(format!("• user: {u}"), SUCCESS_TEXT))
        .collect();
    if !lookup.actions.is_empty() {
        lines.push(Line::styled(
            format!("• actions: {}", lookup.actions.join(", ")),
            SUCCESS_TEXT,
        ));
    }
    if let Some(radius) = lookup.radius {
        lines.push(Line::styled(format!("• radius: {radius}"), SUCCESS_TEXT));
    }
    if let Some(time) = &lookup.time {
        lines.push(Line::styled(format!("• time: {time}"), SUCCESS_TEXT));
    }
    lines
}

fn selection_lines(m: &Macro, wizard: &MacroWizard) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from("Select Parameter to Add:")];
    for (i, extra) in m.extra_parameters.iter().enumerate() {
        lines.push(if i == wizard.selection_cursor {
            Line::styled(format!("> {}", extra.label), HIGHLIGHT)
        } else {
            Line::from(format!("  {}", extra.label))
        });
    }
    if let Some(message) = &wizard.message {
        lines.push(empty_line());
        lines.push(Line::styled(message.text.clone(), message_style(message.kind)));
    }
    lines
}

/// Prompt title and example text for a value kind.
fn value_prompt(kind: Option<&ExtraKind>) -> (String, String) {
    match kind {
        Some(ExtraKind::Users) => (
            "Enter Username".into(),
            "Enter a username to lookup (e.g., 'player1')".into(),
        ),
        Some(ExtraKind::Radius) => (
            "Enter Radius".into(),
            "Enter a radius for the lookup (e.g., '10')".into(),
        ),
        Some(ExtraKind::Time) => (
            "Enter Time Parameter".into(),
            "Enter a time parameter (e.g., '1d' for 1 day, '12h' for 12 hours)".into(),
        ),
        Some(ExtraKind::Plain(name)) => (format!("Enter {name}"), format!("Enter a value for {name}")),
        Some(ExtraKind::Action(_)) | None => ("Enter Value".into(), String::new()),
    }
}

fn value_lines(wizard: &MacroWizard) -> Vec<Line<'static>> {
    let kind = wizard.selected_extra.as_ref().map(|e| &e.kind);
    let (title, description) = value_prompt(kind);
    let mut lines = vec![Line::styled(title, SECTION_HEADER), Line::from(description), empty_line()];

    if matches!(kind, Some(ExtraKind::Users)) && !wizard.lookup.users.is_empty() {
        lines.push(Line::from("Current values:"));
        lines.extend(
            wizard
                .lookup
                .users
                .iter()
                .map(|u| Line::from(format!("  - {u}"))),
        );
        lines.push(empty_line());
    }

    lines.push(Line::styled(
        format!("{}▌", wizard.value_input),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    if let Some(message) = &wizard.value_message {
        lines.push(empty_line());
        lines.push(Line::styled(message.text.clone(), message_style(message.kind)));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_width_bounds() {
        assert_eq!(form_width(200), 80);
        assert_eq!(form_width(60), 50);
        assert_eq!(form_width(45), 40);
        assert_eq!(form_width(30), 30);
    }

    #[test]
    fn empty_lookup_renders_none() {
        let lines = active_parameter_lines(&LookupFilter::default());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].to_string(), "None");
    }

    #[test]
    fn lookup_lists_every_constraint() {
        let lookup = LookupFilter {
            users: vec!["Steve".into(), "Alex".into()],
            actions: vec!["block".into(), "chat".into()],
            radius: Some(10),
            time: Some("2d".into()),
        };
        let text: Vec<String> = active_parameter_lines(&lookup)
            .iter()
            .map(|l| l.to_string())
            .collect();
        assert_eq!(
            text,
            vec![
                "• user: Steve",
                "• user: Alex",
                "• actions: block, chat",
                "• radius: 10",
                "• time: 2d",
            ]
        );
    }
}
