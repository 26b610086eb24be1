//! Centered modals drawn over the two-pane layout.

use crate::state::{AppState, Screen, StatusMessage};
use crate::view::helpers::{centered_rect, empty_line};
use crate::view::styles::{message_style, ACCENT, SECTION_HEADER};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

const COUNTDOWN_BAR_WIDTH: usize = 30;

/// Render the modal for the active overlay screen, if any.
pub fn render_modal(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let (title, lines, width) = match state.screen {
        Screen::SaveFilenameInput => (
            "Save Logs",
            input_lines(
                "Enter filename to save logs (ENTER to save, ESC to cancel):",
                &state.save.filename,
                state.save.message.as_ref(),
            ),
            area.width / 2,
        ),
        Screen::CountdownInput => (
            "Countdown",
            input_lines(
                "Enter countdown time in seconds (ENTER to start, ESC to cancel):",
                &state.countdown.input,
                state.countdown.message.as_ref(),
            ),
            area.width / 2,
        ),
        Screen::CountdownDisplay => (
            "Countdown",
            countdown_lines(state.countdown.remaining),
            40,
        ),
        _ => return,
    };
    render_box(frame, area, title, lines, width);
}

fn render_box(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'static>>, width: u16) {
    // Border and padding take two columns and rows on each side.
    let width = width.max(44);
    let content_width = usize::from(width.saturating_sub(6)).max(1);
    let rows: usize = lines
        .iter()
        .map(|l| l.width().div_ceil(content_width).max(1))
        .sum();
    let height = u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(4);

    let modal_area = centered_rect(width, height, area);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(ACCENT))
        .title(Line::styled(format!(" {title} "), SECTION_HEADER).alignment(Alignment::Center))
        .padding(Padding::new(2, 2, 1, 1));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        modal_area,
    );
}

fn input_lines(prompt: &str, buffer: &str, message: Option<&StatusMessage>) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(prompt.to_string()),
        empty_line(),
        Line::styled(
            format!("{buffer}▌"),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(message) = message {
        lines.push(empty_line());
        lines.push(Line::styled(message.text.clone(), message_style(message.kind)));
    }
    lines
}

fn countdown_lines(remaining: u32) -> Vec<Line<'static>> {
    let bar = format!(
        "{:^width$}",
        format!("{remaining} seconds remaining"),
        width = COUNTDOWN_BAR_WIDTH
    );
    vec![
        Line::from("Countdown in progress:"),
        empty_line(),
        Line::styled(bar, Style::default().bg(ACCENT).fg(Color::White)).alignment(Alignment::Center),
        empty_line(),
        Line::from("Press ESC to cancel"),
    ]
}
