//! Two-pane layout rendering.
//!
//! Pure rendering: reads [`AppState`] and draws one frame. The left pane holds
//! the menu, active filters, filter input and status lines. The right pane
//! shows instructions, the entries of the active log, or the macro list.

use crate::model::MacroCatalog;
use crate::parser::format_line;
use crate::state::{AppState, ErrorOrigin, Focus, Screen};
use crate::view::help::left_pane_hints;
use crate::view::helpers::{empty_line, truncate_with_ellipsis};
use crate::view::styles::{
    message_style, ACCENT, ERROR_TEXT, FOCUSED_INPUT_BORDER, HIGHLIGHT, INPUT_BORDER, MUTED_TEXT,
    SECTION_HEADER,
};
use crate::view::{modal, wizard};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Shown until the first resize reports a real terminal size.
pub const INITIALIZING_TEXT: &str = "Initializing...";

/// Rows of the right pane used by the header, spacing and footer.
const ENTRY_PANE_CHROME_ROWS: u16 = 4;

/// Right panes narrower than this show a warning instead of content.
const MIN_RIGHT_CONTENT_WIDTH: u16 = 10;

/// Draw the frame for the current screen.
pub fn render_layout(frame: &mut Frame, state: &AppState, catalog: &MacroCatalog) {
    let area = frame.area();
    if !state.geometry.is_known() {
        render_initializing(frame, area);
        return;
    }

    if state.screen.is_wizard() {
        wizard::render_wizard(frame, state, catalog);
        return;
    }

    let background = if state.screen.is_overlay() {
        background_screen(state.previous_screen)
    } else {
        state.screen
    };
    render_two_panes(frame, area, state, catalog, background);

    if state.screen.is_overlay() {
        modal::render_modal(frame, state);
    }
}

/// The two-pane screen drawn behind a modal.
fn background_screen(previous: Screen) -> Screen {
    match previous {
        Screen::LogList => Screen::LogList,
        Screen::Menu => Screen::Menu,
        _ => Screen::MacroList,
    }
}

fn render_initializing(frame: &mut Frame, area: Rect) {
    let y = area.y + area.height / 2;
    let line_area = Rect::new(area.x, y.min(area.bottom().saturating_sub(1)), area.width, 1);
    frame.render_widget(
        Paragraph::new(INITIALIZING_TEXT).alignment(Alignment::Center),
        line_area,
    );
}

fn render_two_panes(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    catalog: &MacroCatalog,
    screen: Screen,
) {
    let left_width = state.geometry.left_pane_width.min(area.width);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(left_width), Constraint::Min(0)])
        .split(area);

    render_left_pane(frame, chunks[0], state, screen);
    render_right_pane(frame, chunks[1], state, catalog, screen);
}

fn pane_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT))
        .title(Span::styled(format!(" {title} "), SECTION_HEADER))
}

// ===== Left pane =====

fn render_left_pane(frame: &mut Frame, area: Rect, state: &AppState, screen: Screen) {
    let block = pane_block("Log Files (UP/DOWN, ENTER)");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let filter_lines = filter_section(state);
    let filter_box_height = if state.coreprotect_mode { 1 } else { 4 };
    let footer = footer_lines(state, screen, inner.width);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(filter_lines.len() as u16),
            Constraint::Length(filter_box_height),
            Constraint::Length(footer.len() as u16),
        ])
        .split(inner);

    render_menu(frame, chunks[0], state, screen);
    frame.render_widget(Paragraph::new(filter_lines), chunks[1]);
    render_filter_input(frame, chunks[2], state);
    frame.render_widget(Paragraph::new(footer).wrap(Wrap { trim: false }), chunks[3]);
}

fn render_menu(frame: &mut Frame, area: Rect, state: &AppState, screen: Screen) {
    let label_width = usize::from(area.width.saturating_sub(2));
    let items: Vec<ListItem> = state
        .menu
        .entries
        .iter()
        .map(|entry| {
            ListItem::new(truncate_with_ellipsis(
                &entry.label(state.coreprotect_mode),
                label_width,
            ))
        })
        .collect();

    let cursor_visible =
        matches!(screen, Screen::Menu | Screen::LogList) && state.focus == Focus::LogFileList;
    let list = List::new(items)
        .highlight_symbol("> ")
        .highlight_style(HIGHLIGHT);
    let mut list_state = ListState::default().with_selected(cursor_visible.then_some(state.menu.cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn filter_section(state: &AppState) -> Vec<Line<'static>> {
    let mut lines = vec![empty_line(), Line::styled("Active Filters:", SECTION_HEADER)];
    if state.filters.active.is_empty() {
        lines.push(Line::styled("  None", MUTED_TEXT));
    } else {
        lines.extend(
            state
                .filters
                .active
                .iter()
                .map(|f| Line::from(format!("  - {f}"))),
        );
    }
    lines
}

fn render_filter_input(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.coreprotect_mode {
        frame.render_widget(
            Paragraph::new(Line::styled("Filters disabled in CoreProtect mode.", MUTED_TEXT)),
            area,
        );
        return;
    }

    let title = if state.geometry.left_pane_width < 45 {
        "Filter"
    } else {
        "Add Filter (Type & ENTER)"
    };
    let focused = state.focus == Focus::FilterInput;
    let mut text = state.filters.input.clone();
    if focused {
        text.push('▌');
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused { FOCUSED_INPUT_BORDER } else { INPUT_BORDER })
        .title(title);
    let inner_width = usize::from(area.width.saturating_sub(2));
    let box_area = Rect {
        y: area.y + 1,
        height: area.height.saturating_sub(1),
        ..area
    };
    frame.render_widget(
        Paragraph::new(tail_columns(&text, inner_width)).block(block),
        box_area,
    );
}

/// Keep the end of an input buffer visible when it outgrows its box.
fn tail_columns(text: &str, width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= width {
        return text.to_string();
    }
    chars[chars.len() - width..].iter().collect()
}

fn footer_lines(state: &AppState, screen: Screen, width: u16) -> Vec<Line<'static>> {
    let hint_screen = if state.screen == Screen::SaveFilenameInput {
        Screen::SaveFilenameInput
    } else {
        screen
    };
    let mut lines = vec![empty_line()];
    lines.extend(
        left_pane_hints(hint_screen, state.focus, state.geometry.left_pane_width)
            .into_iter()
            .map(|h| Line::styled(h, MUTED_TEXT)),
    );

    let width = usize::from(width.max(1));
    if let Some(notice) = &state.last_error {
        lines.push(empty_line());
        let text = format!("Error: {}", notice.message);
        lines.extend(wrapped(&text, width).into_iter().map(|l| Line::styled(l, ERROR_TEXT)));
    }
    if let Some(message) = &state.save.message {
        if state.screen != Screen::SaveFilenameInput {
            lines.push(empty_line());
            let style = message_style(message.kind);
            lines.extend(wrapped(&message.text, width).into_iter().map(|l| Line::styled(l, style)));
        }
    }
    lines
}

/// Split text into rows of at most `width` characters so the footer height
/// can be reserved exactly.
fn wrapped(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars.chunks(width).map(|c| c.iter().collect()).collect()
}

// ===== Right pane =====

fn render_right_pane(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    catalog: &MacroCatalog,
    screen: Screen,
) {
    let title = match screen {
        Screen::MacroList => "Macros",
        Screen::LogList => state.log_view.active_log.as_deref().unwrap_or("Log"),
        _ => "Viewer",
    };
    let block = pane_block(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width <= MIN_RIGHT_CONTENT_WIDTH {
        frame.render_widget(Paragraph::new(Line::styled("Terminal too narrow.", ERROR_TEXT)), inner);
        return;
    }

    let lines = match screen {
        Screen::MacroList => macro_list_lines(state, catalog, inner.width),
        Screen::LogList => entry_lines(state, inner),
        _ => instruction_lines(state),
    };
    frame.render_widget(Paragraph::new(lines), inner);
}

fn instruction_lines(state: &AppState) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from("Select a log file from the left panel to view its contents."),
        empty_line(),
        Line::styled("Use UP/DOWN or J/K to navigate", MUTED_TEXT),
        Line::styled("Press ENTER to view a file", MUTED_TEXT),
    ];
    if !state.coreprotect_mode {
        lines.push(Line::styled("Press TAB to focus on filters", MUTED_TEXT));
    }
    lines
}

/// Half-open range of entries to show so the cursor sits mid-window.
pub fn visible_window(cursor: usize, count: usize, rows: usize) -> (usize, usize) {
    let rows = rows.max(1);
    let start = cursor.saturating_sub(rows / 2);
    let end = (start + rows).min(count);
    (end.saturating_sub(rows), end)
}

fn entry_lines(state: &AppState, area: Rect) -> Vec<Line<'static>> {
    let view = &state.log_view;
    let count = state.active_entry_count();

    if count == 0 {
        if state.last_error.as_ref().is_some_and(|e| e.origin == ErrorOrigin::Load) {
            return vec![Line::styled("Error loading logs. See left pane.", ERROR_TEXT)];
        }
        let text = if view.loading && state.coreprotect_mode {
            "Loading or parsing CoreProtect log file...".to_string()
        } else if view.loading {
            "Loading or parsing log file...".to_string()
        } else if state.coreprotect_mode {
            "No CoreProtect entries found or parsed.".to_string()
        } else if !state.filters.active.is_empty() {
            format!(
                "No log entries matching filters: {}",
                state.filters.active.join(", ")
            )
        } else {
            "No log entries.".to_string()
        };
        return vec![Line::from(text)];
    }

    let mut lines = Vec::new();
    if state.coreprotect_mode {
        lines.push(Line::styled(
            "CoreProtect Log Entries (Sorted by Hours Ago):",
            SECTION_HEADER,
        ));
    } else if state.filters.active.is_empty() {
        lines.push(Line::styled("Parsed Log Entries:", SECTION_HEADER));
    } else {
        lines.push(Line::from(vec![
            Span::styled("Parsed Log Entries (Filters: ", SECTION_HEADER),
            Span::styled(state.filters.active.join(", "), HIGHLIGHT),
            Span::styled("):", SECTION_HEADER),
        ]));
    }
    lines.push(empty_line());

    let rows = usize::from(area.height.saturating_sub(ENTRY_PANE_CHROME_ROWS));
    let (start, end) = visible_window(view.cursor, count, rows);
    let text_width = usize::from(area.width.saturating_sub(2));

    for i in start..end {
        let text = if state.coreprotect_mode {
            let entry = &view.coreprotect[i];
            format!(
                "{} - {}: {}",
                entry.elapsed_label(),
                entry.username(),
                entry.message()
            )
        } else {
            format_line(&view.standard[i])
        };
        let text = truncate_with_ellipsis(&text, text_width);
        lines.push(if i == view.cursor {
            Line::styled(format!("> {text}"), HIGHLIGHT)
        } else {
            Line::from(format!("  {text}"))
        });
    }

    lines.push(empty_line());
    lines.push(Line::styled(
        format!("Viewing {}-{} of {}", start + 1, end, count),
        MUTED_TEXT,
    ));
    lines
}

fn macro_list_lines(state: &AppState, catalog: &MacroCatalog, width: u16) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled("Available Macros (UP/DOWN, ENTER):", SECTION_HEADER),
        empty_line(),
    ];
    if catalog.is_empty() {
        lines.push(Line::styled("  No macros defined yet.", MUTED_TEXT));
        return lines;
    }

    let text_width = usize::from(width.saturating_sub(2));
    for (i, m) in catalog.macros().iter().enumerate() {
        let selected = state.focus == Focus::MacroList && state.macro_cursor == i;
        let name = truncate_with_ellipsis(&m.name, text_width);
        lines.push(if selected {
            Line::styled(format!("> {name}"), HIGHLIGHT)
        } else {
            Line::from(format!("  {name}"))
        });
        if !m.description.is_empty() {
            let description = truncate_with_ellipsis(&m.description, text_width.saturating_sub(2));
            lines.push(Line::styled(format!("    {description}"), MUTED_TEXT));
        }
    }
    lines
}
