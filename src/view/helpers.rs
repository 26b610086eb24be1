//! Rendering helpers shared across screens.

use ratatui::layout::Rect;
use ratatui::text::Line;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// Empty line for spacing.
pub fn empty_line() -> Line<'static> {
    Line::from("")
}

/// Cut `text` to at most `max_width` display columns, ending in `...` when cut.
///
/// Widths below 4 leave no room for content and the ellipsis, so the text is
/// hard-cut instead.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= ELLIPSIS.len() {
        return take_columns(text, max_width);
    }
    let mut out = take_columns(text, max_width - ELLIPSIS.len());
    out.push_str(ELLIPSIS);
    out
}

fn take_columns(text: &str, columns: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > columns {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

/// Rect of `width` x `height` centered in `area`, clipped to it.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_with_ellipsis("latest.log", 20), "latest.log");
        assert_eq!(truncate_with_ellipsis("exact", 5), "exact");
    }

    #[test]
    fn long_text_ends_in_ellipsis_within_width() {
        let out = truncate_with_ellipsis("logs/2024-01-01-1.log.gz", 12);
        assert_eq!(out, "logs/2024...");
        assert_eq!(out.width(), 12);
    }

    #[test]
    fn wide_characters_count_by_display_width() {
        let out = truncate_with_ellipsis("日本語のログファイル", 9);
        assert!(out.ends_with("..."));
        assert!(out.width() <= 9);
        assert!(out.starts_with("日本語"));
    }

    #[test]
    fn tiny_width_hard_cuts() {
        assert_eq!(truncate_with_ellipsis("abcdef", 2), "ab");
        assert_eq!(truncate_with_ellipsis("abcdef", 0), "");
    }

    #[test]
    fn centered_rect_is_clipped_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_rect(20, 4, area), Rect::new(10, 3, 20, 4));
        assert_eq!(centered_rect(100, 100, area), area);
    }
}
