use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::app::{App, Content, Section, SectionKind, CONTENT_INDENT};

/// Renders the scrolled page with every section's current style applied
pub struct PageWidget;

impl PageWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let scroll = app.scroll_offset();
        let headline = app.headline.frame().text;
        let mut lines: Vec<Line> = vec![Line::default(); area.height as usize];

        for section in &app.sections {
            let opacity = section.style.opacity();
            let base_col = CONTENT_INDENT as i32
                + section.shift_cols()
                + scale_indent(section.style.scale(), area.width)
                + tilt_cols(section, app);

            for (index, content) in section.content.iter().enumerate() {
                let Some(row) = section.screen_row(index as u16, scroll, area) else {
                    continue;
                };

                let mut col = base_col;
                // marquee rows drift in opposite directions
                if section.kind == SectionKind::About && index % 2 == 1 {
                    col -= 2 * section.shift_cols();
                }

                let (text, style) = match content {
                    Content::Title(text) => (
                        text.to_string(),
                        Style::default()
                            .fg(theme.faded(theme.fg0, opacity))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Content::Text(text) => (
                        text.to_string(),
                        Style::default().fg(theme.faded(theme.fg1, opacity)),
                    ),
                    Content::Headline => (
                        headline.clone(),
                        Style::default()
                            .fg(theme.faded(theme.accent, opacity))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Content::Cta(text) => {
                        col += app.cta_offset();
                        (
                            text.to_string(),
                            Style::default()
                                .fg(theme.faded(theme.bg0, opacity))
                                .bg(theme.faded(theme.accent, opacity))
                                .add_modifier(Modifier::BOLD),
                        )
                    }
                    Content::Blank => continue,
                };

                let (pad, visible) = place_text(&text, col, area.width);
                lines[(row - area.y) as usize] =
                    Line::from(vec![Span::raw(" ".repeat(pad)), Span::styled(visible, style)]);
            }
        }

        let paragraph = Paragraph::new(lines).style(Style::default().bg(theme.bg0));
        frame.render_widget(paragraph, area);
    }
}

/// Extra indent that makes a scaled-down section look narrower
fn scale_indent(scale: f64, width: u16) -> i32 {
    if !scale.is_finite() || scale >= 1.0 {
        return 0;
    }
    ((1.0 - scale.max(0.0)) * width as f64 / 2.0).round() as i32
}

/// Hero content leans one column per degree of yaw
fn tilt_cols(section: &Section, app: &App) -> i32 {
    if section.kind != SectionKind::Hero {
        return 0;
    }
    app.tilt_degrees.1.round() as i32
}

/// Place `text` starting at column `col` (negative clips its head) within `width`.
///
/// Returns the left padding and the visible part of the text.
pub fn place_text(text: &str, col: i32, width: u16) -> (usize, String) {
    let width = width as usize;
    let pad = col.max(0) as usize;
    if pad >= width {
        return (width, String::new());
    }

    let mut skip = col.min(0).unsigned_abs() as usize;
    let mut used = 0;
    let mut visible = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if skip > 0 {
            skip = skip.saturating_sub(w);
            continue;
        }
        if pad + used + w > width {
            break;
        }
        visible.push(ch);
        used += w;
    }
    (pad, visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_text() {
        assert_eq!(place_text("hello", 2, 10), (2, "hello".to_string()));
        assert_eq!(place_text("hello", -2, 10), (0, "llo".to_string()));
        assert_eq!(place_text("hello", 8, 10), (8, "he".to_string()));
        assert_eq!(place_text("hello", 12, 10), (10, String::new()));
        assert_eq!(place_text("hello", -9, 10), (0, String::new()));
    }

    #[test]
    fn test_place_wide_chars() {
        // each CJK character takes two cells
        assert_eq!(place_text("日本語", 0, 5), (0, "日本".to_string()));
        assert_eq!(place_text("日本語", -2, 10), (0, "本語".to_string()));
    }

    #[test]
    fn test_scale_indent() {
        assert_eq!(scale_indent(1.0, 80), 0);
        assert_eq!(scale_indent(1.1, 80), 0);
        assert_eq!(scale_indent(0.9, 80), 4);
        assert_eq!(scale_indent(f64::NAN, 80), 0);
    }
}
