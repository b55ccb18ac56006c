use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = if app.visible { "PREVIEW" } else { "PAUSED" };

        let section = app
            .sections
            .get(app.current_section())
            .map(|s| s.kind.nav_label().unwrap_or("Footer"))
            .unwrap_or("-");

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {} | {}", mode_str, msg)
        } else {
            let (rotate_x, rotate_y) = app.tilt_degrees;
            format!(
                " {} | {} | {:>3.0}% | tilt {:+.1}/{:+.1}",
                mode_str,
                section,
                app.progress_style.scale().clamp(0.0, 1.0) * 100.0,
                rotate_x,
                rotate_y
            )
        };

        let help_hint = " q:quit j/k:scroll 1-5:sections tab:nav ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        let paragraph = Paragraph::new(line);
        frame.render_widget(paragraph, area);
    }
}
