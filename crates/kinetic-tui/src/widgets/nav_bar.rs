use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, BRAND, NAV_GAP};

pub struct NavBarWidget;

impl NavBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let gap = " ".repeat(NAV_GAP as usize);

        let mut spans = vec![
            Span::styled(" ", Style::default().bg(theme.bg1)),
            Span::styled(
                BRAND,
                Style::default()
                    .fg(theme.accent)
                    .bg(theme.bg1)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(gap.clone(), Style::default().bg(theme.bg1)),
        ];

        for (index, link) in app.nav.iter().enumerate() {
            // Idle and resolved frames already show the label
            let text = link.driver.frame().text;
            let style = if app.nav_focus == Some(index) {
                Style::default()
                    .fg(theme.accent)
                    .bg(theme.bg1)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(theme.fg1).bg(theme.bg1)
            };
            spans.push(Span::styled(text, style));
            spans.push(Span::styled(gap.clone(), Style::default().bg(theme.bg1)));
        }

        let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.bg1));
        frame.render_widget(paragraph, area);
    }
}
