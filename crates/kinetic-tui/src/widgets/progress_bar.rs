use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct ProgressBarWidget;

impl ProgressBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let filled = filled_cells(app.progress_style.scale(), area.width);
        let rest = area.width.saturating_sub(filled) as usize;

        let line = Line::from(vec![
            Span::styled(
                "━".repeat(filled as usize),
                Style::default().fg(app.theme.accent),
            ),
            Span::styled("─".repeat(rest), Style::default().fg(app.theme.bg2)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Cells covered by a bar scaled to `scale` of `width`
fn filled_cells(scale: f64, width: u16) -> u16 {
    let scale = if scale.is_finite() { scale.clamp(0.0, 1.0) } else { 0.0 };
    (scale * width as f64).round() as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_cells() {
        assert_eq!(filled_cells(0.0, 80), 0);
        assert_eq!(filled_cells(0.5, 80), 40);
        assert_eq!(filled_cells(1.0, 80), 80);
        // spring overshoot never spills past the bar
        assert_eq!(filled_cells(1.02, 80), 80);
        assert_eq!(filled_cells(f64::NAN, 80), 0);
    }
}
