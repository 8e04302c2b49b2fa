use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use foundry_core::Property;

use crate::app::App;

const LABEL: &str = "S C R O L L";

/// The scroll button: a gradient fill growing from the left, and a border that pulses until the sequence ends
pub struct ScrollButtonWidget;

impl ScrollButtonWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let fill = app
            .handles
            .fill
            .map(|f| app.scene.value(f, Property::ScaleX))
            .unwrap_or(0.0)
            .clamp(0.0, 1.0);
        let scale = app
            .handles
            .button
            .map(|b| app.scene.value(b, Property::Scale))
            .unwrap_or(1.0);
        let peak = app.config.sequence.pulse_scale;
        let glow = if peak > 1.0 {
            ((scale - 1.0) / (peak - 1.0)).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.fade(theme.cyan, 0.5 + glow * 0.5)))
            .style(Style::default().bg(theme.card));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let filled = (fill * f64::from(inner.width)).round() as u16;
        let buf = frame.buffer_mut();
        for dx in 0..filled.min(inner.width) {
            let t = f64::from(dx) / f64::from(inner.width.max(2) - 1);
            for y in inner.y..inner.y + inner.height {
                if let Some(cell) = buf.cell_mut((inner.x + dx, y)) {
                    cell.set_bg(theme.gradient(t));
                }
            }
        }

        // Only the foreground is styled, so the fill stays visible behind the label
        let label = Paragraph::new(LABEL)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.fg).add_modifier(Modifier::BOLD));
        let label_area = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1);
        frame.render_widget(label, label_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;
    use foundry_core::config::AppConfig;
    use foundry_core::geometry::Viewport;
    use foundry_core::Stage;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn draw(app: &App) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(30, 3)).unwrap();
        terminal
            .draw(|frame| ScrollButtonWidget::render(frame, frame.area(), app))
            .unwrap();
        terminal
    }

    #[test]
    fn test_fill_and_pulse() {
        let mut app = App::new(Arc::new(AppConfig::default()), theme::dark(), Viewport::new(120.0, 40.0));
        let fill = app.handles.fill.unwrap();
        let button = app.handles.button.unwrap();
        let theme = app.theme.clone();

        app.scene.set(fill, Property::ScaleX, 0.0);
        app.scene.set(button, Property::Scale, 1.0);
        let terminal = draw(&app);
        let buf = terminal.backend().buffer();
        assert_eq!(buf.cell((1, 1)).unwrap().bg, theme.card);
        assert_eq!(buf.cell((0, 0)).unwrap().fg, theme.fade(theme.cyan, 0.5));
        let row: String = (1..29).map(|x| buf.cell((x, 1)).unwrap().symbol().to_string()).collect();
        assert!(row.contains(LABEL));

        // Half filled from the left, border at the pulse peak
        app.scene.set(fill, Property::ScaleX, 0.5);
        app.scene.set(button, Property::Scale, app.config.sequence.pulse_scale);
        let terminal = draw(&app);
        let buf = terminal.backend().buffer();
        assert_eq!(buf.cell((1, 1)).unwrap().bg, theme.gradient(0.0));
        assert_ne!(buf.cell((14, 1)).unwrap().bg, theme.card);
        assert_eq!(buf.cell((15, 1)).unwrap().bg, theme.card);
        assert_eq!(buf.cell((0, 0)).unwrap().fg, theme.fade(theme.cyan, 1.0));
    }
}
