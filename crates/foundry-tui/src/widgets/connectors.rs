use foundry_core::section::tiles::{CONNECTOR_DROP, CONNECTOR_VIEW_BOX};
use foundry_core::section::Connector;
use foundry_core::Property;
use ratatui::{layout::Rect, style::Style, Frame};

use crate::app::App;

/// Draws the three pipes between the cards and the scroll button, each as far as its stroke has been drawn
pub struct ConnectorsWidget;

impl ConnectorsWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        if area.width < 2 || area.height < 2 {
            return;
        }
        let theme = &app.theme;
        let [_, _, view_width, _] = CONNECTOR_VIEW_BOX;
        let col = |x: f64| area.x + ((x / view_width) * f64::from(area.width - 1)).round() as u16;
        let drop_rows = area.height - 1;
        let bottom = area.y + drop_rows;
        let buf = frame.buffer_mut();

        for (i, connector) in Connector::ALL.iter().enumerate() {
            let Some(id) = app.handles.connector(i) else {
                continue;
            };
            let opacity = app.scene.value(id, Property::Opacity);
            let fraction = app.scene.drawn_fraction(id);
            if opacity <= 0.0 || fraction <= 0.0 {
                continue;
            }

            let (from, to) = connector.span();
            let run = (to - from).abs();
            let drawn = fraction * (CONNECTOR_DROP + run);
            let color = theme.fade(theme.gradient(i as f64 / 2.0), opacity);
            let style = Style::default().fg(color);
            let x0 = col(from);

            let down = ((drawn / CONNECTOR_DROP).min(1.0) * f64::from(drop_rows)).round() as u16;
            for row in 0..down {
                if let Some(cell) = buf.cell_mut((x0, area.y + row)) {
                    cell.set_symbol("│").set_style(style);
                }
            }

            if drawn <= CONNECTOR_DROP {
                continue;
            }
            let across = ((drawn - CONNECTOR_DROP) / run).min(1.0);
            let x1 = col(from + (to - from) * across);
            let corner = if to > from { "╰" } else { "╯" };
            if let Some(cell) = buf.cell_mut((x0, bottom)) {
                cell.set_symbol(corner).set_style(style);
            }
            let (lo, hi) = if x1 > x0 { (x0 + 1, x1) } else { (x1, x0.saturating_sub(1)) };
            for x in lo..=hi {
                if let Some(cell) = buf.cell_mut((x, bottom)) {
                    cell.set_symbol("─").set_style(style);
                }
            }
        }
    }
}
