use foundry_core::section::TileHandles;
use foundry_core::{Property, Scene};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::theme::Theme;

/// Rows taken by the icon and title block (icon, gap, title)
const TITLE_BLOCK_ROWS: f64 = 3.0;
/// Below this opacity text is not drawn at all
const VISIBLE_OPACITY: f64 = 0.05;

pub struct FeatureCardWidget;

impl FeatureCardWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, index: usize) {
        let (Some(tile), Some(handles)) = (app.tiles.get(index), app.handles.tiles.get(index)) else {
            return;
        };
        let theme = &app.theme;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.dim))
            .style(Style::default().bg(theme.card));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        // The icon and title slide up together
        let shift = handles
            .title_block
            .map(|b| (app.scene.value(b, Property::YPercent) / 100.0 * TITLE_BLOCK_ROWS).round())
            .unwrap_or(0.0);
        let block_top = (1.0 + shift).max(0.0) as u16;

        let mut lines = vec![Line::default(); block_top as usize];
        lines.push(icon_line(&app.scene, handles, theme, inner.width));
        lines.push(Line::default());
        lines.push(centered(
            &tile.title,
            inner.width,
            Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
        ));
        let header_rows = lines.len() as u16;
        frame.render_widget(Paragraph::new(lines), inner);

        let opacity = handles
            .description
            .map(|d| app.scene.value(d, Property::Opacity))
            .unwrap_or(1.0);
        let body_top = inner.y + header_rows + 1;
        if opacity < VISIBLE_OPACITY || body_top >= inner.y + inner.height {
            return;
        }
        let body = Rect::new(inner.x + 1, body_top, inner.width.saturating_sub(2), inner.y + inner.height - body_top);
        let description = Paragraph::new(tile.description.as_str())
            .style(Style::default().fg(theme.fade(theme.fg, opacity)))
            .wrap(Wrap { trim: true });
        frame.render_widget(description, body);
    }
}

/// One segment per stroke of the icon, drawn as far as its dash offset allows
fn icon_line(scene: &Scene, handles: &TileHandles, theme: &Theme, width: u16) -> Line<'static> {
    let Some(icon_id) = handles.icon else {
        return Line::default();
    };
    let Some(icon) = scene.icon(icon_id) else {
        return Line::default();
    };
    let count = icon.primitives.len();
    if count == 0 {
        return Line::default();
    }

    let opacity = scene.value(icon_id, Property::Opacity);
    let segment = ((width as usize).saturating_sub(count + 1) / count).clamp(1, 6);
    let total = count * (segment + 1) - 1;
    let mut spans = vec![Span::raw(" ".repeat((width as usize).saturating_sub(total) / 2))];

    for (i, primitive) in icon.primitives.iter().enumerate() {
        let drawn = (scene.drawn_fraction(primitive.id) * segment as f64).round() as usize;
        let color = theme.fade(theme.gradient(i as f64 / count.max(2).saturating_sub(1) as f64), opacity);
        spans.push(Span::styled("━".repeat(drawn), Style::default().fg(color)));
        spans.push(Span::styled(
            "┄".repeat(segment - drawn.min(segment)),
            Style::default().fg(theme.fade(theme.dim, opacity)),
        ));
        if i + 1 < count {
            spans.push(Span::raw(" "));
        }
    }
    Line::from(spans)
}

fn centered(text: &str, width: u16, style: Style) -> Line<'static> {
    let pad = (width as usize).saturating_sub(text.width()) / 2;
    Line::from(vec![
        Span::raw(" ".repeat(pad)),
        Span::styled(text.to_string(), style),
    ])
}
