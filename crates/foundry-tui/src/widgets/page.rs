use foundry_core::geometry::BoundingBox;
use foundry_core::Route;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use super::{ConnectorsWidget, FeatureCardWidget, ScrollButtonWidget};
use crate::app::App;
use crate::page::{clip, FOOTER_HEIGHT};

/// The page for the current route
pub struct PageWidget;

impl PageWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        frame.render_widget(Block::default().style(Style::default().bg(app.theme.bg)), area);
        match app.route {
            Route::Home => Self::render_home(frame, area, app),
            route => Self::render_route(frame, area, app, route),
        }
    }

    fn render_home(frame: &mut Frame, area: Rect, app: &App) {
        let offset = app.offset();
        let viewport = app.viewport();
        let hero = BoundingBox::new(0.0, -offset, viewport.width, app.page.section_top);
        Self::render_clipped(frame, area, hero, Self::hero_lines(app));

        let layout = app.section_layout();
        for (i, card) in layout.cards.iter().enumerate() {
            if let Some(rect) = clip(*card, area) {
                FeatureCardWidget::render(frame, rect, app, i);
            }
        }
        if let Some(rect) = clip(layout.connectors, area) {
            ConnectorsWidget::render(frame, rect, app);
        }
        if let Some(rect) = clip(layout.button, area) {
            ScrollButtonWidget::render(frame, rect, app);
        }

        let section = app.page.section_box(offset, app.pin_shift());
        let footer = BoundingBox::new(
            0.0,
            section.top + section.height + app.page.pin_distance - app.pin_shift(),
            viewport.width,
            FOOTER_HEIGHT,
        );
        Self::render_clipped(frame, area, footer, Self::footer_lines(app));
    }

    /// Render text in a box that may hang over the top of the screen
    fn render_clipped(frame: &mut Frame, area: Rect, bounds: BoundingBox, lines: Vec<Line<'static>>) {
        let Some(rect) = clip(bounds, area) else {
            return;
        };
        let hidden = (-bounds.top).max(0.0).round() as u16;
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .scroll((hidden, 0));
        frame.render_widget(paragraph, rect);
    }

    fn hero_lines(app: &App) -> Vec<Line<'static>> {
        let theme = &app.theme;
        let height = app.page.section_top.max(0.0) as usize;
        let mut lines = vec![Line::default(); height.saturating_sub(6) / 2];
        lines.push(Line::from(Span::styled(
            "AI FOUNDRY",
            Style::default().fg(theme.sky).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Turn one big idea into a plan, a website and a launch.",
            Style::default().fg(theme.fg),
        )));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "scroll to see how it works",
            Style::default().fg(theme.dim),
        )));
        lines
    }

    fn footer_lines(app: &App) -> Vec<Line<'static>> {
        let theme = &app.theme;
        let links: Vec<Span> = Route::ALL
            .iter()
            .skip(1)
            .flat_map(|r| {
                [
                    Span::styled(r.title().to_string(), Style::default().fg(theme.sky)),
                    Span::raw("  "),
                ]
            })
            .collect();
        vec![
            Line::default(),
            Line::from(links),
            Line::from(Span::styled("© AI Foundry", Style::default().fg(theme.dim))),
        ]
    }

    fn render_route(frame: &mut Frame, area: Rect, app: &App, route: Route) {
        let theme = &app.theme;
        let mut lines = vec![Line::default(); (area.height as usize).saturating_sub(3) / 2];
        lines.push(Line::from(Span::styled(
            route.title().to_string(),
            Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            route.path().to_string(),
            Style::default().fg(theme.dim),
        )));
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}
