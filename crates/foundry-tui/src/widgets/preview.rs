use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, DeployStatus};

/// Sandboxed text view of the HTML file; markup is rendered, never executed
pub struct PreviewWidget;

impl PreviewWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = app.theme.clone();
        let deploy_line = match &app.deploy {
            DeployStatus::Idle => Span::styled(" D: deploy ", Style::default().fg(theme.dim)),
            DeployStatus::Deploying => Span::styled(" Deploying... ", Style::default().fg(theme.sky)),
            DeployStatus::Deployed(d) => {
                Span::styled(format!(" {}  o: open ", d.url), Style::default().fg(theme.success))
            }
            DeployStatus::Failed(e) => Span::styled(format!(" {} ", e), Style::default().fg(theme.error)),
        };
        let Some(preview) = app.preview.as_mut() else {
            return;
        };

        frame.render_widget(Clear, area);
        let block = Block::default()
            .title(format!(" {} ", preview.file_name()))
            .title_bottom(Line::from(deploy_line))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.sky))
            .style(Style::default().bg(theme.card).fg(theme.fg));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let text = preview.text(inner.width).to_string();
        let max_scroll = (text.lines().count() as u16).saturating_sub(inner.height);
        preview.scroll = preview.scroll.min(max_scroll);
        frame.render_widget(Paragraph::new(text).scroll((preview.scroll, 0)), inner);
    }
}
