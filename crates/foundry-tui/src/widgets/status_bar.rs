use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, DeployStatus, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = match &app.mode {
            Mode::Normal => "PAGE",
            Mode::Preview => "PREVIEW",
            Mode::Notice(_) => "NOTICE",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {} | {}", mode_str, msg)
        } else {
            let mut parts = vec![format!(" {} {}", mode_str, app.route)];
            if let Some(section) = app.section() {
                match section.sequencer().progress() {
                    Some(p) => parts.push(format!("{:>3.0}%", p * 100.0)),
                    None => parts.push("static".to_string()),
                }
                if app.is_pinned() {
                    parts.push("pinned".to_string());
                }
                let positions: Vec<String> = app
                    .positions()
                    .iter()
                    .map(|p| format!("({:.2},{:.2})", p.x, p.y))
                    .collect();
                if !positions.is_empty() {
                    parts.push(positions.join(" "));
                }
            }
            match &app.deploy {
                DeployStatus::Idle => {}
                DeployStatus::Deploying => parts.push("deploying".to_string()),
                DeployStatus::Deployed(d) => parts.push(d.url.clone()),
                DeployStatus::Failed(_) => parts.push("deploy failed".to_string()),
            }
            parts.join(" | ")
        };

        let help_hint = " q:quit j/k:scroll tab:page p:preview D:deploy ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.chars().count() + help_hint.len());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg).bg(theme.card)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.card)),
            Span::styled(help_hint, Style::default().fg(theme.dim).bg(theme.card)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
