use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::Notice;
use crate::theme::Theme;

pub struct PopupWidget;

impl PopupWidget {
    /// Render a notification centered on screen
    pub fn render_notice(frame: &mut Frame, notice: &Notice, theme: &Theme) {
        let area = frame.area();
        let popup_width = 60u16.min(area.width.saturating_sub(4));
        let popup_height = 9u16.min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let accent = if notice.is_error { theme.error } else { theme.success };
        let block = Block::default()
            .title(format!(" {} ", notice.title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(theme.card));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let message = Paragraph::new(notice.message.as_str())
            .style(Style::default().fg(theme.fg).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(message, Rect { height: inner.height.saturating_sub(1), ..inner });

        if inner.height > 0 {
            let hint = Paragraph::new("press any key")
                .style(Style::default().fg(theme.dim))
                .alignment(Alignment::Center);
            frame.render_widget(hint, Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1));
        }
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
