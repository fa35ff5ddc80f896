//! Toast notifications, stacked in the top-right corner

use crate::components::layout::toast_area;
use crate::model::{Notification, NotificationLevel, Notifications};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

fn level_color(level: NotificationLevel) -> Color {
    match level {
        NotificationLevel::Success => Color::Green,
        NotificationLevel::Error => Color::Red,
    }
}

fn toast_line(notification: &Notification) -> Line<'static> {
    let color = level_color(notification.level);
    Line::from(vec![
        Span::styled(
            format!("{} ", notification.icon()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(notification.message.clone(), Style::default().fg(Color::White)),
    ])
}

/// Draw the live toasts, newest at the top
pub fn draw_notifications(frame: &mut Frame, area: Rect, notifications: &Notifications) {
    for (index, notification) in notifications.iter().rev().enumerate() {
        let Some(slot) = toast_area(area, index as u16) else {
            break;
        };
        frame.render_widget(Clear, slot);
        let toast = Paragraph::new(toast_line(notification)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(level_color(notification.level))),
        );
        frame.render_widget(toast, slot);
    }
}
