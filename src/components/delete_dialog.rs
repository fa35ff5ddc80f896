//! Delete confirmation dialog component

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Confirmation dialog for the pending delete target
#[derive(Default)]
pub struct DeleteDialog;

impl Component for DeleteDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Action::ConfirmDelete),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::Cancel),
            KeyCode::PageDown | KeyCode::Right => Some(Action::NextPage),
            KeyCode::PageUp | KeyCode::Left => Some(Action::PrevPage),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the pending target, so we use draw_with_target
        Ok(())
    }
}

impl DeleteDialog {
    pub fn draw_with_target(
        &self,
        frame: &mut Frame,
        area: Rect,
        id: &str,
        deleting: bool,
        can_confirm: bool,
    ) -> Result<()> {
        let popup_area = centered_popup(area, 60, 10);
        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Are you sure you want to delete this submission?",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "This action cannot be undone.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                format!("ID: {}", id),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            confirm_line(deleting, can_confirm),
        ];

        let paragraph = Paragraph::new(content)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Confirm Deletion ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            )
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

fn confirm_line(deleting: bool, can_confirm: bool) -> Line<'static> {
    let confirm = if deleting {
        Span::styled(
            " Deleting... ",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    } else if can_confirm {
        Span::styled(
            " y Delete ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(" y Delete ", Style::default().fg(Color::DarkGray))
    };

    Line::from(vec![
        confirm,
        Span::raw("  "),
        Span::styled(
            " n/Esc ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("Cancel"),
    ])
}
