//! Help dialog component
//!
//! Lists the keyboard shortcuts of the table and both dialogs.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Table",
        &[
            ("↑/↓ j/k", "Move between rows"),
            ("←/→ h/l", "Previous / next page"),
            ("1-9", "Jump to page"),
            ("e Enter", "Edit submission"),
            ("d Del", "Delete submission"),
            ("r", "Reload submissions"),
            ("q Esc", "Quit"),
        ],
    ),
    (
        "Edit dialog",
        &[
            ("Tab/S-Tab", "Next / previous field"),
            ("Space", "Toggle resolved (on Status)"),
            ("Enter C-s", "Save changes"),
            ("Esc", "Cancel"),
        ],
    ),
    (
        "Delete dialog",
        &[("y Enter", "Confirm delete"), ("n Esc", "Cancel")],
    ),
];

/// Help dialog showing keyboard shortcuts
#[derive(Default)]
pub struct HelpDialog;

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseOverlay),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let content = build_help_content();
        let popup_area = centered_popup(area, 56, content.len() as u16 + 2);
        frame.render_widget(Clear, popup_area);

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Keyboard Shortcuts ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

fn build_help_content() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (title, keys) in SECTIONS {
        lines.push(Line::from(Span::styled(
            format!("─ {} ─", title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        for (key, description) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<12}", key),
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(*description),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Press Esc or ? to close",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}
