//! Edit submission dialog component

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::{EditField, Submission};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Edit dialog over the manager's draft
#[derive(Default)]
pub struct EditDialog;

impl Component for EditDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let action = match key.code {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::SaveEdit),
            KeyCode::Char('s') if ctrl => Some(Action::SaveEdit),
            KeyCode::Tab | KeyCode::Down => Some(Action::EditNextField),
            KeyCode::BackTab | KeyCode::Up => Some(Action::EditPrevField),
            KeyCode::Backspace => Some(Action::EditBackspace),
            KeyCode::PageDown => Some(Action::NextPage),
            KeyCode::PageUp => Some(Action::PrevPage),
            KeyCode::Char(c) if !ctrl => Some(Action::EditInput(c)),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the draft, so we use draw_with_draft
        Ok(())
    }
}

impl EditDialog {
    pub fn draw_with_draft(
        &self,
        frame: &mut Frame,
        area: Rect,
        draft: &Submission,
        focus: EditField,
        saving: bool,
    ) -> Result<()> {
        let popup_area = centered_popup(area, 70, 22);
        frame.render_widget(Clear, popup_area);

        let mut content = vec![
            Line::from(Span::styled(
                "Make changes to the contact submission here.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
        ];

        for field in EditField::ALL {
            content.extend(field_lines(draft, field, field == focus && !saving));
        }

        content.push(Line::from(""));
        content.push(footer_line(saving));

        let paragraph = Paragraph::new(content)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(" Edit Submission ")
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
            );

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helper functions
// ─────────────────────────────────────────────────────────────────────────────

fn field_lines(draft: &Submission, field: EditField, focused: bool) -> Vec<Line<'static>> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let marker = if focused { "▶ " } else { "  " };

    match field.text(draft) {
        Some(text) => {
            let mut value = vec![Span::raw("    "), Span::raw(text.to_string())];
            if focused {
                value.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
            }
            vec![
                Line::from(Span::styled(format!("{}{}", marker, field.label()), label_style)),
                Line::from(value),
            ]
        }
        None => {
            let checkbox = if draft.is_resolved() { "[x]" } else { "[ ]" };
            vec![Line::from(vec![
                Span::styled(format!("{}{} ", marker, field.label()), label_style),
                Span::styled(
                    format!("{} ", checkbox),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("Mark as resolved", Style::default().fg(Color::DarkGray)),
            ])]
        }
    }
}

fn footer_line(saving: bool) -> Line<'static> {
    if saving {
        return Line::from(vec![
            Span::styled(
                "Saving...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Esc ", Style::default().fg(Color::Red)),
            Span::raw("Close"),
        ]);
    }

    Line::from(vec![
        Span::styled(
            " Enter ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("Save changes  "),
        Span::styled(
            " Tab ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("Next field  "),
        Span::styled(
            " Esc ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::raw("Cancel"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_typing_maps_to_input() {
        let mut dialog = EditDialog;
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE)).unwrap(),
            Some(Action::EditInput('q'))
        );
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Char(' '), KeyModifiers::NONE)).unwrap(),
            Some(Action::EditInput(' '))
        );
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Char('s'), KeyModifiers::CONTROL)).unwrap(),
            Some(Action::SaveEdit)
        );
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Esc, KeyModifiers::NONE)).unwrap(),
            Some(Action::Cancel)
        );
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::BackTab, KeyModifiers::SHIFT)).unwrap(),
            Some(Action::EditPrevField)
        );
    }

    #[test]
    fn test_field_lines_show_value_and_cursor() {
        let draft = Submission {
            name: "Grace".to_string(),
            resolved: Some(true),
            ..Default::default()
        };

        let focused = text(&field_lines(&draft, EditField::Name, true));
        assert!(focused.contains("▶ Name"));
        assert!(focused.contains("Grace▏"));

        let unfocused = text(&field_lines(&draft, EditField::Phone, false));
        assert!(unfocused.contains("  Phone"));
        assert!(!unfocused.contains('▏'));

        let status = text(&field_lines(&draft, EditField::Resolved, false));
        assert!(status.contains("[x] Mark as resolved"));
    }

    #[test]
    fn test_footer_reflects_saving() {
        assert!(text(&[footer_line(true)]).contains("Saving..."));
        assert!(text(&[footer_line(false)]).contains("Save changes"));
    }
}
