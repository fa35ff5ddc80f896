//! Submission table component
//!
//! Renders whichever view the manager reports: the loading indicator, the
//! empty state, or the current page of submissions with its page bar.

use crate::action::Action;
use crate::component::Component;
use crate::model::{Pagination, Submission, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use unicode_width::UnicodeWidthChar;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const HEADERS: [&str; 8] = [
    "S.N.", "Date", "Name", "Email", "Phone", "Subject", "Message", "Status",
];

const SUBJECT_WIDTH: usize = 28;
const MESSAGE_WIDTH: usize = 48;

/// Table of submissions with pagination controls
#[derive(Default)]
pub struct SubmissionTable;

impl Component for SubmissionTable {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextRow),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevRow),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => Some(Action::NextPage),
            KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => Some(Action::PrevPage),
            KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| Action::GoToPage(d as usize)),
            KeyCode::Char('e') | KeyCode::Enter => Some(Action::BeginEdit),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::RequestDelete),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the manager's view, so we use draw_with_view
        Ok(())
    }
}

impl SubmissionTable {
    pub fn draw_with_view(
        &self,
        frame: &mut Frame,
        area: Rect,
        view: &View<'_>,
        tick: usize,
    ) -> Result<()> {
        match view {
            View::Loading => {
                let line = Line::from(vec![
                    Span::styled(
                        format!("{} ", SPINNER[tick % SPINNER.len()]),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw("Loading submissions..."),
                ]);
                draw_centered_message(frame, area, line);
            }
            View::Empty => {
                let line = Line::from(Span::styled(
                    "No submissions yet",
                    Style::default().fg(Color::DarkGray),
                ));
                draw_centered_message(frame, area, line);
            }
            View::Table {
                rows,
                pagination,
                cursor,
            } => draw_table(frame, area, rows, pagination, *cursor),
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helper functions
// ─────────────────────────────────────────────────────────────────────────────

fn outer_block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
}

fn draw_centered_message(frame: &mut Frame, area: Rect, line: Line<'static>) {
    let block = outer_block(" Submissions ".to_string());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }
    let row = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), row);
}

fn draw_table(
    frame: &mut Frame,
    area: Rect,
    rows: &[Submission],
    pagination: &Pagination,
    cursor: usize,
) {
    let show_pages = pagination.total_pages > 1;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(if show_pages { 1 } else { 0 }),
        ])
        .split(area);

    let offset = pagination.range().start;
    let body: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, submission)| submission_row(offset + i + 1, submission))
        .collect();

    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h))).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let widths = [
        Constraint::Length(5),
        Constraint::Length(10),
        Constraint::Length(18),
        Constraint::Length(26),
        Constraint::Length(16),
        Constraint::Min(12),
        Constraint::Min(16),
        Constraint::Length(10),
    ];

    let table = Table::new(body, widths)
        .header(header)
        .block(outer_block(format!(
            " Submissions ({}) ",
            pagination.total_items
        )))
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(table, chunks[0], &mut state);

    if show_pages {
        frame.render_widget(Paragraph::new(page_bar_line(pagination)), chunks[1]);
    }
}

/// Colour for a status label; custom labels get a neutral colour
fn status_color(label: &str) -> Color {
    if label.eq_ignore_ascii_case("resolved") {
        Color::Green
    } else if label.eq_ignore_ascii_case("pending") {
        Color::Yellow
    } else {
        Color::Cyan
    }
}

fn submission_row(serial: usize, submission: &Submission) -> Row<'static> {
    let status = submission.status_label();

    Row::new(vec![
        Cell::from(serial.to_string()),
        Cell::from(submission.display_date()),
        Cell::from(submission.display_name().to_string()),
        Cell::from(submission.display_email().to_string()),
        Cell::from(submission.display_phone().to_string()),
        Cell::from(truncate(submission.display_subject(), SUBJECT_WIDTH)),
        Cell::from(truncate(submission.display_message(), MESSAGE_WIDTH)),
        Cell::from(Span::styled(
            status.to_string(),
            Style::default().fg(status_color(status)),
        )),
    ])
}

/// Page controls: previous, one entry per page, next, then the row caption
pub fn page_bar_line(pagination: &Pagination) -> Line<'static> {
    let enabled = Style::default().fg(Color::Cyan);
    let disabled = Style::default().fg(Color::DarkGray);

    let mut spans = vec![Span::styled(
        " ‹ Prev ",
        if pagination.has_prev() { enabled } else { disabled },
    )];

    for page in 1..=pagination.total_pages {
        if page == pagination.page {
            spans.push(Span::styled(
                format!("[{}]", page),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                format!(" {} ", page),
                Style::default().fg(Color::White),
            ));
        }
    }

    spans.push(Span::styled(
        " Next › ",
        if pagination.has_next() { enabled } else { disabled },
    ));

    let (first, last) = pagination.showing();
    spans.push(Span::styled(
        format!(
            "  Showing {} to {} of {} entries",
            first, last, pagination.total_items
        ),
        Style::default().fg(Color::DarkGray),
    ));

    Line::from(spans)
}

/// Collapse whitespace and cut to `max` display columns, marking the cut with `...`
pub fn truncate(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let width: usize = flat.chars().map(|c| c.width().unwrap_or(0)).sum();
    if width <= max {
        return flat;
    }

    let budget = max.saturating_sub(3);
    let mut used = 0;
    let mut out = String::new();
    for c in flat.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}
