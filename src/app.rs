//! Root application component
//!
//! The App is the submission manager's caller: it routes keys to whichever
//! component owns the screen, runs the operations the manager hands back on
//! the dispatcher, and refreshes the collection after successful mutations.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_notifications, screen_layout, DeleteDialog, EditDialog, HelpDialog, QuitDialog,
    SubmissionTable,
};
use crate::error::ServiceError;
use crate::model::{Completion, FlowState, Operation, Outcome, SubmissionFeed, SubmissionManager, Ticket};
use crate::services::{Dispatcher, SubmissionService};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

pub const LOAD_FAILED: &str = "Failed to load submissions";

/// Overlay drawn above everything else
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Help,
    QuitConfirm,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

pub struct App {
    pub manager: SubmissionManager,

    /// Runs data service calls in the background
    dispatcher: Dispatcher,

    overlay: Option<Overlay>,

    /// Ticket of the newest fetch; older fetch results are dropped
    latest_fetch: Option<Ticket>,

    /// Where the submissions come from, shown in the title line
    source_label: String,

    /// Ticks since start, drives the loading spinner
    ticks: usize,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    table: SubmissionTable,
    edit_dialog: EditDialog,
    delete_dialog: DeleteDialog,
    help_dialog: HelpDialog,
    quit_dialog: QuitDialog,
}

impl App {
    pub fn new(service: Arc<dyn SubmissionService>, source_label: impl Into<String>) -> Self {
        Self {
            manager: SubmissionManager::new(),
            dispatcher: Dispatcher::new(service),
            overlay: None,
            latest_fetch: None,
            source_label: source_label.into(),
            ticks: 0,
            should_quit: false,
            table: SubmissionTable,
            edit_dialog: EditDialog,
            delete_dialog: DeleteDialog,
            help_dialog: HelpDialog,
            quit_dialog: QuitDialog,
        }
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    /// Reload the collection; the table shows the loading view meanwhile
    pub fn refresh(&mut self) {
        let ticket = self.manager.issue_ticket();
        self.latest_fetch = Some(ticket);
        self.manager.set_loading(true);
        self.dispatcher.dispatch(Operation::Fetch { ticket });
    }

    fn dispatch(&mut self, operation: Option<Operation>) {
        if let Some(operation) = operation {
            self.dispatcher.dispatch(operation);
        }
    }

    fn handle_completion(&mut self, completion: Completion) {
        let ticket = completion.ticket;
        match completion.outcome {
            Outcome::Fetched(result) => self.apply_fetch(ticket, result),
            outcome => {
                if self.manager.settle(Completion::new(ticket, outcome)) {
                    self.refresh();
                }
            }
        }
    }

    fn apply_fetch(&mut self, ticket: Ticket, result: Result<Value, ServiceError>) {
        if self.latest_fetch != Some(ticket) {
            debug!(ticket, "stale fetch result dropped");
            return;
        }
        self.latest_fetch = None;
        self.manager.set_loading(false);

        match result {
            Ok(value) => {
                let feed = SubmissionFeed::from_value(value);
                info!(records = feed.len(), "submissions loaded");
                self.manager.set_feed(feed);
            }
            Err(e) => {
                error!(error = %e, "failed to load submissions");
                self.manager.notify_error(LOAD_FAILED);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.refresh();
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        if let Some(overlay) = self.overlay {
            return match overlay {
                Overlay::Help => self.help_dialog.handle_key_event(key),
                Overlay::QuitConfirm => self.quit_dialog.handle_key_event(key),
            };
        }

        if self.manager.is_loading() {
            let action = match key.code {
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),
                KeyCode::Char('?') => Some(Action::OpenHelp),
                _ => None,
            };
            return Ok(action);
        }

        match self.manager.state() {
            FlowState::Idle => self.table.handle_key_event(key),
            FlowState::Editing { .. } | FlowState::Saving { .. } => {
                self.edit_dialog.handle_key_event(key)
            }
            FlowState::Confirming { .. } | FlowState::Deleting { .. } => {
                self.delete_dialog.handle_key_event(key)
            }
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                self.ticks = self.ticks.wrapping_add(1);
                for completion in self.dispatcher.poll() {
                    self.handle_completion(completion);
                }
                self.manager.tick();
            }
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                info!(in_flight = self.dispatcher.in_flight(), "quitting");
                self.should_quit = true;
            }
            Action::Refresh => self.refresh(),

            // ─────────────────────────────────────────────────────────────────
            // Table Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::NextRow => self.manager.select_next(),
            Action::PrevRow => self.manager.select_prev(),
            Action::NextPage => {
                self.manager.next_page();
            }
            Action::PrevPage => {
                self.manager.prev_page();
            }
            Action::GoToPage(page) => {
                if self.manager.pagination().contains(page) {
                    self.manager.change_page(page);
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Edit Dialog
            // ─────────────────────────────────────────────────────────────────
            Action::BeginEdit => {
                self.manager.begin_edit_selected();
            }
            Action::EditInput(c) => self.manager.edit_input(c),
            Action::EditBackspace => self.manager.edit_backspace(),
            Action::EditNextField => self.manager.focus_next(),
            Action::EditPrevField => self.manager.focus_prev(),
            Action::SaveEdit => {
                let operation = self.manager.save_edit();
                self.dispatch(operation);
            }

            // ─────────────────────────────────────────────────────────────────
            // Delete Dialog
            // ─────────────────────────────────────────────────────────────────
            Action::RequestDelete => {
                self.manager.request_delete_selected();
            }
            Action::ConfirmDelete => {
                let operation = self.manager.confirm_delete();
                self.dispatch(operation);
            }
            Action::Cancel => self.manager.cancel(),

            // ─────────────────────────────────────────────────────────────────
            // Overlays
            // ─────────────────────────────────────────────────────────────────
            Action::OpenHelp => self.overlay = Some(Overlay::Help),
            Action::OpenQuitDialog => self.overlay = Some(Overlay::QuitConfirm),
            Action::CloseOverlay => self.overlay = None,
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = screen_layout(area);

        self.draw_header(frame, layout.header);
        self.table
            .draw_with_view(frame, layout.body, &self.manager.view(), self.ticks)?;
        self.draw_help_bar(frame, layout.help);

        // Dialogs are hidden while the collection is loading
        if !self.manager.is_loading() {
            match self.manager.state() {
                FlowState::Idle => {}
                FlowState::Editing { draft, focus } => {
                    self.edit_dialog
                        .draw_with_draft(frame, area, draft, *focus, false)?;
                }
                FlowState::Saving { draft, focus, .. } => {
                    self.edit_dialog
                        .draw_with_draft(frame, area, draft, *focus, true)?;
                }
                FlowState::Confirming { id } => {
                    let can_confirm = self.manager.can_confirm_delete();
                    self.delete_dialog
                        .draw_with_target(frame, area, id, false, can_confirm)?;
                }
                FlowState::Deleting { id, .. } => {
                    self.delete_dialog
                        .draw_with_target(frame, area, id, true, false)?;
                }
            }
        }

        draw_notifications(frame, area, self.manager.notifications());

        match self.overlay {
            Some(Overlay::Help) => self.help_dialog.draw(frame, area)?,
            Some(Overlay::QuitConfirm) => {
                self.quit_dialog
                    .draw_with_pending(frame, area, self.dispatcher.in_flight())?
            }
            None => {}
        }

        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                " Submission Desk ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {} ", self.source_label),
                Style::default().fg(Color::DarkGray),
            ),
        ];

        if !self.manager.is_loading() && !self.manager.feed().is_empty() {
            let pagination = self.manager.pagination();
            spans.push(Span::styled(
                format!(" page {}/{} ", pagination.page, pagination.total_pages),
                Style::default().fg(Color::Cyan),
            ));
        }

        let in_flight = self.dispatcher.in_flight();
        if in_flight > 0 {
            spans.push(Span::styled(
                format!(" ⏳ {} pending ", in_flight),
                Style::default().fg(Color::Yellow),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        let hints: &[(&str, &str)] = if self.manager.is_loading() {
            &[("?", "Help"), ("q", "Quit")]
        } else {
            match self.manager.state() {
                FlowState::Idle => &[
                    ("↑/↓", "Row"),
                    ("←/→", "Page"),
                    ("e", "Edit"),
                    ("d", "Delete"),
                    ("r", "Reload"),
                    ("?", "Help"),
                    ("q", "Quit"),
                ],
                FlowState::Editing { .. } => &[
                    ("Tab", "Next field"),
                    ("Enter", "Save"),
                    ("Esc", "Cancel"),
                ],
                FlowState::Saving { .. } => &[("Esc", "Close")],
                FlowState::Confirming { .. } => &[("y", "Delete"), ("n/Esc", "Cancel")],
                FlowState::Deleting { .. } => &[("Esc", "Close"), ("PgUp/PgDn", "Page")],
            }
        };

        let mut spans = Vec::new();
        for (key, label) in hints {
            spans.push(Span::styled(
                format!(" {} ", key),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(format!("{}  ", label)));
        }

        let help = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NotificationLevel;
    use crate::services::dispatcher::tests::FakeService;
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;
    use std::thread;
    use std::time::{Duration, Instant};

    fn payload(n: usize) -> Value {
        Value::Array(
            (1..=n)
                .map(|i| json!({ "id": format!("s{}", i), "name": format!("Visitor {}", i) }))
                .collect(),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        let mut next = app.handle_key_event(key).unwrap();
        while let Some(action) = next {
            next = app.update(action).unwrap();
        }
    }

    /// Tick until no call is in flight and the collection is loaded
    fn settle(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            app.update(Action::Tick).unwrap();
            if app.dispatcher.in_flight() == 0 && !app.manager.is_loading() {
                break;
            }
            assert!(Instant::now() < deadline, "operations did not settle");
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn started(service: Arc<FakeService>) -> App {
        let mut app = App::new(service, "test");
        app.init().unwrap();
        settle(&mut app);
        app
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 30)).unwrap();
        terminal
            .draw(|frame| app.draw(frame, frame.area()).unwrap())
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_init_loads_collection() {
        let service = Arc::new(FakeService::with_payload(payload(25)));
        let mut app = App::new(service.clone(), "test");

        app.init().unwrap();
        assert!(app.manager.is_loading());

        settle(&mut app);
        assert_eq!(app.manager.feed().len(), 25);
        assert_eq!(app.manager.pagination().total_pages, 3);
        assert_eq!(service.calls(), vec!["fetch"]);
    }

    #[test]
    fn test_page_keys_only_reach_existing_pages() {
        let service = Arc::new(FakeService::with_payload(payload(25)));
        let mut app = started(service);

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.manager.pagination().page, 3);
        assert_eq!(app.manager.visible().len(), 5);

        press(&mut app, KeyCode::Char('7'));
        assert_eq!(app.manager.requested_page(), 3);

        press(&mut app, KeyCode::Left);
        assert_eq!(app.manager.pagination().page, 2);
        assert_eq!(app.manager.visible().len(), 10);
    }

    #[test]
    fn test_repeated_confirm_deletes_once_then_refreshes() {
        let service = Arc::new(FakeService::with_payload(payload(3)));
        let mut app = started(service.clone());

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.manager.state().pending_target(), Some("s1"));

        press(&mut app, KeyCode::Char('y'));
        press(&mut app, KeyCode::Char('y'));
        press(&mut app, KeyCode::Enter);
        settle(&mut app);

        assert_eq!(service.calls(), vec!["fetch", "delete:s1", "fetch"]);
        assert!(app.manager.state().is_idle());
    }

    #[test]
    fn test_delete_failure_keeps_dialog_open() {
        let service = Arc::new(FakeService {
            payload: std::sync::Mutex::new(payload(2)),
            fail_deletes: true,
            ..Default::default()
        });
        let mut app = started(service.clone());

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        settle(&mut app);

        assert_eq!(
            app.manager.state(),
            &FlowState::Confirming {
                id: "s2".to_string()
            }
        );
        let toast = app.manager.notifications().latest().unwrap();
        assert_eq!(toast.level, NotificationLevel::Error);
        assert_eq!(service.calls(), vec!["fetch", "delete:s2"]);
        assert!(screen(&mut app).contains("Confirm Deletion"));
    }

    #[test]
    fn test_edit_and_save_sends_update() {
        let service = Arc::new(FakeService::with_payload(payload(2)));
        let mut app = started(service.clone());

        press(&mut app, KeyCode::Char('e'));
        assert!(screen(&mut app).contains("Edit Submission"));
        press(&mut app, KeyCode::Char('!'));
        press(&mut app, KeyCode::Enter);
        settle(&mut app);

        assert_eq!(
            service.calls(),
            vec!["fetch", "update:s1:Visitor 1!", "fetch"]
        );
        assert!(app.manager.state().is_idle());
        let toast = app.manager.notifications().latest().unwrap();
        assert_eq!(toast.level, NotificationLevel::Success);
    }

    #[test]
    fn test_keys_ignored_while_loading() {
        let service = Arc::new(FakeService::with_payload(payload(2)));
        let mut app = started(service);
        app.manager.set_loading(true);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('e'));
        assert!(app.manager.state().is_idle());
        assert!(screen(&mut app).contains("Loading submissions..."));
    }

    #[test]
    fn test_quit_goes_through_confirmation() {
        let service = Arc::new(FakeService::with_payload(payload(1)));
        let mut app = started(service);

        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.overlay(), Some(Overlay::QuitConfirm));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.overlay(), None);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let service = Arc::new(FakeService::with_payload(payload(1)));
        let mut app = started(service);
        press(&mut app, KeyCode::Char('e'));

        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key_event(key).unwrap(), Some(Action::ForceQuit));
    }

    #[test]
    fn test_malformed_payload_shows_empty_state() {
        let service = Arc::new(FakeService::with_payload(json!({ "rows": [] })));
        let mut app = started(service);

        assert!(screen(&mut app).contains("No submissions yet"));
    }
}
