//! Submission manager - pagination, edit flow and delete flow
//!
//! The manager never talks to the data service itself. Flow transitions that
//! need the service hand back an [`Operation`] for the caller to run, and the
//! caller feeds the resulting [`Completion`] back through [`SubmissionManager::settle`].
//! Completions whose ticket no longer matches the flow state are late: they
//! never reopen or mutate a dialog.

use super::feed::SubmissionFeed;
use super::flow::{EditField, FlowState, Ticket};
use super::notification::Notifications;
use super::operation::{Completion, Operation, Outcome};
use super::pagination::{Pagination, PAGE_SIZE};
use super::submission::{Submission, SubmissionPatch};
use tracing::{debug, error, info, warn};

pub const UPDATE_SUCCEEDED: &str = "Submission updated successfully";
pub const UPDATE_FAILED: &str = "Failed to update submission";
pub const DELETE_SUCCEEDED: &str = "Submission deleted";
pub const DELETE_FAILED: &str = "Failed to delete submission";

/// What the manager should render, in priority order
#[derive(Debug, PartialEq)]
pub enum View<'a> {
    Loading,
    Empty,
    Table {
        rows: &'a [Submission],
        pagination: Pagination,
        /// Highlighted row within `rows`
        cursor: usize,
    },
}

/// State of the submission admin screen
#[derive(Debug)]
pub struct SubmissionManager {
    feed: SubmissionFeed,
    loading: bool,
    /// Page last asked for; clamped only when the page view is derived
    requested_page: usize,
    /// Row cursor within the visible page
    cursor: usize,
    state: FlowState,
    notifications: Notifications,
    next_ticket: Ticket,
}

impl Default for SubmissionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionManager {
    pub fn new() -> Self {
        Self {
            feed: SubmissionFeed::default(),
            loading: false,
            requested_page: 1,
            cursor: 0,
            state: FlowState::Idle,
            notifications: Notifications::new(),
            next_ticket: 1,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inputs
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_feed(&mut self, feed: SubmissionFeed) {
        debug!(records = feed.len(), "submission feed replaced");
        self.feed = feed;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn feed(&self) -> &SubmissionFeed {
        &self.feed
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.notifications.error(message);
    }

    /// Allocate the next operation ticket
    pub fn issue_ticket(&mut self) -> Ticket {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        ticket
    }

    /// Age notifications by one UI tick
    pub fn tick(&mut self) {
        self.notifications.tick();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering state & pagination
    // ─────────────────────────────────────────────────────────────────────────

    pub fn view(&self) -> View<'_> {
        if self.loading {
            return View::Loading;
        }
        if self.feed.is_empty() {
            return View::Empty;
        }
        View::Table {
            rows: self.visible(),
            pagination: self.pagination(),
            cursor: self.cursor(),
        }
    }

    #[cfg(test)]
    pub fn requested_page(&self) -> usize {
        self.requested_page
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::compute(self.feed.len(), PAGE_SIZE, self.requested_page)
    }

    /// Rows on the current page, in display order
    pub fn visible(&self) -> &[Submission] {
        self.pagination().slice(self.feed.records())
    }

    /// Set the current page; page controls only offer pages that exist
    pub fn change_page(&mut self, page: usize) {
        debug!(page, "page changed");
        self.requested_page = page;
        self.cursor = 0;
    }

    pub fn next_page(&mut self) -> bool {
        let pagination = self.pagination();
        if !pagination.has_next() {
            return false;
        }
        self.change_page(pagination.page + 1);
        true
    }

    pub fn prev_page(&mut self) -> bool {
        let pagination = self.pagination();
        if !pagination.has_prev() {
            return false;
        }
        self.change_page(pagination.page - 1);
        true
    }

    pub fn cursor(&self) -> usize {
        self.cursor.min(self.visible().len().saturating_sub(1))
    }

    pub fn select_next(&mut self) {
        let last = self.visible().len().saturating_sub(1);
        self.cursor = (self.cursor() + 1).min(last);
    }

    pub fn select_prev(&mut self) {
        self.cursor = self.cursor().saturating_sub(1);
    }

    /// Collection index of the highlighted row
    pub fn selected_index(&self) -> Option<usize> {
        if self.visible().is_empty() {
            return None;
        }
        Some(self.pagination().range().start + self.cursor())
    }

    #[cfg(test)]
    pub fn selected(&self) -> Option<&Submission> {
        self.visible().get(self.cursor())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Edit flow
    // ─────────────────────────────────────────────────────────────────────────

    /// Open the edit dialog on a private copy of the row at `index`
    pub fn begin_edit(&mut self, index: usize) -> bool {
        if self.loading || !self.state.is_idle() {
            return false;
        }
        let Some(row) = self.feed.records().get(index) else {
            return false;
        };
        debug!(id = %row.id, "editing submission");
        self.state = FlowState::Editing {
            draft: row.clone(),
            focus: EditField::default(),
        };
        true
    }

    pub fn begin_edit_selected(&mut self) -> bool {
        match self.selected_index() {
            Some(index) => self.begin_edit(index),
            None => false,
        }
    }

    pub fn focus_next(&mut self) {
        if let FlowState::Editing { focus, .. } = &mut self.state {
            *focus = focus.next();
        }
    }

    pub fn focus_prev(&mut self) {
        if let FlowState::Editing { focus, .. } = &mut self.state {
            *focus = focus.prev();
        }
    }

    /// Type into the focused field; a space on the status field toggles it
    pub fn edit_input(&mut self, c: char) {
        let FlowState::Editing { draft, focus } = &mut self.state else {
            return;
        };
        if *focus != EditField::Resolved {
            if let Some(text) = focus.text_mut(draft) {
                text.push(c);
            }
        } else if c == ' ' {
            self.toggle_resolved();
        }
    }

    pub fn edit_backspace(&mut self) {
        if let FlowState::Editing { draft, focus } = &mut self.state {
            if let Some(text) = focus.text_mut(draft) {
                text.pop();
            }
        }
    }

    pub fn toggle_resolved(&mut self) {
        if let FlowState::Editing { draft, .. } = &mut self.state {
            draft.resolved = Some(!draft.is_resolved());
        }
    }

    /// Commit the draft; returns the update to run, or `None` when not editing
    pub fn save_edit(&mut self) -> Option<Operation> {
        match std::mem::take(&mut self.state) {
            FlowState::Editing { draft, focus } => {
                let ticket = self.issue_ticket();
                let operation = Operation::Update {
                    ticket,
                    id: draft.id.clone(),
                    patch: SubmissionPatch::from(&draft),
                };
                info!(id = %draft.id, ticket, "saving submission");
                self.state = FlowState::Saving {
                    draft,
                    focus,
                    ticket,
                };
                Some(operation)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Delete flow
    // ─────────────────────────────────────────────────────────────────────────

    /// Stage the row at `index` for deletion; rows without an id are ignored
    pub fn request_delete(&mut self, index: usize) -> bool {
        if self.loading || !self.state.is_idle() {
            return false;
        }
        let Some(row) = self.feed.records().get(index) else {
            return false;
        };
        if row.id.is_empty() {
            warn!(index, "cannot delete a submission without an id");
            return false;
        }
        debug!(id = %row.id, "delete requested");
        self.state = FlowState::Confirming { id: row.id.clone() };
        true
    }

    pub fn request_delete_selected(&mut self) -> bool {
        match self.selected_index() {
            Some(index) => self.request_delete(index),
            None => false,
        }
    }

    /// Whether the delete dialog's confirm control is enabled
    pub fn can_confirm_delete(&self) -> bool {
        !self.loading && matches!(self.state, FlowState::Confirming { .. })
    }

    /// Confirm the pending delete; a repeat while one is in flight is a no-op
    pub fn confirm_delete(&mut self) -> Option<Operation> {
        if !self.can_confirm_delete() {
            debug!("delete confirmation ignored");
            return None;
        }
        match std::mem::take(&mut self.state) {
            FlowState::Confirming { id } => {
                let ticket = self.issue_ticket();
                info!(id = %id, ticket, "deleting submission");
                self.state = FlowState::Deleting {
                    id: id.clone(),
                    ticket,
                };
                Some(Operation::Delete { ticket, id })
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Shared transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Close whichever dialog is open; in-flight calls are not cancelled
    pub fn cancel(&mut self) {
        match std::mem::take(&mut self.state) {
            FlowState::Idle => {}
            FlowState::Editing { draft, .. } => debug!(id = %draft.id, "edit cancelled"),
            FlowState::Confirming { id } => debug!(id = %id, "delete cancelled"),
            FlowState::Saving { draft, ticket, .. } => {
                info!(id = %draft.id, ticket, "edit dialog closed with update in flight")
            }
            FlowState::Deleting { id, ticket } => {
                info!(id = %id, ticket, "delete dialog closed with delete in flight")
            }
        }
    }

    /// Apply a completed update or delete
    ///
    /// Returns `true` when the service data changed, so the caller knows to
    /// refresh the collection.
    pub fn settle(&mut self, completion: Completion) -> bool {
        let Completion { ticket, outcome } = completion;
        let active = self.state.active_ticket() == Some(ticket);

        match outcome {
            Outcome::Updated(Ok(())) => {
                if active {
                    info!(ticket, "submission updated");
                    self.state = FlowState::Idle;
                    self.notifications.success(UPDATE_SUCCEEDED);
                } else {
                    debug!(ticket, "late update result absorbed");
                }
                true
            }
            Outcome::Updated(Err(e)) => {
                error!(ticket, error = %e, "failed to update submission");
                if active {
                    self.state = match std::mem::take(&mut self.state) {
                        FlowState::Saving { draft, focus, .. } => FlowState::Editing { draft, focus },
                        other => other,
                    };
                }
                self.notifications.error(UPDATE_FAILED);
                false
            }
            Outcome::Deleted(Ok(())) => {
                if active {
                    info!(ticket, "submission deleted");
                    self.state = FlowState::Idle;
                    self.notifications.success(DELETE_SUCCEEDED);
                } else {
                    debug!(ticket, "late delete result absorbed");
                }
                true
            }
            Outcome::Deleted(Err(e)) => {
                error!(ticket, error = %e, "failed to delete submission");
                if active {
                    self.state = match std::mem::take(&mut self.state) {
                        FlowState::Deleting { id, .. } => FlowState::Confirming { id },
                        other => other,
                    };
                }
                self.notifications.error(DELETE_FAILED);
                false
            }
            Outcome::Fetched(_) => {
                debug!(ticket, "fetch completion ignored by manager");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::model::notification::NotificationLevel;

    fn rows(n: usize) -> Vec<Submission> {
        (1..=n)
            .map(|i| Submission {
                id: format!("s{}", i),
                created_at: "2024-05-01 10:00:00".to_string(),
                name: format!("Person {}", i),
                email: format!("person{}@example.com", i),
                phone: None,
                subject: "Test ride".to_string(),
                message: format!("Message {}", i),
                resolved: Some(false),
                status: None,
            })
            .collect()
    }

    fn manager_with(n: usize) -> SubmissionManager {
        let mut manager = SubmissionManager::new();
        manager.set_feed(SubmissionFeed::from(rows(n)));
        manager
    }

    fn failure() -> ServiceError {
        ServiceError::Unavailable("connection reset".to_string())
    }

    fn visible_ids(manager: &SubmissionManager) -> Vec<String> {
        manager.visible().iter().map(|s| s.id.clone()).collect()
    }

    fn latest_toast(manager: &SubmissionManager) -> Option<(NotificationLevel, String)> {
        manager
            .notifications()
            .latest()
            .map(|n| (n.level, n.message.clone()))
    }

    // ── Rendering states ────────────────────────────────────────────────────

    #[test]
    fn test_loading_takes_priority_over_data() {
        let mut manager = manager_with(5);
        manager.set_loading(true);
        assert_eq!(manager.view(), View::Loading);

        manager.set_feed(SubmissionFeed::Malformed);
        assert_eq!(manager.view(), View::Loading);

        manager.set_feed(SubmissionFeed::default());
        assert_eq!(manager.view(), View::Loading);
    }

    #[test]
    fn test_empty_and_malformed_render_empty_state() {
        let mut manager = SubmissionManager::new();
        assert_eq!(manager.view(), View::Empty);

        manager.set_feed(SubmissionFeed::Malformed);
        assert_eq!(manager.view(), View::Empty);
    }

    #[test]
    fn test_table_view_for_records() {
        let manager = manager_with(3);
        match manager.view() {
            View::Table {
                rows,
                pagination,
                cursor,
            } => {
                assert_eq!(rows.len(), 3);
                assert_eq!(pagination.total_pages, 1);
                assert_eq!(cursor, 0);
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    // ── Pagination ──────────────────────────────────────────────────────────

    #[test]
    fn test_twenty_five_submissions_scenario() {
        let mut manager = manager_with(25);
        assert_eq!(manager.pagination().total_pages, 3);

        manager.change_page(3);
        assert_eq!(
            visible_ids(&manager),
            vec!["s21", "s22", "s23", "s24", "s25"]
        );

        assert!(manager.prev_page());
        assert_eq!(manager.pagination().page, 2);
        assert_eq!(manager.visible().len(), 10);
        assert_eq!(visible_ids(&manager)[0], "s11");
    }

    #[test]
    fn test_page_controls_stop_at_bounds() {
        let mut manager = manager_with(25);
        assert!(!manager.prev_page());
        assert_eq!(manager.pagination().page, 1);

        manager.change_page(3);
        assert!(!manager.next_page());
        assert_eq!(manager.pagination().page, 3);
    }

    #[test]
    fn test_change_page_is_stored_as_requested_but_derived_clamped() {
        let mut manager = manager_with(25);
        manager.change_page(7);

        assert_eq!(manager.requested_page(), 7);
        assert_eq!(manager.pagination().page, 3);
        assert_eq!(manager.visible().len(), 5);
    }

    #[test]
    fn test_shrinking_collection_clamps_page() {
        let mut manager = manager_with(25);
        manager.change_page(3);

        manager.set_feed(SubmissionFeed::from(rows(12)));
        assert_eq!(manager.pagination().page, 2);
        assert_eq!(visible_ids(&manager), vec!["s11", "s12"]);
    }

    #[test]
    fn test_cursor_is_clamped_to_visible_rows() {
        let mut manager = manager_with(12);
        for _ in 0..20 {
            manager.select_next();
        }
        assert_eq!(manager.cursor(), 9);
        assert_eq!(manager.selected_index(), Some(9));

        manager.next_page();
        assert_eq!(manager.cursor(), 0);
        manager.select_next();
        manager.select_next();
        assert_eq!(manager.cursor(), 1);
        assert_eq!(manager.selected().map(|s| s.id.as_str()), Some("s12"));

        manager.select_prev();
        manager.select_prev();
        assert_eq!(manager.cursor(), 0);
    }

    // ── Edit flow ───────────────────────────────────────────────────────────

    #[test]
    fn test_begin_edit_copies_row_exactly() {
        let mut manager = manager_with(15);
        let original = manager.feed().records()[12].clone();

        assert!(manager.begin_edit(12));

        assert_eq!(manager.state().draft(), Some(&original));
        assert_eq!(manager.state().focus(), Some(EditField::Name));
    }

    #[test]
    fn test_draft_edits_do_not_touch_collection_and_cancel_discards() {
        let mut manager = manager_with(3);
        let before = manager.feed().clone();

        manager.begin_edit(0);
        manager.edit_input('!');
        manager.focus_next();
        manager.edit_backspace();

        assert_eq!(manager.feed(), &before);
        let draft = manager.state().draft().cloned().unwrap();
        assert_eq!(draft.name, "Person 1!");
        assert_eq!(draft.email, "person1@example.co");

        manager.cancel();
        assert!(manager.state().is_idle());
        assert_eq!(manager.feed(), &before);
        assert!(manager.save_edit().is_none());
    }

    #[test]
    fn test_save_issues_update_with_draft_id_and_fields() {
        let mut manager = manager_with(3);
        manager.select_next();
        manager.begin_edit_selected();
        for c in " Jr".chars() {
            manager.edit_input(c);
        }
        for _ in 0..5 {
            manager.focus_next();
        }
        manager.edit_input(' ');

        let op = manager.save_edit().expect("update operation");
        match op {
            Operation::Update { id, patch, .. } => {
                assert_eq!(id, "s2");
                assert_eq!(patch.name.as_deref(), Some("Person 2 Jr"));
                assert_eq!(patch.email.as_deref(), Some("person2@example.com"));
                assert_eq!(patch.resolved, Some(true));
            }
            other => panic!("expected update, got {:?}", other),
        }
        assert!(manager.state().is_saving());

        // A second save while saving is ignored
        assert!(manager.save_edit().is_none());
    }

    #[test]
    fn test_update_success_closes_dialog_and_notifies() {
        let mut manager = manager_with(3);
        manager.begin_edit(0);
        manager.edit_input('x');
        let ticket = manager.save_edit().unwrap().ticket();

        let changed = manager.settle(Completion::new(ticket, Outcome::Updated(Ok(()))));

        assert!(changed);
        assert!(manager.state().is_idle());
        assert!(manager.state().draft().is_none());
        assert_eq!(
            latest_toast(&manager),
            Some((NotificationLevel::Success, UPDATE_SUCCEEDED.to_string()))
        );
    }

    #[test]
    fn test_update_failure_keeps_dialog_and_draft() {
        let mut manager = manager_with(3);
        manager.begin_edit(1);
        manager.edit_input('?');
        let ticket = manager.save_edit().unwrap().ticket();

        let changed = manager.settle(Completion::new(ticket, Outcome::Updated(Err(failure()))));

        assert!(!changed);
        match manager.state() {
            FlowState::Editing { draft, .. } => assert_eq!(draft.name, "Person 2?"),
            other => panic!("expected editing, got {:?}", other),
        }
        assert_eq!(
            latest_toast(&manager),
            Some((NotificationLevel::Error, UPDATE_FAILED.to_string()))
        );

        // Retry is possible
        assert!(manager.save_edit().is_some());
    }

    #[test]
    fn test_edit_blocked_while_loading_or_busy() {
        let mut manager = manager_with(3);
        manager.set_loading(true);
        assert!(!manager.begin_edit(0));
        assert!(!manager.request_delete(0));

        manager.set_loading(false);
        assert!(manager.request_delete(0));
        assert!(!manager.begin_edit(1));
        assert_eq!(manager.state().pending_target(), Some("s1"));
    }

    #[test]
    fn test_status_field_toggles_with_space_only() {
        let mut manager = manager_with(1);
        manager.begin_edit(0);
        manager.focus_prev();
        assert_eq!(manager.state().focus(), Some(EditField::Resolved));

        manager.edit_input('a');
        assert_eq!(manager.state().draft().and_then(|d| d.resolved), Some(false));

        manager.edit_input(' ');
        assert_eq!(manager.state().draft().and_then(|d| d.resolved), Some(true));

        manager.toggle_resolved();
        assert_eq!(manager.state().draft().and_then(|d| d.resolved), Some(false));
    }

    // ── Delete flow ─────────────────────────────────────────────────────────

    #[test]
    fn test_confirm_delete_is_reentrancy_guarded() {
        let mut manager = manager_with(5);
        manager.request_delete(2);

        let mut issued = Vec::new();
        for _ in 0..3 {
            if let Some(op) = manager.confirm_delete() {
                issued.push(op);
            }
        }

        assert_eq!(issued.len(), 1);
        assert!(matches!(&issued[0], Operation::Delete { id, .. } if id == "s3"));
        assert!(manager.state().is_deleting());
        assert!(!manager.can_confirm_delete());
    }

    #[test]
    fn test_confirm_disabled_while_loading() {
        let mut manager = manager_with(5);
        manager.request_delete(0);
        manager.set_loading(true);

        assert!(!manager.can_confirm_delete());
        assert!(manager.confirm_delete().is_none());
        assert_eq!(manager.state().pending_target(), Some("s1"));
    }

    #[test]
    fn test_cancel_delete_issues_nothing() {
        let mut manager = manager_with(5);
        let before = manager.feed().clone();
        manager.request_delete(4);

        manager.cancel();

        assert!(manager.state().is_idle());
        assert_eq!(manager.state().pending_target(), None);
        assert!(manager.confirm_delete().is_none());
        assert_eq!(manager.feed(), &before);
    }

    #[test]
    fn test_delete_failure_keeps_dialog_open_on_target() {
        let mut manager = SubmissionManager::new();
        manager.set_feed(SubmissionFeed::from(vec![Submission {
            id: "x".to_string(),
            ..Default::default()
        }]));
        manager.request_delete(0);
        let ticket = manager.confirm_delete().unwrap().ticket();

        let changed = manager.settle(Completion::new(ticket, Outcome::Deleted(Err(failure()))));

        assert!(!changed);
        assert_eq!(
            manager.state(),
            &FlowState::Confirming {
                id: "x".to_string()
            }
        );
        assert_eq!(manager.state().pending_target(), Some("x"));
        assert_eq!(
            latest_toast(&manager),
            Some((NotificationLevel::Error, DELETE_FAILED.to_string()))
        );
        assert!(manager.can_confirm_delete());
    }

    #[test]
    fn test_delete_success_closes_dialog() {
        let mut manager = manager_with(5);
        manager.request_delete(0);
        let ticket = manager.confirm_delete().unwrap().ticket();

        assert!(manager.settle(Completion::new(ticket, Outcome::Deleted(Ok(())))));
        assert!(manager.state().is_idle());
        assert_eq!(
            latest_toast(&manager),
            Some((NotificationLevel::Success, DELETE_SUCCEEDED.to_string()))
        );
    }

    #[test]
    fn test_rows_without_id_cannot_be_deleted() {
        let mut manager = SubmissionManager::new();
        manager.set_feed(SubmissionFeed::from(vec![Submission::default()]));

        assert!(!manager.request_delete(0));
        assert!(manager.state().is_idle());
    }

    #[test]
    fn test_pagination_responsive_while_delete_pending() {
        let mut manager = manager_with(25);
        manager.request_delete(0);
        manager.confirm_delete();

        assert!(manager.next_page());
        assert_eq!(manager.pagination().page, 2);
        assert!(manager.state().is_deleting());
    }

    // ── Late results ────────────────────────────────────────────────────────

    #[test]
    fn test_late_delete_result_does_not_resurrect_dialog() {
        let mut manager = manager_with(5);
        manager.request_delete(0);
        let ticket = manager.confirm_delete().unwrap().ticket();
        manager.cancel();
        assert!(manager.state().is_idle());

        assert!(manager.settle(Completion::new(ticket, Outcome::Deleted(Ok(())))));
        assert!(manager.state().is_idle());
        assert!(manager.notifications().is_empty());
    }

    #[test]
    fn test_late_failure_leaves_new_flow_alone() {
        let mut manager = manager_with(5);
        manager.begin_edit(0);
        let stale = manager.save_edit().unwrap().ticket();
        manager.cancel();

        manager.begin_edit(3);
        manager.settle(Completion::new(stale, Outcome::Updated(Err(failure()))));

        match manager.state() {
            FlowState::Editing { draft, .. } => assert_eq!(draft.id, "s4"),
            other => panic!("expected editing, got {:?}", other),
        }
        assert_eq!(
            latest_toast(&manager).map(|(level, _)| level),
            Some(NotificationLevel::Error)
        );
    }

    #[test]
    fn test_tickets_are_unique() {
        let mut manager = SubmissionManager::new();
        let a = manager.issue_ticket();
        let b = manager.issue_ticket();
        assert_ne!(a, b);
        assert!(b > a);
    }
}
