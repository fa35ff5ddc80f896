//! Edit and delete flow state
//!
//! A single tagged state replaces the separate "editing", "delete target"
//! and "is deleting" flags, so editing and deleting at the same time cannot
//! be represented.

use super::submission::Submission;

/// Monotonic operation ticket; a completion only applies while its ticket
/// is the one recorded in the current flow state
pub type Ticket = u64;

/// Editable field of the edit dialog, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditField {
    #[default]
    Name,
    Email,
    Phone,
    Subject,
    Message,
    Resolved,
}

impl EditField {
    pub const ALL: [EditField; 6] = [
        EditField::Name,
        EditField::Email,
        EditField::Phone,
        EditField::Subject,
        EditField::Message,
        EditField::Resolved,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EditField::Name => "Name",
            EditField::Email => "Email",
            EditField::Phone => "Phone",
            EditField::Subject => "Subject",
            EditField::Message => "Message",
            EditField::Resolved => "Status",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> EditField {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> EditField {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Mutable text behind this field, `None` for the resolved checkbox
    pub fn text_mut<'a>(&self, draft: &'a mut Submission) -> Option<&'a mut String> {
        match self {
            EditField::Name => Some(&mut draft.name),
            EditField::Email => Some(&mut draft.email),
            EditField::Phone => Some(draft.phone.get_or_insert_with(String::new)),
            EditField::Subject => Some(&mut draft.subject),
            EditField::Message => Some(&mut draft.message),
            EditField::Resolved => None,
        }
    }

    /// Current text of this field in the draft
    pub fn text<'a>(&self, draft: &'a Submission) -> Option<&'a str> {
        match self {
            EditField::Name => Some(&draft.name),
            EditField::Email => Some(&draft.email),
            EditField::Phone => Some(draft.phone.as_deref().unwrap_or_default()),
            EditField::Subject => Some(&draft.subject),
            EditField::Message => Some(&draft.message),
            EditField::Resolved => None,
        }
    }
}

/// Where the submission manager is in its edit/delete flows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    /// Edit dialog open on a private draft copy
    Editing { draft: Submission, focus: EditField },
    /// Update in flight for the draft; the dialog stays visible
    Saving {
        draft: Submission,
        focus: EditField,
        ticket: Ticket,
    },
    /// Delete dialog open, awaiting confirmation
    Confirming { id: String },
    /// Delete in flight; confirm is disabled
    Deleting { id: String, ticket: Ticket },
}

impl FlowState {
    pub fn is_idle(&self) -> bool {
        matches!(self, FlowState::Idle)
    }

    pub fn draft(&self) -> Option<&Submission> {
        match self {
            FlowState::Editing { draft, .. } | FlowState::Saving { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn focus(&self) -> Option<EditField> {
        match self {
            FlowState::Editing { focus, .. } | FlowState::Saving { focus, .. } => Some(*focus),
            _ => None,
        }
    }

    /// Identifier staged for deletion
    #[cfg(test)]
    pub fn pending_target(&self) -> Option<&str> {
        match self {
            FlowState::Confirming { id } | FlowState::Deleting { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Ticket of the operation this state is waiting on
    pub fn active_ticket(&self) -> Option<Ticket> {
        match self {
            FlowState::Saving { ticket, .. } | FlowState::Deleting { ticket, .. } => Some(*ticket),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn is_saving(&self) -> bool {
        matches!(self, FlowState::Saving { .. })
    }

    #[cfg(test)]
    pub fn is_deleting(&self) -> bool {
        matches!(self, FlowState::Deleting { .. })
    }
}
