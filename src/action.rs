//! Action enum - every semantic intent the UI can produce
//!
//! Components translate key events into Actions; the App applies them to
//! the submission manager.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick: drain background results, age toasts
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,
    /// Reload submissions from the data service
    Refresh,

    // ─────────────────────────────────────────────────────────────────────────
    // Table Navigation
    // ─────────────────────────────────────────────────────────────────────────
    NextRow,
    PrevRow,
    NextPage,
    PrevPage,
    /// Jump to a page number (1-based)
    GoToPage(usize),

    // ─────────────────────────────────────────────────────────────────────────
    // Edit Dialog
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the edit dialog on the highlighted row
    BeginEdit,
    /// Type a character into the focused field
    EditInput(char),
    EditBackspace,
    EditNextField,
    EditPrevField,
    SaveEdit,

    // ─────────────────────────────────────────────────────────────────────────
    // Delete Dialog
    // ─────────────────────────────────────────────────────────────────────────
    /// Stage the highlighted row for deletion
    RequestDelete,
    ConfirmDelete,

    /// Close the edit or delete dialog
    Cancel,

    // ─────────────────────────────────────────────────────────────────────────
    // Overlays
    // ─────────────────────────────────────────────────────────────────────────
    OpenHelp,
    OpenQuitDialog,
    CloseOverlay,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::Refresh => write!(f, "Refresh"),
            Action::NextRow => write!(f, "NextRow"),
            Action::PrevRow => write!(f, "PrevRow"),
            Action::NextPage => write!(f, "NextPage"),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::GoToPage(page) => write!(f, "GoToPage({})", page),
            Action::BeginEdit => write!(f, "BeginEdit"),
            Action::EditInput(c) => write!(f, "EditInput('{}')", c),
            Action::EditBackspace => write!(f, "EditBackspace"),
            Action::EditNextField => write!(f, "EditNextField"),
            Action::EditPrevField => write!(f, "EditPrevField"),
            Action::SaveEdit => write!(f, "SaveEdit"),
            Action::RequestDelete => write!(f, "RequestDelete"),
            Action::ConfirmDelete => write!(f, "ConfirmDelete"),
            Action::Cancel => write!(f, "Cancel"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::CloseOverlay => write!(f, "CloseOverlay"),
        }
    }
}
