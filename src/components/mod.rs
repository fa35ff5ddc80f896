//! UI Components
//!
//! Each component maps keys to Actions and renders one part of the screen.
//! Flow state (drafts, delete targets) is owned by the submission manager.

pub mod delete_dialog;
pub mod edit_dialog;
pub mod help_dialog;
pub mod layout;
pub mod notifications;
pub mod quit_dialog;
pub mod submission_table;

pub use delete_dialog::DeleteDialog;
pub use edit_dialog::EditDialog;
pub use help_dialog::HelpDialog;
pub use layout::{centered_popup, screen_layout};
pub use notifications::draw_notifications;
pub use quit_dialog::QuitDialog;
pub use submission_table::SubmissionTable;
