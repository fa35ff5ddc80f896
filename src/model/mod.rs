//! Model layer - submission data and the admin screen's state
//!
//! - `Submission` / `SubmissionPatch` - records and partial updates
//! - `SubmissionFeed` - the collection as handed over by the caller
//! - `Pagination` - page view derived from the collection length
//! - `FlowState` - tagged edit/delete dialog state
//! - `SubmissionManager` - ties the above together

pub mod feed;
pub mod flow;
pub mod manager;
pub mod notification;
pub mod operation;
pub mod pagination;
pub mod submission;

// Re-export commonly used types
pub use feed::SubmissionFeed;
pub use flow::{EditField, FlowState, Ticket};
pub use manager::{SubmissionManager, View};
pub use notification::{Notification, NotificationLevel, Notifications};
pub use operation::{Completion, Operation, Outcome};
pub use pagination::{Pagination, PAGE_SIZE};
pub use submission::{Submission, SubmissionPatch};
