//! External service interactions
//!
//! - `SubmissionService` - the operations the admin screen is given
//! - `JsonFileStore` - file backed implementation of that contract
//! - `Dispatcher` - runs service calls in the background

pub mod dispatcher;
pub mod service;
pub mod store;

pub use dispatcher::Dispatcher;
pub use service::SubmissionService;
pub use store::JsonFileStore;
