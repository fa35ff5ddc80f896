//! The data service contract the admin screen is built against

use crate::error::ServiceError;
use crate::model::SubmissionPatch;
use serde_json::Value;

/// Operations supplied by whatever owns the submissions
///
/// Calls block; the dispatcher runs them off the UI thread.
pub trait SubmissionService: Send + Sync {
    /// Raw submission payload, expected to be a JSON array of records
    fn fetch(&self) -> Result<Value, ServiceError>;

    fn delete(&self, id: &str) -> Result<(), ServiceError>;

    fn update(&self, id: &str, patch: &SubmissionPatch) -> Result<(), ServiceError>;
}
