//! Errors raised at the data service boundary
//!
//! The terminal shell itself uses `anyhow`; everything a data service can
//! report back to the submission manager is a `ServiceError`.

use thiserror::Error;

/// Failure of an external submission operation (fetch, update, delete)
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("submission '{0}' not found")]
    NotFound(String),

    #[error("malformed data file: {0}")]
    Malformed(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),
}
