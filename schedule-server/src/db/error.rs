//! Store error taxonomy

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Store operation errors
///
/// Absence on lookups is `Ok(None)`, never an error. `NotFound` is only
/// produced by operations that require the document to exist.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Revision conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Connectivity problems; the caller may retry the request
    #[error("Store unavailable: {0}")]
    Transient(String),

    #[error("Database error: {0}")]
    Permanent(String),
}

impl StoreError {
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Transient(_))
    }

    pub fn not_connected() -> Self {
        StoreError::Transient("store not connected".to_string())
    }
}

impl From<surrealdb::Error> for StoreError {
    fn from(err: surrealdb::Error) -> Self {
        match err {
            surrealdb::Error::Api(e) => StoreError::Transient(e.to_string()),
            other => StoreError::Permanent(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Validation(format!("invalid document: {err}"))
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => AppError::not_found(what),
            StoreError::Conflict(msg) => AppError::conflict(msg),
            StoreError::Validation(msg) => AppError::validation(msg),
            StoreError::Transient(msg) => AppError::unavailable(msg),
            StoreError::Permanent(msg) => AppError::with_message(ErrorCode::DatabaseError, msg),
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
