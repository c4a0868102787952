//! Error types and API response structures

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (offending field, lookup key, ...)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    pub fn employee_not_found(employee_number: impl Into<String>) -> Self {
        Self::new(ErrorCode::EmployeeNotFound)
            .with_detail("employee_number", employee_number.into())
    }

    pub fn schedule_not_found(date: impl Into<String>) -> Self {
        Self::new(ErrorCode::ScheduleNotFound).with_detail("date", date.into())
    }

    pub fn shift_not_found(shift_id: impl Into<String>) -> Self {
        Self::new(ErrorCode::ShiftNotFound).with_detail("shift_id", shift_id.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Store not connected / transport failure; the caller may retry
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::StoreUnavailable, msg)
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::RevisionConflict, msg)
    }

    pub fn advisor_unavailable(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AdvisorUnavailable, msg)
    }
}

/// Error body returned by every failing endpoint
///
/// Successful responses carry the entity itself, so this only ever holds an
/// error code, its message and optional details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse {
    pub fn error(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::error(&self);

        let category = self.code.category();
        match category {
            ErrorCategory::System => {
                tracing::error!(
                    code = %self.code,
                    category = category.name(),
                    message = %self.message,
                    "System error occurred"
                );
            }
            ErrorCategory::Advisor => {
                tracing::warn!(
                    code = %self.code,
                    category = category.name(),
                    message = %self.message,
                    "Advisor call failed"
                );
            }
            _ => tracing::debug!(code = %self.code, category = category.name(), "{}", self.message),
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::NotFound);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Resource not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Invalid date")
            .with_detail("field", "date")
            .with_detail("value", "2024-13-01");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "date");
        assert_eq!(details.get("value").unwrap(), "2024-13-01");
    }

    #[test]
    fn test_domain_constructors() {
        let err = AppError::employee_not_found("EMP042");
        assert_eq!(err.code, ErrorCode::EmployeeNotFound);
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            err.details.as_ref().unwrap().get("employee_number").unwrap(),
            "EMP042"
        );

        let err = AppError::schedule_not_found("2024-07-15");
        assert_eq!(err.code, ErrorCode::ScheduleNotFound);

        let err = AppError::not_found("Widget");
        assert_eq!(err.message, "Widget not found");

        let err = AppError::advisor_unavailable("connection refused");
        assert_eq!(err.http_status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::ShiftNotFound, "Shift abc not found");
        assert_eq!(format!("{}", err), "Shift abc not found");
    }

    #[test]
    fn test_api_response_error() {
        let err = AppError::shift_not_found("abc");
        let response = ApiResponse::error(&err);

        assert_eq!(response.code, 3001);
        assert_eq!(response.message, "Shift not found");
        assert!(response.details.is_some());
    }

    #[test]
    fn test_api_response_serialize() {
        let response = ApiResponse::error(&AppError::new(ErrorCode::RulesNoUpdates));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], 4001);
        assert_eq!(json["message"], "No valid updates provided");
        assert!(json.get("data").is_none());
        assert!(json.get("details").is_none());
    }
}
