//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::EmployeeNotFound
            | Self::ScheduleNotFound
            | Self::ShiftNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::RevisionConflict => StatusCode::CONFLICT,

            // 502 Bad Gateway (external text-generation service)
            Self::AdvisorUnavailable => StatusCode::BAD_GATEWAY,

            // 503 Service Unavailable (transient, client can retry)
            Self::StoreUnavailable
            | Self::AdvisorNotConfigured => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::Unknown
            | Self::InternalError
            | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation)
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::RequiredField
            | Self::EmployeeNumberRequired
            | Self::InvalidScheduleDate
            | Self::InsufficientEmployees
            | Self::InvalidShiftTime
            | Self::RulesNoUpdates
            | Self::RulesInvalidValue => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::EmployeeNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::ScheduleNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ErrorCode::ShiftNotFound.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_status() {
        assert_eq!(
            ErrorCode::InsufficientEmployees.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::RulesNoUpdates.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_upstream_and_transient_status() {
        assert_eq!(
            ErrorCode::AdvisorUnavailable.http_status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ErrorCode::StoreUnavailable.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ErrorCode::RevisionConflict.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
