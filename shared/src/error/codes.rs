//! Unified error codes for the scheduling service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Employee errors
//! - 2xxx: Schedule errors
//! - 3xxx: Shift errors
//! - 4xxx: Rules errors
//! - 5xxx: Advisor errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so clients can branch on
/// them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Document changed since it was read
    RevisionConflict = 9,

    // ==================== 1xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 1001,
    /// Employee number is empty
    EmployeeNumberRequired = 1002,

    // ==================== 2xxx: Schedule ====================
    /// Schedule not found
    ScheduleNotFound = 2001,
    /// Schedule date is not an ISO date
    InvalidScheduleDate = 2002,

    // ==================== 3xxx: Shift ====================
    /// Shift not found
    ShiftNotFound = 3001,
    /// Not enough employees to fill the daily template
    InsufficientEmployees = 3002,
    /// Shift start/end is not a valid timestamp
    InvalidShiftTime = 3003,

    // ==================== 4xxx: Rules ====================
    /// Rules update carried no fields
    RulesNoUpdates = 4001,
    /// Rules value outside the accepted range
    RulesInvalidValue = 4002,

    // ==================== 5xxx: Advisor ====================
    /// External text-generation call failed
    AdvisorUnavailable = 5001,
    /// No API key configured for the advisor
    AdvisorNotConfigured = 5002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Store is not connected or not yet queryable
    StoreUnavailable = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Success",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field missing",
            ErrorCode::RevisionConflict => "Document was modified concurrently",

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeNumberRequired => "Employee number is required",

            // Schedule
            ErrorCode::ScheduleNotFound => "Schedule not found",
            ErrorCode::InvalidScheduleDate => "Schedule date must be YYYY-MM-DD",

            // Shift
            ErrorCode::ShiftNotFound => "Shift not found",
            ErrorCode::InsufficientEmployees => "At least 5 employees are required",
            ErrorCode::InvalidShiftTime => "Shift time must be YYYY-MM-DDTHH:MM:SS",

            // Rules
            ErrorCode::RulesNoUpdates => "No valid updates provided",
            ErrorCode::RulesInvalidValue => "Invalid rules value",

            // Advisor
            ErrorCode::AdvisorUnavailable => "Schedule change advisor is unavailable",
            ErrorCode::AdvisorNotConfigured => "Schedule change advisor is not configured",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::StoreUnavailable => "Store is unavailable, please retry later",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            9 => Ok(ErrorCode::RevisionConflict),

            // Employee
            1001 => Ok(ErrorCode::EmployeeNotFound),
            1002 => Ok(ErrorCode::EmployeeNumberRequired),

            // Schedule
            2001 => Ok(ErrorCode::ScheduleNotFound),
            2002 => Ok(ErrorCode::InvalidScheduleDate),

            // Shift
            3001 => Ok(ErrorCode::ShiftNotFound),
            3002 => Ok(ErrorCode::InsufficientEmployees),
            3003 => Ok(ErrorCode::InvalidShiftTime),

            // Rules
            4001 => Ok(ErrorCode::RulesNoUpdates),
            4002 => Ok(ErrorCode::RulesInvalidValue),

            // Advisor
            5001 => Ok(ErrorCode::AdvisorUnavailable),
            5002 => Ok(ErrorCode::AdvisorNotConfigured),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::StoreUnavailable),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::RevisionConflict.code(), 9);
        assert_eq!(ErrorCode::EmployeeNotFound.code(), 1001);
        assert_eq!(ErrorCode::ScheduleNotFound.code(), 2001);
        assert_eq!(ErrorCode::ShiftNotFound.code(), 3001);
        assert_eq!(ErrorCode::InsufficientEmployees.code(), 3002);
        assert_eq!(ErrorCode::RulesNoUpdates.code(), 4001);
        assert_eq!(ErrorCode::AdvisorUnavailable.code(), 5001);
        assert_eq!(ErrorCode::StoreUnavailable.code(), 9003);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::NotFound.is_success());
        assert!(!ErrorCode::InternalError.is_success());
    }

    #[test]
    fn test_try_from_roundtrip_known_codes() {
        let codes = [
            ErrorCode::ValidationFailed,
            ErrorCode::EmployeeNumberRequired,
            ErrorCode::InvalidScheduleDate,
            ErrorCode::InvalidShiftTime,
            ErrorCode::RulesInvalidValue,
            ErrorCode::AdvisorNotConfigured,
        ];
        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(6001), Err(InvalidErrorCode(6001)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::ShiftNotFound).unwrap();
        assert_eq!(json, "3001");
        let code: ErrorCode = serde_json::from_str("4001").unwrap();
        assert_eq!(code, ErrorCode::RulesNoUpdates);
        assert!(serde_json::from_str::<ErrorCode>("4999").is_err());
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::RulesNoUpdates.message(), "No valid updates provided");
        assert_eq!(ErrorCode::EmployeeNotFound.message(), "Employee not found");
    }
}
