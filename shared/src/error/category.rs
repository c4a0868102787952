//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Employee errors
/// - 2xxx: Schedule errors
/// - 3xxx: Shift errors
/// - 4xxx: Rules errors
/// - 5xxx: Advisor errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Employee errors (1xxx)
    Employee,
    /// Schedule errors (2xxx)
    Schedule,
    /// Shift errors (3xxx)
    Shift,
    /// Rules errors (4xxx)
    Rules,
    /// Advisor errors (5xxx)
    Advisor,
    /// System errors (9xxx and anything unassigned)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Employee,
            2000..3000 => Self::Schedule,
            3000..4000 => Self::Shift,
            4000..5000 => Self::Rules,
            5000..6000 => Self::Advisor,
            _ => Self::System,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Employee => "employee",
            Self::Schedule => "schedule",
            Self::Shift => "shift",
            Self::Rules => "rules",
            Self::Advisor => "advisor",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Employee);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Schedule);
        assert_eq!(ErrorCategory::from_code(3999), ErrorCategory::Shift);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Rules);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Advisor);
        assert_eq!(ErrorCategory::from_code(7000), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(
            ErrorCode::EmployeeNotFound.category(),
            ErrorCategory::Employee
        );
        assert_eq!(
            ErrorCode::ScheduleNotFound.category(),
            ErrorCategory::Schedule
        );
        assert_eq!(ErrorCode::ShiftNotFound.category(), ErrorCategory::Shift);
        assert_eq!(ErrorCode::RulesNoUpdates.category(), ErrorCategory::Rules);
        assert_eq!(
            ErrorCode::AdvisorUnavailable.category(),
            ErrorCategory::Advisor
        );
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serde() {
        let json = serde_json::to_string(&ErrorCategory::Advisor).unwrap();
        assert_eq!(json, "\"advisor\"");
        let category: ErrorCategory = serde_json::from_str("\"rules\"").unwrap();
        assert_eq!(category, ErrorCategory::Rules);
        assert_eq!(category.name(), "rules");
    }
}
