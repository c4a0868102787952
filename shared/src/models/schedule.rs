//! Schedule Model

use serde::{Deserialize, Serialize};

/// Daily schedule (one per calendar date)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// YYYY-MM-DD
    pub date: String,
    /// Employee number of the first-line support for the day
    pub first_line_support: String,
    #[serde(default)]
    pub revision: u64,
}

/// Create schedule payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleCreate {
    pub date: String,
    pub first_line_support: String,
}

/// Update schedule payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleUpdate {
    pub first_line_support: String,
}

/// Optional inclusive date bounds for listing schedules
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
