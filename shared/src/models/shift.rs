//! Shift Model

use serde::{Deserialize, Serialize};

/// Satisfaction score of a shift nobody has rated yet
pub const UNSCORED: f64 = -1.0;

/// Role labels used by the daily shift template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftRole {
    Cleaning,
    Line1,
    Line2,
    Inventory,
    Packing,
}

impl ShiftRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cleaning => "cleaning",
            Self::Line1 => "line1",
            Self::Line2 => "line2",
            Self::Inventory => "inventory",
            Self::Packing => "packing",
        }
    }
}

impl std::fmt::Display for ShiftRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-employee role assignment for a time window
///
/// Overlapping shifts for the same employee are not rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    pub shift_id: String,
    pub employee_number: String,
    /// YYYY-MM-DDTHH:MM:SS
    pub start: String,
    /// YYYY-MM-DDTHH:MM:SS
    pub end: String,
    /// Role label (cleaning, line1, ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Employee satisfaction with the assignment, `UNSCORED` until rated
    #[serde(default = "default_score")]
    pub score: f64,
    #[serde(default)]
    pub revision: u64,
}

fn default_score() -> f64 {
    UNSCORED
}

/// Create shift payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftCreate {
    pub employee_number: String,
    pub start: String,
    pub end: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Update shift payload (`PUT /api/shifts`, id travels in the body)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShiftUpdate {
    #[serde(skip_serializing)]
    pub shift_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Request body for generating a day's template shifts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyShiftsRequest {
    /// YYYY-MM-DD
    pub date: String,
    /// Ordered employee numbers; the first five fill the template slots
    pub employee_numbers: Vec<String>,
}
