//! Schedule change request / analysis models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Recommendation tag returned by the advisor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Approve,
    Deny,
    Discuss,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Deny => "deny",
            Self::Discuss => "discuss",
        }
    }
}

/// One proposed schedule edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleChange {
    /// Employee originally scheduled for the date
    pub employee_name: String,
    /// YYYY-MM-DD
    pub target_date: String,
    /// Replacement employee (name or employee number)
    pub suggested_replacement: String,
}

/// Structured analysis of a free-text schedule change request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleChangeAnalysis {
    pub thoughts: String,
    pub original_query: String,
    pub changes: Vec<ScheduleChange>,
    pub reason: Option<String>,
    pub recommendation: Recommendation,
    pub reasoning: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleChangeRequest {
    pub request_text: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// What happened to a single proposed change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOutcome {
    Updated,
    Created,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedChange {
    pub target_date: String,
    pub suggested_replacement: String,
    pub outcome: ChangeOutcome,
    /// Resolved replacement, when resolution succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_number: Option<String>,
    /// Why the change was skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleChangeResponse {
    pub request: String,
    pub analysis: ScheduleChangeAnalysis,
    #[serde(default)]
    pub applied_changes: Vec<AppliedChange>,
}
