//! Schedule-change advisor
//!
//! Hands a free-text request plus the current employees, schedules and rules
//! to an external text-generation service, validates the structured answer
//! and applies approved changes to the schedule collection.

pub mod api_types;
pub mod apply;
pub mod client;
pub mod validate;

pub use client::{AdvisorSettings, OpenAiAnalyzer};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Employee, Recommendation, Rules, Schedule, ScheduleChangeRequest, ScheduleChangeResponse,
};
use std::sync::Arc;
use thiserror::Error;

use crate::db::StoreClient;
use crate::db::repository::{EmployeeRepository, RulesRepository, ScheduleRepository};

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("advisor request failed: {0}")]
    Request(String),

    #[error("advisor returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("advisor response could not be decoded: {0}")]
    Decode(String),

    #[error("advisor API key is not configured")]
    NotConfigured,
}

impl From<AdvisorError> for AppError {
    fn from(err: AdvisorError) -> Self {
        let message = err.to_string();
        match err {
            AdvisorError::NotConfigured => AppError::new(ErrorCode::AdvisorNotConfigured),
            AdvisorError::Status { status, .. } => {
                AppError::advisor_unavailable(message).with_detail("upstream_status", status)
            }
            _ => AppError::advisor_unavailable(message),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EmployeeSummary {
    pub name: String,
    pub employee_number: String,
    pub first_line_support_count: u32,
    pub known_absences: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScheduleSummary {
    pub date: String,
    pub first_line_support: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RulesSummary {
    pub max_days_per_week: u32,
    pub preferred_balance: f64,
}

/// Everything the external model sees for one request
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisInput {
    pub request: String,
    pub employees: Vec<EmployeeSummary>,
    pub current_schedule: Vec<ScheduleSummary>,
    pub rules: RulesSummary,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl AnalysisInput {
    pub fn new(
        request: &ScheduleChangeRequest,
        employees: &[Employee],
        schedules: &[Schedule],
        rules: &Rules,
    ) -> Self {
        Self {
            request: request.request_text.clone(),
            employees: employees
                .iter()
                .map(|e| EmployeeSummary {
                    name: e.name.clone(),
                    employee_number: e.employee_number.clone(),
                    first_line_support_count: e.first_line_support_count,
                    known_absences: e.known_absences.clone(),
                })
                .collect(),
            current_schedule: schedules
                .iter()
                .map(|s| ScheduleSummary {
                    date: s.date.clone(),
                    first_line_support: s.first_line_support.clone(),
                })
                .collect(),
            rules: RulesSummary {
                max_days_per_week: rules.max_days_per_week,
                preferred_balance: rules.preferred_balance,
            },
            metadata: request.metadata.clone(),
        }
    }
}

/// One external call per analysis; the returned JSON is untrusted
#[async_trait]
pub trait ChangeAnalyzer: Send + Sync {
    async fn analyze(&self, input: &AnalysisInput) -> Result<Value, AdvisorError>;
}

#[derive(Clone)]
pub struct ScheduleChangeAdvisor {
    analyzer: Arc<dyn ChangeAnalyzer>,
    employees: EmployeeRepository,
    schedules: ScheduleRepository,
    rules: RulesRepository,
}

impl ScheduleChangeAdvisor {
    pub fn new(store: StoreClient, analyzer: Arc<dyn ChangeAnalyzer>) -> Self {
        Self {
            analyzer,
            employees: EmployeeRepository::new(store.clone()),
            schedules: ScheduleRepository::new(store.clone()),
            rules: RulesRepository::new(store),
        }
    }

    /// Analyse a request and, when the answer is `approve`, apply its changes.
    ///
    /// External-call failures are returned as errors without retry; an
    /// unusable answer becomes a `discuss` recommendation.
    pub async fn process(
        &self,
        request: &ScheduleChangeRequest,
    ) -> AppResult<ScheduleChangeResponse> {
        if request.request_text.trim().is_empty() {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "request_text must not be empty",
            ));
        }

        let employees = self.employees.find_all().await?;
        let schedules = self.schedules.find_all().await?;
        let rules = self.rules.get_or_create().await?;

        let input = AnalysisInput::new(request, &employees, &schedules, &rules);
        let raw = self.analyzer.analyze(&input).await?;
        let analysis = validate::analysis_or_fallback(raw, &request.request_text);

        tracing::info!(
            recommendation = analysis.recommendation.as_str(),
            changes = analysis.changes.len(),
            "Schedule change request analysed"
        );

        let applied_changes = if analysis.recommendation == Recommendation::Approve {
            apply::apply_changes(&self.schedules, &employees, &analysis.changes).await
        } else {
            Vec::new()
        };

        Ok(ScheduleChangeResponse {
            request: request.request_text.clone(),
            analysis,
            applied_changes,
        })
    }
}
