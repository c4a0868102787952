//! 班次模板 - daily shift generation

pub mod template;

pub use template::{REQUIRED_EMPLOYEES, ShiftDraft, TemplateError, generate_daily_shifts};

use chrono::NaiveDate;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Shift, ShiftCreate};

use crate::db::repository::ShiftRepository;

impl From<TemplateError> for AppError {
    fn from(err: TemplateError) -> Self {
        let message = err.to_string();
        match err {
            TemplateError::NotEnoughEmployees { required, actual } => {
                AppError::with_message(ErrorCode::InsufficientEmployees, message)
                    .with_detail("required", required)
                    .with_detail("actual", actual)
            }
        }
    }
}

/// Generate and store the template shifts for `date`.
///
/// The roster is validated before anything is written. A store failure part
/// way through leaves the shifts created so far in place.
pub async fn create_daily_shifts(
    shifts: &ShiftRepository,
    date: NaiveDate,
    employees: &[String],
) -> AppResult<Vec<Shift>> {
    let drafts = generate_daily_shifts(date, employees)?;

    let mut created = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let shift = shifts
            .create(ShiftCreate {
                employee_number: draft.employee_number,
                start: draft.start,
                end: draft.end,
                kind: draft.role.as_str().to_string(),
            })
            .await?;
        created.push(shift);
    }

    tracing::info!(date = %date, count = created.len(), "Daily shifts created");
    Ok(created)
}
