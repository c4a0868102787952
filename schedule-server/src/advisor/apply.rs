//! Applying approved schedule changes

use shared::models::{AppliedChange, ChangeOutcome, Employee, ScheduleChange, ScheduleCreate};

use crate::db::repository::ScheduleRepository;

/// Resolve a suggested replacement to one employee by exact name.
///
/// Unknown or ambiguous names are rejected with a reason; the replacement is
/// never treated as an employee number.
pub fn resolve_replacement<'a>(
    employees: &'a [Employee],
    replacement: &str,
) -> Result<&'a Employee, String> {
    let replacement = replacement.trim();
    if replacement.is_empty() {
        return Err("no replacement suggested".to_string());
    }

    let named: Vec<&Employee> = employees.iter().filter(|e| e.name == replacement).collect();
    match named.as_slice() {
        [employee] => Ok(*employee),
        [] => Err(format!("no employee named '{replacement}'")),
        many => Err(format!(
            "employee name '{replacement}' is ambiguous ({} matches)",
            many.len()
        )),
    }
}

/// Apply each change in order. A failing change is recorded as skipped and
/// does not undo the ones already applied.
pub async fn apply_changes(
    schedules: &ScheduleRepository,
    employees: &[Employee],
    changes: &[ScheduleChange],
) -> Vec<AppliedChange> {
    let mut applied = Vec::with_capacity(changes.len());

    for change in changes {
        let skipped = |reason: String| AppliedChange {
            target_date: change.target_date.clone(),
            suggested_replacement: change.suggested_replacement.clone(),
            outcome: ChangeOutcome::Skipped,
            employee_number: None,
            reason: Some(reason),
        };

        let replacement = match resolve_replacement(employees, &change.suggested_replacement) {
            Ok(employee) => employee,
            Err(reason) => {
                tracing::info!(date = %change.target_date, "Skipping schedule change: {reason}");
                applied.push(skipped(reason));
                continue;
            }
        };
        let number = replacement.employee_number.clone();

        let outcome = match schedules.find_by_date(&change.target_date).await {
            Ok(Some(_)) => schedules
                .update(&change.target_date, &number)
                .await
                .map(|_| ChangeOutcome::Updated),
            Ok(None) => schedules
                .create(ScheduleCreate {
                    date: change.target_date.clone(),
                    first_line_support: number.clone(),
                })
                .await
                .map(|_| ChangeOutcome::Created),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(outcome) => {
                tracing::info!(
                    date = %change.target_date,
                    employee_number = %number,
                    ?outcome,
                    "Schedule change applied"
                );
                applied.push(AppliedChange {
                    target_date: change.target_date.clone(),
                    suggested_replacement: change.suggested_replacement.clone(),
                    outcome,
                    employee_number: Some(number),
                    reason: None,
                });
            }
            Err(e) => {
                tracing::error!(date = %change.target_date, "Failed to apply schedule change: {e}");
                applied.push(skipped(e.to_string()));
            }
        }
    }

    applied
}
