//! Fixed daily shift template
//!
//! Eight one-hour slots from 08:00 to 16:00. Each hour assigns the first four
//! employees to a role row (opening hour and post-lunch hour have their own
//! rows) and the fifth employee to packing.

use chrono::NaiveDate;
use shared::models::ShiftRole;
use shared::util::DATE_FORMAT;
use thiserror::Error;

pub const FIRST_HOUR: u32 = 8;
/// Exclusive
pub const END_HOUR: u32 = 16;
pub const LUNCH_RETURN_HOUR: u32 = 13;
pub const REQUIRED_EMPLOYEES: usize = 5;

const OPENING_ROLES: [ShiftRole; 4] = [
    ShiftRole::Cleaning,
    ShiftRole::Line1,
    ShiftRole::Line2,
    ShiftRole::Line2,
];
const AFTER_LUNCH_ROLES: [ShiftRole; 4] = [
    ShiftRole::Inventory,
    ShiftRole::Line1,
    ShiftRole::Line1,
    ShiftRole::Line2,
];
const DEFAULT_ROLES: [ShiftRole; 4] = [
    ShiftRole::Line1,
    ShiftRole::Line1,
    ShiftRole::Line2,
    ShiftRole::Line2,
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("at least {required} employees are required, got {actual}")]
    NotEnoughEmployees { required: usize, actual: usize },
}

/// A shift to be stored; id and score are assigned on insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftDraft {
    pub employee_number: String,
    pub start: String,
    pub end: String,
    pub role: ShiftRole,
}

/// Roles for employees 0..4 during `hour`
pub fn roles_for_hour(hour: u32) -> [ShiftRole; 4] {
    match hour {
        FIRST_HOUR => OPENING_ROLES,
        LUNCH_RETURN_HOUR => AFTER_LUNCH_ROLES,
        _ => DEFAULT_ROLES,
    }
}

/// Expand the template for `date`.
///
/// Output is ordered by hour, then by template slot, with packing last in
/// each hour. Employees past the fifth are not used.
pub fn generate_daily_shifts(
    date: NaiveDate,
    employees: &[String],
) -> Result<Vec<ShiftDraft>, TemplateError> {
    if employees.len() < REQUIRED_EMPLOYEES {
        return Err(TemplateError::NotEnoughEmployees {
            required: REQUIRED_EMPLOYEES,
            actual: employees.len(),
        });
    }

    let day = date.format(DATE_FORMAT).to_string();
    let slot = |hour: u32, employee: &String, role: ShiftRole| ShiftDraft {
        employee_number: employee.clone(),
        start: format!("{day}T{hour:02}:00:00"),
        end: format!("{day}T{:02}:00:00", hour + 1),
        role,
    };

    let mut drafts = Vec::with_capacity((END_HOUR - FIRST_HOUR) as usize * REQUIRED_EMPLOYEES);
    for hour in FIRST_HOUR..END_HOUR {
        for (employee, role) in employees.iter().zip(roles_for_hour(hour)) {
            drafts.push(slot(hour, employee, role));
        }
        drafts.push(slot(hour, &employees[4], ShiftRole::Packing));
    }
    Ok(drafts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::util::parse_datetime;

    fn roster() -> Vec<String> {
        (0..5).map(|i| format!("EMP{i:03}")).collect()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
    }

    fn at(drafts: &[ShiftDraft], hour: u32) -> Vec<(&str, ShiftRole)> {
        let start = format!("2024-07-15T{hour:02}:00:00");
        drafts
            .iter()
            .filter(|d| d.start == start)
            .map(|d| (d.employee_number.as_str(), d.role))
            .collect()
    }

    #[test]
    fn test_five_slots_per_hour() {
        let drafts = generate_daily_shifts(date(), &roster()).unwrap();
        assert_eq!(drafts.len(), 40);
        for hour in FIRST_HOUR..END_HOUR {
            assert_eq!(at(&drafts, hour).len(), 5, "hour {hour}");
        }
    }

    #[test]
    fn test_opening_hour_roles() {
        let drafts = generate_daily_shifts(date(), &roster()).unwrap();
        assert_eq!(
            at(&drafts, 8),
            vec![
                ("EMP000", ShiftRole::Cleaning),
                ("EMP001", ShiftRole::Line1),
                ("EMP002", ShiftRole::Line2),
                ("EMP003", ShiftRole::Line2),
                ("EMP004", ShiftRole::Packing),
            ]
        );
    }

    #[test]
    fn test_after_lunch_roles() {
        let drafts = generate_daily_shifts(date(), &roster()).unwrap();
        assert_eq!(
            at(&drafts, 13),
            vec![
                ("EMP000", ShiftRole::Inventory),
                ("EMP001", ShiftRole::Line1),
                ("EMP002", ShiftRole::Line1),
                ("EMP003", ShiftRole::Line2),
                ("EMP004", ShiftRole::Packing),
            ]
        );
    }

    #[test]
    fn test_default_hours_roles() {
        let drafts = generate_daily_shifts(date(), &roster()).unwrap();
        for hour in [9, 10, 11, 12, 14, 15] {
            assert_eq!(
                at(&drafts, hour),
                vec![
                    ("EMP000", ShiftRole::Line1),
                    ("EMP001", ShiftRole::Line1),
                    ("EMP002", ShiftRole::Line2),
                    ("EMP003", ShiftRole::Line2),
                    ("EMP004", ShiftRole::Packing),
                ],
                "hour {hour}"
            );
        }
    }

    #[test]
    fn test_slots_span_exactly_one_hour() {
        let drafts = generate_daily_shifts(date(), &roster()).unwrap();
        for draft in &drafts {
            let start = parse_datetime(&draft.start).unwrap();
            let end = parse_datetime(&draft.end).unwrap();
            assert_eq!(end - start, chrono::Duration::hours(1));
        }
        assert_eq!(drafts.first().unwrap().start, "2024-07-15T08:00:00");
        assert_eq!(drafts.last().unwrap().end, "2024-07-15T16:00:00");
    }

    #[test]
    fn test_extra_employees_unused() {
        let mut employees = roster();
        employees.push("EMP005".to_string());
        let drafts = generate_daily_shifts(date(), &employees).unwrap();
        assert!(drafts.iter().all(|d| d.employee_number != "EMP005"));
    }

    #[test]
    fn test_too_few_employees() {
        let err = generate_daily_shifts(date(), &roster()[..4]).unwrap_err();
        assert_eq!(
            err,
            TemplateError::NotEnoughEmployees {
                required: 5,
                actual: 4
            }
        );
    }

    #[test]
    fn test_deterministic() {
        let a = generate_daily_shifts(date(), &roster()).unwrap();
        let b = generate_daily_shifts(date(), &roster()).unwrap();
        assert_eq!(a, b);
    }
}
