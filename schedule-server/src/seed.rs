//! Demo data
//!
//! Bundled roster written on startup when `SEED_DEMO_DATA` is on, numbered
//! `EMP000`, `EMP001`, ... in file order, plus the template shifts for today.

use chrono::NaiveDate;
use serde::Deserialize;
use shared::error::{AppError, AppResult};
use shared::models::{Certification, EmployeeCreate, Gender};

use crate::db::StoreClient;
use crate::db::repository::{EmployeeRepository, ShiftRepository};
use crate::shifts::create_daily_shifts;

const DEMO_ROSTER: &str = include_str!("../data/employees.json");

#[derive(Debug, Deserialize)]
struct Roster {
    employees: Vec<RosterEntry>,
}

#[derive(Debug, Deserialize)]
struct RosterEntry {
    name: String,
    age: Option<u32>,
    gender: Option<Gender>,
    years_at_company: Option<u32>,
    #[serde(default)]
    life_situation: String,
    #[serde(default)]
    schedule_preferences: String,
    #[serde(default)]
    certifications: Vec<Certification>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub employees: usize,
    pub shifts: usize,
}

pub fn employee_number(index: usize) -> String {
    format!("EMP{index:03}")
}

/// Parse the bundled roster into create payloads
pub fn demo_roster() -> Result<Vec<EmployeeCreate>, serde_json::Error> {
    let roster: Roster = serde_json::from_str(DEMO_ROSTER)?;
    Ok(roster
        .employees
        .into_iter()
        .enumerate()
        .map(|(index, entry)| EmployeeCreate {
            employee_number: employee_number(index),
            name: entry.name,
            age: entry.age,
            gender: entry.gender,
            years_at_company: entry.years_at_company,
            life_situation: entry.life_situation,
            schedule_preferences: entry.schedule_preferences,
            certifications: entry.certifications,
            ..Default::default()
        })
        .collect())
}

/// Write the demo roster and `date`'s template shifts.
///
/// Employees are overwritten on every run. Shifts are only generated when
/// none exist for `date` yet. A failing employee is logged and skipped.
pub async fn seed_demo_data(store: &StoreClient, date: NaiveDate) -> AppResult<SeedReport> {
    let roster = demo_roster().map_err(|e| AppError::internal(format!("demo roster: {e}")))?;
    let employees = EmployeeRepository::new(store.clone());

    let mut numbers = Vec::with_capacity(roster.len());
    for data in roster {
        let number = data.employee_number.clone();
        match employees.create(data).await {
            Ok(_) => numbers.push(number),
            Err(e) => tracing::warn!(employee_number = %number, "Skipping demo employee: {e}"),
        }
    }
    employees.recompute_first_line_counts().await?;

    let shifts = ShiftRepository::new(store.clone());
    let existing = shifts.find_by_day(date).await?;
    let created = if existing.is_empty() {
        create_daily_shifts(&shifts, date, &numbers).await?.len()
    } else {
        tracing::debug!(
            date = %date,
            count = existing.len(),
            "Shifts already present, not regenerating"
        );
        0
    };

    Ok(SeedReport {
        employees: numbers.len(),
        shifts: created,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_roster_parses() {
        let roster = demo_roster().unwrap();
        assert_eq!(roster.len(), 10);
        assert_eq!(roster[0].employee_number, "EMP000");
        assert_eq!(roster[9].employee_number, "EMP009");
        assert!(roster.iter().all(|e| !e.name.is_empty()));
    }

    #[test]
    fn test_employee_number_padding() {
        assert_eq!(employee_number(7), "EMP007");
        assert_eq!(employee_number(123), "EMP123");
    }
}
