//! Shift Repository

use super::to_patch;
use crate::db::document::SHIFT_TABLE;
use crate::db::{StoreClient, StoreError, StoreResult};
use chrono::NaiveDate;
use serde_json::json;
use shared::models::{Shift, ShiftCreate, ShiftUpdate, UNSCORED};
use shared::util::{DATETIME_FORMAT, parse_datetime};

#[derive(Clone)]
pub struct ShiftRepository {
    store: StoreClient,
}

impl ShiftRepository {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    /// Store a new shift under a generated id with an unscored rating
    pub async fn create(&self, data: ShiftCreate) -> StoreResult<Shift> {
        validate_window(&data.start, &data.end)?;
        let shift = Shift {
            shift_id: uuid::Uuid::new_v4().to_string(),
            employee_number: data.employee_number,
            start: data.start,
            end: data.end,
            kind: data.kind,
            score: UNSCORED,
            revision: 0,
        };
        self.store.insert(shift).await
    }

    pub async fn find_by_id(&self, shift_id: &str) -> StoreResult<Option<Shift>> {
        self.store.get(shift_id).await
    }

    pub async fn find_all(&self) -> StoreResult<Vec<Shift>> {
        self.store.list().await
    }

    pub async fn find_by_employee(&self, employee_number: &str) -> StoreResult<Vec<Shift>> {
        self.store
            .query(
                &format!(
                    "SELECT * FROM {SHIFT_TABLE} WHERE employee_number = $employee_number \
                     ORDER BY start ASC"
                ),
                json!({ "employee_number": employee_number }),
            )
            .await
    }

    /// Shifts starting on `date`, ordered by start
    pub async fn find_by_day(&self, date: NaiveDate) -> StoreResult<Vec<Shift>> {
        let from = date.and_hms_opt(0, 0, 0).map(|t| t.format(DATETIME_FORMAT).to_string());
        let to = date
            .succ_opt()
            .and_then(|next| next.and_hms_opt(0, 0, 0))
            .map(|t| t.format(DATETIME_FORMAT).to_string());
        let (Some(from), Some(to)) = (from, to) else {
            return Ok(Vec::new());
        };
        self.store
            .query(
                &format!(
                    "SELECT * FROM {SHIFT_TABLE} WHERE start >= $from AND start < $to \
                     ORDER BY start ASC"
                ),
                json!({ "from": from, "to": to }),
            )
            .await
    }

    pub async fn update(&self, data: ShiftUpdate) -> StoreResult<Shift> {
        if data.start.is_some() || data.end.is_some() {
            let current = self
                .find_by_id(&data.shift_id)
                .await?
                .ok_or_else(|| StoreError::NotFound(format!("{SHIFT_TABLE}:{}", data.shift_id)))?;
            let start = data.start.as_deref().unwrap_or(&current.start);
            let end = data.end.as_deref().unwrap_or(&current.end);
            validate_window(start, end)?;
        }
        let patch = to_patch(&data)?;
        self.store.merge(&data.shift_id, patch).await
    }

    pub async fn delete(&self, shift_id: &str) -> StoreResult<Shift> {
        self.store.remove(shift_id).await
    }
}

fn validate_window(start: &str, end: &str) -> StoreResult<()> {
    let parsed_start = parse_datetime(start)
        .ok_or_else(|| StoreError::Validation(format!("invalid shift start '{start}'")))?;
    let parsed_end = parse_datetime(end)
        .ok_or_else(|| StoreError::Validation(format!("invalid shift end '{end}'")))?;
    if parsed_end <= parsed_start {
        return Err(StoreError::Validation(format!(
            "shift end {end} must be after start {start}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_window() {
        assert!(validate_window("2024-07-15T08:00:00", "2024-07-15T09:00:00").is_ok());
        assert!(validate_window("2024-07-15T09:00:00", "2024-07-15T09:00:00").is_err());
        assert!(validate_window("2024-07-15 08:00", "2024-07-15T09:00:00").is_err());
    }
}
