//! Schedule Repository

use super::{EmployeeRepository, require_date};
use crate::db::document::SCHEDULE_TABLE;
use crate::db::{StoreClient, StoreResult};
use serde_json::{Map, Value, json};
use shared::models::{Schedule, ScheduleCreate};

#[derive(Clone)]
pub struct ScheduleRepository {
    store: StoreClient,
    employees: EmployeeRepository,
}

impl ScheduleRepository {
    pub fn new(store: StoreClient) -> Self {
        Self {
            employees: EmployeeRepository::new(store.clone()),
            store,
        }
    }

    /// Create or overwrite the schedule for `data.date`, then recount
    /// first-line support
    pub async fn create(&self, data: ScheduleCreate) -> StoreResult<Schedule> {
        require_date(&data.date, "date")?;
        let schedule = self
            .store
            .upsert(Schedule {
                date: data.date,
                first_line_support: data.first_line_support,
                revision: 0,
            })
            .await?;
        self.employees.recompute_first_line_counts().await?;
        Ok(schedule)
    }

    pub async fn find_by_date(&self, date: &str) -> StoreResult<Option<Schedule>> {
        self.store.get(date).await
    }

    pub async fn find_all(&self) -> StoreResult<Vec<Schedule>> {
        self.store.list().await
    }

    /// Schedules with `start <= date <= end`, either bound optional,
    /// ordered by date
    pub async fn find_range(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> StoreResult<Vec<Schedule>> {
        let mut conditions = Vec::new();
        let mut bindings = Map::new();

        if let Some(start) = start {
            require_date(start, "start_date")?;
            conditions.push("date >= $start");
            bindings.insert("start".to_string(), Value::from(start));
        }
        if let Some(end) = end {
            require_date(end, "end_date")?;
            conditions.push("date <= $end");
            bindings.insert("end".to_string(), Value::from(end));
        }

        let filter = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        self.store
            .query(
                &format!("SELECT * FROM {SCHEDULE_TABLE}{filter} ORDER BY date ASC"),
                Value::Object(bindings),
            )
            .await
    }

    /// Reassign first-line support for a date, then recount
    pub async fn update(&self, date: &str, first_line_support: &str) -> StoreResult<Schedule> {
        let schedule = self
            .store
            .merge(date, json!({ "first_line_support": first_line_support }))
            .await?;
        self.employees.recompute_first_line_counts().await?;
        Ok(schedule)
    }

    pub async fn delete(&self, date: &str) -> StoreResult<Schedule> {
        let removed = self.store.remove(date).await?;
        self.employees.recompute_first_line_counts().await?;
        Ok(removed)
    }
}
