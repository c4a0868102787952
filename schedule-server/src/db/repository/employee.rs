//! Employee Repository

use super::{require_no_nulls, to_patch};
use crate::db::document::{EMPLOYEE_TABLE, SCHEDULE_TABLE};
use crate::db::{StoreClient, StoreError, StoreResult};
use serde::Deserialize;
use serde_json::json;
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};

#[derive(Debug, Deserialize)]
struct FirstLineTally {
    first_line_support: String,
    total: u32,
}

#[derive(Clone)]
pub struct EmployeeRepository {
    store: StoreClient,
}

impl EmployeeRepository {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    /// Create or overwrite the employee keyed by `employee_number`
    pub async fn create(&self, data: EmployeeCreate) -> StoreResult<Employee> {
        if data.employee_number.trim().is_empty() {
            return Err(StoreError::Validation(
                "employee_number must not be empty".to_string(),
            ));
        }
        require_no_nulls(&data.metadata)?;
        let employee = Employee::from(data);
        let created = self.store.upsert(employee).await?;
        tracing::debug!(employee_number = %created.employee_number, "Employee stored");
        Ok(created)
    }

    pub async fn find_by_number(&self, employee_number: &str) -> StoreResult<Option<Employee>> {
        self.store.get(employee_number).await
    }

    pub async fn find_all(&self) -> StoreResult<Vec<Employee>> {
        self.store.list().await
    }

    /// Merge the supplied fields into the stored employee
    pub async fn update(
        &self,
        employee_number: &str,
        data: EmployeeUpdate,
    ) -> StoreResult<Employee> {
        if let Some(metadata) = &data.metadata {
            require_no_nulls(metadata)?;
        }
        let patch = to_patch(&data)?;
        self.store.merge(employee_number, patch).await
    }

    pub async fn delete(&self, employee_number: &str) -> StoreResult<Employee> {
        self.store.remove(employee_number).await
    }

    /// Recompute `first_line_support_count` for every employee from the
    /// schedule collection (reset to zero, then count).
    ///
    /// Not atomic with respect to concurrent schedule writes; the counts are
    /// only exact when no schedule changed during the rescan.
    pub async fn recompute_first_line_counts(&self) -> StoreResult<()> {
        self.store
            .execute(
                &format!(
                    "UPDATE {EMPLOYEE_TABLE} SET first_line_support_count = 0, revision += 1"
                ),
                json!({}),
            )
            .await?;

        let tallies: Vec<FirstLineTally> = self
            .store
            .query(
                &format!(
                    "SELECT first_line_support, count() AS total FROM {SCHEDULE_TABLE} \
                     GROUP BY first_line_support"
                ),
                json!({}),
            )
            .await?;

        for tally in &tallies {
            self.store
                .execute(
                    &format!(
                        "UPDATE type::thing('{EMPLOYEE_TABLE}', $number) \
                         SET first_line_support_count = $total, revision += 1"
                    ),
                    json!({ "number": tally.first_line_support, "total": tally.total }),
                )
                .await?;
        }

        tracing::debug!(
            employees_with_duty = tallies.len(),
            "First-line support counts recomputed"
        );
        Ok(())
    }
}
