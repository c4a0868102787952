//! Keyed document mapping for the four collections

use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{Employee, Rules, Schedule, Shift};

pub const EMPLOYEE_TABLE: &str = "employee";
pub const SCHEDULE_TABLE: &str = "schedule";
pub const SHIFT_TABLE: &str = "shift";
pub const RULES_TABLE: &str = "rules";

/// Key of the rules singleton
pub const RULES_KEY: &str = "system_rules";

/// All tables created by `StoreClient::ensure_initialized`
pub const TABLES: [&str; 4] = [EMPLOYEE_TABLE, SCHEDULE_TABLE, SHIFT_TABLE, RULES_TABLE];

/// A document stored under `table:key` with a write revision
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    const TABLE: &'static str;
    /// Field used to order `list` results
    const ORDER_BY: &'static str;

    fn key(&self) -> &str;
    fn revision(&self) -> u64;
    fn set_revision(&mut self, revision: u64);
}

impl Document for Employee {
    const TABLE: &'static str = EMPLOYEE_TABLE;
    const ORDER_BY: &'static str = "employee_number";

    fn key(&self) -> &str {
        &self.employee_number
    }
    fn revision(&self) -> u64 {
        self.revision
    }
    fn set_revision(&mut self, revision: u64) {
        self.revision = revision;
    }
}

impl Document for Schedule {
    const TABLE: &'static str = SCHEDULE_TABLE;
    const ORDER_BY: &'static str = "date";

    fn key(&self) -> &str {
        &self.date
    }
    fn revision(&self) -> u64 {
        self.revision
    }
    fn set_revision(&mut self, revision: u64) {
        self.revision = revision;
    }
}

impl Document for Shift {
    const TABLE: &'static str = SHIFT_TABLE;
    const ORDER_BY: &'static str = "start";

    fn key(&self) -> &str {
        &self.shift_id
    }
    fn revision(&self) -> u64 {
        self.revision
    }
    fn set_revision(&mut self, revision: u64) {
        self.revision = revision;
    }
}

impl Document for Rules {
    const TABLE: &'static str = RULES_TABLE;
    const ORDER_BY: &'static str = "revision";

    fn key(&self) -> &str {
        RULES_KEY
    }
    fn revision(&self) -> u64 {
        self.revision
    }
    fn set_revision(&mut self, revision: u64) {
        self.revision = revision;
    }
}
