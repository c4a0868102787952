//! Repository Module
//!
//! Per-collection operations on top of [`StoreClient`](super::StoreClient).

pub mod employee;
pub mod rules;
pub mod schedule;
pub mod shift;

pub use employee::EmployeeRepository;
pub use rules::RulesRepository;
pub use schedule::ScheduleRepository;
pub use shift::ShiftRepository;

use super::{StoreError, StoreResult};

/// Serialize an update DTO into a merge patch (absent fields are skipped)
pub(crate) fn to_patch<T: serde::Serialize>(update: &T) -> StoreResult<serde_json::Value> {
    let patch = serde_json::to_value(update)?;
    match patch {
        serde_json::Value::Object(ref fields) if fields.is_empty() => Err(StoreError::Validation(
            "No valid updates provided".to_string(),
        )),
        serde_json::Value::Object(_) => Ok(patch),
        _ => Err(StoreError::Validation(
            "update must be a JSON object".to_string(),
        )),
    }
}

pub(crate) fn require_date(value: &str, field: &str) -> StoreResult<()> {
    shared::util::parse_date(value)
        .map(|_| ())
        .ok_or_else(|| StoreError::Validation(format!("{field} must be YYYY-MM-DD, got '{value}'")))
}

/// Path of the first object member whose value is `null`.
///
/// The store drops such members on write, so a document holding one would
/// not read back equal to what was written.
pub(crate) fn null_member_path(value: &serde_json::Value, path: &str) -> Option<String> {
    match value {
        serde_json::Value::Object(fields) => fields.iter().find_map(|(name, member)| {
            let member_path = if path.is_empty() {
                name.clone()
            } else {
                format!("{path}.{name}")
            };
            if member.is_null() {
                Some(member_path)
            } else {
                null_member_path(member, &member_path)
            }
        }),
        serde_json::Value::Array(items) => items
            .iter()
            .enumerate()
            .find_map(|(i, item)| null_member_path(item, &format!("{path}[{i}]"))),
        _ => None,
    }
}

pub(crate) fn require_no_nulls(
    metadata: &serde_json::Map<String, serde_json::Value>,
) -> StoreResult<()> {
    metadata
        .iter()
        .find_map(|(name, value)| {
            if value.is_null() {
                Some(name.clone())
            } else {
                null_member_path(value, name)
            }
        })
        .map_or(Ok(()), |path| {
            Err(StoreError::Validation(format!(
                "metadata.{path} must not be null; omit the key instead"
            )))
        })
}
