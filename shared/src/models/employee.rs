//! Employee Model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Certifications an employee may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Certification {
    PowerTools,
    Forklift,
    FireSafety,
    FirstAid,
    Cpr,
    BrewingCertification,
    FoodSafety,
    QualityControl,
    PackagingSystems,
    ChemicalHandling,
    ConfinedSpace,
    BoilerOperation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    Other,
}

/// HR event kinds (meeting, development review, incident, other)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HrEventType {
    Meeting,
    DevelopmentReview,
    Incident,
    Other,
}

/// HR event attached to an employee record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HrEvent {
    pub event_type: HrEventType,
    /// YYYY-MM-DD
    pub event_date: String,
    pub event_report: String,
}

/// Employee document (keyed by `employee_number`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_number: String,
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub years_at_company: Option<u32>,
    /// Free-text description of the employee's life situation
    #[serde(default)]
    pub life_situation: String,
    /// Free-text description of schedule preferences
    #[serde(default)]
    pub schedule_preferences: String,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    /// Dates (YYYY-MM-DD) the employee is known to be away
    #[serde(default)]
    pub known_absences: Vec<String>,
    #[serde(default)]
    pub hr_events: Vec<HrEvent>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Derived: number of schedules naming this employee as first-line support.
    /// Only accurate right after a recount.
    #[serde(default)]
    pub first_line_support_count: u32,
    #[serde(default)]
    pub revision: u64,
}

/// Create employee payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub employee_number: String,
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub years_at_company: Option<u32>,
    #[serde(default)]
    pub life_situation: String,
    #[serde(default)]
    pub schedule_preferences: String,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub known_absences: Vec<String>,
    #[serde(default)]
    pub hr_events: Vec<HrEvent>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl From<EmployeeCreate> for Employee {
    fn from(data: EmployeeCreate) -> Self {
        Self {
            employee_number: data.employee_number,
            name: data.name,
            age: data.age,
            gender: data.gender,
            years_at_company: data.years_at_company,
            life_situation: data.life_situation,
            schedule_preferences: data.schedule_preferences,
            certifications: data.certifications,
            known_absences: data.known_absences,
            hr_events: data.hr_events,
            metadata: data.metadata,
            first_line_support_count: 0,
            revision: 0,
        }
    }
}

/// Update employee payload; absent fields leave the stored value untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_at_company: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub life_situation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_preferences: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<Certification>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_absences: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hr_events: Option<Vec<HrEvent>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_create_payload() {
        let json = r#"{"employee_number":"EMP001","name":"Lena Karlsson"}"#;
        let create: EmployeeCreate = serde_json::from_str(json).unwrap();
        let employee = Employee::from(create);
        assert_eq!(employee.employee_number, "EMP001");
        assert!(employee.certifications.is_empty());
        assert_eq!(employee.first_line_support_count, 0);
    }

    #[test]
    fn test_enum_wire_names() {
        let json = serde_json::to_string(&Certification::BrewingCertification).unwrap();
        assert_eq!(json, "\"brewing_certification\"");
        let gender: Gender = serde_json::from_str("\"non_binary\"").unwrap();
        assert_eq!(gender, Gender::NonBinary);
    }

    #[test]
    fn test_update_patch_skips_unset_fields() {
        let update = EmployeeUpdate {
            known_absences: Some(vec!["2024-07-15".into()]),
            ..Default::default()
        };
        let patch = serde_json::to_value(&update).unwrap();
        assert_eq!(patch, serde_json::json!({ "known_absences": ["2024-07-15"] }));

        let empty = serde_json::to_value(EmployeeUpdate::default()).unwrap();
        assert_eq!(empty, serde_json::json!({}));
    }
}
