//! Boundary checks for analyses returned by the external model

use serde_json::{Value, json};
use shared::models::{Recommendation, ScheduleChangeAnalysis};
use shared::util::parse_date;

/// JSON schema the model is constrained to
pub fn analysis_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "required": [
            "thoughts", "original_query", "changes", "reason", "recommendation", "reasoning"
        ],
        "properties": {
            "thoughts": {
                "type": "string",
                "description": "Thought process while analyzing the request"
            },
            "original_query": {
                "type": "string",
                "description": "The request text that was analyzed"
            },
            "changes": {
                "type": "array",
                "description": "Suggested changes to the schedule",
                "items": {
                    "type": "object",
                    "additionalProperties": false,
                    "required": ["employee_name", "target_date", "suggested_replacement"],
                    "properties": {
                        "employee_name": {
                            "type": "string",
                            "description": "Employee originally scheduled for the date"
                        },
                        "target_date": {
                            "type": "string",
                            "description": "Date of the change in YYYY-MM-DD format"
                        },
                        "suggested_replacement": {
                            "type": "string",
                            "description": "Name of the suggested replacement employee, if any"
                        }
                    }
                }
            },
            "reason": {
                "type": ["string", "null"],
                "description": "Reason for the change extracted from the request"
            },
            "recommendation": {
                "type": "string",
                "enum": ["approve", "deny", "discuss"]
            },
            "reasoning": {
                "type": "string",
                "description": "Detailed explanation for the recommendation"
            }
        }
    })
}

/// Parse and check a raw model answer.
///
/// `original_query` is always replaced by `request_text`.
pub fn validate_analysis(raw: Value, request_text: &str) -> Result<ScheduleChangeAnalysis, String> {
    if !raw.is_object() {
        return Err("response is not a JSON object".to_string());
    }

    let mut analysis: ScheduleChangeAnalysis =
        serde_json::from_value(raw).map_err(|e| format!("response does not match schema: {e}"))?;

    for (index, change) in analysis.changes.iter().enumerate() {
        if parse_date(&change.target_date).is_none() {
            return Err(format!(
                "change {index} has invalid target_date '{}'",
                change.target_date
            ));
        }
        if change.employee_name.trim().is_empty() {
            return Err(format!("change {index} has an empty employee_name"));
        }
    }

    analysis.original_query = request_text.to_string();
    Ok(analysis)
}

/// Validated analysis, or a `discuss` recommendation carrying the problem
pub fn analysis_or_fallback(raw: Value, request_text: &str) -> ScheduleChangeAnalysis {
    match validate_analysis(raw, request_text) {
        Ok(analysis) => analysis,
        Err(problem) => {
            tracing::warn!("Discarding advisor response: {problem}");
            fallback(request_text, &problem)
        }
    }
}

fn fallback(request_text: &str, problem: &str) -> ScheduleChangeAnalysis {
    ScheduleChangeAnalysis {
        thoughts: String::new(),
        original_query: request_text.to_string(),
        changes: Vec::new(),
        reason: None,
        recommendation: Recommendation::Discuss,
        reasoning: format!(
            "The automated analysis could not be used ({problem}). \
             Please review this request manually."
        ),
    }
}
