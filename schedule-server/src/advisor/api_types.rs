//! OpenAI-compatible chat completion request and response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant"
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Structured output constraint (`{"type": "json_schema", ...}`)
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
    pub json_schema: JsonSchemaFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonSchemaFormat {
    pub name: String,
    pub strict: bool,
    pub schema: Value,
}

impl ResponseFormat {
    pub fn json_schema(name: impl Into<String>, schema: Value) -> Self {
        Self {
            format_type: "json_schema".to_string(),
            json_schema: JsonSchemaFormat {
                name: name.into(),
                strict: true,
                schema,
            },
        }
    }
}

/// Chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// Chat completion response (fields we read).
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl Choice {
    /// `false` when generation stopped early (length limit, content filter)
    pub fn finished_normally(&self) -> bool {
        self.finish_reason.as_deref().is_none_or(|reason| reason == "stop")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    /// Set instead of `content` when the model declines a structured answer
    #[serde(default)]
    pub refusal: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_choice_is_flagged() {
        let raw = r#"{
            "model": "gpt-4o-mini-2024-07-18",
            "choices": [
                {"message": {"content": "{\"thoughts\":"}, "finish_reason": "length"}
            ]
        }"#;
        let completion: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(completion.model.as_deref(), Some("gpt-4o-mini-2024-07-18"));
        assert!(!completion.choices[0].finished_normally());
        assert!(completion.usage.is_none());
    }

    #[test]
    fn test_stop_or_missing_reason_is_normal() {
        let raw = r#"{"choices": [
            {"message": {"content": "{}"}, "finish_reason": "stop"},
            {"message": {"content": null}}
        ]}"#;
        let completion: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert!(completion.choices.iter().all(Choice::finished_normally));
        assert!(completion.model.is_none());
    }
}
