//! OpenAI-compatible analyzer

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use super::api_types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat};
use super::validate::analysis_schema;
use super::{AdvisorError, AnalysisInput, ChangeAnalyzer};

const INSTRUCTIONS: &str = "\
Analyze this schedule change request considering the rules and provide a clear recommendation. \
Extract the employee name, target dates, reason for change, and suggest replacements if applicable. \
Use the provided employee and schedule information to make an informed recommendation. \
Consider workload balance, consecutive shifts, and employee absences in your analysis. \
Name replacements exactly as they appear in the employee list. \
Include the original query text in your analysis.";

/// Advisor endpoint configuration
#[derive(Debug, Clone)]
pub struct AdvisorSettings {
    /// Base URL, e.g. https://api.openai.com/v1
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
    /// `None` keeps the HTTP client's default
    pub timeout: Option<Duration>,
}

/// Sends one chat completion per analysis, constrained to the analysis schema
pub struct OpenAiAnalyzer {
    settings: AdvisorSettings,
    client: reqwest::Client,
}

impl OpenAiAnalyzer {
    pub fn new(settings: AdvisorSettings) -> Result<Self, AdvisorError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AdvisorError::Request(e.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.api_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ChangeAnalyzer for OpenAiAnalyzer {
    async fn analyze(&self, input: &AnalysisInput) -> Result<Value, AdvisorError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(AdvisorError::NotConfigured)?;

        let payload = serde_json::to_string(input)
            .map_err(|e| AdvisorError::Request(format!("failed to encode input: {e}")))?;

        let request = ChatCompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![ChatMessage::system(INSTRUCTIONS), ChatMessage::user(payload)],
            temperature: Some(0.2),
            response_format: Some(ResponseFormat::json_schema(
                "schedule_change_analysis",
                analysis_schema(),
            )),
        };

        tracing::debug!(model = %self.settings.model, "Calling schedule change advisor");

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&request)
            .send()
            .await
            .map_err(|e| AdvisorError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AdvisorError::Decode(e.to_string()))?;

        if let Some(usage) = &completion.usage {
            tracing::debug!(
                model = completion.model.as_deref().unwrap_or(&self.settings.model),
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Advisor usage"
            );
        }

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AdvisorError::Decode("response has no choices".to_string()))?;
        if !choice.finished_normally() {
            tracing::warn!(
                finish_reason = choice.finish_reason.as_deref().unwrap_or_default(),
                "Advisor answer was cut short"
            );
        }
        let message = choice.message;

        if let Some(refusal) = message.refusal {
            // Surfaces as a validation fallback, not a transport error
            return Ok(Value::String(refusal));
        }

        let content = message.content.unwrap_or_default();
        Ok(serde_json::from_str(&content).unwrap_or(Value::String(content)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(api_key: Option<&str>) -> AdvisorSettings {
        AdvisorSettings {
            api_url: "http://127.0.0.1:9/v1/".to_string(),
            api_key: api_key.map(str::to_string),
            model: "gpt-4o-mini".to_string(),
            timeout: Some(Duration::from_secs(1)),
        }
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let analyzer = OpenAiAnalyzer::new(settings(None)).unwrap();
        assert_eq!(analyzer.endpoint(), "http://127.0.0.1:9/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let analyzer = OpenAiAnalyzer::new(settings(Some(""))).unwrap();
        let err = analyzer.analyze(&AnalysisInput::default()).await.unwrap_err();
        assert!(matches!(err, AdvisorError::NotConfigured));
    }

    #[test]
    fn test_request_shape() {
        let request = ChatCompletionRequest {
            model: "m".into(),
            messages: vec![ChatMessage::system("s"), ChatMessage::user("u")],
            temperature: None,
            response_format: Some(ResponseFormat::json_schema("x", analysis_schema())),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["response_format"]["type"], "json_schema");
        assert_eq!(value["response_format"]["json_schema"]["strict"], true);
        assert!(value.get("temperature").is_none());
        assert_eq!(value["messages"][1]["role"], "user");
    }
}
