#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use schedule_server::advisor::{AdvisorError, AnalysisInput, ChangeAnalyzer};
use schedule_server::{Config, ServerState, StoreClient};

/// Analyzer returning a canned answer
pub enum CannedAnalyzer {
    Answer(Value),
    Fail(fn() -> AdvisorError),
}

#[async_trait]
impl ChangeAnalyzer for CannedAnalyzer {
    async fn analyze(&self, _input: &AnalysisInput) -> Result<Value, AdvisorError> {
        match self {
            Self::Answer(value) => Ok(value.clone()),
            Self::Fail(make) => Err(make()),
        }
    }
}

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("mem://".to_string()),
        "SEED_DEMO_DATA" => Some("false".to_string()),
        _ => None,
    })
}

pub async fn state_with(analyzer: CannedAnalyzer) -> ServerState {
    let store = StoreClient::in_memory().await.unwrap();
    ServerState::new(test_config(), store, Arc::new(analyzer))
}

pub async fn test_state() -> ServerState {
    state_with(CannedAnalyzer::Fail(|| AdvisorError::NotConfigured)).await
}

pub fn app(state: ServerState) -> Router {
    schedule_server::api::build_router(state)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub fn employee(number: &str, name: &str) -> Value {
    serde_json::json!({
        "employee_number": number,
        "name": name,
        "certifications": ["forklift"],
    })
}

pub async fn add_employees(app: &Router, count: usize) -> Vec<String> {
    let mut numbers = Vec::new();
    for i in 0..count {
        let number = format!("EMP{i:03}");
        let (status, _) = send(
            app,
            "POST",
            "/api/employees",
            Some(employee(&number, &format!("Employee {i}"))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        numbers.push(number);
    }
    numbers
}
