//! Schedule change requests with a canned analyzer

mod common;

use common::{CannedAnalyzer, add_employees, app, send, state_with};
use http::StatusCode;
use schedule_server::advisor::AdvisorError;
use serde_json::{Value, json};

fn analysis(recommendation: &str, changes: Value) -> Value {
    json!({
        "thoughts": "Employee 1 asked for the day off",
        "original_query": "whatever the model echoed",
        "changes": changes,
        "reason": "family event",
        "recommendation": recommendation,
        "reasoning": "coverage is fine",
    })
}

fn change(date: &str, replacement: &str) -> Value {
    json!({
        "employee_name": "Employee 0",
        "target_date": date,
        "suggested_replacement": replacement,
    })
}

#[tokio::test]
async fn approved_changes_are_applied() {
    let answer = analysis(
        "approve",
        json!([
            change("2024-07-15", "Employee 1"),
            change("2024-07-16", "Employee 1"),
            change("2024-07-17", "Nobody"),
            change("2024-07-18", "EMP001"),
        ]),
    );
    let app = app(state_with(CannedAnalyzer::Answer(answer)).await);
    add_employees(&app, 2).await;
    send(
        &app,
        "POST",
        "/api/schedules",
        Some(json!({ "date": "2024-07-15", "first_line_support": "EMP000" })),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/schedule-changes",
        Some(json!({ "request_text": "Employee 0 needs 15-17 July off" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["request"], "Employee 0 needs 15-17 July off");
    assert_eq!(body["analysis"]["original_query"], "Employee 0 needs 15-17 July off");
    assert_eq!(body["analysis"]["recommendation"], "approve");

    let outcomes: Vec<_> = body["applied_changes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["outcome"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(outcomes, ["updated", "created", "skipped", "skipped"]);
    // Replacements resolve by name only
    assert_eq!(body["applied_changes"][3]["reason"], "no employee named 'EMP001'");

    let (_, day) = send(&app, "GET", "/api/schedules/2024-07-15", None).await;
    assert_eq!(day["first_line_support"], "EMP001");
    let (_, emp1) = send(&app, "GET", "/api/employees/EMP001", None).await;
    assert_eq!(emp1["first_line_support_count"], 2);
}

#[tokio::test]
async fn denied_analysis_changes_nothing() {
    let answer = analysis(
        "deny",
        json!([change("2024-07-15", "Employee 1")]),
    );
    let app = app(state_with(CannedAnalyzer::Answer(answer)).await);
    add_employees(&app, 2).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/schedule-changes",
        Some(json!({ "request_text": "swap please" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysis"]["recommendation"], "deny");
    assert_eq!(body["applied_changes"], json!([]));

    let (status, _) = send(&app, "GET", "/api/schedules/2024-07-15", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_answer_falls_back_to_discuss() {
    let app = app(state_with(CannedAnalyzer::Answer(json!("I cannot help with that"))).await);

    let (status, body) = send(
        &app,
        "POST",
        "/api/schedule-changes",
        Some(json!({ "request_text": "change everything" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysis"]["recommendation"], "discuss");
    assert_eq!(body["analysis"]["original_query"], "change everything");
    assert_eq!(body["analysis"]["changes"], json!([]));
}

#[tokio::test]
async fn advisor_failures_map_to_upstream_errors() {
    let app1 = app(state_with(CannedAnalyzer::Fail(|| AdvisorError::NotConfigured)).await);
    let (status, body) = send(
        &app1,
        "POST",
        "/api/schedule-changes",
        Some(json!({ "request_text": "swap please" })),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], 5002);

    let app2 = app(state_with(CannedAnalyzer::Fail(|| {
        AdvisorError::Request("connection refused".into())
    })).await);
    let (status, body) = send(
        &app2,
        "POST",
        "/api/schedule-changes",
        Some(json!({ "request_text": "swap please" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], 5001);
}

#[tokio::test]
async fn empty_request_text_is_rejected() {
    let app = app(state_with(CannedAnalyzer::Answer(json!({}))).await);
    let (status, body) = send(
        &app,
        "POST",
        "/api/schedule-changes",
        Some(json!({ "request_text": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 7);
}
