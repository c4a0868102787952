//! Schedule Change API Handlers

use axum::{Json, extract::State};
use shared::error::AppResult;
use shared::models::{ScheduleChangeRequest, ScheduleChangeResponse};

use crate::core::ServerState;

/// Analyse a free-text change request and apply approved changes
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<ScheduleChangeRequest>,
) -> AppResult<Json<ScheduleChangeResponse>> {
    let response = state.advisor.process(&payload).await?;
    Ok(Json(response))
}
