//! Rules API Handlers

use axum::{Json, extract::State};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Rules, RulesUpdate};

use crate::core::ServerState;

pub async fn get(State(state): State<ServerState>) -> AppResult<Json<Rules>> {
    let rules = state.rules().get_or_create().await?;
    Ok(Json(rules))
}

pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<RulesUpdate>,
) -> AppResult<Json<Rules>> {
    if payload.is_empty() {
        return Err(AppError::new(ErrorCode::RulesNoUpdates));
    }
    payload
        .validate()
        .map_err(|msg| AppError::with_message(ErrorCode::RulesInvalidValue, msg))?;

    let rules = state.rules().update(payload).await?;
    tracing::info!(
        max_days_per_week = rules.max_days_per_week,
        preferred_balance = rules.preferred_balance,
        "Rules updated"
    );
    Ok(Json(rules))
}
