//! Schedule API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{MessageResponse, Schedule, ScheduleCreate, ScheduleRangeQuery, ScheduleUpdate};
use shared::util::parse_date;

use crate::api::not_found_as;
use crate::core::ServerState;

fn require_date(date: &str) -> AppResult<()> {
    match parse_date(date) {
        Some(_) => Ok(()),
        None => Err(AppError::with_message(
            ErrorCode::InvalidScheduleDate,
            format!("date must be YYYY-MM-DD, got '{date}'"),
        )),
    }
}

async fn require_employee(state: &ServerState, employee_number: &str) -> AppResult<()> {
    match state.employees().find_by_number(employee_number).await? {
        Some(_) => Ok(()),
        None => Err(AppError::employee_not_found(employee_number)),
    }
}

/// List schedules, optionally bounded by `start_date` / `end_date` (inclusive)
pub async fn list(
    State(state): State<ServerState>,
    Query(range): Query<ScheduleRangeQuery>,
) -> AppResult<Json<Vec<Schedule>>> {
    let schedules = state
        .schedules()
        .find_range(range.start_date.as_deref(), range.end_date.as_deref())
        .await?;
    Ok(Json(schedules))
}

pub async fn get_by_date(
    State(state): State<ServerState>,
    Path(date): Path<String>,
) -> AppResult<Json<Schedule>> {
    let schedule = state
        .schedules()
        .find_by_date(&date)
        .await?
        .ok_or_else(|| AppError::schedule_not_found(&date))?;
    Ok(Json(schedule))
}

/// Create (or replace) the schedule for a date
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ScheduleCreate>,
) -> AppResult<Json<Schedule>> {
    require_date(&payload.date)?;
    require_employee(&state, &payload.first_line_support).await?;

    let schedule = state.schedules().create(payload).await?;
    tracing::info!(
        date = %schedule.date,
        first_line_support = %schedule.first_line_support,
        "Schedule stored"
    );
    Ok(Json(schedule))
}

/// Reassign first-line support for an existing date
pub async fn update(
    State(state): State<ServerState>,
    Path(date): Path<String>,
    Json(payload): Json<ScheduleUpdate>,
) -> AppResult<Json<Schedule>> {
    require_employee(&state, &payload.first_line_support).await?;

    let schedule = state
        .schedules()
        .update(&date, &payload.first_line_support)
        .await
        .map_err(|e| not_found_as(e, || AppError::schedule_not_found(&date)))?;
    Ok(Json(schedule))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(date): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state
        .schedules()
        .delete(&date)
        .await
        .map_err(|e| not_found_as(e, || AppError::schedule_not_found(&date)))?;
    tracing::info!(date = %date, "Schedule deleted");
    Ok(Json(MessageResponse::new(format!("Schedule for {date} deleted"))))
}
