//! Shift API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DailyShiftsRequest, MessageResponse, Shift, ShiftCreate, ShiftUpdate};
use shared::util::parse_date;

use crate::api::not_found_as;
use crate::core::ServerState;
use crate::db::StoreError;
use crate::shifts::{REQUIRED_EMPLOYEES, create_daily_shifts};

#[derive(Debug, Default, Deserialize)]
pub struct ShiftQuery {
    pub employee_number: Option<String>,
}

/// List shifts, optionally for one employee
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ShiftQuery>,
) -> AppResult<Json<Vec<Shift>>> {
    let repo = state.shifts();
    let shifts = match query.employee_number.as_deref() {
        Some(employee_number) => repo.find_by_employee(employee_number).await?,
        None => repo.find_all().await?,
    };
    Ok(Json(shifts))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(shift_id): Path<String>,
) -> AppResult<Json<Shift>> {
    let shift = state
        .shifts()
        .find_by_id(&shift_id)
        .await?
        .ok_or_else(|| AppError::shift_not_found(&shift_id))?;
    Ok(Json(shift))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ShiftCreate>,
) -> AppResult<Json<Shift>> {
    if state
        .employees()
        .find_by_number(&payload.employee_number)
        .await?
        .is_none()
    {
        return Err(AppError::employee_not_found(&payload.employee_number));
    }

    let shift = state.shifts().create(payload).await.map_err(|e| match e {
        StoreError::Validation(msg) => AppError::with_message(ErrorCode::InvalidShiftTime, msg),
        other => other.into(),
    })?;
    tracing::info!(
        shift_id = %shift.shift_id,
        employee_number = %shift.employee_number,
        "Shift created"
    );
    Ok(Json(shift))
}

/// Update a shift; the body names the shift by `shift_id`
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<ShiftUpdate>,
) -> AppResult<Json<Shift>> {
    if payload.shift_id.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "shift_id is required",
        ));
    }
    if let Some(employee_number) = payload.employee_number.as_deref() {
        if state.employees().find_by_number(employee_number).await?.is_none() {
            return Err(AppError::employee_not_found(employee_number));
        }
    }

    let shift_id = payload.shift_id.clone();
    let shift = state
        .shifts()
        .update(payload)
        .await
        .map_err(|e| not_found_as(e, || AppError::shift_not_found(&shift_id)))?;
    Ok(Json(shift))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(shift_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state
        .shifts()
        .delete(&shift_id)
        .await
        .map_err(|e| not_found_as(e, || AppError::shift_not_found(&shift_id)))?;
    Ok(Json(MessageResponse::new(format!("Shift {shift_id} deleted"))))
}

/// Generate the template shifts for one day.
///
/// The first [`REQUIRED_EMPLOYEES`] numbers are rostered; each must exist.
pub async fn create_daily(
    State(state): State<ServerState>,
    Json(payload): Json<DailyShiftsRequest>,
) -> AppResult<Json<Vec<Shift>>> {
    let date = parse_date(&payload.date).ok_or_else(|| {
        AppError::with_message(
            ErrorCode::InvalidScheduleDate,
            format!("date must be YYYY-MM-DD, got '{}'", payload.date),
        )
    })?;

    let employees = state.employees();
    for employee_number in payload.employee_numbers.iter().take(REQUIRED_EMPLOYEES) {
        if employees.find_by_number(employee_number).await?.is_none() {
            return Err(AppError::employee_not_found(employee_number));
        }
    }

    let shifts = create_daily_shifts(&state.shifts(), date, &payload.employee_numbers).await?;
    Ok(Json(shifts))
}
