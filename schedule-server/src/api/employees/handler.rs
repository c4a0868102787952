//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate, MessageResponse};

use crate::api::not_found_as;
use crate::core::ServerState;

/// List all employees
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Employee>>> {
    let employees = state.employees().find_all().await?;
    Ok(Json(employees))
}

/// Get employee by employee number
pub async fn get_by_number(
    State(state): State<ServerState>,
    Path(employee_number): Path<String>,
) -> AppResult<Json<Employee>> {
    let employee = state
        .employees()
        .find_by_number(&employee_number)
        .await?
        .ok_or_else(|| AppError::employee_not_found(&employee_number))?;
    Ok(Json(employee))
}

/// Create (or replace) an employee
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<Json<Employee>> {
    if payload.employee_number.trim().is_empty() {
        return Err(AppError::new(ErrorCode::EmployeeNumberRequired));
    }
    let employee = state.employees().create(payload).await?;
    tracing::info!(employee_number = %employee.employee_number, "Employee created");
    Ok(Json(employee))
}

/// Update an employee
pub async fn update(
    State(state): State<ServerState>,
    Path(employee_number): Path<String>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<Employee>> {
    let employee = state
        .employees()
        .update(&employee_number, payload)
        .await
        .map_err(|e| not_found_as(e, || AppError::employee_not_found(&employee_number)))?;
    Ok(Json(employee))
}

/// Delete an employee
pub async fn delete(
    State(state): State<ServerState>,
    Path(employee_number): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state
        .employees()
        .delete(&employee_number)
        .await
        .map_err(|e| not_found_as(e, || AppError::employee_not_found(&employee_number)))?;
    tracing::info!(employee_number = %employee_number, "Employee deleted");
    Ok(Json(MessageResponse::new(format!(
        "Employee {employee_number} deleted"
    ))))
}
