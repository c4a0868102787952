//! API 路由模块
//!
//! 每个子模块导出 `router()`，在 [`build_app`] 中合并。

pub mod employees;
pub mod health;
pub mod rules;
pub mod schedule_changes;
pub mod schedules;
pub mod shifts;

use axum::{Router, middleware};
use shared::error::AppError;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::core::ServerState;
use crate::db::StoreError;

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = std::time::Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        target: "http_access",
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "{} {}",
        method,
        uri
    );

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(employees::router())
        .merge(schedules::router())
        .merge(shifts::router())
        .merge(rules::router())
        .merge(schedule_changes::router())
}

/// Router with state and middleware attached, ready to serve
pub fn build_router(state: ServerState) -> Router {
    build_app()
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(log_request))
                .layer(CorsLayer::permissive()),
        )
}

/// Turn a store `NotFound` into the resource-specific 404
pub(crate) fn not_found_as(err: StoreError, not_found: impl FnOnce() -> AppError) -> AppError {
    match err {
        StoreError::NotFound(_) => not_found(),
        other => other.into(),
    }
}
