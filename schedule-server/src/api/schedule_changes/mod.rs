//! Schedule Change API Module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/schedule-changes", post(handler::submit))
}
