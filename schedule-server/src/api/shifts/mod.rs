//! Shift API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Shift router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shifts", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(handler::list)
                .post(handler::create)
                .put(handler::update),
        )
        .route("/daily", post(handler::create_daily))
        .route("/{shift_id}", get(handler::get_by_id).delete(handler::delete))
}
