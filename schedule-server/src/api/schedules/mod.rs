//! Schedule API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Schedule router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/schedules", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{date}",
            get(handler::get_by_date)
                .put(handler::update)
                .delete(handler::delete),
        )
}
