//! 健康检查路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api | GET | 欢迎信息 |
//! | /health | GET | 健康检查 (含存储连通性) |
//!
//! # 响应示例
//!
//! ```json
//! {
//!   "status": "ok",
//!   "version": "0.1.0",
//!   "uptime_seconds": 42,
//!   "store": { "connected": true, "queryable": true, "latency_ms": 1 }
//! }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use shared::models::MessageResponse;

use crate::core::ServerState;
use crate::db::StoreHealth;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api", get(hello))
        .route("/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    /// 状态 (ok | degraded)
    status: &'static str,
    version: &'static str,
    /// 运行时间 (秒)
    uptime_seconds: u64,
    store: StoreHealth,
}

async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse::new("Employee scheduling service"))
}

/// 存储不可用时仍然返回 200，status 为 degraded
async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let store = state.store.health().await;
    let status = if store.connected && store.queryable {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        store,
    })
}
