//! Rules API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/rules | GET | 读取排班规则 (不存在时写入默认值) |
//! | /api/rules | PUT | 部分更新 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/rules", get(handler::get).put(handler::update))
}
