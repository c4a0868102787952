//! Schedule Server - 员工排班服务
//!
//! # 模块结构
//!
//! ```text
//! schedule-server/src/
//! ├── core/          # 配置、状态、错误、后台任务
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 文档存储 (SurrealDB) 和仓库
//! ├── shifts/        # 每日班次模板
//! ├── advisor/       # 排班变更建议 (LLM)
//! ├── seed.rs        # 演示数据
//! └── utils/         # 日志
//! ```

pub mod advisor;
pub mod api;
pub mod core;
pub mod db;
pub mod seed;
pub mod shifts;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use db::StoreClient;
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::init_logger_with_file;
