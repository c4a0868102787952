use std::sync::Arc;
use std::time::Instant;

use crate::advisor::{ChangeAnalyzer, OpenAiAnalyzer, ScheduleChangeAdvisor};
use crate::core::{Config, Result, ServerError};
use crate::db::StoreClient;
use crate::db::repository::{
    EmployeeRepository, RulesRepository, ScheduleRepository, ShiftRepository,
};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段内部都是 Arc，clone 只是浅拷贝。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | store | StoreClient | 文档存储连接 |
/// | advisor | ScheduleChangeAdvisor | 排班变更建议 |
/// | started_at | Instant | 启动时间 (健康检查 uptime) |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 文档存储 (SurrealDB)
    pub store: StoreClient,
    /// 排班变更建议服务
    pub advisor: ScheduleChangeAdvisor,
    pub started_at: Instant,
}

impl ServerState {
    /// 创建服务器状态 (手动构造, 测试中注入 analyzer)
    ///
    /// 通常使用 [`initialize()`](Self::initialize) 方法代替
    pub fn new(config: Config, store: StoreClient, analyzer: Arc<dyn ChangeAnalyzer>) -> Self {
        Self {
            advisor: ScheduleChangeAdvisor::new(store.clone(), analyzer),
            config,
            store,
            started_at: Instant::now(),
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 存储连接 (带退避重试)；失败时后台继续重连, HTTP 仍然启动
    /// 2. 集合和默认规则
    /// 3. 排班建议客户端
    pub async fn initialize(config: &Config) -> Result<Self> {
        let store = StoreClient::new(config.store_settings());

        if store.connect().await {
            if let Err(e) = store.ensure_initialized().await {
                tracing::warn!("Store initialization failed: {e}");
            }
        } else {
            tracing::warn!("Store unavailable at startup, retrying in background");
            super::tasks::spawn_store_recovery(store.clone());
        }

        let analyzer = OpenAiAnalyzer::new(config.advisor_settings())
            .map_err(|e| ServerError::Config(e.to_string()))?;
        if config.advisor.api_key.is_none() {
            tracing::warn!("ADVISOR_API_KEY not set, schedule change analysis is disabled");
        }

        Ok(Self::new(config.clone(), store, Arc::new(analyzer)))
    }

    /// 启动后台任务
    ///
    /// 必须在 `Server::run()` 之前调用
    ///
    /// 启动的任务：
    /// - 演示数据写入 (SEED_DEMO_DATA)
    pub fn start_background_tasks(&self) {
        if self.config.seed_demo_data {
            super::tasks::spawn_demo_seed(self.store.clone());
        }
    }

    pub fn employees(&self) -> EmployeeRepository {
        EmployeeRepository::new(self.store.clone())
    }

    pub fn schedules(&self) -> ScheduleRepository {
        ScheduleRepository::new(self.store.clone())
    }

    pub fn shifts(&self) -> ShiftRepository {
        ShiftRepository::new(self.store.clone())
    }

    pub fn rules(&self) -> RulesRepository {
        RulesRepository::new(self.store.clone())
    }
}
