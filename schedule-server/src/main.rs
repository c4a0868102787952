use anyhow::Context;
use schedule_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境变量 (.env 可选)
    let _ = dotenv::dotenv();

    // 2. 加载配置和日志
    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );
    config.validate().context("invalid configuration")?;

    tracing::info!(
        environment = %config.environment,
        store = %config.database.url,
        "Schedule server starting..."
    );

    // 3. 初始化服务器状态
    let state = ServerState::initialize(&config)
        .await
        .context("failed to initialize server state")?;

    // 4. 启动 HTTP 服务器 (Server::run 会启动后台任务)
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
