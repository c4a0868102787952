//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::net::SocketAddr;

use crate::core::{Config, Result, ServerError, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    /// Create server with an initialized state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    pub async fn run(&self) -> Result<()> {
        let state = self.state.clone();
        state.start_background_tasks();

        let addr: SocketAddr = format!("{}:{}", self.config.http_host, self.config.http_port)
            .parse()
            .map_err(|e| ServerError::Config(format!("invalid HTTP_HOST/HTTP_PORT: {e}")))?;

        let app = crate::api::build_router(state);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Schedule server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Schedule server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutting down...");
}
