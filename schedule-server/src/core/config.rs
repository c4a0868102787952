use std::time::Duration;

use crate::advisor::AdvisorSettings;
use crate::core::ServerError;
use crate::db::{Backoff, StoreSettings};

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | ENVIRONMENT | development | 运行环境 |
/// | HTTP_HOST | 0.0.0.0 | 监听地址 |
/// | HTTP_PORT | 8000 | HTTP 服务端口 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | - | 日志目录 (存在时按天滚动写文件) |
/// | DATABASE_URL | rocksdb://data/scheduling | 存储地址 (rocksdb:// / mem:// / ws://) |
/// | DATABASE_NAMESPACE | scheduling | 命名空间 |
/// | DATABASE_NAME | scheduling | 数据库名 |
/// | DATABASE_USERNAME / DATABASE_PASSWORD | - | 远程存储 root 登录 |
/// | DATABASE_CONNECT_RETRIES | 30 | 连接重试次数 |
/// | DATABASE_RETRY_INITIAL_MS | 1000 | 首次重试间隔(毫秒) |
/// | DATABASE_RETRY_MAX_MS | 10000 | 最大重试间隔(毫秒) |
/// | ADVISOR_API_URL | https://api.openai.com/v1 | 排班建议服务地址 |
/// | ADVISOR_API_KEY | - | API Key (未设置时建议服务不可用) |
/// | ADVISOR_MODEL | gpt-4o-mini | 模型 |
/// | ADVISOR_TIMEOUT_SECS | - | 请求超时(秒)，未设置使用客户端默认 |
/// | SEED_DEMO_DATA | true | 启动时写入演示员工和当天班次 |
#[derive(Debug, Clone)]
pub struct Config {
    /// 运行环境: development | staging | production
    pub environment: String,
    pub http_host: String,
    pub http_port: u16,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub database: DatabaseConfig,
    pub advisor: AdvisorConfig,
    pub seed_demo_data: bool,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub namespace: String,
    pub name: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub connect_retries: u32,
    pub retry_initial_ms: u64,
    pub retry_max_ms: u64,
}

#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: Option<u64>,
}

/// 重试间隔增长倍数
const RETRY_MULTIPLIER: f64 = 1.5;

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载 (测试用)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let string = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            environment: string("ENVIRONMENT", "development"),
            http_host: string("HTTP_HOST", "0.0.0.0"),
            http_port: lookup("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            log_level: string("LOG_LEVEL", "info").to_lowercase(),
            log_json: lookup("LOG_JSON").is_some_and(|v| parse_bool(&v)),
            log_dir: optional("LOG_DIR"),
            database: DatabaseConfig {
                url: string("DATABASE_URL", "rocksdb://data/scheduling"),
                namespace: string("DATABASE_NAMESPACE", "scheduling"),
                name: string("DATABASE_NAME", "scheduling"),
                username: optional("DATABASE_USERNAME"),
                password: optional("DATABASE_PASSWORD"),
                connect_retries: lookup("DATABASE_CONNECT_RETRIES")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
                retry_initial_ms: lookup("DATABASE_RETRY_INITIAL_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1000),
                retry_max_ms: lookup("DATABASE_RETRY_MAX_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10000),
            },
            advisor: AdvisorConfig {
                api_url: string("ADVISOR_API_URL", "https://api.openai.com/v1"),
                api_key: optional("ADVISOR_API_KEY"),
                model: string("ADVISOR_MODEL", "gpt-4o-mini"),
                timeout_secs: lookup("ADVISOR_TIMEOUT_SECS").and_then(|v| v.parse().ok()),
            },
            seed_demo_data: lookup("SEED_DEMO_DATA")
                .map(|v| parse_bool(&v))
                .unwrap_or(true),
        }
    }

    /// 启动前校验
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.http_port == 0 {
            return Err(ServerError::Config("HTTP_PORT must not be 0".into()));
        }
        if self.database.connect_retries == 0 {
            return Err(ServerError::Config(
                "DATABASE_CONNECT_RETRIES must be at least 1".into(),
            ));
        }
        if self.database.retry_initial_ms > self.database.retry_max_ms {
            return Err(ServerError::Config(
                "DATABASE_RETRY_INITIAL_MS must not exceed DATABASE_RETRY_MAX_MS".into(),
            ));
        }
        let url = &self.database.url;
        if !["rocksdb://", "mem://", "ws://", "wss://"]
            .iter()
            .any(|scheme| url.starts_with(scheme))
        {
            return Err(ServerError::Config(format!(
                "DATABASE_URL has an unsupported scheme: {url}"
            )));
        }
        if !(self.advisor.api_url.starts_with("http://")
            || self.advisor.api_url.starts_with("https://"))
        {
            return Err(ServerError::Config(format!(
                "ADVISOR_API_URL must be an http(s) URL: {}",
                self.advisor.api_url
            )));
        }
        if self.database.username.is_some() != self.database.password.is_some() {
            return Err(ServerError::Config(
                "DATABASE_USERNAME and DATABASE_PASSWORD must be set together".into(),
            ));
        }
        Ok(())
    }

    pub fn store_settings(&self) -> StoreSettings {
        StoreSettings {
            url: self.database.url.clone(),
            namespace: self.database.namespace.clone(),
            database: self.database.name.clone(),
            username: self.database.username.clone(),
            password: self.database.password.clone(),
            backoff: Backoff {
                max_attempts: self.database.connect_retries,
                initial: Duration::from_millis(self.database.retry_initial_ms),
                multiplier: RETRY_MULTIPLIER,
                max_delay: Duration::from_millis(self.database.retry_max_ms),
            },
        }
    }

    pub fn advisor_settings(&self) -> AdvisorSettings {
        AdvisorSettings {
            api_url: self.advisor.api_url.clone(),
            api_key: self.advisor.api_key.clone(),
            model: self.advisor.model.clone(),
            timeout: self.advisor.timeout_secs.map(Duration::from_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]);
        assert_eq!(config.http_host, "0.0.0.0");
        assert_eq!(config.http_port, 8000);
        assert_eq!(config.database.url, "rocksdb://data/scheduling");
        assert_eq!(config.database.connect_retries, 30);
        assert!(config.advisor.api_key.is_none());
        assert!(config.advisor.timeout_secs.is_none());
        assert!(config.seed_demo_data);
        assert!(!config.log_json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_store_settings_backoff() {
        let config = config_with(&[
            ("DATABASE_CONNECT_RETRIES", "5"),
            ("DATABASE_RETRY_INITIAL_MS", "200"),
            ("DATABASE_RETRY_MAX_MS", "800"),
        ]);
        let settings = config.store_settings();
        assert_eq!(settings.backoff.max_attempts, 5);
        assert_eq!(settings.backoff.initial, Duration::from_millis(200));
        assert_eq!(settings.backoff.max_delay, Duration::from_millis(800));
        assert_eq!(settings.backoff.multiplier, 1.5);
    }

    #[test]
    fn test_overrides_and_flags() {
        let config = config_with(&[
            ("HTTP_PORT", "9001"),
            ("LOG_LEVEL", "DEBUG"),
            ("SEED_DEMO_DATA", "false"),
            ("ADVISOR_API_KEY", "sk-test"),
            ("ADVISOR_TIMEOUT_SECS", "30"),
        ]);
        assert_eq!(config.http_port, 9001);
        assert_eq!(config.log_level, "debug");
        assert!(!config.seed_demo_data);
        assert_eq!(
            config.advisor_settings().timeout,
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn test_invalid_port_falls_back_then_zero_rejected() {
        assert_eq!(config_with(&[("HTTP_PORT", "http")]).http_port, 8000);
        assert!(config_with(&[("HTTP_PORT", "0")]).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(config_with(&[("DATABASE_URL", "postgres://x")]).validate().is_err());
        assert!(config_with(&[("DATABASE_CONNECT_RETRIES", "0")]).validate().is_err());
        assert!(config_with(&[("ADVISOR_API_URL", "api.openai.com")]).validate().is_err());
        assert!(config_with(&[("DATABASE_USERNAME", "root")]).validate().is_err());
        assert!(config_with(&[("DATABASE_URL", "mem://")]).validate().is_ok());
    }
}
