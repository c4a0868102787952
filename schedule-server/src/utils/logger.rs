//! Logging Infrastructure
//!
//! Console logging by default; daily rolling files when a log directory exists.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Per-crate directives used when `RUST_LOG` is unset
///
/// `http_access` is the access-log target of the request middleware.
fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!(
        "schedule_server={level},shared={level},http_access={level},\
         tower_http={level},surrealdb=warn"
    ))
}

/// Initialize the logger with optional JSON format and file output
///
/// `RUST_LOG` takes precedence over `log_level` when set.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let file_appender = log_dir
        .map(Path::new)
        .filter(|path| path.is_dir())
        .map(|path| tracing_appender::rolling::daily(path, "schedule-server"));

    match (file_appender, json) {
        (Some(appender), true) => builder.json().with_writer(appender).init(),
        (Some(appender), false) => builder.with_ansi(false).with_writer(appender).init(),
        (None, true) => builder.json().init(),
        (None, false) => builder.init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_default_filter_keeps_access_log() {
        let subscriber = tracing_subscriber::registry().with(default_filter("info"));
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::event_enabled!(target: "http_access", Level::INFO));
            assert!(tracing::event_enabled!(target: "schedule_server::db", Level::INFO));
            assert!(!tracing::event_enabled!(target: "http_access", Level::DEBUG));
            assert!(!tracing::event_enabled!(target: "surrealdb::core", Level::INFO));
        });
    }

    #[test]
    fn test_default_filter_follows_level() {
        let subscriber = tracing_subscriber::registry().with(default_filter("debug"));
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::event_enabled!(target: "http_access", Level::DEBUG));
            assert!(tracing::event_enabled!(target: "shared", Level::DEBUG));
        });
    }
}
