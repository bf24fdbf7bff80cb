//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production
//! environments. Filtering follows `RUST_LOG` when set, otherwise the level
//! passed by the caller.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger with defaults (info level, stdout only)
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with optional daily-rolling file output
///
/// When `log_dir` is given the directory is created if missing; if that
/// fails we fall back to stdout rather than refuse to start.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.unwrap_or("info")));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if std::fs::create_dir_all(log_path).is_ok() {
            let file_appender = tracing_appender::rolling::daily(log_path, "cortado-server");
            subscriber.with_writer(file_appender).init();
            return;
        }
        eprintln!("failed to create log directory {dir}, logging to stdout");
    }

    subscriber.init();
}
