//! Logging Infrastructure
//!
//! Level resolution order: explicit override, then `RUST_LOG`, then
//! "info". Output goes to stderr, or to a daily-rolling file when a log
//! directory is configured and exists.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger with defaults
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with an optional level override and file output
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_dir.map(Path::new).filter(|p| p.exists()) {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "report-server");
            builder.with_writer(file_appender).init();
        }
        None => builder.init(),
    }
}
