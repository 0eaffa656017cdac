//! Logging Infrastructure
//!
//! `RUST_LOG` takes precedence over the configured level.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger on stderr
pub fn init_logger(log_level: &str) {
    init_logger_with_file(log_level, None::<&Path>);
}

/// Initialize the logger, writing to a daily rolling file when `log_dir` exists
///
/// Later calls are no-ops once a global subscriber is installed.
pub fn init_logger_with_file(log_level: &str, log_dir: Option<impl AsRef<Path>>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{log_level},hyper=warn,reqwest=warn")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let dir = dir.as_ref();
        if dir.is_dir() {
            let file_appender = tracing_appender::rolling::daily(dir, "stock-client.log");
            let _ = builder.with_ansi(false).with_writer(file_appender).try_init();
            return;
        }
    }

    let _ = builder.with_writer(std::io::stderr).try_init();
}
