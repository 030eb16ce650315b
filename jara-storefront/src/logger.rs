//! Logging Infrastructure
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to the
//! storefront crates only.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger with the default filter
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with optional daily rolling file output
///
/// Falls back to stderr when `log_dir` does not exist. Safe to call more
/// than once; later calls are ignored.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level.unwrap_or("info"))));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.is_dir()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "jara-storefront");
            let _ = subscriber.with_ansi(false).with_writer(file_appender).try_init();
            return;
        }
        eprintln!("Log directory {} does not exist, logging to stderr", dir);
    }

    let _ = subscriber.try_init();
}

fn default_directives(level: &str) -> String {
    format!("jara_storefront={level},jara_client={level}")
}
