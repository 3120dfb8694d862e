//! Logging setup
//!
//! Console output by default; a daily rolling file under `log_dir` when one
//! is given and can be created.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger
///
/// `RUST_LOG` wins over `log_level`. Calling this twice is a no-op.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("print_bridge={level},tower_http={level}")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let appender = log_dir.and_then(|dir| {
        let path = Path::new(dir);
        match std::fs::create_dir_all(path) {
            Ok(()) => Some(tracing_appender::rolling::daily(path, "print-bridge")),
            Err(e) => {
                eprintln!("log directory {dir} unusable, logging to console: {e}");
                None
            }
        }
    });

    let _ = match (appender, json) {
        (Some(file), true) => builder.json().with_writer(file).try_init(),
        (Some(file), false) => builder.with_ansi(false).with_writer(file).try_init(),
        (None, true) => builder.json().try_init(),
        (None, false) => builder.try_init(),
    };
}
