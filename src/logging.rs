use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Installs a subscriber writing to a daily rolling file under
/// `config.directory`. Console output stays on stdout via `println!`.
///
/// The returned guard must be held until exit so buffered lines are flushed.
pub fn init(config: &LoggingConfig) -> anyhow::Result<WorkerGuard> {
    let log_dir: &Path = &config.directory;
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::RollingFileAppender::new(
        tracing_appender::rolling::Rotation::DAILY,
        log_dir,
        "tflite-export",
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_lowercase()));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        // Disable ANSI colors for cleaner log files
        .with_ansi(false)
        .with_line_number(true)
        .with_file(true)
        .with_target(false)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))?;

    Ok(guard)
}
