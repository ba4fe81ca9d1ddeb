use tracing_appender::non_blocking::WorkerGuard;

use crate::config::Config;
use crate::error::Result;

/// Initialize logging to a file in the data directory.
///
/// Stdout carries the host protocol, so nothing is logged there.
/// Keep the returned guard alive for the life of the process.
pub fn init_logger(config: &Config) -> Result<WorkerGuard> {
    let level = config.log_level()?;
    std::fs::create_dir_all(&config.data_dir)?;

    let file_appender = tracing_appender::rolling::never(&config.data_dir, &config.log_file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_max_level(level)
        .init();

    tracing::info!(data_dir = %config.data_dir.display(), "Logger initialized");
    Ok(guard)
}
