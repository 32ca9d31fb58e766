//! Logging setup and configuration

use anyhow::Result;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub struct LoggingGuard {
    pub _guard: tracing_appender::non_blocking::WorkerGuard,
}

pub const LOG_FILE_NAME: &str = "exchange-compat-probe.log";

/// Console plus daily-rolling file logging. Keep the guard alive until
/// exit or buffered file lines are lost.
pub fn setup_logging(log_dir: impl AsRef<Path>) -> Result<LoggingGuard> {
    std::fs::create_dir_all(log_dir.as_ref())?;
    let file_appender = tracing_appender::rolling::daily(log_dir.as_ref(), LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_ansi(true)
                .with_level(true)
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_thread_ids(false)
                .with_level(true)
                .with_ansi(false)
                .compact()
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        )
        .try_init()?;

    Ok(LoggingGuard { _guard: guard })
}
