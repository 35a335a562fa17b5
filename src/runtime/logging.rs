//! File-based logging.
//!
//! The TUI owns the terminal, so `tracing` output goes to a daily rolling file
//! under the configured log directory.

use std::path::PathBuf;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

use crate::config::Settings;

const LOG_FILE_PREFIX: &str = "haptos.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("no log directory could be determined")]
    NoDirectory,
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Init(#[from] TryInitError),
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `logging.filter`. The returned guard flushes the
/// writer when dropped and must live until shutdown.
pub fn init(settings: &Settings) -> Result<WorkerGuard, LoggingError> {
    let dir = settings.log_directory().ok_or(LoggingError::NoDirectory)?;
    std::fs::create_dir_all(&dir).map_err(|source| LoggingError::CreateDir {
        path: dir.clone(),
        source,
    })?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.filter));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(dir = %dir.display(), "logging initialized");
    Ok(guard)
}
