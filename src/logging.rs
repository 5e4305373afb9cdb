//! Tracing setup
//!
//! The TUI owns stdout, so log output goes to a daily-rolled file under the
//! log directory. `RUST_LOG` takes precedence over the configured level.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{OnboardPaths, Settings};
use crate::error::{OnboardError, OnboardResult};

/// File name prefix for log files in the log directory
pub const LOG_FILE_PREFIX: &str = "onboard.log";

/// Install the global subscriber; keep the guard alive until exit
pub fn init(paths: &OnboardPaths, settings: &Settings) -> OnboardResult<WorkerGuard> {
    paths.ensure_directories()?;

    let appender = tracing_appender::rolling::daily(paths.log_dir(), LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| OnboardError::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(guard)
}
