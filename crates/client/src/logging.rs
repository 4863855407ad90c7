//! File logging driven by `BehaviorFlags::log_path`.
//!
//! Responsibilities:
//! - Install a global subscriber writing to a daily rolling file.
//! - Keep the writer non-blocking and return the guard that flushes it.
//!
//! Does NOT handle:
//! - Stdout/stderr output; callers without a log path get no subscriber.
//!
//! Invariants / Assumptions:
//! - No log path means no file logging and no subscriber is installed.
//! - The returned guard must be held for as long as logs should be flushed.
//! - Filtering follows `RUST_LOG`, falling back to `info`.

use std::path::Path;

use openapi_config::ValidatedParams;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{ClientError, Result};

/// File name prefix inside the log directory; the appender adds the date.
pub const LOG_FILE_NAME: &str = "openapi.log";

const DEFAULT_FILTER: &str = "info";

/// Initialize file logging if `params` carries a log path.
///
/// # Errors
/// `Io` if the directory cannot be created, `Logging` if a global
/// subscriber is already installed.
pub fn init_file_logging(params: &ValidatedParams) -> Result<Option<WorkerGuard>> {
    match params.flags().log_path() {
        Some(dir) => init_in_dir(dir).map(Some),
        None => Ok(None),
    }
}

fn init_in_dir(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .try_init()
        .map_err(|e| ClientError::Logging(e.to_string()))?;

    tracing::info!(dir = %dir.display(), "file logging enabled");
    Ok(guard)
}
