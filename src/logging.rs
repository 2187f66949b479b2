//! Logging setup driven by [`CommonSettings`].
//!
//! Logs go to stderr, or to `<target_folder>/<logfile_name>.log` when a log
//! file is requested. With `logfile_date` the file name gets a local
//! timestamp suffix so repeated runs do not overwrite each other.
//! `RUST_LOG` overrides `logging_level` when set.

use std::fs::{File, create_dir_all};
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{Local, NaiveDateTime};
use tracing_subscriber::EnvFilter;

use crate::error::{AppError, EXIT_LOGGING};
use crate::settings::CommonSettings;

const LOGFILE_DATE_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Where the log file for `common` goes, given the current local time.
pub fn logfile_path(common: &CommonSettings, now: NaiveDateTime) -> PathBuf {
    let folder = common
        .target_folder
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let name = if common.logfile_date {
        format!("{}_{}.log", common.logfile_name, now.format(LOGFILE_DATE_FORMAT))
    } else {
        format!("{}.log", common.logfile_name)
    };

    folder.join(name)
}

/// Install the global subscriber. Returns the log file path when logging to a file.
pub fn init(common: &CommonSettings, to_file: bool) -> Result<Option<PathBuf>, AppError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(common.logging_level.as_directive()));

    if !to_file {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| AppError::new(EXIT_LOGGING, format!("Failed to initialise logging: {e}")))?;
        return Ok(None);
    }

    let path = logfile_path(common, Local::now().naive_local());
    if let Some(parent) = path.parent() {
        create_dir_all(parent).map_err(|e| {
            AppError::new(EXIT_LOGGING, format!("Failed to create log folder '{}': {e}", parent.display()))
        })?;
    }
    let file = File::create(&path)
        .map_err(|e| AppError::new(EXIT_LOGGING, format!("Failed to create log file '{}': {e}", path.display())))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| AppError::new(EXIT_LOGGING, format!("Failed to initialise logging: {e}")))?;

    tracing::info!(path = %path.display(), "logging to file");
    Ok(Some(path))
}
