//! Logging for the inventory CLI.
//!
//! Dual output: colored stderr (warnings only unless `--verbose`) and a plain
//! log file. Stdout is left to command output.

use crate::error::InventoryError;

use std::io::stderr;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339;
use log::{LevelFilter, info, warn};

/// Thread-safe initialization guard.
static INIT_LOGGER_ONCE: Once = Once::new();

/// Tracks if logger initialization was already attempted.
static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

pub const LOG_FILE_NAME: &str = "inventory.log";

const LOGGER_INITIALIZED_MESSAGE_PREFIX: &str = "Logger initialized with level: ";
const LOGGER_ALREADY_INITIALIZED_MESSAGE: &str = "Logger already initialized";

#[cfg(debug_assertions)]
const LOG_LEVEL: LevelFilter = LevelFilter::Debug;

#[cfg(not(debug_assertions))]
const LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Stderr stays quiet so command output is readable.
const QUIET_STDERR_LEVEL: LevelFilter = LevelFilter::Warn;

/// Install the global logger. Safe to call more than once; later calls log a
/// warning and return Ok.
///
/// # Errors
///
/// Returns an error if the log file cannot be created or another logger is
/// already installed.
pub fn initialize(log_dir: &Path, verbose: bool) -> Result<(), InventoryError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("{LOGGER_ALREADY_INITIALIZED_MESSAGE}");
        return Ok(());
    }

    let mut result = Ok(());

    INIT_LOGGER_ONCE.call_once(|| {
        result = build_dispatch(log_dir, verbose).and_then(|dispatch| {
            dispatch
                .apply()
                .map_err(|e| InventoryError::inventory(format!("Failed to initialize logger: {e}")))
        });
        if result.is_ok() {
            info!("{LOGGER_INITIALIZED_MESSAGE_PREFIX}{LOG_LEVEL:?}");
        }
    });

    result
}

/// Stderr + file dispatch, not yet installed.
pub(crate) fn build_dispatch(log_dir: &Path, verbose: bool) -> Result<Dispatch, InventoryError> {
    let log_file_path = log_dir.join(LOG_FILE_NAME);
    let stderr_level = if verbose { LOG_LEVEL } else { QUIET_STDERR_LEVEL };

    let color_configuration = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    let stderr_dispatch = Dispatch::new()
        .level(stderr_level)
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message}",
                date = format_rfc3339(SystemTime::now()),
                level = color_configuration.color(record.level()),
                message = message,
            ))
        })
        .chain(stderr());

    let log_file = fern::log_file(&log_file_path).map_err(|e| {
        InventoryError::inventory(format!(
            "Failed to create log file {}: {e}",
            log_file_path.display()
        ))
    })?;

    let file_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = format_rfc3339(SystemTime::now()),
                level = record.level(),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0)
            ))
        })
        .chain(log_file);

    Ok(Dispatch::new()
        .level(LOG_LEVEL)
        // transport internals
        .level_for("hyper_util", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Info)
        .chain(stderr_dispatch)
        .chain(file_dispatch))
}
