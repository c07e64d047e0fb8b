//! Logging bootstrap for the source library.
//!
//! # Responsibility
//! - Start rolling file logs for one process, optionally from the CLI.
//! - Mirror warnings (skipped sources, bad config) to stderr.
//!
//! # Invariants
//! - Events are `key=value` lines; summary text never reaches the log.
//! - A second init with the same settings is a no-op; different settings are rejected.

use flexi_logger::{
    detailed_format, Cleanup, Criterion, Duplicate, FileSpec, FlexiLoggerError, Logger,
    LoggerHandle, Naming, WriteMode,
};
use log::info;
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "sourcelib";
const ROTATE_AT_BYTES: u64 = 5 * 1024 * 1024;
const KEEP_LOG_FILES: usize = 3;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    status: LoggingStatus,
    _handle: LoggerHandle,
}

/// Settings the process logger was started with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingStatus {
    pub level: &'static str,
    pub log_dir: PathBuf,
}

/// Logging bootstrap failure.
#[derive(Debug)]
pub enum LoggingError {
    UnsupportedLevel(String),
    RelativeDir(PathBuf),
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    Backend(FlexiLoggerError),
    /// Logger already runs with other settings.
    AlreadyActive(LoggingStatus),
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::RelativeDir(path) => {
                write!(f, "log directory must be absolute, got `{}`", path.display())
            }
            Self::CreateDir { path, source } => {
                write!(f, "cannot create log directory `{}`: {source}", path.display())
            }
            Self::Backend(err) => write!(f, "cannot start logger: {err}"),
            Self::AlreadyActive(status) => write!(
                f,
                "logging already active at `{}` with level `{}`",
                status.log_dir.display(),
                status.level
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FlexiLoggerError> for LoggingError {
    fn from(value: FlexiLoggerError) -> Self {
        Self::Backend(value)
    }
}

/// Starts file logging at `level` under `log_dir`.
///
/// # Errors
/// - [`LoggingError::UnsupportedLevel`] / [`LoggingError::RelativeDir`] for bad input.
/// - [`LoggingError::AlreadyActive`] when a logger with different settings runs.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), LoggingError> {
    let wanted = LoggingStatus {
        level: normalize_level(level)?,
        log_dir: checked_log_dir(log_dir)?,
    };

    let active = ACTIVE.get_or_try_init(|| start_logger(&wanted))?;
    if active.status != wanted {
        return Err(LoggingError::AlreadyActive(active.status.clone()));
    }
    Ok(())
}

/// Returns the running logger's settings, if any.
pub fn logging_status() -> Option<LoggingStatus> {
    ACTIVE.get().map(|active| active.status.clone())
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(status: &LoggingStatus) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(&status.log_dir).map_err(|source| LoggingError::CreateDir {
        path: status.log_dir.clone(),
        source,
    })?;

    let handle = Logger::try_with_str(status.level)?
        .log_to_file(
            FileSpec::default()
                .directory(status.log_dir.as_path())
                .basename(LOG_FILE_BASENAME)
                .suppress_timestamp(),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_LOG_FILES),
        )
        .duplicate_to_stderr(Duplicate::Warn)
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(detailed_format)
        .start()?;

    info!(
        "event=logging_init module=logging status=ok version={} level={} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        status.level,
        status.log_dir.display()
    );

    Ok(ActiveLogger {
        status: status.clone(),
        _handle: handle,
    })
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        _ => Err(LoggingError::UnsupportedLevel(level.trim().to_string())),
    }
}

fn checked_log_dir(log_dir: &Path) -> Result<PathBuf, LoggingError> {
    if !log_dir.is_absolute() {
        return Err(LoggingError::RelativeDir(log_dir.to_path_buf()));
    }
    Ok(log_dir.to_path_buf())
}
