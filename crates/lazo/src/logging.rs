//! Logging and diagnostics functions.

use lazo_highs::highs_version;
use serde::Serialize;
use std::env;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors raised while installing the global subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    InvalidFilter(String),
    InvalidFormat(String),
    LogFile { path: String, reason: String },
    Init(String),
}

impl LoggingError {
    pub fn code(&self) -> &'static str {
        match self {
            LoggingError::InvalidFilter(_) => "LOG_INVALID_FILTER",
            LoggingError::InvalidFormat(_) => "LOG_INVALID_FORMAT",
            LoggingError::LogFile { .. } => "LOG_FILE",
            LoggingError::Init(_) => "LOG_INIT",
        }
    }
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggingError::InvalidFilter(msg) => {
                write!(f, "[{}] Invalid log filter: {}", self.code(), msg)
            }
            LoggingError::InvalidFormat(format) => write!(
                f,
                "[{}] Invalid LAZO_LOG_FORMAT '{}' (expected 'json' or 'pretty')",
                self.code(),
                format
            ),
            LoggingError::LogFile { path, reason } => {
                write!(f, "[{}] Failed to open log file {}: {}", self.code(), path, reason)
            }
            LoggingError::Init(msg) => {
                write!(f, "[{}] Failed to initialize logging: {}", self.code(), msg)
            }
        }
    }
}

impl std::error::Error for LoggingError {}

fn open_log_file(path: &str) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| LoggingError::LogFile {
            path: path.to_string(),
            reason: err.to_string(),
        })
}

fn map_init_err<E: fmt::Display>(err: E) -> LoggingError {
    LoggingError::Init(err.to_string())
}

/// Build the filter for `level`, falling back to `LAZO_TRACE`, then `off`.
fn build_filter(level: Option<&str>) -> Result<EnvFilter, LoggingError> {
    let level_value = level
        .map(str::to_string)
        .or_else(|| env::var("LAZO_TRACE").ok())
        .unwrap_or_else(|| "off".to_string());

    if level_value.eq_ignore_ascii_case("off") {
        Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()))
    } else {
        EnvFilter::try_new(&level_value).map_err(|err| LoggingError::InvalidFilter(err.to_string()))
    }
}

/// Whether `format` selects JSON output. Only `json` and `pretty` are accepted.
fn use_json(format: &str) -> Result<bool, LoggingError> {
    if format.eq_ignore_ascii_case("json") {
        Ok(true)
    } else if format.eq_ignore_ascii_case("pretty") {
        Ok(false)
    } else {
        Err(LoggingError::InvalidFormat(format.to_string()))
    }
}

/// Enable structured logging for lazo.
///
/// When `level` is `None`, this reads `LAZO_TRACE` if set. If `LAZO_TRACE` is
/// unset, the default level is `off`. `LAZO_LOG_FORMAT` selects `pretty`
/// (default) or `json`, and `LAZO_LOG_FILE` adds an appending file sink.
/// Returns `Ok(true)` when logging is initialized, `Ok(false)` if a
/// subscriber is already configured.
pub fn init_logging(level: Option<&str>) -> Result<bool, LoggingError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let filter = build_filter(level)?;
    let format = env::var("LAZO_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let log_file = env::var("LAZO_LOG_FILE").ok();

    if use_json(&format)? {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .json();
        let base = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer);
        if let Some(path) = log_file {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(open_log_file(&path)?)
                .with_ansi(false)
                .json();
            base.with(file_layer).try_init().map_err(map_init_err)?;
        } else {
            base.try_init().map_err(map_init_err)?;
        }
    } else {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .pretty();
        let base = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer);
        if let Some(path) = log_file {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(open_log_file(&path)?)
                .with_ansi(false)
                .pretty();
            base.with(file_layer).try_init().map_err(map_init_err)?;
        } else {
            base.try_init().map_err(map_init_err)?;
        }
    }

    Ok(true)
}

/// Solver metadata for debugging and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolverInfo {
    pub solver: &'static str,
    pub version: Option<String>,
}

pub fn solver_info() -> SolverInfo {
    SolverInfo {
        solver: "HiGHS",
        version: highs_version(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_level_wins() {
        assert!(build_filter(Some("lazo_core=debug")).is_ok());
        assert!(build_filter(Some("OFF")).is_ok());
    }

    #[test]
    fn bad_filter_is_reported() {
        let err = build_filter(Some("lazo_core=notalevel")).unwrap_err();
        assert_eq!(err.code(), "LOG_INVALID_FILTER");
        assert!(err.to_string().starts_with("[LOG_INVALID_FILTER]"));
    }

    #[test]
    fn formats() {
        assert_eq!(use_json("JSON"), Ok(true));
        assert_eq!(use_json("pretty"), Ok(false));
        assert_eq!(
            use_json("xml"),
            Err(LoggingError::InvalidFormat("xml".to_string()))
        );
    }

    #[test]
    fn second_init_reports_existing_subscriber() {
        let _ = tracing_subscriber::fmt().try_init();
        assert_eq!(init_logging(Some("debug")), Ok(false));
    }

    #[test]
    fn info_names_highs() {
        let info = solver_info();
        assert_eq!(info.solver, "HiGHS");
    }
}
