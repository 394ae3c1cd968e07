//! Log backend for the binary.
//!
//! Call sites use the `log` macros; `tracing-subscriber` bridges them and
//! writes every line to stderr and, when configured, to a log file managed by
//! `tracing-appender` (append mode, optional rotation).

use crate::config::{LogRotation, LoggingConfig};
use chrono::Local;
use std::path::Path;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::{self, format::Writer, time::FormatTime};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Registry;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("logger already installed: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),

    #[error("log file path {0:?} has no file name")]
    InvalidLogFile(String),

    #[error("cannot open log file: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),
}

/// Keeps the background file writer alive; logs are flushed when dropped
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Local wall-clock timestamps with milliseconds
struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S,%3f"))
    }
}

/// Install the global subscriber described by `config`.
///
/// A log file that cannot be opened is reported and skipped; console output
/// keeps working.
pub fn init(config: &LoggingConfig) -> Result<LoggingGuard, LoggingError> {
    let (appender, open_error) = match &config.log_file {
        Some(path) => match file_appender(path, config.rotation) {
            Ok(appender) => (Some(appender), None),
            Err(e) => (None, Some(e)),
        },
        None => (None, None),
    };

    let (file_writer, file_guard) = match appender {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(LocalTimer);
    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_writer(writer)
            .with_timer(LocalTimer)
            .with_ansi(false)
    });

    Registry::default()
        .with(level_filter(config.level))
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    if let Some(e) = open_error {
        ::log::warn!("Logging to stderr only: {}", e);
    }
    Ok(LoggingGuard { _file: file_guard })
}

/// Appender for `path`, appending to an existing file
fn file_appender(path: &Path, rotation: LogRotation) -> Result<RollingFileAppender, LoggingError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| LoggingError::InvalidLogFile(path.display().to_string()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let rotation = match rotation {
        LogRotation::Never => Rotation::NEVER,
        LogRotation::Hourly => Rotation::HOURLY,
        LogRotation::Daily => Rotation::DAILY,
    };

    Ok(RollingFileAppender::builder()
        .rotation(rotation)
        .filename_prefix(file_name)
        .build(dir)?)
}

fn level_filter(level: log::LevelFilter) -> LevelFilter {
    match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    }
}
