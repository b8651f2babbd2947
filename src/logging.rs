//! Tracing setup. Console output goes to stderr so the rendered views on
//! stdout stay clean; a daily file is added when `LOG_DIR` is set.

use std::{env, sync::OnceLock};

use tracing_appender::{
    non_blocking,
    non_blocking::{NonBlocking, WorkerGuard},
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter,
    fmt::{fmt, time::ChronoLocal, writer::MakeWriterExt},
};

use crate::error::AppError;

const LOG_FILE_PREFIX: &str = "matchlens.log";
const DEFAULT_FILTER: &str = "info";

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Where logs go, read from `LOG_DIR` and `LOG_MAX_FILES`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    pub dir: Option<String>,
    /// Rotated files kept on disk; unlimited when unset.
    pub max_files: Option<usize>,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            dir: lookup("LOG_DIR").filter(|d| !d.trim().is_empty()),
            max_files: lookup("LOG_MAX_FILES")
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|n| *n > 0),
        }
    }

    fn file_writer(&self, dir: &str) -> Result<NonBlocking, AppError> {
        let mut appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(LOG_FILE_PREFIX);
        if let Some(n) = self.max_files {
            appender = appender.max_log_files(n);
        }

        let appender = appender
            .build(dir)
            .map_err(|e| AppError::Logging(format!("cannot log to {dir}: {e}")))?;
        let (writer, guard) = non_blocking(appender);

        FILE_GUARD
            .set(guard)
            .map_err(|_| AppError::Logging("logger already initialized".into()))?;
        Ok(writer)
    }
}

pub fn init() -> Result<(), AppError> {
    init_with(&LogSettings::from_env())
}

pub fn init_with(settings: &LogSettings) -> Result<(), AppError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let subscriber = fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::new("%H:%M:%S%.3f".to_string()))
        .with_target(false);

    let installed = match &settings.dir {
        Some(dir) => {
            let file = settings.file_writer(dir)?;
            subscriber
                .with_writer(std::io::stderr.and(file))
                .with_ansi(false)
                .try_init()
        }
        None => subscriber.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|e| AppError::Logging(e.to_string()))?;

    tracing::debug!(?settings, "logger initialized");
    Ok(())
}
