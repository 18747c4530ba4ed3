//! File-backed `tracing` setup. The terminal belongs to the UI, so nothing is
//! ever written to stdout or stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("could not determine log file location")]
    NoLogDir,

    #[error("could not open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid log filter {directive:?}: {message}")]
    Filter { directive: String, message: String },

    #[error("{0}")]
    Init(String),
}

/// `<data_dir>/logsheet/logsheet.log`.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("logsheet").join("logsheet.log"))
}

/// Builds the filter: `RUST_LOG` when set, otherwise `level`.
pub fn filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|e| LoggingError::Filter {
        directive: level.to_string(),
        message: e.to_string(),
    })
}

/// Installs the global subscriber, appending to the configured log file.
///
/// Returns the path being written to.
pub fn init(config: &LoggingConfig) -> Result<PathBuf, LoggingError> {
    let path = config
        .path
        .clone()
        .or_else(default_log_path)
        .ok_or(LoggingError::NoLogDir)?;

    let open = || -> std::io::Result<fs::File> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(&path)
    };
    let file = open().map_err(|source| LoggingError::Open {
        path: path.clone(),
        source,
    })?;

    fmt()
        .with_env_filter(filter(&config.level)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_under_logsheet_dir() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("logsheet/logsheet.log"));
        }
    }

    #[test]
    fn invalid_level_rejected() {
        // Only meaningful when RUST_LOG does not take precedence.
        if std::env::var_os("RUST_LOG").is_none() {
            let err = filter("logsheet=loud").unwrap_err();
            assert!(matches!(err, LoggingError::Filter { .. }));
        }
    }

    #[test]
    fn valid_level_accepted() {
        assert!(filter("debug").is_ok());
        assert!(filter("logsheet=trace,reqwest=warn").is_ok());
    }

    #[test]
    fn unopenable_file_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        let config = LoggingConfig {
            path: Some(blocker.join("app.log")),
            level: "info".into(),
        };
        assert!(matches!(init(&config), Err(LoggingError::Open { .. })));
    }
}
