//! Runtime configuration loaded from `config.toml`.
//!
//! Every key is optional. A missing default config file means "use defaults";
//! a missing file passed explicitly with `--config` is an error.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::storage::{DEFAULT_EXPORT_FILE_NAME, StorageError, default_export_dir};

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "LOGSHEET_API_URL";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("could not read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`Config`].
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub places: PlacesConfig,
    pub storage: StorageConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads configuration from `path`, or from [`default_path`](Self::default_path)
    /// when `path` is `None`, then applies the environment override.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.override_api_url(std::env::var(API_URL_ENV).ok());
        Ok(config)
    }

    /// Returns `~/.config/logsheet/config.toml` (or the platform equivalent).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("logsheet").join("config.toml"))
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Replaces `api.base_url` when `url` is a non-empty value.
    pub fn override_api_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
    }
}

/// Backend API location and timeouts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    pub base_url: String,
    pub create_path: String,
    pub export_path: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            create_path: "/log-entry".to_string(),
            export_path: "/log-entry/export".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Full URL of the create-log-entry endpoint.
    pub fn create_url(&self) -> String {
        join_url(&self.base_url, &self.create_path)
    }

    /// Full URL of the export-spreadsheet endpoint.
    pub fn export_url(&self) -> String {
        join_url(&self.base_url, &self.export_path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Form behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Seconds before a success or error message clears itself.
    pub message_timeout_secs: u64,
    /// Seconds between a successful submit and the form refilling from cache.
    pub restore_delay_secs: u64,
    /// Maximum number of places per field, unlimited when unset.
    pub max_tags: Option<usize>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            message_timeout_secs: 5,
            restore_delay_secs: 5,
            max_tags: None,
        }
    }
}

impl UiConfig {
    pub fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.message_timeout_secs)
    }

    pub fn restore_delay(&self) -> Duration {
        Duration::from_secs(self.restore_delay_secs)
    }
}

/// Suggestion lists for the place fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlacesConfig {
    pub from: Vec<String>,
    pub to: Vec<String>,
}

const DEFAULT_PLACES: &[&str] = &[
    "Hyderabad",
    "Medak",
    "Mumbai",
    "Bengaluru",
    "Chennai",
    "Delhi",
];

impl Default for PlacesConfig {
    fn default() -> Self {
        let places: Vec<String> = DEFAULT_PLACES.iter().map(|p| p.to_string()).collect();
        Self {
            from: places.clone(),
            to: places,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Overrides the key-value file location.
    pub path: Option<PathBuf>,
}

/// Where exported spreadsheets are saved.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub dir: Option<PathBuf>,
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: None,
            file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl ExportConfig {
    /// Resolves the full output path, falling back to the download directory.
    pub fn resolve_path(&self) -> Result<PathBuf, StorageError> {
        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => default_export_dir()?,
        };
        Ok(dir.join(&self.file_name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log file location; defaults to the data directory.
    pub path: Option<PathBuf>,
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            path: None,
            level: "info".to_string(),
        }
    }
}
