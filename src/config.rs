//! Runtime configuration
//!
//! Built-in defaults, optionally overlaid by a JSON file, then by CLI flags.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Base URLs of the three prediction backends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoints {
    /// Quantum forecaster (`POST /forecast`)
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    /// Extreme weather predictor (`POST /predict`)
    #[serde(default = "default_extreme_url")]
    pub extreme_url: String,

    /// Visualization generator (`POST /get_weather_visualization`)
    #[serde(default = "default_visualization_url")]
    pub visualization_url: String,
}

fn default_forecast_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_extreme_url() -> String {
    "http://localhost:5003".to_string()
}

fn default_visualization_url() -> String {
    "http://127.0.0.1:5001".to_string()
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            forecast_url: default_forecast_url(),
            extreme_url: default_extreme_url(),
            visualization_url: default_visualization_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// EnvFilter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file; the terminal belongs to the UI so nothing goes to stdout
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "quantaweather=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn file_path(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(default_log_file)
    }
}

fn default_log_file() -> PathBuf {
    dirs_next::data_local_dir()
        .map(|dir| dir.join("quantaweather"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quantaweather.log")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub endpoints: Endpoints,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Flag values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub forecast_url: Option<String>,
    pub extreme_url: Option<String>,
    pub visualization_url: Option<String>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl AppConfig {
    pub fn from_json(path: &Path, json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if given, otherwise start from defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(path, &json)?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(url) = overrides.forecast_url {
            self.endpoints.forecast_url = url;
        }
        if let Some(url) = overrides.extreme_url {
            self.endpoints.extreme_url = url;
        }
        if let Some(url) = overrides.visualization_url {
            self.endpoints.visualization_url = url;
        }
        if let Some(file) = overrides.log_file {
            self.logging.file = Some(file);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.endpoints.forecast_url, "http://127.0.0.1:5000");
        assert_eq!(config.endpoints.extreme_url, "http://localhost:5003");
        assert_eq!(config.endpoints.visualization_url, "http://127.0.0.1:5001");
        assert_eq!(config.logging.level, "quantaweather=info");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let json = r#"{ "endpoints": { "extreme_url": "http://10.0.0.2:5003" } }"#;
        let config = AppConfig::from_json(Path::new("cfg.json"), json).unwrap();

        assert_eq!(config.endpoints.extreme_url, "http://10.0.0.2:5003");
        assert_eq!(config.endpoints.forecast_url, "http://127.0.0.1:5000");
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = AppConfig::from_json(Path::new("broken.json"), "{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = AppConfig::load(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_overrides_win() {
        let config = AppConfig::default().apply(Overrides {
            forecast_url: Some("http://forecast.test".into()),
            log_level: Some("debug".into()),
            ..Default::default()
        });

        assert_eq!(config.endpoints.forecast_url, "http://forecast.test");
        assert_eq!(config.endpoints.extreme_url, "http://localhost:5003");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_explicit_log_file() {
        let logging = LoggingConfig {
            file: Some(PathBuf::from("/tmp/qw.log")),
            ..Default::default()
        };
        assert_eq!(logging.file_path(), PathBuf::from("/tmp/qw.log"));
    }
}
