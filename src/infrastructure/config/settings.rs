//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for sensitive values like `GEMINI_API_KEY`.
//!
//! # Example
//!
//! ```no_run
//! use biovision::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use super::gemini::GeminiConfig;
use super::logging::LoggingConfig;
use super::storage::StorageConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Every section is optional; an empty file is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Gemini endpoint settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Where user settings are persisted.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Loads the default API key from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails (e.g., a zero timeout)
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.gemini.load_api_key_from_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load configuration from `path`, or defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`], except that a missing file is not an error.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse_toml(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Self::parse_toml(""),
            Err(e) => Err(ConfigError::ReadFile(e).into()),
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.gemini.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "base_url" }.into());
        }
        let url = Url::parse(&self.gemini.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "base_url",
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }
            .into());
        }
        if self.gemini.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: "must be 'pretty' or 'json'".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Render the effective configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::InvalidValue {
                field: "config",
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.logging, LoggingConfig::default());
        assert_eq!(
            config.gemini.base_url,
            crate::adapter::outbound::gemini::DEFAULT_BASE_URL
        );
        assert_eq!(config.gemini.timeout_secs, 120);
        assert_eq!(config.storage.dir, None);
    }

    #[test]
    fn sections_override_defaults() {
        let config = Config::parse_toml(
            r#"
            [logging]
            level = "debug"
            format = "json"

            [gemini]
            base_url = "http://localhost:8080/v1beta/models"
            timeout_secs = 30

            [storage]
            dir = "/var/lib/biovision"
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.gemini.base_url, "http://localhost:8080/v1beta/models");
        assert_eq!(config.gemini.timeout_secs, 30);
        assert_eq!(
            config.storage.dir.as_deref(),
            Some(Path::new("/var/lib/biovision"))
        );
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = Config::parse_toml("[gemini]\ntimeout_secs = 0").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "timeout_secs",
                ..
            })
        ));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = Config::parse_toml("[gemini]\nbase_url = \"ftp://example.com\"").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "base_url",
                ..
            })
        ));
    }

    #[test]
    fn rejects_unparseable_base_url() {
        assert!(Config::parse_toml("[gemini]\nbase_url = \"not a url\"").is_err());
    }

    #[test]
    fn rejects_unknown_log_format() {
        assert!(Config::parse_toml("[logging]\nformat = \"xml\"").is_err());
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = Config::parse_toml("[gemini\nbase_url = 1").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.gemini.timeout_secs, 120);
    }

    #[test]
    fn api_key_is_never_serialized() {
        let mut config = Config::default();
        config.gemini.api_key = Some("secret".into());
        let rendered = config.to_toml().unwrap();
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("timeout_secs = 120"));
    }
}
