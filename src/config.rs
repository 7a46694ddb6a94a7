//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Backend used by production builds
pub const PRODUCTION_API_URL: &str = "https://saas-notes-backend.vercel.app/api";

/// Backend used during local development
pub const DEVELOPMENT_API_URL: &str = "http://localhost:3000/api";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Deployment environment selecting the default API base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Development,
}

impl std::str::FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "development" | "dev" => Ok(Environment::Development),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }
}

/// API client configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub environment: Environment,

    /// Explicit base URL; wins over the environment default
    #[serde(default)]
    pub base_url: Option<String>,
}

impl ApiConfig {
    /// Base URL without a trailing slash
    pub fn resolved_base_url(&self) -> String {
        let url = match &self.base_url {
            Some(url) => url.as_str(),
            None => match self.environment {
                Environment::Production => PRODUCTION_API_URL,
                Environment::Development => DEVELOPMENT_API_URL,
            },
        };
        url.trim_end_matches('/').to_string()
    }
}

/// Durable session storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_file")]
    pub file: String,
}

fn default_session_file() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("saas-notes").join("session.json").to_string_lossy().to_string())
        .unwrap_or_else(|| "./saas_notes_session.json".to_string())
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: default_session_file(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("saas-notes").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply command-line overrides
    ///
    /// Precedence: `api_url`, then `environment`, then the loaded config.
    /// An explicit environment selects that environment's URL, replacing a
    /// `base_url` from the config file or `SAAS_NOTES_API_URL`.
    pub fn apply_cli_overrides(&mut self, environment: Option<Environment>, api_url: Option<String>) {
        if let Some(environment) = environment {
            if let Some(url) = self.api.base_url.take() {
                tracing::info!("Ignoring configured base URL {} for {:?}", url, environment);
            }
            self.api.environment = environment;
        }
        if let Some(url) = api_url {
            self.api.base_url = Some(url);
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(env) = std::env::var("SAAS_NOTES_ENV") {
            self.api.environment = env.parse()?;
        }
        if let Ok(url) = std::env::var("SAAS_NOTES_API_URL") {
            self.api.base_url = Some(url);
        }

        if let Ok(file) = std::env::var("SAAS_NOTES_SESSION_FILE") {
            self.session.file = file;
        }

        if let Ok(level) = std::env::var("SAAS_NOTES_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SAAS_NOTES_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Unknown environment '{0}' (expected production or development)")]
    InvalidEnvironment(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# SaaS Notes Configuration
#
# Environment variables override these settings:
# - SAAS_NOTES_ENV
# - SAAS_NOTES_API_URL
# - SAAS_NOTES_SESSION_FILE
# - SAAS_NOTES_LOG_LEVEL
# - SAAS_NOTES_LOG_FORMAT

[api]
# Which backend to talk to: production or development
environment = "production"

# Explicit API base URL (overrides the environment default)
# base_url = "http://localhost:3000/api"

[session]
# File holding the persisted token and user
# file = "~/.local/share/saas-notes/session.json"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_base_urls() {
        let mut api = ApiConfig::default();
        assert_eq!(api.resolved_base_url(), PRODUCTION_API_URL);

        api.environment = Environment::Development;
        assert_eq!(api.resolved_base_url(), DEVELOPMENT_API_URL);

        api.base_url = Some("http://127.0.0.1:9000/api/".to_string());
        assert_eq!(api.resolved_base_url(), "http://127.0.0.1:9000/api");
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!(
            "Production".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.environment, Environment::Production);
        assert!(config.api.base_url.is_none());
        assert_eq!(config.logging.level, "warn");
        assert!(!config.session.file.is_empty());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
            [api]
            environment = "development"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.resolved_base_url(), DEVELOPMENT_API_URL);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_cli_overrides_precedence() {
        let configured = || {
            Config::parse(
                r#"
                [api]
                base_url = "http://notes.internal/api"
                "#,
            )
            .unwrap()
        };

        let mut config = configured();
        config.apply_cli_overrides(None, None);
        assert_eq!(config.api.resolved_base_url(), "http://notes.internal/api");

        let mut config = configured();
        config.apply_cli_overrides(Some(Environment::Development), None);
        assert_eq!(config.api.resolved_base_url(), DEVELOPMENT_API_URL);

        let mut config = configured();
        config.apply_cli_overrides(
            Some(Environment::Development),
            Some("http://127.0.0.1:9000/api".to_string()),
        );
        assert_eq!(config.api.environment, Environment::Development);
        assert_eq!(config.api.resolved_base_url(), "http://127.0.0.1:9000/api");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::parse("[api\nenvironment = 1"),
            Err(ConfigError::Parse { .. })
        ));
    }
}
