//! Configuration management for the clothing advisor
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::AdvisorError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Weather and geocoding API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Generative text backend configuration
    #[serde(default)]
    pub generative: GenerativeConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Open-Meteo API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for the geocoding API
    #[serde(default = "default_geocoding_base_url")]
    pub geocoding_base_url: String,
    /// Base URL for the forecast API
    #[serde(default = "default_forecast_base_url")]
    pub forecast_base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_weather_max_retries")]
    pub max_retries: u32,
}

/// OpenAI-compatible backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerativeConfig {
    /// Set to false to always use the rule-based fallback
    #[serde(default = "default_generative_enabled")]
    pub enabled: bool,
    /// API key; `OPENAI_API_KEY` is used when unset
    pub api_key: Option<String>,
    /// Base URL of the chat completions API
    #[serde(default = "default_generative_base_url")]
    pub base_url: String,
    /// Model name
    #[serde(default = "default_generative_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_generative_timeout")]
    pub timeout_seconds: u32,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_server_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// PEM certificate path, enables TLS together with `tls_key`
    pub tls_cert: Option<PathBuf>,
    /// PEM private key path
    pub tls_key: Option<PathBuf>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_forecast_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_weather_max_retries() -> u32 {
    3
}

fn default_generative_enabled() -> bool {
    true
}

fn default_generative_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_generative_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_generative_timeout() -> u32 {
    30
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_base_url: default_geocoding_base_url(),
            forecast_base_url: default_forecast_base_url(),
            timeout_seconds: default_weather_timeout(),
            max_retries: default_weather_max_retries(),
        }
    }
}

impl Default for GenerativeConfig {
    fn default() -> Self {
        Self {
            enabled: default_generative_enabled(),
            api_key: None,
            base_url: default_generative_base_url(),
            model: default_generative_model(),
            timeout_seconds: default_generative_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            tls_cert: None,
            tls_key: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl GenerativeConfig {
    /// API key to use, if the backend is enabled and a key is available
    #[must_use]
    pub fn effective_api_key(&self) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }
}

impl AdvisorConfig {
    /// Load configuration from `config_path`, or the default location when `None`
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // ADVISOR__GENERATIVE__MODEL=... style overrides
        builder = builder.add_source(
            Environment::with_prefix("ADVISOR")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AdvisorConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.resolve_api_key(std::env::var("OPENAI_API_KEY").ok());
        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Fall back to `OPENAI_API_KEY` when no key is configured; blank keys count as unset
    pub fn resolve_api_key(&mut self, env_key: Option<String>) {
        let configured = self.generative.api_key.take().filter(|key| !key.trim().is_empty());
        self.generative.api_key =
            configured.or_else(|| env_key.filter(|key| !key.trim().is_empty()));
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("clothing-advisor").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.geocoding_base_url.is_empty() {
            self.weather.geocoding_base_url = default_geocoding_base_url();
        }
        if self.weather.forecast_base_url.is_empty() {
            self.weather.forecast_base_url = default_forecast_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.generative.base_url.is_empty() {
            self.generative.base_url = default_generative_base_url();
        }
        if self.generative.model.is_empty() {
            self.generative.model = default_generative_model();
        }
        if self.generative.timeout_seconds == 0 {
            self.generative.timeout_seconds = default_generative_timeout();
        }
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Check the generative backend credentials. A suspicious key is only
    /// reported; a rejected key makes the engine fall back to the rules.
    pub fn validate_api_keys(&self) -> Result<()> {
        if !self.generative.enabled {
            return Ok(());
        }
        if let Some(api_key) = &self.generative.api_key {
            if api_key.len() < 8 {
                warn!("Generative API key looks too short; requests will likely fail and fall back to rules");
            }
        }

        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(
                AdvisorError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.weather.max_retries > 10 {
            return Err(AdvisorError::config("Weather API max retries cannot exceed 10").into());
        }

        if self.generative.timeout_seconds > 300 {
            return Err(
                AdvisorError::config("Generative API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.server.tls_cert.is_some() != self.server.tls_key.is_some() {
            return Err(AdvisorError::config(
                "TLS requires both server.tls_cert and server.tls_key",
            )
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AdvisorError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(AdvisorError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let urls = [
            ("weather.geocoding_base_url", &self.weather.geocoding_base_url),
            ("weather.forecast_base_url", &self.weather.forecast_base_url),
            ("generative.base_url", &self.generative.base_url),
        ];
        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AdvisorError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AdvisorConfig::default();
        assert_eq!(config.weather.forecast_base_url, "https://api.open-meteo.com/v1");
        assert_eq!(
            config.weather.geocoding_base_url,
            "https://geocoding-api.open-meteo.com/v1"
        );
        assert_eq!(config.weather.timeout_seconds, 30);
        assert_eq!(config.generative.model, "gpt-4o-mini");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.logging.level, "info");
        assert!(config.generative.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_effective_api_key() {
        let mut config = GenerativeConfig::default();
        assert_eq!(config.effective_api_key(), None);

        config.api_key = Some("sk-test-1234567890".to_string());
        assert_eq!(config.effective_api_key(), Some("sk-test-1234567890"));

        config.enabled = false;
        assert_eq!(config.effective_api_key(), None);
    }

    #[test]
    fn test_short_api_key_does_not_fail_validation() {
        let mut config = AdvisorConfig::default();
        config.generative.api_key = Some("short".to_string());
        assert!(config.validate().is_ok());

        config.generative.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resolve_api_key_ignores_blank_keys() {
        let mut config = AdvisorConfig::default();
        config.resolve_api_key(Some(String::new()));
        assert!(config.generative.api_key.is_none());

        config.generative.api_key = Some("  ".to_string());
        config.resolve_api_key(Some("sk-env-key-123".to_string()));
        assert_eq!(config.generative.api_key.as_deref(), Some("sk-env-key-123"));

        config.resolve_api_key(Some("sk-other-key".to_string()));
        assert_eq!(config.generative.api_key.as_deref(), Some("sk-env-key-123"));
    }

    #[test]
    fn test_load_with_blank_or_short_key_succeeds() {
        for (index, key) in ["", "test"].iter().enumerate() {
            let path = std::env::temp_dir().join(format!(
                "clothing-advisor-key-{}-{index}.toml",
                std::process::id()
            ));
            std::fs::write(
                &path,
                format!("[generative]\nenabled = false\napi_key = \"{key}\"\n"),
            )
            .unwrap();

            let config = AdvisorConfig::load_from_path(Some(path.clone()));
            std::fs::remove_file(&path).unwrap();

            let config = config.unwrap();
            assert_eq!(config.generative.effective_api_key(), None);
        }
    }

    #[test]
    fn test_config_validation_invalid_log_format() {
        let mut config = AdvisorConfig::default();
        config.logging.format = "xml".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log format"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = AdvisorConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_half_configured_tls() {
        let mut config = AdvisorConfig::default();
        config.server.tls_cert = Some(PathBuf::from("cert.pem"));
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("TLS requires"));
    }

    #[test]
    fn test_config_validation_rejects_non_http_url() {
        let mut config = AdvisorConfig::default();
        config.weather.forecast_base_url = "ftp://example.com".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("forecast_base_url"));
    }

    #[test]
    fn test_apply_defaults_fills_empty_values() {
        let mut config = AdvisorConfig::default();
        config.generative.model = String::new();
        config.logging.level = String::new();
        config.apply_defaults();
        assert_eq!(config.generative.model, "gpt-4o-mini");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!(
            "clothing-advisor-config-{}.toml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nport = 9090\n\n[generative]\nmodel = \"gpt-4o\"\napi_key = \"sk-from-file-123\""
        )
        .unwrap();

        let config = AdvisorConfig::load_from_path(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.generative.model, "gpt-4o");
        assert_eq!(config.generative.api_key.as_deref(), Some("sk-from-file-123"));
        assert_eq!(config.weather.max_retries, 3);
    }

    #[test]
    fn test_config_path_generation() {
        let path = AdvisorConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("clothing-advisor"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
