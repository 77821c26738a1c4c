//! Error types and handling for the clothing advisor

use thiserror::Error;

/// Main error type for the clothing advisor
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Weather or geocoding API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The geocoder had no match for the requested city
    #[error("City '{city}' not found")]
    NotFound { city: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl AdvisorError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error for a city
    pub fn not_found<S: Into<String>>(city: S) -> Self {
        Self::NotFound { city: city.into() }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AdvisorError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            AdvisorError::Api { message } => {
                format!("Error fetching weather data: {message}")
            }
            AdvisorError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            AdvisorError::NotFound { city } => format!("City '{city}' not found"),
            AdvisorError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            AdvisorError::General { message } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = AdvisorError::config("missing API key");
        assert!(matches!(config_err, AdvisorError::Config { .. }));

        let api_err = AdvisorError::api("connection failed");
        assert!(matches!(api_err, AdvisorError::Api { .. }));

        let not_found = AdvisorError::not_found("Atlantis");
        assert!(matches!(not_found, AdvisorError::NotFound { .. }));
    }

    #[test]
    fn test_user_messages() {
        let not_found = AdvisorError::not_found("Atlantis");
        assert_eq!(not_found.user_message(), "City 'Atlantis' not found");

        let api_err = AdvisorError::api("HTTP 503");
        assert!(api_err.user_message().contains("HTTP 503"));

        let validation_err = AdvisorError::validation("City name is required");
        assert!(validation_err.user_message().contains("City name is required"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed");
        let err: AdvisorError = io_err.into();
        assert!(matches!(err, AdvisorError::Io { .. }));
    }
}
