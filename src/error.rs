//! Error types for Solace
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::backends::BackendError;

/// Main error type for Solace operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, backend construction, and command handling.
/// Backend dispatch failures have their own tagged type
/// ([`BackendError`]) because the orchestrator's retry loop consumes
/// them explicitly; they convert into this type at the crate boundary.
#[derive(Error, Debug)]
pub enum SolaceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend dispatch errors (connectivity, timeout, status, model load)
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Missing credentials for the hosted backend
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for Solace operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = SolaceError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_missing_credentials_display() {
        let error = SolaceError::MissingCredentials("SOLACE_API_KEY not set".to_string());
        assert_eq!(
            error.to_string(),
            "Missing credentials: SOLACE_API_KEY not set"
        );
    }

    #[test]
    fn test_backend_error_conversion() {
        let backend = BackendError::Connectivity("connection refused".to_string());
        let error: SolaceError = backend.into();
        assert!(matches!(error, SolaceError::Backend(_)));
        assert!(error.to_string().contains("connection refused"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: SolaceError = io_error.into();
        assert!(matches!(error, SolaceError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let error: SolaceError = json_error.into();
        assert!(matches!(error, SolaceError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: SolaceError = yaml_error.into();
        assert!(matches!(error, SolaceError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SolaceError>();
    }
}
