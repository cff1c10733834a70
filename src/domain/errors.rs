//! Domain error types
//!
//! This module defines the error hierarchy for sensorhub.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main sensorhub error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum SensorHubError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Store gateway errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// A scheduled task could not be joined (panicked or was aborted)
    #[error("Task error: {0}")]
    Task(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Store gateway errors
///
/// Errors that occur when talking to the document store.
/// These errors don't expose the backend driver's types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Failed to establish the connection pool
    #[error("Failed to connect to store: {0}")]
    Connection(String),

    /// Liveness check failed
    #[error("Store unreachable: {0}")]
    Unreachable(String),

    /// Failed to persist a document
    #[error("Failed to write document: {0}")]
    Write(String),

    /// Failed to count or fetch documents
    #[error("Failed to query documents: {0}")]
    Query(String),

    /// Failed to release the connection pool
    #[error("Failed to disconnect from store: {0}")]
    Disconnect(String),
}

impl StoreError {
    /// Whether this error aborts a run when it happens before scheduling
    pub fn is_fatal_at_setup(&self) -> bool {
        matches!(
            self,
            StoreError::Connection(_) | StoreError::Unreachable(_) | StoreError::Write(_)
        )
    }

    /// Short machine-friendly name used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Connection(_) => "connection",
            StoreError::Unreachable(_) => "unreachable",
            StoreError::Write(_) => "write",
            StoreError::Query(_) => "query",
            StoreError::Disconnect(_) => "disconnect",
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for SensorHubError {
    fn from(err: std::io::Error) -> Self {
        SensorHubError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for SensorHubError {
    fn from(err: serde_json::Error) -> Self {
        SensorHubError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for SensorHubError {
    fn from(err: toml::de::Error) -> Self {
        SensorHubError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensorhub_error_display() {
        let err = SensorHubError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_store_error_conversion() {
        let store_err = StoreError::Unreachable("ping timed out".to_string());
        let err: SensorHubError = store_err.into();
        assert!(matches!(
            err,
            SensorHubError::Store(StoreError::Unreachable(_))
        ));
        assert_eq!(
            err.to_string(),
            "Store error: Store unreachable: ping timed out"
        );
    }

    #[test]
    fn test_store_error_setup_fatality() {
        assert!(StoreError::Connection("x".into()).is_fatal_at_setup());
        assert!(StoreError::Unreachable("x".into()).is_fatal_at_setup());
        assert!(StoreError::Write("x".into()).is_fatal_at_setup());
        assert!(!StoreError::Query("x".into()).is_fatal_at_setup());
        assert!(!StoreError::Disconnect("x".into()).is_fatal_at_setup());
    }

    #[test]
    fn test_store_error_kind() {
        assert_eq!(StoreError::Query("x".into()).kind(), "query");
        assert_eq!(StoreError::Disconnect("x".into()).kind(), "disconnect");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: SensorHubError = io_err.into();
        assert!(matches!(err, SensorHubError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: SensorHubError = json_err.into();
        assert!(matches!(err, SensorHubError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: SensorHubError = toml_err.into();
        assert!(matches!(err, SensorHubError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }
}
