//! Startup and service-layer errors.
//!
//! Everything that can fail before the router starts serving requests:
//! bad configuration, an unreachable database, unreadable session keys.
//! Handler-time failures use [`crate::handler::Error`] instead.

use thiserror::Error;

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Source type carried by service errors.
type Source = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while building or running the service state.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A configuration value failed validation or a referenced file is
    /// missing.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Source>,
    },

    /// The database client could not be built or migrations failed.
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Source,
    },

    /// Session key generation, loading or validation failed.
    #[error("Authentication error: {message}")]
    Auth {
        message: String,
        #[source]
        source: Source,
    },

    /// A key file could not be read from disk.
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        #[source]
        source: Source,
    },
}

impl ServiceError {
    /// Builds a configuration error with no underlying cause.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Builds a configuration error wrapping its cause.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Builds a database error wrapping its cause.
    pub fn database_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Database {
            message: message.into(),
            source: Box::new(source),
        }
    }

    /// Builds an authentication error wrapping its cause.
    pub fn auth_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Auth {
            message: message.into(),
            source: Box::new(source),
        }
    }

    /// Builds a file system error wrapping its cause.
    pub fn file_system_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn message_appears_in_display() {
        let error = ServiceError::config("postgres URL is empty");
        assert!(error.to_string().contains("postgres URL is empty"));
        assert!(error.source().is_none());
    }

    #[test]
    fn wrapped_cause_is_reachable_through_source() {
        let cause = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let error = ServiceError::file_system_with_source("failed to read decoding key file", cause);

        assert!(error.to_string().starts_with("File system error"));
        assert_eq!(error.source().unwrap().to_string(), "no such file");
    }
}
