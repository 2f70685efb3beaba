//! Startup and runtime failures reported by the serve command.

use std::io;

use thiserror::Error;

/// Result type for server startup and shutdown paths.
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Failure surfaced while bringing the HTTP server up or keeping it running.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The resolved configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The listener could not bind its address.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// The accept loop stopped with an IO error.
    #[error("server runtime failure: {0}")]
    Runtime(#[source] io::Error),
}

impl ServerError {
    /// Wraps a configuration validation failure.
    pub fn invalid_config(err: &anyhow::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }

    /// Wraps a bind failure with the address that was attempted.
    pub fn bind_error(address: &str, source: io::Error) -> Self {
        Self::Bind {
            address: address.to_string(),
            source,
        }
    }

    /// Short stable code identifying the failure class, for log filtering.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "config",
            Self::Bind { .. } => "bind",
            Self::Runtime(_) => "runtime",
        }
    }

    /// Whether restarting the process with the same settings could succeed.
    ///
    /// Configuration errors never are. IO failures are recoverable when the
    /// underlying cause is transient, such as a port still held by a
    /// previous instance.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidConfig(_) => false,
            Self::Bind { source, .. } => matches!(
                source.kind(),
                io::ErrorKind::PermissionDenied
                    | io::ErrorKind::AddrInUse
                    | io::ErrorKind::AddrNotAvailable
            ),
            Self::Runtime(err) => matches!(
                err.kind(),
                io::ErrorKind::Interrupted
                    | io::ErrorKind::TimedOut
                    | io::ErrorKind::ConnectionRefused
            ),
        }
    }

    /// Operator-facing hint for resolving the failure, when one applies.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidConfig(_) => {
                Some("Review the server settings and environment variables, then start again")
            }
            Self::Bind { source, .. } => Some(match source.kind() {
                io::ErrorKind::PermissionDenied => {
                    "Binding this port needs elevated privileges; pick a port above 1024"
                }
                io::ErrorKind::AddrInUse => {
                    "Another process holds this port; stop it or choose a different port"
                }
                io::ErrorKind::AddrNotAvailable => {
                    "No interface carries this address; check the configured host"
                }
                _ => "Check the host and port settings and local firewall rules",
            }),
            Self::Runtime(err) => match err.kind() {
                io::ErrorKind::Interrupted => Some("The server was interrupted; restart it"),
                io::ErrorKind::TimedOut => {
                    Some("An IO operation timed out; consider raising timeout settings")
                }
                io::ErrorKind::ConnectionRefused => {
                    Some("A dependent service refused the connection; check that it is up")
                }
                _ => None,
            },
        }
    }

    /// Key-value pairs describing the failure, for structured logging.
    pub fn context(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("error_code", self.error_code().to_string()),
            ("recoverable", self.is_recoverable().to_string()),
        ];

        if let Some(suggestion) = self.suggestion() {
            pairs.push(("suggestion", suggestion.to_string()));
        }

        match self {
            Self::InvalidConfig(reason) => pairs.push(("reason", reason.clone())),
            Self::Bind { address, source } => {
                pairs.push(("address", address.clone()));
                pairs.push(("io_error_kind", format!("{:?}", source.kind())));
            }
            Self::Runtime(err) => {
                pairs.push(("io_error_kind", format!("{:?}", err.kind())));
            }
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_distinguish_failure_classes() {
        let config = ServerError::InvalidConfig("port out of range".to_string());
        let bind = ServerError::bind_error("0.0.0.0:8080", io::Error::other("bind"));
        let runtime = ServerError::Runtime(io::Error::other("accept"));

        let codes = [config.error_code(), bind.error_code(), runtime.error_code()];
        assert_eq!(codes, ["config", "bind", "runtime"]);
    }

    #[test]
    fn busy_port_is_recoverable_with_a_hint() {
        let err = ServerError::bind_error(
            "0.0.0.0:8080",
            io::Error::new(io::ErrorKind::AddrInUse, "address in use"),
        );

        assert!(err.is_recoverable());
        assert!(err.suggestion().is_some_and(|s| s.contains("port")));
    }

    #[test]
    fn config_failures_are_terminal() {
        let err = ServerError::InvalidConfig("shutdown timeout must be positive".to_string());

        assert!(!err.is_recoverable());
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn context_carries_the_bound_address() {
        let err = ServerError::bind_error(
            "127.0.0.1:3000",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );

        let context = err.context();
        let lookup = |key: &str| {
            context
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(lookup("error_code"), Some("bind"));
        assert_eq!(lookup("address"), Some("127.0.0.1:3000"));
        assert_eq!(lookup("recoverable"), Some("true"));
        assert!(lookup("suggestion").is_some());
    }
}
