//! HTTP server startup with lifecycle management.
//!
//! This module provides a clean API for starting the HTTP server with
//! error handling and graceful shutdown on SIGINT/SIGTERM.

mod error;
mod http_server;
mod lifecycle;
mod shutdown;

use axum::Router;
pub use error::{ServerError, ServerResult};
use http_server::serve_http;
use shutdown::shutdown_signal;

use crate::config::ServerConfig;

/// Tracing target for server startup events.
pub const TRACING_TARGET_STARTUP: &str = "gatherly_cli::server::startup";

/// Tracing target for server shutdown events.
pub const TRACING_TARGET_SHUTDOWN: &str = "gatherly_cli::server::shutdown";

/// Starts the HTTP server with the provided router and configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Server configuration is invalid
/// - Cannot bind to the specified address/port
/// - Server encounters a fatal error during operation
pub async fn serve(app: Router, config: ServerConfig) -> ServerResult<()> {
    serve_http(app, config).await
}
