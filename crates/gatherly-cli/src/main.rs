#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use gatherly_server::handler;
use gatherly_server::middleware::{RouterOpenApiExt, RouterRecoveryExt, create_cors_layer};
use gatherly_server::service::ServiceState;

use crate::config::{Cli, MiddlewareConfig};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "gatherly_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "gatherly_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "gatherly_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );

        if let Some(server_error) = error.downcast_ref::<server::ServerError>() {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                code = server_error.error_code(),
                recoverable = server_error.is_recoverable(),
                context = ?server_error.context(),
                "server error details"
            );

            if let Some(suggestion) = server_error.suggestion() {
                tracing::info!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    suggestion,
                    "recovery suggestion"
                );
            }
        }
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    log_startup_info();

    cli.validate()?;
    cli.log();

    let state = ServiceState::new(cli.service)
        .await
        .context("failed to create service state")?;
    let router = create_router(state, &cli.middleware);

    server::serve(router, cli.server).await?;

    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost) - catches panics and enforces timeouts
/// 2. CORS - cross-origin request handling
/// 3. Routes (innermost) - actual request handlers and OpenAPI docs
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    let cors = create_cors_layer(&middleware.cors);

    handler::routes()
        .with_open_api(middleware.openapi.clone())
        .with_state(state)
        .layer(cors)
        .with_recovery(&middleware.recovery)
}

/// Logs startup information.
fn log_startup_info() {
    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting gatherly server"
    );
}
