//! Termination signals for graceful shutdown.

use std::time::Duration;

use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

use super::TRACING_TARGET_SHUTDOWN;

/// Resolves once the process receives SIGINT (Ctrl+C) or, on Unix, SIGTERM.
///
/// `drain_timeout` is the window the caller will allow for in-flight
/// requests to finish; it is recorded in the shutdown log line.
pub async fn shutdown_signal(drain_timeout: Duration) {
    let received = tokio::select! {
        () = interrupt() => "SIGINT",
        () = terminate() => "SIGTERM",
    };

    tracing::info!(
        target: TRACING_TARGET_SHUTDOWN,
        signal = received,
        drain_secs = drain_timeout.as_secs(),
        "shutdown signal received, draining connections"
    );
}

// A failed handler installation must not look like a shutdown request,
// so each branch pends forever on error and leaves the other signal armed.

async fn interrupt() {
    if let Err(error) = ctrl_c().await {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            %error,
            "could not install the Ctrl+C handler"
        );
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET_SHUTDOWN,
                %error,
                "could not install the SIGTERM handler"
            );
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
