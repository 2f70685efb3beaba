//! Last-resort middleware: request timeouts and panic recovery.
//!
//! Whatever happens inside a handler, the client gets back the API's JSON
//! error envelope rather than a hung connection or an empty 500.

use std::any::Any;
use std::future::ready;
use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::response::{IntoResponse, Response};
#[cfg(feature = "config")]
use clap::Args;
use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use tower_http::catch_panic::CatchPanicLayer;

use crate::handler::{Error, ErrorKind};

/// Tracing target for timeout and Tower errors.
const TRACING_TARGET_ERROR: &str = "gatherly_server::recovery::error";

/// Tracing target for recovered panics.
const TRACING_TARGET_PANIC: &str = "gatherly_server::recovery::panic";

type ResponseFut = BoxFuture<'static, Response>;
type Panic = Box<dyn Any + Send + 'static>;

/// Settings for the recovery stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct RecoveryConfig {
    /// Seconds a request may run before it is cut off with a timeout
    /// response.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "REQUEST_TIMEOUT", default_value = "30")
    )]
    pub request_timeout: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            request_timeout: 30,
        }
    }
}

impl RecoveryConfig {
    /// Returns the request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

/// Applies the recovery stack to a [`Router`].
pub trait RouterRecoveryExt<S> {
    /// Layers timeout enforcement and panic catching onto the router.
    ///
    /// The layers compose so that a panic inside a handler and a request
    /// overrunning the timeout both surface as JSON error responses.
    fn with_recovery(self, config: &RecoveryConfig) -> Self;
}

impl<S> RouterRecoveryExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_recovery(self, config: &RecoveryConfig) -> Self {
        let stack = ServiceBuilder::new()
            .layer(HandleErrorLayer::new(render_tower_error))
            .layer(CatchPanicLayer::custom(render_panic))
            .layer(TimeoutLayer::new(config.request_timeout()));

        self.layer(stack)
    }
}

/// Maps Tower service errors, notably timeouts, to an error response.
fn render_tower_error(err: tower::BoxError) -> ResponseFut {
    use tower::timeout::error::Elapsed;

    let error = if err.downcast_ref::<Elapsed>().is_some() {
        tracing::error!(
            target: TRACING_TARGET_ERROR,
            error = %err,
            "request timeout exceeded"
        );

        Error::new(ErrorKind::InternalServerError)
            .with_message("Request timeout")
            .with_context("The request took too long to process and was terminated")
    } else {
        tracing::error!(
            target: TRACING_TARGET_ERROR,
            error = %err,
            "unknown middleware error"
        );

        Error::new(ErrorKind::InternalServerError)
            .with_message("An unexpected error occurred")
            .with_context(err.to_string())
    };

    ready(error.into_response()).boxed()
}

/// Turns a caught panic payload into an error response.
///
/// A handler that panics with an [`Error`] keeps that error's status and
/// body; string panics get logged and collapsed to a generic 500.
fn render_panic(payload: Panic) -> Response {
    if let Some(error) = payload.downcast_ref::<Error<'static>>() {
        tracing::error!(
            target: TRACING_TARGET_PANIC,
            error = %error,
            "service panic"
        );
        return error.clone().into_response();
    }

    let message = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic type");

    tracing::error!(
        target: TRACING_TARGET_PANIC,
        message = %message,
        "service panic"
    );

    Error::new(ErrorKind::InternalServerError)
        .with_message("An unexpected panic occurred")
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn string_panics_collapse_to_a_generic_500() {
        let response = render_panic(Box::new("tally went sideways"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_panics_keep_their_status() {
        let error = Error::new(ErrorKind::Conflict).into_static();
        let response = render_panic(Box::new(error));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn default_timeout_is_thirty_seconds() {
        let config = RecoveryConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }
}
