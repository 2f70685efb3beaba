//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod authentication;
mod error;
mod events;
mod monitors;
pub mod request;
pub mod response;
mod rsvps;
mod websocket;

use aide::axum::ApiRouter;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::service::ServiceState;

#[inline]
async fn fallback_handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns an [`ApiRouter`] with all routes.
pub fn routes() -> ApiRouter<ServiceState> {
    ApiRouter::new()
        .merge(authentication::routes())
        .merge(events::routes())
        .merge(rsvps::routes())
        .merge(websocket::routes())
        .merge(monitors::routes())
        .fallback(fallback_handler)
}
