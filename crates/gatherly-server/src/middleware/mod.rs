//! Middleware for `axum::Router` and HTTP request processing.
//!
//! This module provides middleware for:
//! - Security (CORS)
//! - Error handling (panics, timeouts, service errors)
//! - OpenAPI documentation with Scalar UI

mod cors;
mod recovery;
mod specification;

pub use cors::{CorsConfig, create_cors_layer};
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use specification::{OpenApiConfig, RouterOpenApiExt};
