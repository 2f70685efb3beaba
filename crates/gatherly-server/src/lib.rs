#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod extract;
pub mod handler;
pub mod middleware;
pub mod service;

pub use crate::handler::{Error, ErrorKind, Result};

/// Tracing target for authentication flows.
pub const TRACING_TARGET_AUTHENTICATION: &str = "gatherly_server::authentication";
/// Tracing target for HTTP handlers.
pub const TRACING_TARGET_HANDLER: &str = "gatherly_server::handler";
/// Tracing target for WebSocket connections.
pub const TRACING_TARGET_WEBSOCKET: &str = "gatherly_server::websocket";
/// Tracing target for service state management.
pub const TRACING_TARGET_SERVICE: &str = "gatherly_server::service";
