//! Authentication and authorization module.
//!
//! This module provides authentication functionality for the gatherly API,
//! including JWT token handling and account verification.
//!
//! # Key Types
//!
//! - [`AuthHeader`] - JWT token extractor and response generator
//! - [`AuthClaims`] - JWT claims structure
//! - [`AuthState`] - Authenticated user state with database verification

mod auth_state;
mod jwt_header;

pub use self::auth_state::AuthState;
pub use self::jwt_header::{AuthClaims, AuthHeader};
