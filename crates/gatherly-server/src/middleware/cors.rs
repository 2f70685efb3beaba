//! CORS (Cross-Origin Resource Sharing) middleware configuration.

use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

/// Creates a CORS layer based on the provided configuration.
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = config.to_header_values();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::AUTHORIZATION])
        .allow_credentials(config.allow_credentials)
        .max_age(config.max_age())
}

/// CORS (Cross-Origin Resource Sharing) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct CorsConfig {
    /// List of allowed CORS origins.
    /// If empty, defaults to localhost origins for development.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_ORIGINS", value_delimiter = ',')
    )]
    pub allowed_origins: Vec<String>,

    /// Maximum age for CORS preflight requests in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_MAX_AGE", default_value = "3600")
    )]
    pub max_age_seconds: u64,

    /// Whether to allow credentials in CORS requests.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_ALLOW_CREDENTIALS", default_value = "true")
    )]
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age_seconds: 3600,
            allow_credentials: true,
        }
    }
}

impl CorsConfig {
    /// Returns the CORS max age as a Duration.
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_seconds)
    }

    /// Returns localhost origins for development.
    fn localhost_origins() -> Vec<HeaderValue> {
        [
            "http://localhost:3000",
            "http://localhost:8080",
            "http://127.0.0.1:3000",
            "http://127.0.0.1:8080",
            "http://localhost:5173",
        ]
        .into_iter()
        .filter_map(|origin| origin.parse().ok())
        .collect()
    }

    /// Converts configured origins to HeaderValue list.
    pub fn to_header_values(&self) -> Vec<HeaderValue> {
        if self.allowed_origins.is_empty() {
            Self::localhost_origins()
        } else {
            self.allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_cors_layer_with_custom_origin() {
        let config = CorsConfig {
            allowed_origins: vec!["https://gatherly.app".to_string()],
            max_age_seconds: 3600,
            allow_credentials: true,
        };

        let _layer = create_cors_layer(&config);
    }

    #[test]
    fn empty_origins_fall_back_to_localhost() {
        let config = CorsConfig::default();
        let origins = config.to_header_values();
        assert_eq!(origins.len(), 5);
    }

    #[test]
    fn custom_origins_are_used_verbatim() {
        let config = CorsConfig {
            allowed_origins: vec![
                "https://gatherly.app".to_string(),
                "https://staging.gatherly.app".to_string(),
            ],
            ..Default::default()
        };
        let origins = config.to_header_values();
        assert_eq!(origins.len(), 2);
    }
}
