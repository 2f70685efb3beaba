//! Application state configuration.

#[cfg(any(test, feature = "config"))]
use clap::Args;
use gatherly_postgres::{PgClient, PgConfig, run_pending_migrations};
use serde::{Deserialize, Serialize};

use crate::service::{Result, ServiceError, SessionKeys, SessionKeysConfig};

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Postgres connection and pool settings.
    #[cfg_attr(any(test, feature = "config"), command(flatten))]
    #[serde(flatten)]
    pub postgres: PgConfig,

    /// JWT session key file paths.
    #[cfg_attr(any(test, feature = "config"), command(flatten))]
    #[serde(flatten)]
    pub session_keys: SessionKeysConfig,
}

impl ServiceConfig {
    /// Validates all configuration values.
    ///
    /// Key files are checked again when they are loaded, this only covers
    /// values that can be rejected without touching the file system.
    pub fn validate(&self) -> Result<()> {
        self.postgres
            .validate()
            .map_err(|e| ServiceError::config_with_source("Invalid Postgres configuration", e))?;

        Ok(())
    }

    /// Connects to the Postgres database and runs pending migrations.
    pub async fn connect_postgres(&self) -> Result<PgClient> {
        let pg_client = self.postgres.clone().build().map_err(|e| {
            ServiceError::database_with_source("Failed to create database client", e)
        })?;

        run_pending_migrations(&pg_client).await.map_err(|e| {
            ServiceError::database_with_source("Failed to apply database migrations", e)
        })?;

        Ok(pg_client)
    }

    /// Loads the session keys from the configured paths and verifies that
    /// they form a working pair.
    pub async fn load_session_keys(&self) -> Result<SessionKeys> {
        let session_keys = SessionKeys::from_config(&self.session_keys).await?;
        session_keys.validate_keys()?;

        Ok(session_keys)
    }
}
