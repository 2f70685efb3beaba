//! Health monitoring response types.

use gatherly_postgres::PgPoolStatus;
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Snapshot of the database connection pool.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStatus {
    /// Maximum number of connections in the pool.
    pub max_size: usize,
    /// Current number of connections in the pool.
    pub size: usize,
    /// Number of available connections.
    pub available: usize,
    /// Number of requests waiting for a connection.
    pub waiting: usize,
    /// Pool utilization between 0.0 and 1.0.
    pub utilization: f64,
}

impl DatabaseStatus {
    /// Builds the payload from a pool status snapshot.
    pub fn from_pool_status(status: PgPoolStatus) -> Self {
        Self {
            utilization: status.utilization(),
            max_size: status.max_size,
            size: status.size,
            available: status.available,
            waiting: status.waiting,
        }
    }
}

/// Liveness payload returned by the health endpoint.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// Whether the server considers itself healthy.
    pub is_healthy: bool,
    /// Database connection pool snapshot.
    pub database: DatabaseStatus,
    /// When this snapshot was taken.
    pub checked_at: Timestamp,
}
