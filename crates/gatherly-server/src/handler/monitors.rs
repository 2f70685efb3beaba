//! System health monitoring handlers.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use gatherly_postgres::PgClient;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::{DatabaseStatus, Envelope, HealthStatus};
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "gatherly_server::handler::monitors";

/// Returns the liveness status of the server and its database pool.
#[tracing::instrument(skip_all)]
async fn health_status(
    State(pg_client): State<PgClient>,
) -> Result<(StatusCode, Json<Envelope<HealthStatus>>)> {
    let pool_status = pg_client.pool_status();
    let is_healthy = !pool_status.is_under_pressure();

    let response = HealthStatus {
        is_healthy,
        database: DatabaseStatus::from_pool_status(pool_status),
        checked_at: jiff::Timestamp::now(),
    };

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    tracing::debug!(
        target: TRACING_TARGET,
        is_healthy = is_healthy,
        status_code = status_code.as_u16(),
        "Health status checked"
    );

    Ok((status_code, Json(Envelope::new(response))))
}

fn health_status_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get health status")
        .description("Returns server liveness and database pool status.")
        .response::<200, Json<Envelope<HealthStatus>>>()
        .response::<503, Json<Envelope<HealthStatus>>>()
}

/// Returns a [`Router`] with all health monitoring routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/health", get_with(health_status, health_status_docs))
        .with_path_items(|item| item.tag("Health"))
}
