//! Embedded migration runner.
//!
//! Migrations are compiled into the binary via
//! [`diesel_migrations::embed_migrations`] and applied at startup. Diesel's
//! migration harness is synchronous, so the run is moved onto a blocking
//! thread with the connection wrapped in an [`AsyncConnectionWrapper`].
//!
//! [`AsyncConnectionWrapper`]: diesel_async::async_connection_wrapper::AsyncConnectionWrapper

use std::time::Instant;

use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::MigrationHarness;
use tokio::task::spawn_blocking;

use crate::{MIGRATIONS, PgClient, PgError, PgResult, TRACING_TARGET_MIGRATION};

/// Runs all pending migrations on the database.
///
/// Returns the versions of the migrations that were applied, which is empty
/// when the schema was already up to date.
#[tracing::instrument(skip(pg), target = TRACING_TARGET_MIGRATION)]
pub async fn run_pending_migrations(pg: &PgClient) -> PgResult<Vec<String>> {
    tracing::info!(
        target: TRACING_TARGET_MIGRATION,
        "Starting database migration process",
    );

    let start_time = Instant::now();
    let conn = pg.get_pooled_connection().await?;

    let mut conn: AsyncConnectionWrapper<_> = conn.into();
    let results = spawn_blocking(move || {
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.into_iter().map(|v| v.to_string()).collect())
    })
    .await;

    let duration = start_time.elapsed();
    let versions: Vec<String> = results
        .map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET_MIGRATION,
                duration = ?duration,
                error = %err,
                "Migration task panicked, join error occurred"
            );
            PgError::Migration(err.into())
        })?
        .map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET_MIGRATION,
                duration = ?duration,
                error = &err,
                "Database migration process failed"
            );
            PgError::Migration(err)
        })?;

    tracing::info!(
        target: TRACING_TARGET_MIGRATION,
        duration = ?duration,
        migrations_count = versions.len(),
        "Database migration process completed successfully"
    );

    Ok(versions)
}
