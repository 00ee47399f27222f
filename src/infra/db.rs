use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

use crate::infra::error::InfraError;

// Signups wait on this when Postgres is down before failing open.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);

/// Build the pool without connecting. Only a malformed URL fails here; an
/// unreachable server surfaces later as `BackendUnavailable` per request.
pub fn init_db(database_url: &SecretString, max_connections: u32) -> Result<PgPool, InfraError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_lazy(database_url.expose_secret())
        .map_err(InfraError::DatabaseConnection)?;

    info!("Database pool configured");
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), InfraError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(InfraError::Migration)?;

    info!("Database migrations applied");
    Ok(())
}
