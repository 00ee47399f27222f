use secrecy::SecretString;
use tracing::error;

use crate::{adapters::persistence::PostgresPersistence, infra::db::init_db};

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod http_client;
pub mod setup;

/// Postgres-backed store. A failed migration is logged and startup carries
/// on, so the signup form keeps answering while the database is away.
pub async fn postgres_persistence(
    database_url: &SecretString,
    max_connections: u32,
    run_migrations: bool,
) -> anyhow::Result<PostgresPersistence> {
    let pool = init_db(database_url, max_connections)?;
    if run_migrations {
        if let Err(err) = db::run_migrations(&pool).await {
            error!(error = %err, "Could not apply database migrations, continuing without them");
        }
    }
    let persistence = PostgresPersistence::new(pool);
    Ok(persistence)
}
