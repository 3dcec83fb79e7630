// src/config/db.rs
// DOCUMENTATION: PostgreSQL pool for the photo/comment/update tables
// PURPOSE: Only built when RECORD_STORE=postgres; the JSON file store needs no pool

use crate::config::Config;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Idle connections are closed after five minutes
const IDLE_TIMEOUT_SECS: u64 = 300;

/// Connect using DATABASE_URL, DB_MAX_CONNECTIONS and DB_CONNECTION_TIMEOUT
/// DOCUMENTATION: Fails fast with a round-trip query so a bad URL stops start-up
/// (and the cleanup tool) before any record is touched
pub async fn init_db_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    log::info!(
        "Connecting record store to PostgreSQL (max {} connections)",
        config.db_max_connections
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connection_timeout))
        .idle_timeout(Duration::from_secs(IDLE_TIMEOUT_SECS))
        .connect(&config.database_url)
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;

    log::info!("PostgreSQL record store reachable");
    Ok(pool)
}
