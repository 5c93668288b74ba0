//! Database connector: builds the shared pool and checks it is alive.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, DatabaseConfig};

pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("unable to connect to database: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("ping failed: {0}")]
    Ping(#[source] sqlx::Error),
}

/// Reads `DATABASE_URL` from the environment and connects.
pub async fn connect_from_env() -> Result<PgPool, ConnectError> {
    let config = DatabaseConfig::from_env()?;
    connect(&config).await
}

pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, ConnectError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(&config.url)
        .await
        .map_err(ConnectError::Connect)?;

    let mut conn = pool.acquire().await.map_err(ConnectError::Connect)?;
    conn.ping().await.map_err(ConnectError::Ping)?;

    info!(
        "Successfully connected to the database (max {} connections)",
        config.max_connections
    );
    Ok(pool)
}
