use std::path::{Path, PathBuf};

use sqlx::{Executor, PgPool};
use thiserror::Error;
use tracing::info;

/// Schema applied by the `migrate` binary, relative to the working directory.
pub const MIGRATION_FILE: &str = "db/migrations/000001_create_initial_tables.up.sql";

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("failed to read migration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to execute migration: {0}")]
    Execute(#[from] sqlx::Error),
}

pub async fn read_sql_file(path: &Path) -> Result<String, MigrationError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| MigrationError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Runs the whole file as one batch.
///
/// A `&str` with no bind arguments goes over the simple query protocol, which
/// accepts several statements at once.
pub async fn apply_sql_file(pool: &PgPool, path: &Path) -> Result<(), MigrationError> {
    let sql = read_sql_file(path).await?;
    pool.execute(sql.as_str()).await?;
    info!("Applied migration {}", path.display());
    Ok(())
}
