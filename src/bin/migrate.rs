//! Applies the bundled schema to the database named by `DATABASE_URL`.

use std::path::Path;

use anyhow::Context;

use stockflow_backend::config;
use stockflow_backend::db::migrations::{apply_sql_file, MIGRATION_FILE};
use stockflow_backend::db::pool::connect_from_env;
use stockflow_backend::logging::{init_logging, LoggingConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_found = config::load_dotenv();
    init_logging(LoggingConfig::from_env())?;
    config::log_dotenv_status(dotenv_found);

    let pool = connect_from_env()
        .await
        .context("unable to open database connection")?;

    apply_sql_file(&pool, Path::new(MIGRATION_FILE))
        .await
        .context("migration failed")?;

    tracing::info!("✅ Migration completed successfully");
    Ok(())
}
