use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use stockflow_backend::app::create_app;
use stockflow_backend::config::{self, AppConfig};
use stockflow_backend::db;
use stockflow_backend::external::alphavantage::AlphaVantageClient;
use stockflow_backend::logging::{init_logging, LoggingConfig};
use stockflow_backend::state::AppState;
use stockflow_backend::store::PgStockStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_found = config::load_dotenv();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())?;
    config::log_dotenv_status(dotenv_found);

    let config = AppConfig::from_env().context("invalid configuration")?;

    let pool = db::pool::connect(&config.database)
        .await
        .context("database unavailable")?;

    let market_data = AlphaVantageClient::from_config(&config)
        .context("failed to build Alpha Vantage client")?;
    tracing::info!("📊 Using market data provider: Alpha Vantage ({})", config.alpha_vantage_base_url);

    let state = AppState::new(Arc::new(PgStockStore::new(pool)), Arc::new(market_data));
    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("🚀 Stockflow backend running at http://{}/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
