use crate::errors::AppError;
use crate::models::{MarketSummary, SectorPerformance};
use crate::store::StockStore;

pub async fn summary(store: &dyn StockStore, movers: usize) -> Result<MarketSummary, AppError> {
    let summary = store.market_summary(movers).await?;
    Ok(summary)
}

pub async fn sectors(store: &dyn StockStore) -> Result<Vec<SectorPerformance>, AppError> {
    let sectors = store.sector_performance().await?;
    Ok(sectors)
}
