use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::external::market_data::MarketDataProvider;
use crate::models::stock::{normalize_symbol, validate_symbol};
use crate::models::{HistoryQuery, SaveReport, SaveStock, Stock, StockHistoryResponse, StockScreenerRequest};
use crate::store::StockStore;

pub async fn list(store: &dyn StockStore) -> Result<Vec<Stock>, AppError> {
    let stocks = store.list_stocks().await?;
    Ok(stocks)
}

/// Looks a stock up by symbol. Lookups only normalize, so an unknown or
/// malformed identifier is reported as not found.
pub async fn fetch_one(store: &dyn StockStore, id: &str) -> Result<Stock, AppError> {
    let symbol = normalize_symbol(id);
    store
        .get_stock(&symbol)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Stock {} not found", symbol)))
}

/// Pulls the daily series for `raw_symbol` from the provider and stores it.
/// Returns the normalized symbol with the save report.
pub async fn fetch_and_store(
    store: &dyn StockStore,
    provider: &dyn MarketDataProvider,
    raw_symbol: &str,
) -> Result<(String, SaveReport), AppError> {
    let symbol = validate_symbol(raw_symbol)?;

    let bars = provider.fetch_daily(&symbol).await.map_err(|e| {
        error!("Failed to fetch daily series for {}: {}", symbol, e);
        e
    })?;
    info!("Fetched {} daily bars for {}", bars.len(), symbol);

    let report = store.save_quote_batch(&bars).await.map_err(|e| {
        error!("Failed to store daily bars for {}: {}", symbol, e);
        e
    })?;

    for skipped in &report.skipped {
        warn!(
            "Skipped bar for {} dated {:?}: {}",
            skipped.symbol, skipped.date, skipped.reason
        );
    }

    Ok((symbol, report))
}

pub async fn save(store: &dyn StockStore, id: &str, input: SaveStock) -> Result<Stock, AppError> {
    let symbol = validate_symbol(id)?;
    if input.name.trim().is_empty() {
        return Err(AppError::Validation("Stock name cannot be empty".into()));
    }
    if input.last_price.is_some_and(|p| !p.is_finite() || p < 0.0) {
        return Err(AppError::Validation("Price must be a non-negative number".into()));
    }
    if input.market_cap.is_some_and(|c| c < 0) {
        return Err(AppError::Validation("Market cap cannot be negative".into()));
    }

    let stock = store.save_stock(&symbol, &input).await?;
    Ok(stock)
}

pub async fn delete(store: &dyn StockStore, id: &str) -> Result<(), AppError> {
    let symbol = normalize_symbol(id);
    if store.delete_stock(&symbol).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("Stock {} not found", symbol)))
    }
}

pub async fn history(
    store: &dyn StockStore,
    id: &str,
    query: HistoryQuery,
) -> Result<StockHistoryResponse, AppError> {
    query.validate()?;
    let stock = fetch_one(store, id).await?;
    let history = store.get_history(&stock.symbol, &query).await?;
    Ok(StockHistoryResponse {
        symbol: stock.symbol,
        history,
    })
}

pub async fn screen(store: &dyn StockStore, filter: StockScreenerRequest) -> Result<Vec<Stock>, AppError> {
    filter.validate()?;
    let stocks = store.screen_stocks(&filter).await?;
    Ok(stocks)
}
