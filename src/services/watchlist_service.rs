use uuid::Uuid;

use crate::errors::AppError;
use crate::models::stock::{normalize_symbol, validate_symbol};
use crate::models::{StockWatchlist, StockWatchlistResponse};
use crate::store::StockStore;

pub async fn list(store: &dyn StockStore, user_id: Uuid) -> Result<StockWatchlistResponse, AppError> {
    let rows = store.list_watchlist(user_id).await?;
    Ok(rows.into())
}

pub async fn add(store: &dyn StockStore, user_id: Uuid, symbol: &str) -> Result<StockWatchlist, AppError> {
    let symbol = validate_symbol(symbol)?;
    let row = store.add_to_watchlist(user_id, &symbol).await?;
    Ok(row)
}

pub async fn remove(store: &dyn StockStore, user_id: Uuid, symbol: &str) -> Result<(), AppError> {
    let symbol = normalize_symbol(symbol);
    if store.remove_from_watchlist(user_id, &symbol).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("{} is not on the watchlist", symbol)))
    }
}
