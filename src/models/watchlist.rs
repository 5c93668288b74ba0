use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// A user's watchlist membership for one symbol.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StockWatchlist {
    pub id: Uuid,
    pub user_id: Uuid,
    pub symbol: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddToWatchlist {
    pub symbol: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockWatchlistResponse {
    pub watchlist: Vec<StockWatchlist>,
    pub count: usize,
}

impl From<Vec<StockWatchlist>> for StockWatchlistResponse {
    fn from(watchlist: Vec<StockWatchlist>) -> Self {
        Self {
            count: watchlist.len(),
            watchlist,
        }
    }
}
