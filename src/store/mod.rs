//! Persistence contract for everything the API reads and writes.
//!
//! Handlers and services only see [`StockStore`]. [`PgStockStore`] is the
//! production implementation; tests swap in an in-memory one.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::external::market_data::DailyBar;
use crate::models::{
    AlertDirection, HistoryQuery, MarketSummary, NewTransaction, Portfolio, PortfolioPosition,
    SaveReport, SaveStock, SectorPerformance, Stock, StockAlert, StockHistoryEntry,
    StockScreenerRequest, StockWatchlist, Transaction, UpdateAlertRequest, UpdatePortfolio,
    UpdatePosition, UpsertPosition,
};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStockStore;

#[async_trait]
pub trait StockStore: Send + Sync {
    // Stocks
    async fn list_stocks(&self) -> Result<Vec<Stock>, sqlx::Error>;
    async fn get_stock(&self, symbol: &str) -> Result<Option<Stock>, sqlx::Error>;
    async fn save_stock(&self, symbol: &str, input: &SaveStock) -> Result<Stock, sqlx::Error>;
    async fn delete_stock(&self, symbol: &str) -> Result<bool, sqlx::Error>;
    async fn screen_stocks(&self, filter: &StockScreenerRequest) -> Result<Vec<Stock>, sqlx::Error>;

    // History
    async fn get_history(
        &self,
        symbol: &str,
        range: &HistoryQuery,
    ) -> Result<Vec<StockHistoryEntry>, sqlx::Error>;
    async fn upsert_history(&self, entries: &[StockHistoryEntry]) -> Result<u64, sqlx::Error>;
    /// Refreshes each symbol's last price and upserts the bars atomically.
    async fn save_quote_batch(&self, bars: &[DailyBar]) -> Result<SaveReport, sqlx::Error>;

    // Aggregations
    async fn sector_performance(&self) -> Result<Vec<SectorPerformance>, sqlx::Error>;
    async fn market_summary(&self, movers: usize) -> Result<MarketSummary, sqlx::Error>;

    // Watchlist
    async fn list_watchlist(&self, user_id: Uuid) -> Result<Vec<StockWatchlist>, sqlx::Error>;
    async fn add_to_watchlist(&self, user_id: Uuid, symbol: &str) -> Result<StockWatchlist, sqlx::Error>;
    async fn remove_from_watchlist(&self, user_id: Uuid, symbol: &str) -> Result<bool, sqlx::Error>;

    // Alerts
    async fn list_alerts(&self, user_id: Uuid) -> Result<Vec<StockAlert>, sqlx::Error>;
    async fn get_alert(&self, id: Uuid) -> Result<Option<StockAlert>, sqlx::Error>;
    async fn create_alert(
        &self,
        user_id: Uuid,
        symbol: &str,
        direction: AlertDirection,
        target_price: f64,
    ) -> Result<StockAlert, sqlx::Error>;
    async fn update_alert(
        &self,
        id: Uuid,
        input: &UpdateAlertRequest,
    ) -> Result<Option<StockAlert>, sqlx::Error>;
    async fn delete_alert(&self, id: Uuid) -> Result<bool, sqlx::Error>;
    async fn trigger_alert(&self, id: Uuid, at: DateTime<Utc>) -> Result<Option<StockAlert>, sqlx::Error>;

    // Portfolios
    async fn list_portfolios(&self, user_id: Uuid) -> Result<Vec<Portfolio>, sqlx::Error>;
    async fn get_portfolio(&self, id: Uuid) -> Result<Option<Portfolio>, sqlx::Error>;
    async fn create_portfolio(
        &self,
        user_id: Uuid,
        name: &str,
        cash_balance: f64,
    ) -> Result<Portfolio, sqlx::Error>;
    async fn update_portfolio(
        &self,
        id: Uuid,
        input: &UpdatePortfolio,
    ) -> Result<Option<Portfolio>, sqlx::Error>;
    async fn delete_portfolio(&self, id: Uuid) -> Result<bool, sqlx::Error>;

    // Positions
    async fn list_positions(&self, portfolio_id: Uuid) -> Result<Vec<PortfolioPosition>, sqlx::Error>;
    async fn get_position(&self, id: Uuid) -> Result<Option<PortfolioPosition>, sqlx::Error>;
    async fn upsert_position(
        &self,
        portfolio_id: Uuid,
        input: &UpsertPosition,
    ) -> Result<PortfolioPosition, sqlx::Error>;
    async fn update_position(
        &self,
        id: Uuid,
        input: &UpdatePosition,
    ) -> Result<Option<PortfolioPosition>, sqlx::Error>;
    async fn delete_position(&self, id: Uuid) -> Result<bool, sqlx::Error>;

    // Transactions
    async fn list_transactions(&self, portfolio_id: Uuid) -> Result<Vec<Transaction>, sqlx::Error>;
    async fn get_transaction(&self, id: Uuid) -> Result<Option<Transaction>, sqlx::Error>;
    async fn create_transaction(
        &self,
        portfolio_id: Uuid,
        input: &NewTransaction,
    ) -> Result<Transaction, sqlx::Error>;
    async fn delete_transaction(&self, id: Uuid) -> Result<bool, sqlx::Error>;
}
