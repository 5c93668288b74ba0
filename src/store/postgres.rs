use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{
    alert_queries, history_queries, market_queries, portfolio_queries, position_queries,
    stock_queries, transaction_queries, watchlist_queries,
};
use crate::external::market_data::DailyBar;
use crate::models::{
    AlertDirection, HistoryQuery, MarketSummary, NewTransaction, Portfolio, PortfolioPosition,
    SaveReport, SaveStock, SectorPerformance, Stock, StockAlert, StockHistoryEntry,
    StockScreenerRequest, StockWatchlist, Transaction, UpdateAlertRequest, UpdatePortfolio,
    UpdatePosition, UpsertPosition,
};
use crate::store::StockStore;

#[derive(Clone)]
pub struct PgStockStore {
    pool: PgPool,
}

impl PgStockStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl StockStore for PgStockStore {
    async fn list_stocks(&self) -> Result<Vec<Stock>, sqlx::Error> {
        stock_queries::fetch_all(&self.pool).await
    }

    async fn get_stock(&self, symbol: &str) -> Result<Option<Stock>, sqlx::Error> {
        stock_queries::fetch_by_symbol(&self.pool, symbol).await
    }

    async fn save_stock(&self, symbol: &str, input: &SaveStock) -> Result<Stock, sqlx::Error> {
        stock_queries::upsert(&self.pool, symbol, input).await
    }

    async fn delete_stock(&self, symbol: &str) -> Result<bool, sqlx::Error> {
        Ok(stock_queries::delete(&self.pool, symbol).await? > 0)
    }

    async fn screen_stocks(&self, filter: &StockScreenerRequest) -> Result<Vec<Stock>, sqlx::Error> {
        stock_queries::screen(&self.pool, filter).await
    }

    async fn get_history(
        &self,
        symbol: &str,
        range: &HistoryQuery,
    ) -> Result<Vec<StockHistoryEntry>, sqlx::Error> {
        history_queries::fetch_range(&self.pool, symbol, range.from, range.to, range.limit()).await
    }

    async fn upsert_history(&self, entries: &[StockHistoryEntry]) -> Result<u64, sqlx::Error> {
        history_queries::upsert_many(&self.pool, entries).await
    }

    async fn save_quote_batch(&self, bars: &[DailyBar]) -> Result<SaveReport, sqlx::Error> {
        history_queries::save_quote_batch(&self.pool, bars).await
    }

    async fn sector_performance(&self) -> Result<Vec<SectorPerformance>, sqlx::Error> {
        market_queries::sector_performance(&self.pool).await
    }

    async fn market_summary(&self, movers: usize) -> Result<MarketSummary, sqlx::Error> {
        let total = stock_queries::count(&self.pool).await?;
        let changes = market_queries::latest_changes(&self.pool).await?;
        Ok(MarketSummary::from_changes(total, changes, movers))
    }

    async fn list_watchlist(&self, user_id: Uuid) -> Result<Vec<StockWatchlist>, sqlx::Error> {
        watchlist_queries::fetch_for_user(&self.pool, user_id).await
    }

    async fn add_to_watchlist(&self, user_id: Uuid, symbol: &str) -> Result<StockWatchlist, sqlx::Error> {
        watchlist_queries::add(&self.pool, user_id, symbol).await
    }

    async fn remove_from_watchlist(&self, user_id: Uuid, symbol: &str) -> Result<bool, sqlx::Error> {
        Ok(watchlist_queries::remove(&self.pool, user_id, symbol).await? > 0)
    }

    async fn list_alerts(&self, user_id: Uuid) -> Result<Vec<StockAlert>, sqlx::Error> {
        alert_queries::fetch_for_user(&self.pool, user_id).await
    }

    async fn get_alert(&self, id: Uuid) -> Result<Option<StockAlert>, sqlx::Error> {
        alert_queries::fetch_one(&self.pool, id).await
    }

    async fn create_alert(
        &self,
        user_id: Uuid,
        symbol: &str,
        direction: AlertDirection,
        target_price: f64,
    ) -> Result<StockAlert, sqlx::Error> {
        alert_queries::create(&self.pool, user_id, symbol, direction, target_price).await
    }

    async fn update_alert(
        &self,
        id: Uuid,
        input: &UpdateAlertRequest,
    ) -> Result<Option<StockAlert>, sqlx::Error> {
        alert_queries::update(&self.pool, id, input).await
    }

    async fn delete_alert(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        Ok(alert_queries::delete(&self.pool, id).await? > 0)
    }

    async fn trigger_alert(&self, id: Uuid, at: DateTime<Utc>) -> Result<Option<StockAlert>, sqlx::Error> {
        alert_queries::mark_triggered(&self.pool, id, at).await
    }

    async fn list_portfolios(&self, user_id: Uuid) -> Result<Vec<Portfolio>, sqlx::Error> {
        portfolio_queries::fetch_for_user(&self.pool, user_id).await
    }

    async fn get_portfolio(&self, id: Uuid) -> Result<Option<Portfolio>, sqlx::Error> {
        portfolio_queries::fetch_one(&self.pool, id).await
    }

    async fn create_portfolio(
        &self,
        user_id: Uuid,
        name: &str,
        cash_balance: f64,
    ) -> Result<Portfolio, sqlx::Error> {
        portfolio_queries::insert(&self.pool, user_id, name, cash_balance).await
    }

    async fn update_portfolio(
        &self,
        id: Uuid,
        input: &UpdatePortfolio,
    ) -> Result<Option<Portfolio>, sqlx::Error> {
        portfolio_queries::update(&self.pool, id, input).await
    }

    async fn delete_portfolio(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        Ok(portfolio_queries::delete(&self.pool, id).await? > 0)
    }

    async fn list_positions(&self, portfolio_id: Uuid) -> Result<Vec<PortfolioPosition>, sqlx::Error> {
        position_queries::fetch_all(&self.pool, portfolio_id).await
    }

    async fn get_position(&self, id: Uuid) -> Result<Option<PortfolioPosition>, sqlx::Error> {
        position_queries::fetch_one(&self.pool, id).await
    }

    async fn upsert_position(
        &self,
        portfolio_id: Uuid,
        input: &UpsertPosition,
    ) -> Result<PortfolioPosition, sqlx::Error> {
        position_queries::upsert(&self.pool, portfolio_id, input).await
    }

    async fn update_position(
        &self,
        id: Uuid,
        input: &UpdatePosition,
    ) -> Result<Option<PortfolioPosition>, sqlx::Error> {
        position_queries::update(&self.pool, id, input).await
    }

    async fn delete_position(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        Ok(position_queries::delete(&self.pool, id).await? > 0)
    }

    async fn list_transactions(&self, portfolio_id: Uuid) -> Result<Vec<Transaction>, sqlx::Error> {
        transaction_queries::fetch_all(&self.pool, portfolio_id).await
    }

    async fn get_transaction(&self, id: Uuid) -> Result<Option<Transaction>, sqlx::Error> {
        transaction_queries::fetch_one(&self.pool, id).await
    }

    async fn create_transaction(
        &self,
        portfolio_id: Uuid,
        input: &NewTransaction,
    ) -> Result<Transaction, sqlx::Error> {
        transaction_queries::insert(&self.pool, portfolio_id, input).await
    }

    async fn delete_transaction(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        Ok(transaction_queries::delete(&self.pool, id).await? > 0)
    }
}
