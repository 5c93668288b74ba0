pub mod alert_queries;
pub mod history_queries;
pub mod market_queries;
pub mod migrations;
pub mod pool;
pub mod portfolio_queries;
pub mod position_queries;
pub mod stock_queries;
pub mod transaction_queries;
pub mod watchlist_queries;
