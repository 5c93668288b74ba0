pub mod alert;
pub mod history;
pub mod market;
pub mod portfolio;
pub mod position;
pub mod stock;
pub mod transaction;
pub mod watchlist;

pub use alert::{AlertDirection, CreateAlertRequest, StockAlert, StockAlertResponse, UpdateAlertRequest};
pub use history::{HistoryQuery, SaveReport, SkippedBar, StockHistoryEntry, StockHistoryResponse};
pub use market::{MarketSummary, PriceChange, SectorPerformance};
pub use portfolio::{CreatePortfolio, Portfolio, PortfolioDetail, UpdatePortfolio};
pub use position::{PortfolioPosition, UpdatePosition, UpsertPosition};
pub use stock::{SaveStock, Stock, StockScreenerRequest};
pub use transaction::{CreateTransaction, NewTransaction, Side, Transaction};
pub use watchlist::{AddToWatchlist, StockWatchlist, StockWatchlistResponse};
