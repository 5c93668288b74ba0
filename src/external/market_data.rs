use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One daily OHLCV bar as reported by a provider.
///
/// `date` is kept in the provider's `YYYY-MM-DD` text form; it is parsed when
/// the bar is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub symbol: String,
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    pub last_refreshed: String,
}

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("failed to reach market data provider: {0}")]
    Network(#[from] reqwest::Error),

    #[error("received non-200 response from market data provider: {0}")]
    Status(u16),

    #[error("failed to decode market data response: {0}")]
    Decode(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("rate limited by market data provider: {0}")]
    RateLimited(String),

    #[error("malformed {field} {value:?} for {date}")]
    Parse {
        date: String,
        field: &'static str,
        value: String,
    },
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetches the provider's daily time series for `symbol`.
    async fn fetch_daily(&self, symbol: &str) -> Result<Vec<DailyBar>, MarketDataError>;
}
