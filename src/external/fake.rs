//! Scripted provider for handler and service tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::external::market_data::{DailyBar, MarketDataError, MarketDataProvider};

enum Scripted {
    Bars(Vec<DailyBar>),
    Status(u16),
    RateLimited,
}

pub struct FakeProvider {
    response: Scripted,
    calls: AtomicUsize,
}

impl FakeProvider {
    pub fn with_bars(bars: Vec<DailyBar>) -> Self {
        Self::new(Scripted::Bars(bars))
    }

    pub fn failing_with_status(status: u16) -> Self {
        Self::new(Scripted::Status(status))
    }

    pub fn rate_limited() -> Self {
        Self::new(Scripted::RateLimited)
    }

    fn new(response: Scripted) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataProvider for FakeProvider {
    async fn fetch_daily(&self, symbol: &str) -> Result<Vec<DailyBar>, MarketDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Scripted::Bars(bars) => Ok(bars
                .iter()
                .filter(|b| b.symbol == symbol)
                .cloned()
                .collect()),
            Scripted::Status(status) => Err(MarketDataError::Status(*status)),
            Scripted::RateLimited => Err(MarketDataError::RateLimited(
                "API call frequency exceeded".to_string(),
            )),
        }
    }
}

pub fn bar(symbol: &str, date: &str, close: f64) -> DailyBar {
    DailyBar {
        symbol: symbol.to_string(),
        date: date.to_string(),
        open: close - 0.5,
        high: close + 0.5,
        low: close - 1.0,
        close,
        volume: 1000,
        last_refreshed: date.to_string(),
    }
}
