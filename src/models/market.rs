use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_MOVERS: usize = 5;

/// Latest daily move for one symbol, from its two most recent bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PriceChange {
    pub symbol: String,
    pub date: NaiveDate,
    pub close: f64,
    pub previous_close: f64,
    pub change_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SectorPerformance {
    pub sector: String,
    pub stock_count: i64,
    pub avg_change_pct: Option<f64>,
    pub total_market_cap: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub total_stocks: i64,
    pub advancers: usize,
    pub decliners: usize,
    pub unchanged: usize,
    pub as_of: Option<NaiveDate>,
    pub top_gainers: Vec<PriceChange>,
    pub top_losers: Vec<PriceChange>,
}

impl MarketSummary {
    pub fn from_changes(total_stocks: i64, mut changes: Vec<PriceChange>, movers: usize) -> Self {
        let advancers = changes.iter().filter(|c| c.change_pct > 0.0).count();
        let decliners = changes.iter().filter(|c| c.change_pct < 0.0).count();
        let unchanged = changes.len() - advancers - decliners;
        let as_of = changes.iter().map(|c| c.date).max();

        changes.sort_by(|a, b| b.change_pct.total_cmp(&a.change_pct));

        let top_gainers = changes
            .iter()
            .filter(|c| c.change_pct > 0.0)
            .take(movers)
            .cloned()
            .collect();
        let top_losers = changes
            .iter()
            .rev()
            .filter(|c| c.change_pct < 0.0)
            .take(movers)
            .cloned()
            .collect();

        Self {
            total_stocks,
            advancers,
            decliners,
            unchanged,
            as_of,
            top_gainers,
            top_losers,
        }
    }
}
