use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::external::market_data::DailyBar;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_HISTORY_LIMIT: i64 = 100;
pub const MAX_HISTORY_LIMIT: i64 = 5000;

// A single daily OHLCV bar, unique per (symbol, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct StockHistoryEntry {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    pub adj_close: f64,
}

impl StockHistoryEntry {
    /// Provider bars carry no adjusted close; `close` stands in for it.
    pub fn from_bar(bar: &DailyBar) -> Result<Self, chrono::ParseError> {
        let date = NaiveDate::parse_from_str(&bar.date, DATE_FORMAT)?;
        Ok(Self {
            symbol: bar.symbol.clone(),
            date,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            adj_close: bar.close,
        })
    }
}

/// A bar left out of a batch save because its date did not parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedBar {
    pub symbol: String,
    pub date: String,
    pub reason: String,
}

/// Outcome of a quote batch save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveReport {
    pub stored: usize,
    pub skipped: Vec<SkippedBar>,
}

/// Splits provider bars into storable entries and the ones with bad dates.
pub fn split_valid_bars(bars: &[DailyBar]) -> (Vec<StockHistoryEntry>, Vec<SkippedBar>) {
    let mut entries = Vec::with_capacity(bars.len());
    let mut skipped = Vec::new();

    for bar in bars {
        match StockHistoryEntry::from_bar(bar) {
            Ok(entry) => entries.push(entry),
            Err(e) => skipped.push(SkippedBar {
                symbol: bar.symbol.clone(),
                date: bar.date.clone(),
                reason: e.to_string(),
            }),
        }
    }

    (entries, skipped)
}

/// Latest-dated entry per symbol; its close becomes the stock's last price.
pub fn latest_per_symbol(entries: &[StockHistoryEntry]) -> BTreeMap<&str, &StockHistoryEntry> {
    let mut latest: BTreeMap<&str, &StockHistoryEntry> = BTreeMap::new();
    for entry in entries {
        latest
            .entry(entry.symbol.as_str())
            .and_modify(|current| {
                if entry.date > current.date {
                    *current = entry;
                }
            })
            .or_insert(entry);
    }
    latest
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<i64>,
}

impl HistoryQuery {
    pub fn validate(&self) -> Result<(), String> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err("from cannot be after to".to_string());
            }
        }
        if let Some(limit) = self.limit {
            if !(1..=MAX_HISTORY_LIMIT).contains(&limit) {
                return Err(format!("limit must be between 1 and {}", MAX_HISTORY_LIMIT));
            }
        }
        Ok(())
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_HISTORY_LIMIT)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockHistoryResponse {
    pub symbol: String,
    pub history: Vec<StockHistoryEntry>,
}
