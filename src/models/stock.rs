use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Main stock entity, keyed by symbol.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Stock {
    pub symbol: String,
    pub name: String,
    #[serde(rename = "current_price")]
    pub last_price: Option<f64>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub market_cap: Option<i64>,
    pub pe_ratio: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "last_updated")]
    pub updated_at: DateTime<Utc>,
}

/// Descriptive fields written by a stock upsert; the symbol comes from the path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveStock {
    pub name: String,
    #[serde(alias = "current_price")]
    pub last_price: Option<f64>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub market_cap: Option<i64>,
    pub pe_ratio: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
}

pub const MAX_SYMBOL_LEN: usize = 10;

/// Canonical form used for storage and lookups.
pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// Normalizes and validates a symbol supplied for a write.
pub fn validate_symbol(raw: &str) -> Result<String, String> {
    let symbol = normalize_symbol(raw);
    if symbol.is_empty() {
        return Err("Symbol is required".to_string());
    }
    if symbol.len() > MAX_SYMBOL_LEN {
        return Err(format!("Symbol must be at most {} characters", MAX_SYMBOL_LEN));
    }
    if !symbol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(format!("Invalid symbol: {}", symbol));
    }
    Ok(symbol)
}

// ==============================================================================
// Screener
// ==============================================================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ScreenerSortField {
    Symbol,
    Price,
    MarketCap,
    PeRatio,
    DividendYield,
    #[default]
    CreatedAt,
}

impl ScreenerSortField {
    pub fn column(&self) -> &'static str {
        match self {
            ScreenerSortField::Symbol => "symbol",
            ScreenerSortField::Price => "last_price",
            ScreenerSortField::MarketCap => "market_cap",
            ScreenerSortField::PeRatio => "pe_ratio",
            ScreenerSortField::DividendYield => "dividend_yield",
            ScreenerSortField::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

pub const DEFAULT_SCREENER_LIMIT: i64 = 50;
pub const MAX_SCREENER_LIMIT: i64 = 500;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockScreenerRequest {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_market_cap: Option<i64>,
    pub max_market_cap: Option<i64>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub min_pe_ratio: Option<f64>,
    pub max_pe_ratio: Option<f64>,
    pub sort_by: Option<ScreenerSortField>,
    pub sort_order: Option<SortOrder>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl StockScreenerRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err("min_price cannot exceed max_price".to_string());
            }
        }
        if let (Some(min), Some(max)) = (self.min_market_cap, self.max_market_cap) {
            if min > max {
                return Err("min_market_cap cannot exceed max_market_cap".to_string());
            }
        }
        if let (Some(min), Some(max)) = (self.min_pe_ratio, self.max_pe_ratio) {
            if min > max {
                return Err("min_pe_ratio cannot exceed max_pe_ratio".to_string());
            }
        }
        if let Some(limit) = self.limit {
            if !(1..=MAX_SCREENER_LIMIT).contains(&limit) {
                return Err(format!("limit must be between 1 and {}", MAX_SCREENER_LIMIT));
            }
        }
        if self.offset.is_some_and(|o| o < 0) {
            return Err("offset cannot be negative".to_string());
        }
        Ok(())
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_SCREENER_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }

    /// Whether `stock` passes every filter; mirrors the SQL WHERE clause.
    pub fn matches(&self, stock: &Stock) -> bool {
        fn at_least<T: PartialOrd>(value: Option<T>, bound: Option<T>) -> bool {
            match bound {
                None => true,
                Some(b) => value.is_some_and(|v| v >= b),
            }
        }
        fn at_most<T: PartialOrd>(value: Option<T>, bound: Option<T>) -> bool {
            match bound {
                None => true,
                Some(b) => value.is_some_and(|v| v <= b),
            }
        }

        at_least(stock.last_price, self.min_price)
            && at_most(stock.last_price, self.max_price)
            && at_least(stock.market_cap, self.min_market_cap)
            && at_most(stock.market_cap, self.max_market_cap)
            && at_least(stock.pe_ratio, self.min_pe_ratio)
            && at_most(stock.pe_ratio, self.max_pe_ratio)
            && self
                .sector
                .as_ref()
                .map_or(true, |s| stock.sector.as_ref() == Some(s))
            && self
                .industry
                .as_ref()
                .map_or(true, |i| stock.industry.as_ref() == Some(i))
    }
}
