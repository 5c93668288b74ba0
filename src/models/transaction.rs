use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }

    /// Cash moved by the trade: fees add to a buy and come out of a sell.
    pub fn total_amount(&self, quantity: i64, price: f64, fees: f64) -> f64 {
        let gross = quantity as f64 * price;
        match self {
            Side::Buy => gross + fees,
            Side::Sell => gross - fees,
        }
    }
}

// Represents a buy or sell event recorded against a portfolio.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub id: Uuid,
    pub portfolio_id: Uuid,
    pub symbol: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub quantity: i64,
    pub price: f64,
    pub fees: f64,
    pub total_amount: f64,
    pub executed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransaction {
    pub symbol: String,
    #[serde(rename = "type")]
    pub side: Side,
    pub quantity: i64,
    pub price: f64,
    pub fees: Option<f64>,
    pub executed_at: Option<DateTime<Utc>>,
}

/// A validated transaction ready to be stored.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub symbol: String,
    pub side: Side,
    pub quantity: i64,
    pub price: f64,
    pub fees: f64,
    pub total_amount: f64,
    pub executed_at: DateTime<Utc>,
}
