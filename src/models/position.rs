use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Holding of one symbol within a portfolio, unique per (portfolio, symbol).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PortfolioPosition {
    pub id: Uuid,
    pub portfolio_id: Uuid,
    pub symbol: String,
    pub quantity: i64,
    pub average_cost: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertPosition {
    pub symbol: String,
    pub quantity: i64,
    pub average_cost: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePosition {
    pub quantity: Option<i64>,
    pub average_cost: Option<f64>,
}
