use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ==============================================================================
// Stock Alert Models
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StockAlert {
    pub id: Uuid,
    pub user_id: Uuid,
    pub symbol: String,
    pub alert_type: String,
    pub target_price: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggered_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum AlertDirection {
    #[serde(rename = "above")]
    Above,
    #[serde(rename = "below")]
    Below,
}

impl AlertDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertDirection::Above => "above",
            AlertDirection::Below => "below",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAlertRequest {
    pub symbol: String,
    pub alert_type: AlertDirection,
    pub target_price: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAlertRequest {
    pub alert_type: Option<AlertDirection>,
    pub target_price: Option<f64>,
    pub is_active: Option<bool>,
}

impl UpdateAlertRequest {
    pub fn is_empty(&self) -> bool {
        self.alert_type.is_none() && self.target_price.is_none() && self.is_active.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAlertResponse {
    pub alerts: Vec<StockAlert>,
    pub count: usize,
}

impl From<Vec<StockAlert>> for StockAlertResponse {
    fn from(alerts: Vec<StockAlert>) -> Self {
        Self {
            count: alerts.len(),
            alerts,
        }
    }
}
