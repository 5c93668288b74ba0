use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::external::market_data::MarketDataError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::MarketData(MarketDataError::RateLimited(_)) => StatusCode::TOO_MANY_REQUESTS,
            AppError::MarketData(_) | AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));

        if status == StatusCode::TOO_MANY_REQUESTS {
            let mut headers = HeaderMap::new();
            headers.insert("Retry-After", HeaderValue::from_static("60"));
            return (status, headers, body).into_response();
        }

        (status, body).into_response()
    }
}

impl From<String> for AppError {
    fn from(value: String) -> Self {
        AppError::Validation(value)
    }
}
