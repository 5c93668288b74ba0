use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{HistoryQuery, SaveStock, SkippedBar, Stock, StockHistoryResponse, StockScreenerRequest};
use crate::services::stock_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stocks", get(list_stocks))
        .route("/stocks/screen", post(screen_stocks))
        .route("/stocks/fetch/:symbol", post(fetch_stock_data))
        .route(
            "/stocks/:id",
            get(get_stock).put(save_stock).delete(delete_stock),
        )
        .route("/stocks/:id/history", get(get_history))
}

#[derive(Debug, Serialize)]
pub struct FetchResponse {
    pub message: String,
    pub symbol: String,
    pub count: usize,
    pub skipped: Vec<SkippedBar>,
}

pub async fn list_stocks(State(state): State<AppState>) -> Result<Json<Vec<Stock>>, AppError> {
    info!("GET /api/stocks - Fetching all stocks");
    let stocks = stock_service::list(state.store.as_ref()).await.map_err(|e| {
        error!("Failed to fetch stocks: {}", e);
        e
    })?;
    Ok(Json(stocks))
}

pub async fn get_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Stock>, AppError> {
    info!("GET /api/stocks/{} - Fetching stock", id);
    let stock = stock_service::fetch_one(state.store.as_ref(), &id).await?;
    Ok(Json(stock))
}

#[axum::debug_handler]
pub async fn fetch_stock_data(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<FetchResponse>, AppError> {
    info!("POST /api/stocks/fetch/{} - Fetching daily series", symbol);
    let (symbol, report) =
        stock_service::fetch_and_store(state.store.as_ref(), state.market_data.as_ref(), &symbol)
            .await
            .map_err(|e| {
                error!("Failed to fetch and store {}: {}", symbol, e);
                e
            })?;

    Ok(Json(FetchResponse {
        message: "Stock data fetched and stored".to_string(),
        symbol,
        count: report.stored,
        skipped: report.skipped,
    }))
}

pub async fn save_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(data): Json<SaveStock>,
) -> Result<Json<Stock>, AppError> {
    info!("PUT /api/stocks/{} - Saving stock", id);
    let stock = stock_service::save(state.store.as_ref(), &id, data)
        .await
        .map_err(|e| {
            error!("Failed to save stock {}: {}", id, e);
            e
        })?;
    Ok(Json(stock))
}

pub async fn delete_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    info!("DELETE /api/stocks/{} - Deleting stock", id);
    stock_service::delete(state.store.as_ref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<StockHistoryResponse>, AppError> {
    info!("GET /api/stocks/{}/history - Fetching price history", id);
    let history = stock_service::history(state.store.as_ref(), &id, query).await?;
    Ok(Json(history))
}

pub async fn screen_stocks(
    State(state): State<AppState>,
    Json(filter): Json<StockScreenerRequest>,
) -> Result<Json<Vec<Stock>>, AppError> {
    info!("POST /api/stocks/screen - Screening stocks");
    let stocks = stock_service::screen(state.store.as_ref(), filter).await?;
    Ok(Json(stocks))
}
