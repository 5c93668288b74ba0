use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::market::DEFAULT_MOVERS;
use crate::models::{MarketSummary, SectorPerformance};
use crate::services::market_service;
use crate::state::AppState;

const MAX_MOVERS: usize = 50;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/market/summary", get(get_summary))
        .route("/market/sectors", get(get_sectors))
}

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    movers: Option<usize>,
}

pub async fn get_summary(
    State(state): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> Result<Json<MarketSummary>, AppError> {
    let movers = params.movers.unwrap_or(DEFAULT_MOVERS).min(MAX_MOVERS);
    info!("GET /api/market/summary - Building market summary (top {})", movers);
    let summary = market_service::summary(state.store.as_ref(), movers).await?;
    Ok(Json(summary))
}

pub async fn get_sectors(State(state): State<AppState>) -> Result<Json<Vec<SectorPerformance>>, AppError> {
    info!("GET /api/market/sectors - Aggregating sector performance");
    let sectors = market_service::sectors(state.store.as_ref()).await?;
    Ok(Json(sectors))
}
