use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{PortfolioPosition, UpdatePosition, UpsertPosition};
use crate::services::position_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/portfolios/:id/positions",
            get(list_positions).post(upsert_position),
        )
        .route(
            "/positions/:id",
            get(get_position).put(update_position).delete(delete_position),
        )
}

pub async fn list_positions(
    State(state): State<AppState>,
    Path(portfolio_id): Path<Uuid>,
) -> Result<Json<Vec<PortfolioPosition>>, AppError> {
    info!("GET /api/portfolios/{}/positions - Fetching positions", portfolio_id);
    let positions = position_service::list(state.store.as_ref(), portfolio_id).await?;
    Ok(Json(positions))
}

pub async fn upsert_position(
    State(state): State<AppState>,
    Path(portfolio_id): Path<Uuid>,
    Json(data): Json<UpsertPosition>,
) -> Result<Json<PortfolioPosition>, AppError> {
    info!("POST /api/portfolios/{}/positions - Saving position", portfolio_id);
    let position = position_service::upsert(state.store.as_ref(), portfolio_id, data)
        .await
        .map_err(|e| {
            error!("Failed to save position for portfolio {}: {}", portfolio_id, e);
            e
        })?;
    Ok(Json(position))
}

pub async fn get_position(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PortfolioPosition>, AppError> {
    info!("GET /api/positions/{} - Fetching position", id);
    let position = position_service::fetch_one(state.store.as_ref(), id).await?;
    Ok(Json(position))
}

pub async fn update_position(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdatePosition>,
) -> Result<Json<PortfolioPosition>, AppError> {
    info!("PUT /api/positions/{} - Updating position", id);
    let position = position_service::update(state.store.as_ref(), id, data).await?;
    Ok(Json(position))
}

pub async fn delete_position(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    info!("DELETE /api/positions/{} - Deleting position", id);
    position_service::delete(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
