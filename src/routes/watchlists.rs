use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{AddToWatchlist, StockWatchlist, StockWatchlistResponse};
use crate::services::watchlist_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/users/:user_id/watchlist",
            get(get_watchlist).post(add_to_watchlist),
        )
        .route("/users/:user_id/watchlist/:symbol", delete(remove_from_watchlist))
}

pub async fn get_watchlist(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<StockWatchlistResponse>, AppError> {
    info!("GET /api/users/{}/watchlist - Fetching watchlist", user_id);
    let watchlist = watchlist_service::list(state.store.as_ref(), user_id).await?;
    Ok(Json(watchlist))
}

pub async fn add_to_watchlist(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(data): Json<AddToWatchlist>,
) -> Result<Json<StockWatchlist>, AppError> {
    info!("POST /api/users/{}/watchlist - Adding {}", user_id, data.symbol);
    let row = watchlist_service::add(state.store.as_ref(), user_id, &data.symbol)
        .await
        .map_err(|e| {
            error!("Failed to add {} to watchlist: {}", data.symbol, e);
            e
        })?;
    Ok(Json(row))
}

pub async fn remove_from_watchlist(
    State(state): State<AppState>,
    Path((user_id, symbol)): Path<(Uuid, String)>,
) -> Result<StatusCode, AppError> {
    info!("DELETE /api/users/{}/watchlist/{} - Removing symbol", user_id, symbol);
    watchlist_service::remove(state.store.as_ref(), user_id, &symbol).await?;
    Ok(StatusCode::NO_CONTENT)
}
