use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{CreatePortfolio, Portfolio, PortfolioDetail, UpdatePortfolio};
use crate::services::portfolio_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/users/:user_id/portfolios",
            get(fetch_portfolios).post(create_portfolio),
        )
        .route(
            "/portfolios/:id",
            get(get_portfolio).put(update_portfolio).delete(delete_portfolio),
        )
}

pub async fn create_portfolio(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(data): Json<CreatePortfolio>,
) -> Result<Json<Portfolio>, AppError> {
    info!("POST /api/users/{}/portfolios - Creating new portfolio", user_id);
    let portfolio = portfolio_service::create(state.store.as_ref(), user_id, data)
        .await
        .map_err(|e| {
            error!("Failed to create portfolio: {}", e);
            e
        })?;
    Ok(Json(portfolio))
}

pub async fn fetch_portfolios(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Portfolio>>, AppError> {
    info!("GET /api/users/{}/portfolios - Fetching portfolios", user_id);
    let portfolios = portfolio_service::fetch_all(state.store.as_ref(), user_id)
        .await
        .map_err(|e| {
            error!("Failed to fetch portfolios: {}", e);
            e
        })?;
    Ok(Json(portfolios))
}

pub async fn get_portfolio(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PortfolioDetail>, AppError> {
    info!("GET /api/portfolios/{} - Fetching portfolio", id);
    let detail = portfolio_service::fetch_detail(state.store.as_ref(), id).await?;
    Ok(Json(detail))
}

pub async fn update_portfolio(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdatePortfolio>,
) -> Result<Json<Portfolio>, AppError> {
    info!("PUT /api/portfolios/{} - Updating portfolio", id);
    let portfolio = portfolio_service::update(state.store.as_ref(), id, data)
        .await
        .map_err(|e| {
            error!("Failed to update portfolio {}: {}", id, e);
            e
        })?;
    Ok(Json(portfolio))
}

pub async fn delete_portfolio(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    info!("DELETE /api/portfolios/{} - Deleting portfolio", id);
    portfolio_service::delete(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
