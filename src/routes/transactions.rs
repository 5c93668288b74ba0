use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{CreateTransaction, Transaction};
use crate::services::transaction_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/portfolios/:id/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/transactions/:id",
            get(get_transaction).delete(delete_transaction),
        )
}

pub async fn list_transactions(
    State(state): State<AppState>,
    Path(portfolio_id): Path<Uuid>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    info!("GET /api/portfolios/{}/transactions - Fetching transactions", portfolio_id);
    let transactions = transaction_service::list(state.store.as_ref(), portfolio_id).await?;
    Ok(Json(transactions))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    Path(portfolio_id): Path<Uuid>,
    Json(data): Json<CreateTransaction>,
) -> Result<Json<Transaction>, AppError> {
    info!(
        "POST /api/portfolios/{}/transactions - Recording {} {}",
        portfolio_id,
        data.side.as_str(),
        data.symbol
    );
    let transaction = transaction_service::create(state.store.as_ref(), portfolio_id, data)
        .await
        .map_err(|e| {
            error!("Failed to record transaction for portfolio {}: {}", portfolio_id, e);
            e
        })?;
    Ok(Json(transaction))
}

pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Transaction>, AppError> {
    info!("GET /api/transactions/{} - Fetching transaction", id);
    let transaction = transaction_service::fetch_one(state.store.as_ref(), id).await?;
    Ok(Json(transaction))
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    info!("DELETE /api/transactions/{} - Deleting transaction", id);
    transaction_service::delete(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
