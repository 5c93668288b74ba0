use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::alert::*;
use crate::services::alert_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/:user_id/alerts", get(list_alerts).post(create_alert))
        .route(
            "/alerts/:id",
            get(get_alert).put(update_alert).delete(delete_alert),
        )
        .route("/alerts/:id/trigger", post(trigger_alert))
}

pub async fn list_alerts(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<StockAlertResponse>, AppError> {
    info!("GET /api/users/{}/alerts - Fetching alerts", user_id);
    let alerts = alert_service::list(state.store.as_ref(), user_id).await?;
    Ok(Json(alerts))
}

pub async fn create_alert(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(data): Json<CreateAlertRequest>,
) -> Result<Json<StockAlert>, AppError> {
    info!("POST /api/users/{}/alerts - Creating alert for {}", user_id, data.symbol);
    let alert = alert_service::create(state.store.as_ref(), user_id, data)
        .await
        .map_err(|e| {
            error!("Failed to create alert: {}", e);
            e
        })?;
    Ok(Json(alert))
}

pub async fn get_alert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StockAlert>, AppError> {
    info!("GET /api/alerts/{} - Fetching alert", id);
    let alert = alert_service::fetch_one(state.store.as_ref(), id).await?;
    Ok(Json(alert))
}

pub async fn update_alert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateAlertRequest>,
) -> Result<Json<StockAlert>, AppError> {
    info!("PUT /api/alerts/{} - Updating alert", id);
    let alert = alert_service::update(state.store.as_ref(), id, data).await?;
    Ok(Json(alert))
}

pub async fn delete_alert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    info!("DELETE /api/alerts/{} - Deleting alert", id);
    alert_service::delete(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn trigger_alert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StockAlert>, AppError> {
    info!("POST /api/alerts/{}/trigger - Marking alert triggered", id);
    let alert = alert_service::trigger(state.store.as_ref(), id).await?;
    Ok(Json(alert))
}
