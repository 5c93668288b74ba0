use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::stock::validate_symbol;
use crate::models::{CreateAlertRequest, StockAlert, StockAlertResponse, UpdateAlertRequest};
use crate::store::StockStore;

fn validate_target_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(AppError::Validation("Target price must be > 0".into()));
    }
    Ok(())
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Alert {} not found", id))
}

pub async fn list(store: &dyn StockStore, user_id: Uuid) -> Result<StockAlertResponse, AppError> {
    let alerts = store.list_alerts(user_id).await?;
    Ok(alerts.into())
}

pub async fn fetch_one(store: &dyn StockStore, id: Uuid) -> Result<StockAlert, AppError> {
    store.get_alert(id).await?.ok_or_else(|| not_found(id))
}

pub async fn create(
    store: &dyn StockStore,
    user_id: Uuid,
    input: CreateAlertRequest,
) -> Result<StockAlert, AppError> {
    let symbol = validate_symbol(&input.symbol)?;
    validate_target_price(input.target_price)?;

    let alert = store
        .create_alert(user_id, &symbol, input.alert_type, input.target_price)
        .await?;
    Ok(alert)
}

pub async fn update(
    store: &dyn StockStore,
    id: Uuid,
    input: UpdateAlertRequest,
) -> Result<StockAlert, AppError> {
    if input.is_empty() {
        return Err(AppError::Validation("No fields to update".into()));
    }
    if let Some(price) = input.target_price {
        validate_target_price(price)?;
    }

    store.update_alert(id, &input).await?.ok_or_else(|| not_found(id))
}

pub async fn delete(store: &dyn StockStore, id: Uuid) -> Result<(), AppError> {
    if store.delete_alert(id).await? {
        Ok(())
    } else {
        Err(not_found(id))
    }
}

/// Stamps the alert as fired now and deactivates it. Evaluating prices
/// against alerts happens outside this service.
pub async fn trigger(store: &dyn StockStore, id: Uuid) -> Result<StockAlert, AppError> {
    let alert = store
        .trigger_alert(id, Utc::now())
        .await?
        .ok_or_else(|| not_found(id))?;
    info!("Alert {} for {} marked as triggered", alert.id, alert.symbol);
    Ok(alert)
}
