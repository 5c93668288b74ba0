use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::alert::*;

// ==============================================================================
// Stock Alert CRUD Operations
// ==============================================================================

pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    symbol: &str,
    direction: AlertDirection,
    target_price: f64,
) -> Result<StockAlert, sqlx::Error> {
    sqlx::query_as::<_, StockAlert>(
        r#"
        INSERT INTO stock_alerts (id, user_id, symbol, alert_type, target_price)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(symbol)
    .bind(direction.as_str())
    .bind(target_price)
    .fetch_one(pool)
    .await
}

pub async fn fetch_one(pool: &PgPool, alert_id: Uuid) -> Result<Option<StockAlert>, sqlx::Error> {
    sqlx::query_as::<_, StockAlert>("SELECT * FROM stock_alerts WHERE id = $1")
        .bind(alert_id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<StockAlert>, sqlx::Error> {
    sqlx::query_as::<_, StockAlert>(
        r#"
        SELECT * FROM stock_alerts
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    alert_id: Uuid,
    input: &UpdateAlertRequest,
) -> Result<Option<StockAlert>, sqlx::Error> {
    let mut query_builder: QueryBuilder<Postgres> =
        QueryBuilder::new("UPDATE stock_alerts SET ");

    let mut separated = query_builder.separated(", ");
    let mut has_updates = false;

    if let Some(direction) = input.alert_type {
        separated.push("alert_type = ");
        separated.push_bind_unseparated(direction.as_str());
        has_updates = true;
    }

    if let Some(target_price) = input.target_price {
        separated.push("target_price = ");
        separated.push_bind_unseparated(target_price);
        has_updates = true;
    }

    if let Some(is_active) = input.is_active {
        separated.push("is_active = ");
        separated.push_bind_unseparated(is_active);
        has_updates = true;
    }

    if !has_updates {
        return fetch_one(pool, alert_id).await;
    }

    query_builder.push(" WHERE id = ");
    query_builder.push_bind(alert_id);
    query_builder.push(" RETURNING *");

    query_builder
        .build_query_as::<StockAlert>()
        .fetch_optional(pool)
        .await
}

pub async fn delete(pool: &PgPool, alert_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM stock_alerts WHERE id = $1")
        .bind(alert_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Records that the alert fired and deactivates it.
pub async fn mark_triggered(
    pool: &PgPool,
    alert_id: Uuid,
    triggered_at: DateTime<Utc>,
) -> Result<Option<StockAlert>, sqlx::Error> {
    sqlx::query_as::<_, StockAlert>(
        r#"
        UPDATE stock_alerts
        SET triggered_at = $2, is_active = FALSE
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(alert_id)
    .bind(triggered_at)
    .fetch_optional(pool)
    .await
}
