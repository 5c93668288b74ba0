use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{PortfolioPosition, UpdatePosition, UpsertPosition};

/// Creates the position, or replaces quantity and cost of the existing one
/// for the same portfolio and symbol.
pub async fn upsert(
    pool: &PgPool,
    portfolio_id: Uuid,
    input: &UpsertPosition,
) -> Result<PortfolioPosition, sqlx::Error> {
    sqlx::query_as::<_, PortfolioPosition>(
        "INSERT INTO portfolio_positions (id, portfolio_id, symbol, quantity, average_cost)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (portfolio_id, symbol)
         DO UPDATE SET
             quantity = EXCLUDED.quantity,
             average_cost = EXCLUDED.average_cost,
             updated_at = NOW()
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(portfolio_id)
    .bind(&input.symbol)
    .bind(input.quantity)
    .bind(input.average_cost)
    .fetch_one(pool)
    .await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<PortfolioPosition>, sqlx::Error> {
    sqlx::query_as::<_, PortfolioPosition>("SELECT * FROM portfolio_positions WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_all(
    pool: &PgPool,
    portfolio_id: Uuid,
) -> Result<Vec<PortfolioPosition>, sqlx::Error> {
    sqlx::query_as::<_, PortfolioPosition>(
        "SELECT * FROM portfolio_positions WHERE portfolio_id = $1 ORDER BY symbol ASC",
    )
    .bind(portfolio_id)
    .fetch_all(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    input: &UpdatePosition,
) -> Result<Option<PortfolioPosition>, sqlx::Error> {
    sqlx::query_as::<_, PortfolioPosition>(
        "UPDATE portfolio_positions
         SET quantity = COALESCE($2, quantity),
             average_cost = COALESCE($3, average_cost),
             updated_at = NOW()
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(input.quantity)
    .bind(input.average_cost)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM portfolio_positions WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
