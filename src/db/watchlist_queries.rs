use sqlx::PgPool;
use uuid::Uuid;

use crate::models::StockWatchlist;

pub async fn fetch_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<StockWatchlist>, sqlx::Error> {
    sqlx::query_as::<_, StockWatchlist>(
        r#"
        SELECT * FROM stock_watchlist
        WHERE user_id = $1
        ORDER BY created_at DESC, symbol ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Adding a symbol that is already watched returns the existing row.
pub async fn add(pool: &PgPool, user_id: Uuid, symbol: &str) -> Result<StockWatchlist, sqlx::Error> {
    sqlx::query_as::<_, StockWatchlist>(
        r#"
        INSERT INTO stock_watchlist (id, user_id, symbol)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, symbol)
        DO UPDATE SET symbol = EXCLUDED.symbol
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(symbol)
    .fetch_one(pool)
    .await
}

pub async fn remove(pool: &PgPool, user_id: Uuid, symbol: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM stock_watchlist WHERE user_id = $1 AND symbol = $2")
        .bind(user_id)
        .bind(symbol)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
