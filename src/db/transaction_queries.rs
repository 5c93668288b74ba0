use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{NewTransaction, Transaction};

pub async fn insert(
    pool: &PgPool,
    portfolio_id: Uuid,
    input: &NewTransaction,
) -> Result<Transaction, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(
        r#"
        INSERT INTO transactions (
            id, portfolio_id, symbol, transaction_type, quantity,
            price, fees, total_amount, executed_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(portfolio_id)
    .bind(&input.symbol)
    .bind(input.side.as_str())
    .bind(input.quantity)
    .bind(input.price)
    .bind(input.fees)
    .bind(input.total_amount)
    .bind(input.executed_at)
    .fetch_one(pool)
    .await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<Transaction>, sqlx::Error> {
    sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_all(pool: &PgPool, portfolio_id: Uuid) -> Result<Vec<Transaction>, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(
        "SELECT * FROM transactions
         WHERE portfolio_id = $1
         ORDER BY executed_at DESC, created_at DESC",
    )
    .bind(portfolio_id)
    .fetch_all(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
