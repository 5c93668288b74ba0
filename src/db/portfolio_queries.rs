use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::{Portfolio, UpdatePortfolio};

pub async fn fetch_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Portfolio>, sqlx::Error> {
    sqlx::query_as::<_, Portfolio>(
        "SELECT * FROM portfolios
         WHERE user_id = $1
         ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<Portfolio>, sqlx::Error> {
    sqlx::query_as::<_, Portfolio>("SELECT * FROM portfolios WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert(
    pool: &PgPool,
    user_id: Uuid,
    name: &str,
    cash_balance: f64,
) -> Result<Portfolio, sqlx::Error> {
    sqlx::query_as::<_, Portfolio>(
        "INSERT INTO portfolios (id, user_id, name, cash_balance)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(name)
    .bind(cash_balance)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    input: &UpdatePortfolio,
) -> Result<Option<Portfolio>, sqlx::Error> {
    let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE portfolios SET ");

    let mut separated = query_builder.separated(", ");
    let mut has_updates = false;

    if let Some(name) = &input.name {
        separated.push("name = ");
        separated.push_bind_unseparated(name.clone());
        has_updates = true;
    }

    if let Some(cash_balance) = input.cash_balance {
        separated.push("cash_balance = ");
        separated.push_bind_unseparated(cash_balance);
        has_updates = true;
    }

    if !has_updates {
        return fetch_one(pool, id).await;
    }

    query_builder.push(", updated_at = NOW() WHERE id = ");
    query_builder.push_bind(id);
    query_builder.push(" RETURNING *");

    query_builder
        .build_query_as::<Portfolio>()
        .fetch_optional(pool)
        .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM portfolios WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
