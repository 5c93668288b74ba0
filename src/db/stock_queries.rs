use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::{SaveStock, Stock, StockScreenerRequest};

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<Stock>, sqlx::Error> {
    sqlx::query_as::<_, Stock>(
        "SELECT * FROM stocks
         ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn fetch_by_symbol(pool: &PgPool, symbol: &str) -> Result<Option<Stock>, sqlx::Error> {
    sqlx::query_as::<_, Stock>("SELECT * FROM stocks WHERE symbol = $1")
        .bind(symbol)
        .fetch_optional(pool)
        .await
}

/// Inserts the stock or overwrites every descriptive field of the existing row.
pub async fn upsert(pool: &PgPool, symbol: &str, input: &SaveStock) -> Result<Stock, sqlx::Error> {
    sqlx::query_as::<_, Stock>(
        r#"
        INSERT INTO stocks (
            symbol, name, last_price, sector, industry, market_cap,
            pe_ratio, dividend_yield, fifty_two_week_high, fifty_two_week_low
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (symbol)
        DO UPDATE SET
            name = EXCLUDED.name,
            last_price = EXCLUDED.last_price,
            sector = EXCLUDED.sector,
            industry = EXCLUDED.industry,
            market_cap = EXCLUDED.market_cap,
            pe_ratio = EXCLUDED.pe_ratio,
            dividend_yield = EXCLUDED.dividend_yield,
            fifty_two_week_high = EXCLUDED.fifty_two_week_high,
            fifty_two_week_low = EXCLUDED.fifty_two_week_low,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(symbol)
    .bind(&input.name)
    .bind(input.last_price)
    .bind(&input.sector)
    .bind(&input.industry)
    .bind(input.market_cap)
    .bind(input.pe_ratio)
    .bind(input.dividend_yield)
    .bind(input.fifty_two_week_high)
    .bind(input.fifty_two_week_low)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, symbol: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM stocks WHERE symbol = $1")
        .bind(symbol)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM stocks")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn screen(pool: &PgPool, filter: &StockScreenerRequest) -> Result<Vec<Stock>, sqlx::Error> {
    let mut query_builder: QueryBuilder<Postgres> =
        QueryBuilder::new("SELECT * FROM stocks WHERE TRUE");

    if let Some(min_price) = filter.min_price {
        query_builder.push(" AND last_price >= ").push_bind(min_price);
    }
    if let Some(max_price) = filter.max_price {
        query_builder.push(" AND last_price <= ").push_bind(max_price);
    }
    if let Some(min_cap) = filter.min_market_cap {
        query_builder.push(" AND market_cap >= ").push_bind(min_cap);
    }
    if let Some(max_cap) = filter.max_market_cap {
        query_builder.push(" AND market_cap <= ").push_bind(max_cap);
    }
    if let Some(min_pe) = filter.min_pe_ratio {
        query_builder.push(" AND pe_ratio >= ").push_bind(min_pe);
    }
    if let Some(max_pe) = filter.max_pe_ratio {
        query_builder.push(" AND pe_ratio <= ").push_bind(max_pe);
    }
    if let Some(sector) = &filter.sector {
        query_builder.push(" AND sector = ").push_bind(sector.clone());
    }
    if let Some(industry) = &filter.industry {
        query_builder.push(" AND industry = ").push_bind(industry.clone());
    }

    // Column and direction come from closed enums, never from raw input.
    let sort_by = filter.sort_by.unwrap_or_default();
    let sort_order = filter.sort_order.unwrap_or_default();
    query_builder
        .push(" ORDER BY ")
        .push(sort_by.column())
        .push(" ")
        .push(sort_order.as_sql())
        .push(" NULLS LAST, symbol ASC");

    query_builder.push(" LIMIT ").push_bind(filter.limit());
    query_builder.push(" OFFSET ").push_bind(filter.offset());

    query_builder
        .build_query_as::<Stock>()
        .fetch_all(pool)
        .await
}
