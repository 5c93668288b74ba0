use chrono::NaiveDate;
use sqlx::{PgExecutor, PgPool};
use tracing::{error, info};

use crate::external::market_data::DailyBar;
use crate::models::history::{latest_per_symbol, split_valid_bars};
use crate::models::{SaveReport, StockHistoryEntry};

/// Most recent `limit` bars in the range, returned oldest first.
pub async fn fetch_range(
    pool: &PgPool,
    symbol: &str,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    limit: i64,
) -> Result<Vec<StockHistoryEntry>, sqlx::Error> {
    sqlx::query_as::<_, StockHistoryEntry>(
        r#"
        SELECT symbol, date, open, high, low, close, volume, adj_close
        FROM stock_history
        WHERE symbol = $1
          AND ($2::DATE IS NULL OR date >= $2)
          AND ($3::DATE IS NULL OR date <= $3)
        ORDER BY date DESC
        LIMIT $4
        "#,
    )
    .bind(symbol)
    .bind(from)
    .bind(to)
    .bind(limit)
    .fetch_all(pool)
    .await
    .map(|mut entries| {
        entries.reverse();
        entries
    })
}

async fn upsert_entry<'e, E>(executor: E, entry: &StockHistoryEntry) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO stock_history (symbol, date, open, high, low, close, volume, adj_close)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (symbol, date)
        DO UPDATE SET
            open = EXCLUDED.open,
            high = EXCLUDED.high,
            low = EXCLUDED.low,
            close = EXCLUDED.close,
            volume = EXCLUDED.volume,
            adj_close = EXCLUDED.adj_close
        "#,
    )
    .bind(&entry.symbol)
    .bind(entry.date)
    .bind(entry.open)
    .bind(entry.high)
    .bind(entry.low)
    .bind(entry.close)
    .bind(entry.volume)
    .bind(entry.adj_close)
    .execute(executor)
    .await?;
    Ok(())
}

/// Upserts every entry in one transaction. Each symbol must already exist in
/// `stocks`.
pub async fn upsert_many(pool: &PgPool, entries: &[StockHistoryEntry]) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    for entry in entries {
        upsert_entry(&mut *tx, entry).await.map_err(|e| {
            error!(
                "Failed to upsert history bar for {} on {}: {}",
                entry.symbol, entry.date, e
            );
            e
        })?;
    }

    tx.commit().await?;
    Ok(entries.len() as u64)
}

/// Stores a provider batch: refreshes each symbol's last price from its
/// latest bar, then upserts every bar with a parseable date, all in one
/// transaction. Unparseable dates are left out and reported.
pub async fn save_quote_batch(pool: &PgPool, bars: &[DailyBar]) -> Result<SaveReport, sqlx::Error> {
    let (entries, skipped) = split_valid_bars(bars);
    if entries.is_empty() {
        return Ok(SaveReport { stored: 0, skipped });
    }

    let mut tx = pool.begin().await.map_err(|e| {
        error!("Failed to start transaction for quote batch: {}", e);
        e
    })?;

    for (symbol, latest) in latest_per_symbol(&entries) {
        sqlx::query(
            r#"
            INSERT INTO stocks (symbol, name, last_price)
            VALUES ($1, $1, $2)
            ON CONFLICT (symbol)
            DO UPDATE SET last_price = EXCLUDED.last_price, updated_at = NOW()
            "#,
        )
        .bind(symbol)
        .bind(latest.close)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!("Failed to insert/update stock {}: {}", symbol, e);
            e
        })?;
    }

    for entry in &entries {
        upsert_entry(&mut *tx, entry).await.map_err(|e| {
            error!(
                "Failed to save stock history entry for {} on {}: {}",
                entry.symbol, entry.date, e
            );
            e
        })?;
    }

    tx.commit().await?;

    if !skipped.is_empty() {
        info!("Skipped {} bars with unparseable dates", skipped.len());
    }

    Ok(SaveReport {
        stored: entries.len(),
        skipped,
    })
}
