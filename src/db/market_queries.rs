use sqlx::PgPool;

use crate::models::{PriceChange, SectorPerformance};

// Each symbol's latest bar paired with the bar before it.
const LATEST_CHANGES_CTE: &str = r#"
    WITH ranked AS (
        SELECT symbol, date, close,
               ROW_NUMBER() OVER (PARTITION BY symbol ORDER BY date DESC) AS rn
        FROM stock_history
    ),
    changes AS (
        SELECT cur.symbol,
               cur.date,
               cur.close,
               prev.close AS previous_close,
               COALESCE((cur.close - prev.close) / NULLIF(prev.close, 0) * 100, 0) AS change_pct
        FROM ranked cur
        JOIN ranked prev ON prev.symbol = cur.symbol AND prev.rn = 2
        WHERE cur.rn = 1
    )
"#;

pub async fn latest_changes(pool: &PgPool) -> Result<Vec<PriceChange>, sqlx::Error> {
    let sql = format!(
        "{LATEST_CHANGES_CTE}
        SELECT symbol, date, close, previous_close, change_pct
        FROM changes
        ORDER BY change_pct DESC, symbol ASC"
    );

    sqlx::query_as::<_, PriceChange>(&sql).fetch_all(pool).await
}

pub async fn sector_performance(pool: &PgPool) -> Result<Vec<SectorPerformance>, sqlx::Error> {
    let sql = format!(
        "{LATEST_CHANGES_CTE}
        SELECT COALESCE(s.sector, 'Unknown') AS sector,
               COUNT(*) AS stock_count,
               AVG(c.change_pct) AS avg_change_pct,
               SUM(s.market_cap)::BIGINT AS total_market_cap
        FROM stocks s
        LEFT JOIN changes c ON c.symbol = s.symbol
        GROUP BY COALESCE(s.sector, 'Unknown')
        ORDER BY avg_change_pct DESC NULLS LAST, sector ASC"
    );

    sqlx::query_as::<_, SectorPerformance>(&sql).fetch_all(pool).await
}
