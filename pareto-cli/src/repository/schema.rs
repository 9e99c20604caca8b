//! Sales table schema

use anyhow::{Context, Result};
use sqlx::SqlitePool;

pub const SALES_TABLE: &str = "VENTES";

/// `VNT_PRICE` holds hundredths: SQLite has no fixed-point type, and a
/// DECIMAL(8,2) tops out at 999999.99.
const CREATE_SALES_TABLE: &str = r#"
    CREATE TABLE VENTES (
        CLI_ID    INTEGER  NOT NULL,
        VNT_DATE  DATE     NOT NULL,
        PRD_ID    INTEGER  NOT NULL,
        VNT_COUNT SMALLINT NOT NULL CHECK (VNT_COUNT BETWEEN 0 AND 32767),
        VNT_PRICE INTEGER  NOT NULL CHECK (VNT_PRICE BETWEEN 0 AND 99999999),
        UNIQUE (CLI_ID, VNT_DATE, PRD_ID)
    )
"#;

/// Create the sales table unless it already exists.
///
/// Returns `true` when the table was created by this call.
pub async fn ensure_sales_table(pool: &SqlitePool) -> Result<bool> {
    let mut tx = pool.begin().await.context("Failed to begin transaction")?;

    let (existing,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(SALES_TABLE)
            .fetch_one(&mut *tx)
            .await
            .context("Failed to look up sales table")?;

    if existing > 0 {
        log::debug!("Table {} already exists", SALES_TABLE);
        return Ok(false);
    }

    sqlx::query(CREATE_SALES_TABLE)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to create table {}", SALES_TABLE))?;

    tx.commit().await.context("Failed to commit transaction")?;

    log::info!("Created table {}", SALES_TABLE);
    Ok(true)
}
