//! Sales rows: insert-if-absent and per-product aggregates

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use sqlx::{SqliteConnection, SqlitePool};

use crate::import::SalesRecord;
use crate::services::analysis::ProductTotals;

/// Insert a sale unless its (customer, date, product) key is already stored.
///
/// Returns `true` if a row was written, `false` if the key existed.
pub async fn insert_sale_if_absent(
    conn: &mut SqliteConnection,
    record: &SalesRecord,
) -> Result<bool> {
    let result = sqlx::query(
        "INSERT INTO VENTES (CLI_ID, VNT_DATE, PRD_ID, VNT_COUNT, VNT_PRICE)
         VALUES (?, ?, ?, ?, ?)
         ON CONFLICT(CLI_ID, VNT_DATE, PRD_ID)
         DO NOTHING",
    )
    .bind(record.customer_id)
    .bind(record.sale_date)
    .bind(record.product_id)
    .bind(record.quantity)
    .bind(record.price_hundredths()?)
    .execute(conn)
    .await
    .with_context(|| {
        format!(
            "Failed to insert sale (customer {}, {}, product {})",
            record.customer_id, record.sale_date, record.product_id
        )
    })?;

    Ok(result.rows_affected() == 1)
}

/// Units sold and revenue per product, ordered by product id
pub async fn fetch_product_totals(pool: &SqlitePool) -> Result<Vec<ProductTotals>> {
    let rows: Vec<(i32, i64, i64)> = sqlx::query_as(
        "SELECT PRD_ID, SUM(VNT_COUNT), SUM(VNT_COUNT * VNT_PRICE)
         FROM VENTES
         GROUP BY PRD_ID
         ORDER BY PRD_ID",
    )
    .fetch_all(pool)
    .await
    .context("Failed to aggregate sales per product")?;

    Ok(rows
        .into_iter()
        .map(|(product_id, units, revenue_hundredths)| ProductTotals {
            product_id,
            units,
            revenue: Decimal::new(revenue_hundredths, 2),
        })
        .collect())
}

/// Number of stored sales rows
pub async fn count_sales(pool: &SqlitePool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM VENTES")
        .fetch_one(pool)
        .await
        .context("Failed to count sales")?;
    Ok(count)
}
