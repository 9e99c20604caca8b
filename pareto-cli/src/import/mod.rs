//! Load sales rows from a spreadsheet into the VENTES table
//!
//! Row 0 is a header. Rows that fail to parse are skipped and counted; they
//! never abort the batch. Storage errors do.

mod row;

pub use row::{SalesRecord, parse_row};

use anyhow::{Context, Result};
use calamine::Data;
use sqlx::SqlitePool;

use crate::repository::insert_sale_if_absent;

/// Outcome of one import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Data rows seen (header excluded)
    pub rows_read: usize,
    /// Rows written to storage
    pub inserted: usize,
    /// Valid rows whose key was already stored
    pub duplicates: usize,
    /// Rows rejected by validation
    pub skipped: usize,
}

/// Import every data row of a sheet inside a single transaction
pub async fn import_rows(pool: &SqlitePool, rows: &[Vec<Data>]) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();
    let mut tx = pool.begin().await.context("Failed to begin import transaction")?;

    for (row_idx, row) in rows.iter().enumerate().skip(1) {
        summary.rows_read += 1;

        let record = match parse_row(row) {
            Ok(record) => record,
            Err(e) => {
                // 1-based to match the spreadsheet's row numbers
                log::debug!("Skipping row {}: {}", row_idx + 1, e);
                summary.skipped += 1;
                continue;
            }
        };

        if insert_sale_if_absent(&mut *tx, &record).await? {
            summary.inserted += 1;
        } else {
            summary.duplicates += 1;
        }
    }

    tx.commit().await.context("Failed to commit import transaction")?;

    log::info!(
        "Imported {} rows: {} inserted, {} already present, {} skipped",
        summary.rows_read,
        summary.inserted,
        summary.duplicates,
        summary.skipped
    );
    Ok(summary)
}
