//! Repository layer for the sales database

pub mod sales;
pub mod schema;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

pub use sales::{fetch_product_totals, insert_sale_if_absent};
pub use schema::{SALES_TABLE, ensure_sales_table};

/// Open the single storage session used for a whole run.
///
/// The pool holds exactly one connection that never expires, so an
/// in-memory database lives as long as the pool does.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid database URL: {}", database_url))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to connect to database: {}", database_url))?;

    log::debug!("Connected to {}", database_url);
    Ok(pool)
}

#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    let pool = connect("sqlite::memory:").await.unwrap();
    ensure_sales_table(&pool).await.unwrap();
    pool
}
