//! Command handlers
//!
//! Every handler opens one storage session, runs its steps in order and
//! closes the session before returning, whether the steps succeeded or not.

use anyhow::{Context, Result};
use calamine::Data;
use colored::*;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::excel;
use crate::import::{self, ImportSummary};
use crate::repository::{self, sales::count_sales};
use crate::services::analysis;

/// init → import → Pareto report → top products report
pub async fn handle_run(config: &Config) -> Result<()> {
    let rows = excel::read_first_sheet(&config.input)?;
    let pool = repository::connect(&config.database_url).await?;

    let result = run_pipeline(&pool, config, &rows).await;
    pool.close().await;
    result
}

pub async fn handle_init(config: &Config) -> Result<()> {
    let pool = repository::connect(&config.database_url).await?;

    let result = repository::ensure_sales_table(&pool).await;
    pool.close().await;

    if result? {
        println!("{} table {}", "Created".green(), repository::SALES_TABLE.bold());
    } else {
        println!("Table {} already exists", repository::SALES_TABLE.bold());
    }
    Ok(())
}

pub async fn handle_import(config: &Config) -> Result<()> {
    let rows = excel::read_first_sheet(&config.input)?;
    let pool = repository::connect(&config.database_url).await?;

    let result = import_pipeline(&pool, config, &rows).await;
    pool.close().await;
    result
}

pub async fn handle_pareto(config: &Config) -> Result<()> {
    let pool = repository::connect(&config.database_url).await?;

    let result = export_pareto(&pool, config).await;
    pool.close().await;
    result
}

pub async fn handle_top(config: &Config) -> Result<()> {
    let pool = repository::connect(&config.database_url).await?;

    let result = export_top_products(&pool, config).await;
    pool.close().await;
    result
}

async fn run_pipeline(pool: &SqlitePool, config: &Config, rows: &[Vec<Data>]) -> Result<()> {
    import_pipeline(pool, config, rows).await?;
    export_pareto(pool, config).await?;
    export_top_products(pool, config).await?;
    Ok(())
}

async fn import_pipeline(pool: &SqlitePool, config: &Config, rows: &[Vec<Data>]) -> Result<()> {
    repository::ensure_sales_table(pool).await?;
    import_and_report(pool, config, rows).await?;
    Ok(())
}

async fn import_and_report(
    pool: &SqlitePool,
    config: &Config,
    rows: &[Vec<Data>],
) -> Result<ImportSummary> {
    let summary = import::import_rows(pool, rows).await?;
    let stored = count_sales(pool).await?;

    println!(
        "{} {}: {} inserted, {} already present, {} skipped ({} rows stored)",
        "Imported".green(),
        config.input.display().to_string().cyan(),
        summary.inserted.to_string().bold(),
        summary.duplicates,
        if summary.skipped > 0 {
            summary.skipped.to_string().yellow()
        } else {
            summary.skipped.to_string().normal()
        },
        stored
    );
    Ok(summary)
}

async fn export_pareto(pool: &SqlitePool, config: &Config) -> Result<()> {
    let totals = repository::fetch_product_totals(pool).await?;
    let rows = analysis::pareto_rows(&totals);

    excel::write_pareto_report(&rows, &config.pareto_output, config.pareto_chart)?;

    println!(
        "{} Pareto report ({} steps, {} products) to {}",
        "Wrote".green(),
        rows.len(),
        totals.len(),
        config.pareto_output.display().to_string().cyan()
    );
    Ok(())
}

/// Exact share for the threshold test. Any target above 1 selects nothing and
/// any target at or below 0 selects the top product, so both ends are clamped
/// into what `Decimal` can hold.
fn target_share(target_percent: f64) -> Result<Decimal> {
    Decimal::try_from(target_percent.clamp(-1.0, 2.0))
        .with_context(|| format!("Invalid target percent: {}", target_percent))
}

async fn export_top_products(pool: &SqlitePool, config: &Config) -> Result<()> {
    let target = target_share(config.target_percent)?;

    let totals = repository::fetch_product_totals(pool).await?;
    let rows = analysis::top_products(&totals, target);

    excel::write_top_products_report(&rows, &config.top_products_output)?;

    println!(
        "{} top products report ({} of {} products reach {:.2}% of sales) to {}",
        "Wrote".green(),
        rows.len(),
        totals.len(),
        config.target_percent * 100.0,
        config.top_products_output.display().to_string().cyan()
    );
    Ok(())
}
