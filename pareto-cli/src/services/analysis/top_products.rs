//! Products making up a target share of sales

use rust_decimal::Decimal;

use super::{ProductTotals, TopProductRow, percent_of, rank_by_revenue};

/// Shortest run of best-selling products whose cumulative revenue reaches
/// `target` (a fraction, 0.8 = 80%) of total revenue.
///
/// Each row carries the cumulative share at its own rank. A target at or
/// below zero yields the top product alone; a target above one, or a total
/// revenue of zero, yields no rows.
pub fn top_products(totals: &[ProductTotals], target: Decimal) -> Vec<TopProductRow> {
    let ranked = rank_by_revenue(totals);
    let total_revenue: Decimal = ranked.iter().map(|p| p.revenue).sum();

    if total_revenue.is_zero() {
        log::warn!(
            "No revenue across {} products; top products report will be empty",
            ranked.len()
        );
        return Vec::new();
    }

    let Some(threshold) = target.checked_mul(total_revenue) else {
        log::warn!("Target {} cannot be reached; top products report will be empty", target);
        return Vec::new();
    };

    let mut rows = Vec::new();
    let mut cumulative = Decimal::ZERO;

    for product in ranked {
        cumulative += product.revenue;
        rows.push(TopProductRow {
            product_id: product.product_id,
            sales_share_percent: percent_of(cumulative, total_revenue),
            total_sales: product.revenue,
        });
        if cumulative >= threshold {
            return rows;
        }
    }

    log::warn!("Target {} cannot be reached; top products report will be empty", target);
    Vec::new()
}
