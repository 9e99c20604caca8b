//! Sales concentration analysis
//!
//! Pure functions over per-product totals: ranking, Pareto bucketing and the
//! top-contributors prefix. Storage and spreadsheet I/O live elsewhere.

pub mod models;
pub mod pareto;
pub mod top_products;

pub use models::{ParetoRow, ProductTotals, TopProductRow};
pub use pareto::pareto_rows;
pub use top_products::top_products;

use rust_decimal::{Decimal, RoundingStrategy};

/// Products by revenue, highest first; equal revenue falls back to
/// ascending product id so the order never depends on storage order.
pub fn rank_by_revenue(totals: &[ProductTotals]) -> Vec<&ProductTotals> {
    let mut ranked: Vec<&ProductTotals> = totals.iter().collect();
    ranked.sort_by(|a, b| {
        b.revenue
            .cmp(&a.revenue)
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    ranked
}

/// `part / total × 100`, rounded half away from zero to 2 places.
/// `total` must be non-zero.
fn percent_of(part: Decimal, total: Decimal) -> Decimal {
    (part * Decimal::ONE_HUNDRED / total)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
pub(crate) fn totals(entries: &[(i32, i64, &str)]) -> Vec<ProductTotals> {
    use std::str::FromStr;

    entries
        .iter()
        .map(|(product_id, units, revenue)| ProductTotals {
            product_id: *product_id,
            units: *units,
            revenue: Decimal::from_str(revenue).unwrap(),
        })
        .collect()
}
