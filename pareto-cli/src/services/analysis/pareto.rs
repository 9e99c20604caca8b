//! Pareto (80/20) bucketing

use rust_decimal::Decimal;

use super::{ParetoRow, ProductTotals, percent_of, rank_by_revenue};

/// Number of steps in the Pareto report
pub const PARETO_GROUPS: usize = 20;

/// Equal-frequency split of `items` ranked entries into at most `groups`
/// buckets, as SQL's NTILE does: sizes differ by at most one and the
/// earliest buckets take the remainder. Empty buckets are omitted.
pub fn group_sizes(items: usize, groups: usize) -> Vec<usize> {
    if groups == 0 {
        return Vec::new();
    }
    let base = items / groups;
    let remainder = items % groups;
    (0..groups)
        .map(|g| if g < remainder { base + 1 } else { base })
        .take_while(|&size| size > 0)
        .collect()
}

/// Cumulative share of units and revenue per Pareto step.
///
/// Products are ranked by revenue (see [`rank_by_revenue`]) and split into
/// [`PARETO_GROUPS`] buckets. Returns no rows when there is nothing to
/// divide by: no products, no units or no revenue.
pub fn pareto_rows(totals: &[ProductTotals]) -> Vec<ParetoRow> {
    let ranked = rank_by_revenue(totals);
    let total_units: i64 = ranked.iter().map(|p| p.units).sum();
    let total_revenue: Decimal = ranked.iter().map(|p| p.revenue).sum();

    if total_units == 0 || total_revenue.is_zero() {
        log::warn!(
            "No sales to analyse ({} products, {} units, revenue {}); Pareto report will be empty",
            ranked.len(),
            total_units,
            total_revenue
        );
        return Vec::new();
    }

    let total_units = Decimal::from(total_units);
    let mut rows = Vec::with_capacity(PARETO_GROUPS);
    let mut remaining = ranked.as_slice();
    let mut running_units: i64 = 0;
    let mut running_revenue = Decimal::ZERO;

    for (idx, size) in group_sizes(ranked.len(), PARETO_GROUPS).into_iter().enumerate() {
        let (bucket, rest) = remaining.split_at(size);
        remaining = rest;

        running_units += bucket.iter().map(|p| p.units).sum::<i64>();
        running_revenue += bucket.iter().map(|p| p.revenue).sum::<Decimal>();

        rows.push(ParetoRow {
            group: idx as u32 + 1,
            cumulative_percent_count: percent_of(Decimal::from(running_units), total_units),
            cumulative_percent_sales: percent_of(running_revenue, total_revenue),
        });
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::analysis::totals;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_group_sizes() {
        assert_eq!(group_sizes(0, 20), Vec::<usize>::new());
        assert_eq!(group_sizes(3, 20), vec![1, 1, 1]);
        assert_eq!(group_sizes(20, 20), vec![1; 20]);

        let sizes = group_sizes(45, 20);
        assert_eq!(sizes.len(), 20);
        assert_eq!(&sizes[..5], &[3; 5]);
        assert_eq!(&sizes[5..], &[2; 15]);
    }

    #[test]
    fn test_group_sizes_partition_evenly() {
        for items in 0..=137 {
            let sizes = group_sizes(items, PARETO_GROUPS);
            assert_eq!(sizes.iter().sum::<usize>(), items);
            assert_eq!(sizes.len(), items.min(PARETO_GROUPS));
            if let (Some(max), Some(min)) = (sizes.iter().max(), sizes.iter().min()) {
                assert!(max - min <= 1, "{items} items: {sizes:?}");
            }
            assert!(sizes.windows(2).all(|w| w[0] >= w[1]), "{items} items: {sizes:?}");
        }
    }

    #[test]
    fn test_fewer_products_than_groups() {
        let products = totals(&[(1, 1, "10.00"), (2, 1, "40.00"), (3, 2, "30.00"), (4, 1, "20.00")]);
        let rows = pareto_rows(&products);

        // Ranked 2, 3, 4, 1: units 1, 2, 1, 1 of 5
        let expected = [
            (1, "20.00", "40.00"),
            (2, "60.00", "70.00"),
            (3, "80.00", "90.00"),
            (4, "100.00", "100.00"),
        ];
        assert_eq!(rows.len(), expected.len());
        for (row, (group, count, sales)) in rows.iter().zip(expected) {
            assert_eq!(row.group, group);
            assert_eq!(row.cumulative_percent_count, dec(count));
            assert_eq!(row.cumulative_percent_sales, dec(sales));
        }
    }

    #[test]
    fn test_rounded_shares() {
        let products = totals(&[(1, 1, "1.00"), (2, 1, "1.00"), (3, 1, "1.00")]);
        let sales: Vec<Decimal> = pareto_rows(&products)
            .iter()
            .map(|r| r.cumulative_percent_sales)
            .collect();
        assert_eq!(sales, vec![dec("33.33"), dec("66.67"), dec("100.00")]);
    }

    #[test]
    fn test_many_products_are_monotonic_and_end_at_100() {
        let entries: Vec<(i32, i64, String)> = (1..=57)
            .map(|id| (id, (id as i64 % 7) + 1, format!("{}.{:02}", (id * 37) % 500, id % 100)))
            .collect();
        let borrowed: Vec<(i32, i64, &str)> =
            entries.iter().map(|(id, u, r)| (*id, *u, r.as_str())).collect();
        let rows = pareto_rows(&totals(&borrowed));

        assert_eq!(rows.len(), PARETO_GROUPS);
        assert_eq!(
            rows.iter().map(|r| r.group).collect::<Vec<_>>(),
            (1..=20).collect::<Vec<u32>>()
        );
        for pair in rows.windows(2) {
            assert!(pair[0].cumulative_percent_count <= pair[1].cumulative_percent_count);
            assert!(pair[0].cumulative_percent_sales <= pair[1].cumulative_percent_sales);
        }
        let last = rows.last().unwrap();
        assert_eq!(last.cumulative_percent_count, Decimal::ONE_HUNDRED);
        assert_eq!(last.cumulative_percent_sales, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_sales_share_follows_revenue_rank() {
        // 40 products, revenue 1..=40: the first step holds the top two
        let entries: Vec<(i32, i64, String)> =
            (1..=40).map(|id| (id, 1, format!("{}.00", id))).collect();
        let borrowed: Vec<(i32, i64, &str)> =
            entries.iter().map(|(id, u, r)| (*id, *u, r.as_str())).collect();
        let rows = pareto_rows(&totals(&borrowed));

        // (40 + 39) / 820
        assert_eq!(rows[0].cumulative_percent_sales, dec("9.63"));
        assert_eq!(rows[0].cumulative_percent_count, dec("5.00"));
    }

    #[test]
    fn test_empty_or_zero_totals_give_no_rows() {
        assert!(pareto_rows(&[]).is_empty());
        assert!(pareto_rows(&totals(&[(1, 0, "0.00")])).is_empty());
        assert!(pareto_rows(&totals(&[(1, 5, "0.00"), (2, 1, "0.00")])).is_empty());
    }
}
