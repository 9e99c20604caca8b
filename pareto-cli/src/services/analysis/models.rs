use rust_decimal::Decimal;

/// Units sold and revenue for one product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductTotals {
    pub product_id: i32,
    pub units: i64,
    /// Σ quantity × unit price
    pub revenue: Decimal,
}

/// One step of the Pareto report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParetoRow {
    /// 1-based, in descending revenue order
    pub group: u32,
    pub cumulative_percent_count: Decimal,
    pub cumulative_percent_sales: Decimal,
}

/// One product of the top contributors report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopProductRow {
    pub product_id: i32,
    /// Cumulative share of total sales up to and including this product
    pub sales_share_percent: Decimal,
    pub total_sales: Decimal,
}
