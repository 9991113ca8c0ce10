use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Summary scalars of one record subset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct PeriodAggregate {
    /// Total quantity sold
    pub quantity: i64,
    /// Number of order lines
    pub orders: i64,
    /// Sum of total amounts
    pub revenue: Decimal,
    /// Sum of profit amounts
    pub profit: Decimal,
    /// profit / revenue * 100; `None` when revenue is zero
    pub profit_ratio: Option<Decimal>,
}

/// How a variance was derived from the two periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VarianceConvention {
    /// comparison - current
    ComparisonMinusCurrent,
    /// current - comparison
    CurrentMinusComparison,
}

/// Per-metric variances between the comparison and the current month.
///
/// Quantity, revenue, profit and profit ratio are comparison - current;
/// the order count is current - comparison. The sign of each is reported
/// in the matching `*_convention` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MetricVariances {
    pub quantity: i64,
    pub quantity_convention: VarianceConvention,
    pub orders: i64,
    pub orders_convention: VarianceConvention,
    pub revenue: Decimal,
    pub revenue_convention: VarianceConvention,
    pub profit: Decimal,
    pub profit_convention: VarianceConvention,
    /// Undefined when either period has zero revenue
    pub profit_ratio: Option<Decimal>,
    pub profit_ratio_convention: VarianceConvention,
}

/// The selected month against its comparison month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PeriodComparison {
    pub current_month: u32,
    /// Equals `current_month` when the first month of the range is selected
    pub comparison_month: u32,
    pub current: PeriodAggregate,
    pub comparison: PeriodAggregate,
    pub variances: MetricVariances,
}
