//! Period comparator: the selected month against the month before it.

use common::{MetricVariances, PeriodAggregate, PeriodComparison, VarianceConvention};
use model::SaleRecord;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Records of the working set that fall in exactly `month`.
pub fn records_in_month<'a>(working: &[&'a SaleRecord], month: u32) -> Vec<&'a SaleRecord> {
    working
        .iter()
        .copied()
        .filter(|r| r.month() == month)
        .collect()
}

/// The month compared against `selected`.
///
/// January has no previous month in the same year, so it is compared with
/// itself, which yields zero variance for every metric.
pub fn comparison_month(selected: u32) -> u32 {
    if selected > 1 {
        selected - 1
    } else {
        selected
    }
}

/// Sums quantity, order lines, revenue and profit over `records`.
///
/// An empty subset aggregates to zero with an undefined profit ratio.
pub fn aggregate(records: &[&SaleRecord]) -> PeriodAggregate {
    let quantity = records.iter().map(|r| r.quantity()).sum();
    let orders = records.len() as i64;
    let revenue: Decimal = records.iter().map(|r| r.total()).sum();
    let profit: Decimal = records.iter().map(|r| r.profit()).sum();

    PeriodAggregate {
        quantity,
        orders,
        revenue,
        profit,
        profit_ratio: profit_ratio(profit, revenue),
    }
}

/// profit / revenue * 100, `None` for zero revenue.
pub fn profit_ratio(profit: Decimal, revenue: Decimal) -> Option<Decimal> {
    if revenue.is_zero() {
        return None;
    }
    profit
        .checked_div(revenue)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
}

/// Variances between the two periods, signed per metric (see [`MetricVariances`]).
pub fn variances(current: &PeriodAggregate, comparison: &PeriodAggregate) -> MetricVariances {
    let profit_ratio = match (current.profit_ratio, comparison.profit_ratio) {
        (Some(current), Some(comparison)) => Some(comparison - current),
        _ => None,
    };

    MetricVariances {
        quantity: comparison.quantity - current.quantity,
        quantity_convention: VarianceConvention::ComparisonMinusCurrent,
        orders: current.orders - comparison.orders,
        orders_convention: VarianceConvention::CurrentMinusComparison,
        revenue: comparison.revenue - current.revenue,
        revenue_convention: VarianceConvention::ComparisonMinusCurrent,
        profit: comparison.profit - current.profit,
        profit_convention: VarianceConvention::ComparisonMinusCurrent,
        profit_ratio,
        profit_ratio_convention: VarianceConvention::ComparisonMinusCurrent,
    }
}

/// Aggregates the selected month and its comparison month.
///
/// Both subsets come from the same working set, so they share the year and
/// country filters and differ only by month.
#[instrument(skip(working), fields(working = working.len()))]
pub fn compare_periods(working: &[&SaleRecord], selected_month: u32) -> PeriodComparison {
    let comparison_month = comparison_month(selected_month);
    debug!("Comparing month {} against month {}", selected_month, comparison_month);

    let current = aggregate(&records_in_month(working, selected_month));
    let comparison = aggregate(&records_in_month(working, comparison_month));
    let variances = variances(&current, &comparison);

    PeriodComparison {
        current_month: selected_month,
        comparison_month,
        current,
        comparison,
        variances,
    }
}
