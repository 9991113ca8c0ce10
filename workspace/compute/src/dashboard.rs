use common::{DashboardView, FilterSelection, Notice, SelectionScope};
use model::{RecordSet, SaleRecord};
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::filter::{apply_filters, validate_selection};
use crate::period::{compare_periods, records_in_month};
use crate::views::{
    orders_by_category_and_country, product_rankings, ranked_revenue, records_to_dataframe,
    revenue_by_month, revenue_by_month_and_category,
};

/// Computes every metric, chart series and table for one selection.
///
/// The result depends only on `records` and `selection`; calling it twice with
/// the same inputs yields equal views.
#[instrument(skip(records), fields(records = records.len()))]
pub fn compute_dashboard(records: &RecordSet, selection: &FilterSelection) -> Result<DashboardView> {
    validate_selection(records, selection)?;

    let working = apply_filters(records, selection);
    let period = compare_periods(&working, selection.month);
    let current: Vec<&SaleRecord> = records_in_month(&working, selection.month);

    let working_df = records_to_dataframe(&working)?;
    let current_df = records_to_dataframe(&current)?;

    let revenue_by_month = revenue_by_month(&working_df)?;
    let revenue_by_month_and_category = revenue_by_month_and_category(&working_df)?;
    let revenue_by_country = ranked_revenue(&current_df, "country")?;
    let revenue_by_category = ranked_revenue(&current_df, "category")?;
    let orders_by_category_and_country = orders_by_category_and_country(&current_df)?;
    let (top_products, bottom_products) = product_rankings(&current_df)?;

    let mut notices = Vec::new();
    if working.is_empty() {
        notices.push(Notice::EmptySelection { scope: SelectionScope::WorkingSet });
    }
    if current.is_empty() {
        notices.push(Notice::EmptySelection { scope: SelectionScope::CurrentMonth });
    }
    if period.comparison_month != period.current_month && period.comparison.orders == 0 {
        notices.push(Notice::EmptySelection { scope: SelectionScope::ComparisonMonth });
    }
    if !notices.is_empty() {
        debug!(?notices, "Selection has empty subsets");
    }

    info!(
        "Computed dashboard for {}: {} working records, {} in month {}",
        selection.cache_key(),
        working.len(),
        current.len(),
        selection.month
    );

    Ok(DashboardView {
        selection: selection.clone(),
        period,
        revenue_by_month,
        revenue_by_country,
        revenue_by_month_and_category,
        revenue_by_category,
        orders_by_category_and_country,
        top_products,
        bottom_products,
        notices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComputeError;
    use rust_decimal::Decimal;

    #[allow(clippy::too_many_arguments)]
    fn record(
        year: i32,
        month: u32,
        country: &str,
        category: &str,
        product: &str,
        order: &str,
        quantity: i64,
        total: i64,
        profit: i64,
    ) -> SaleRecord {
        SaleRecord::new(
            year,
            month,
            country,
            category,
            product,
            order,
            quantity,
            Decimal::new(total, 0),
            Decimal::new(profit, 0),
        )
    }

    fn sample() -> RecordSet {
        RecordSet::new(vec![
            record(2024, 1, "US", "A", "p1", "1", 10, 100, 20),
            record(2024, 2, "US", "A", "p1", "2", 5, 50, 10),
            record(2024, 2, "PE", "B", "p2", "3", 2, 30, 6),
            record(2024, 3, "CL", "B", "p3", "4", 1, 15, 3),
            record(2023, 2, "US", "A", "p1", "5", 7, 70, 7),
        ])
    }

    #[test]
    fn test_dashboard_for_second_month() {
        let set = sample();
        let selection = FilterSelection::new(2024, 2, ["US"]);

        let view = compute_dashboard(&set, &selection).unwrap();

        assert_eq!(view.selection, selection);
        assert_eq!(view.period.current_month, 2);
        assert_eq!(view.period.comparison_month, 1);
        assert_eq!(view.period.current.quantity, 5);
        assert_eq!(view.period.current.revenue, Decimal::new(50, 0));
        assert_eq!(view.period.comparison.revenue, Decimal::new(100, 0));
        assert_eq!(view.period.variances.quantity, 5);
        assert_eq!(view.period.variances.revenue, Decimal::new(50, 0));
        assert_eq!(view.period.variances.orders, 0);
        assert_eq!(view.period.current.profit_ratio, Some(Decimal::new(20, 0)));

        assert_eq!(view.revenue_by_month.len(), 2);
        assert_eq!(view.revenue_by_month[0].revenue, 100.0);
        assert_eq!(view.revenue_by_country.len(), 1);
        assert_eq!(view.revenue_by_country[0].label, "US");
        assert_eq!(view.top_products[0].product, "p1");
        assert!(view.notices.is_empty());
    }

    #[test]
    fn test_dashboard_without_country_restriction() {
        let set = sample();
        let view = compute_dashboard(&set, &FilterSelection::new(2024, 2, Vec::<String>::new())).unwrap();

        assert_eq!(view.period.current.orders, 2);
        assert_eq!(view.period.current.revenue, Decimal::new(80, 0));
        let countries: Vec<&str> = view
            .revenue_by_country
            .iter()
            .map(|r| r.label.as_str())
            .collect();
        assert_eq!(countries, vec!["US", "PE"]);
        let facets: Vec<&str> = view
            .orders_by_category_and_country
            .iter()
            .map(|p| p.country.as_str())
            .collect();
        assert_eq!(facets, vec!["PE", "US"]);
        // March is past the selected month.
        assert!(view.revenue_by_month.iter().all(|m| m.month <= 2));
    }

    #[test]
    fn test_dashboard_is_idempotent() {
        let set = sample();
        let selection = FilterSelection::new(2024, 3, Vec::<String>::new());

        let first = compute_dashboard(&set, &selection).unwrap();
        let second = compute_dashboard(&set, &selection).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_selection_notices() {
        let set = sample();

        // Chile only sells in March.
        let view = compute_dashboard(&set, &FilterSelection::new(2024, 2, ["CL"])).unwrap();
        assert!(view.has_notice(SelectionScope::WorkingSet));
        assert!(view.has_notice(SelectionScope::CurrentMonth));
        assert!(view.top_products.is_empty());
        assert_eq!(view.period.current.profit_ratio, None);

        let view = compute_dashboard(&set, &FilterSelection::new(2024, 3, ["CL"])).unwrap();
        assert!(!view.has_notice(SelectionScope::WorkingSet));
        assert!(!view.has_notice(SelectionScope::CurrentMonth));
        // February has no Chilean sales, so March is compared with an empty month.
        assert_eq!(view.period.comparison_month, 2);
        assert!(view.has_notice(SelectionScope::ComparisonMonth));
        assert_eq!(view.period.variances.quantity, -1);

        let view = compute_dashboard(&set, &FilterSelection::new(2024, 3, ["PE"])).unwrap();
        assert!(view.has_notice(SelectionScope::CurrentMonth));
        assert!(!view.has_notice(SelectionScope::ComparisonMonth));
    }

    #[test]
    fn test_comparison_month_notice() {
        let set = RecordSet::new(vec![
            record(2024, 1, "US", "A", "p1", "1", 1, 10, 1),
            record(2024, 3, "US", "A", "p1", "2", 1, 10, 1),
        ]);

        let view = compute_dashboard(&set, &FilterSelection::new(2024, 3, Vec::<String>::new())).unwrap();

        assert_eq!(view.period.comparison_month, 2);
        assert!(view.has_notice(SelectionScope::ComparisonMonth));
        assert_eq!(view.period.comparison.profit_ratio, None);
        assert_eq!(view.period.variances.profit_ratio, None);
    }

    #[test]
    fn test_invalid_selection_is_rejected() {
        let set = sample();

        let err = compute_dashboard(&set, &FilterSelection::new(1999, 2, Vec::<String>::new()))
            .unwrap_err();

        assert!(matches!(err, ComputeError::InvalidFilterState(_)));
    }
}
