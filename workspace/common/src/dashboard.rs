use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::filters::FilterSelection;
use crate::period::PeriodComparison;

/// Number of facet panels per row in the category/country pie grid.
pub const FACET_COLUMNS: usize = 4;

/// Rows in each of the top / bottom product tables.
pub const TOP_PRODUCTS_LIMIT: usize = 10;

/// Everything the page needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardView {
    pub selection: FilterSelection,
    pub period: PeriodComparison,
    /// Revenue per month over the whole working set, ordered by month
    pub revenue_by_month: Vec<MonthRevenue>,
    /// Current-month revenue per country, highest first
    pub revenue_by_country: Vec<RankedRevenue>,
    /// One revenue line per category over the working set
    pub revenue_by_month_and_category: Vec<CategorySeries>,
    /// Current-month revenue per category, highest first
    pub revenue_by_category: Vec<RankedRevenue>,
    /// Current-month order count per category, one panel per country
    pub orders_by_category_and_country: Vec<FacetPanel>,
    /// Most ordered products in the current month
    pub top_products: Vec<ProductRank>,
    /// Least ordered products in the current month
    pub bottom_products: Vec<ProductRank>,
    /// Empty subsets the page should show placeholders for
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthRevenue {
    pub month: u32,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RankedRevenue {
    pub label: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategorySeries {
    pub category: String,
    pub points: Vec<MonthRevenue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FacetPanel {
    pub country: String,
    pub slices: Vec<FacetSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FacetSlice {
    pub category: String,
    pub orders: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductRank {
    pub category: String,
    pub product: String,
    pub revenue: f64,
    pub orders: i64,
}

/// Which subset of the selection turned out empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SelectionScope {
    WorkingSet,
    CurrentMonth,
    ComparisonMonth,
}

/// Non-fatal conditions found while computing a dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    EmptySelection { scope: SelectionScope },
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::EmptySelection { scope: SelectionScope::WorkingSet } => {
                "No sales match the selected filters"
            }
            Notice::EmptySelection { scope: SelectionScope::CurrentMonth } => {
                "No sales in the selected month"
            }
            Notice::EmptySelection { scope: SelectionScope::ComparisonMonth } => {
                "No sales in the comparison month"
            }
        }
    }
}

impl DashboardView {
    pub fn has_notice(&self, scope: SelectionScope) -> bool {
        self.notices
            .iter()
            .any(|n| matches!(n, Notice::EmptySelection { scope: s } if *s == scope))
    }
}
