//! Common transport-layer types shared between backend and frontend.
//! These structs mirror the backend handlers' response payloads so the
//! frontend can deserialize API responses without duplicating shapes.

mod dashboard;
mod filters;
pub mod format;
mod period;

pub use dashboard::{
    CategorySeries, DashboardView, FacetPanel, FacetSlice, MonthRevenue, Notice, ProductRank,
    RankedRevenue, SelectionScope, FACET_COLUMNS, TOP_PRODUCTS_LIMIT,
};
pub use filters::{FilterOptions, FilterSelection};
pub use period::{MetricVariances, PeriodAggregate, PeriodComparison, VarianceConvention};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

/// Error body returned by the backend when a request fails.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Machine readable error code (e.g. `DATA_UNAVAILABLE`)
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}
