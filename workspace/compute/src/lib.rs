//! Filtering, period comparison and aggregation for the sales dashboard.

pub mod dashboard;
pub mod error;
pub mod filter;
pub mod period;
pub mod views;

pub use dashboard::compute_dashboard;
pub use error::{ComputeError, Result};
pub use filter::{apply_filters, default_selection, filter_options, validate_selection};
pub use period::compare_periods;
