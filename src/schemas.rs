use chrono::{DateTime, Utc};
use common::{
    ApiResponse, CategorySeries, DashboardView, ErrorResponse, FacetPanel, FacetSlice,
    FilterOptions, FilterSelection, MetricVariances, MonthRevenue, Notice, PeriodAggregate,
    PeriodComparison, ProductRank, RankedRevenue, SelectionScope, VarianceConvention,
};
use model::{ModelError, RecordSet};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use utoipa::{IntoParams, OpenApi, ToSchema};
use validator::Validate;

use crate::config::Settings;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub settings: Arc<Settings>,
    /// Loaded record sets keyed by source path, kept until reloaded
    pub datasets: Cache<PathBuf, Arc<Dataset>>,
    /// Computed dashboards keyed by source path and selection
    pub dashboards: Cache<String, Arc<DashboardView>>,
}

/// One load of the data file.
#[derive(Debug)]
pub struct Dataset {
    pub records: RecordSet,
    pub loaded_at: DateTime<Utc>,
}

impl AppState {
    /// The dataset for the configured path, loading it on first use.
    #[instrument(skip(self))]
    pub async fn dataset(&self) -> Result<Arc<Dataset>, ModelError> {
        let path = self.settings.data_path.clone();
        self.datasets
            .try_get_with(path.clone(), load_dataset(path))
            .await
            .map_err(|err| (*err).clone())
    }

    /// Re-reads the data file and drops every cached dashboard.
    ///
    /// A failed reload leaves the previously loaded dataset in place.
    #[instrument(skip(self))]
    pub async fn reload(&self) -> Result<Arc<Dataset>, ModelError> {
        let path = self.settings.data_path.clone();
        let dataset = load_dataset(path.clone()).await?;

        self.datasets.insert(path, dataset.clone()).await;
        self.dashboards.invalidate_all();
        info!("Reloaded {} records, dashboard cache cleared", dataset.records.len());

        Ok(dataset)
    }

    pub fn dashboard_key(&self, selection: &FilterSelection) -> String {
        format!("{}|{}", self.settings.data_path.display(), selection.cache_key())
    }
}

async fn load_dataset(path: PathBuf) -> Result<Arc<Dataset>, ModelError> {
    debug!("Reading {}", path.display());
    let source = path.clone();
    let records = tokio::task::spawn_blocking(move || model::load_csv(&source))
        .await
        .map_err(|join_error| {
            error!("Loader task failed: {}", join_error);
            ModelError::unavailable(display_path(&path), join_error.to_string())
        })??;

    Ok(Arc::new(Dataset {
        records,
        loaded_at: Utc::now(),
    }))
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

/// Query parameters for the dashboard endpoint
///
/// `countries` is read separately by [`country_params`] because it may repeat.
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
pub struct DashboardQuery {
    /// Selected year (defaults to the first year in the data)
    #[validate(range(min = 1, max = 9999))]
    pub year: Option<i32>,
    /// Selected month, 1-12 (defaults to the first month in the data)
    #[validate(range(min = 1, max = 12))]
    pub month: Option<u32>,
}

/// Every `countries` value of a query string, one country per occurrence.
///
/// Values are taken whole, so names containing commas survive.
pub fn country_params(params: &[(String, String)]) -> Vec<String> {
    params
        .iter()
        .filter(|(key, _)| key == "countries")
        .map(|(_, value)| value.trim())
        .filter(|country| !country.is_empty())
        .map(str::to_string)
        .collect()
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// `loaded` or `not_loaded`
    pub dataset: String,
    /// Number of loaded records, if any
    pub records: Option<usize>,
}

/// Information about the loaded data file
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DatasetInfo {
    /// Path the records were read from
    pub path: String,
    /// Number of records
    pub records: usize,
    pub years: Vec<i32>,
    pub countries: usize,
    /// When the file was read
    pub loaded_at: DateTime<Utc>,
}

impl DatasetInfo {
    pub fn new(path: &Path, dataset: &Dataset) -> Self {
        Self {
            path: display_path(path),
            records: dataset.records.len(),
            years: dataset.records.years(),
            countries: dataset.records.countries().len(),
            loaded_at: dataset.loaded_at,
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::filters::get_filters,
        crate::handlers::dashboard::get_dashboard,
        crate::handlers::dataset::get_dataset,
        crate::handlers::dataset::reload_dataset,
    ),
    components(
        schemas(
            ApiResponse<FilterOptions>,
            ApiResponse<DashboardView>,
            ApiResponse<DatasetInfo>,
            ErrorResponse,
            HealthResponse,
            DatasetInfo,
            DashboardQuery,
            FilterOptions,
            FilterSelection,
            DashboardView,
            PeriodComparison,
            PeriodAggregate,
            MetricVariances,
            VarianceConvention,
            MonthRevenue,
            RankedRevenue,
            CategorySeries,
            FacetPanel,
            FacetSlice,
            ProductRank,
            Notice,
            SelectionScope,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "dashboard", description = "Filter options and dashboard views"),
        (name = "dataset", description = "Loaded sales data"),
    ),
    info(
        title = "Storedash API",
        description = "Store sales dashboard: monthly metrics, comparisons and rankings over a CSV of transactions",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
