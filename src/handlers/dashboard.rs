use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use common::{ApiResponse, DashboardView, FilterSelection};
use compute::ComputeError;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, trace};

use crate::helpers::errors::{compute_failure, data_unavailable, ApiError};
use crate::schemas::{country_params, AppState, DashboardQuery};

/// Metrics, charts and rankings for one filter selection
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "dashboard",
    params(
        DashboardQuery,
        ("countries" = Option<Vec<String>>, Query, description = "Country to include; repeat for several, omit for all")
    ),
    responses(
        (status = 200, description = "Dashboard computed successfully", body = ApiResponse<DashboardView>),
        (status = 400, description = "Selection not present in the data", body = ErrorResponse),
        (status = 500, description = "Computation failed", body = ErrorResponse),
        (status = 503, description = "Sales data unavailable", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_dashboard(
    Valid(Query(query)): Valid<Query<DashboardQuery>>,
    Query(params): Query<Vec<(String, String)>>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<DashboardView>>), ApiError> {
    trace!("Entering get_dashboard function");

    let dataset = state.dataset().await.map_err(|e| data_unavailable(&e))?;
    let defaults = compute::default_selection(&dataset.records).ok_or_else(|| {
        compute_failure(&ComputeError::InvalidFilterState("no records loaded".to_string()))
    })?;
    let selection = FilterSelection::new(
        query.year.unwrap_or(defaults.year),
        query.month.unwrap_or(defaults.month),
        country_params(&params),
    );
    debug!(?selection, "Resolved selection");

    let key = state.dashboard_key(&selection);
    if let Some(view) = state.dashboards.get(&key).await {
        debug!("Dashboard {} served from cache", key);
        return Ok(ok_response(view.as_ref().clone(), "Dashboard retrieved from cache"));
    }

    let source = Arc::clone(&dataset);
    let requested = selection.clone();
    let view = tokio::task::spawn_blocking(move || {
        compute::compute_dashboard(&source.records, &requested)
    })
    .await
    .map_err(|join_error| {
        error!("Dashboard task failed: {}", join_error);
        compute_failure(&ComputeError::DataFrame(join_error.to_string()))
    })?
    .map_err(|e| compute_failure(&e))?;

    let view = Arc::new(view);
    state.dashboards.insert(key, Arc::clone(&view)).await;
    info!("Dashboard computed for {}", selection.cache_key());

    Ok(ok_response(view.as_ref().clone(), "Dashboard computed successfully"))
}

fn ok_response(view: DashboardView, message: &str) -> (StatusCode, Json<ApiResponse<DashboardView>>) {
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: view,
            message: message.to_string(),
            success: true,
        }),
    )
}
