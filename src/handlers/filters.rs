use axum::{extract::State, http::StatusCode, response::Json};
use common::{ApiResponse, FilterOptions};
use tracing::{debug, instrument, trace};

use crate::helpers::errors::{compute_failure, data_unavailable, ApiError};
use crate::schemas::AppState;

/// Values for the year, month and country controls
#[utoipa::path(
    get,
    path = "/api/v1/filters",
    tag = "dashboard",
    responses(
        (status = 200, description = "Filter options retrieved successfully", body = ApiResponse<FilterOptions>),
        (status = 503, description = "Sales data unavailable", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_filters(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<FilterOptions>>), ApiError> {
    trace!("Entering get_filters function");

    let dataset = state.dataset().await.map_err(|e| data_unavailable(&e))?;
    let options = compute::filter_options(&dataset.records, &state.settings.currency_prefix)
        .map_err(|e| compute_failure(&e))?;
    debug!(
        "Offering {} years, {} months, {} countries",
        options.years.len(),
        options.months.len(),
        options.countries.len()
    );

    Ok((
        StatusCode::OK,
        Json(ApiResponse {
            data: options,
            message: "Filter options retrieved successfully".to_string(),
            success: true,
        }),
    ))
}
