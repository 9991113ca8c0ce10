use axum::{extract::State, http::StatusCode, response::Json};
use common::ApiResponse;
use tracing::{info, instrument, trace};

use crate::helpers::errors::{data_unavailable, ApiError};
use crate::schemas::{AppState, DatasetInfo};

/// Describe the loaded data file
#[utoipa::path(
    get,
    path = "/api/v1/dataset",
    tag = "dataset",
    responses(
        (status = 200, description = "Dataset info retrieved successfully", body = ApiResponse<DatasetInfo>),
        (status = 503, description = "Sales data unavailable", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_dataset(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<DatasetInfo>>), ApiError> {
    trace!("Entering get_dataset function");

    let dataset = state.dataset().await.map_err(|e| data_unavailable(&e))?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse {
            data: DatasetInfo::new(&state.settings.data_path, &dataset),
            message: "Dataset info retrieved successfully".to_string(),
            success: true,
        }),
    ))
}

/// Re-read the data file and drop cached dashboards
#[utoipa::path(
    post,
    path = "/api/v1/dataset/reload",
    tag = "dataset",
    responses(
        (status = 200, description = "Dataset reloaded successfully", body = ApiResponse<DatasetInfo>),
        (status = 503, description = "Data file missing or malformed; the previous data stays loaded", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn reload_dataset(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<DatasetInfo>>), ApiError> {
    trace!("Entering reload_dataset function");

    let dataset = state.reload().await.map_err(|e| data_unavailable(&e))?;
    info!("Dataset reloaded with {} records", dataset.records.len());

    Ok((
        StatusCode::OK,
        Json(ApiResponse {
            data: DatasetInfo::new(&state.settings.data_path, &dataset),
            message: "Dataset reloaded successfully".to_string(),
            success: true,
        }),
    ))
}
