use axum::{http::StatusCode, response::Json};
use common::ErrorResponse;
use compute::ComputeError;
use model::ModelError;
use tracing::{error, warn};

/// Error half of every handler's return type.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub const DATA_UNAVAILABLE: &str = "DATA_UNAVAILABLE";
pub const INVALID_FILTER_STATE: &str = "INVALID_FILTER_STATE";
pub const COMPUTE_ERROR: &str = "COMPUTE_ERROR";

pub fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            code: code.to_string(),
            success: false,
        }),
    )
}

pub fn data_unavailable(err: &ModelError) -> ApiError {
    error!("Sales data unavailable: {}", err);
    error_response(StatusCode::SERVICE_UNAVAILABLE, DATA_UNAVAILABLE, err.to_string())
}

pub fn compute_failure(err: &ComputeError) -> ApiError {
    match err {
        ComputeError::Model(model_error) => data_unavailable(model_error),
        ComputeError::InvalidFilterState(_) => {
            warn!("Rejected selection: {}", err);
            error_response(StatusCode::BAD_REQUEST, INVALID_FILTER_STATE, err.to_string())
        }
        ComputeError::DataFrame(_) | ComputeError::Series(_) => {
            error!("Dashboard computation failed: {}", err);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                COMPUTE_ERROR,
                "Failed to compute dashboard",
            )
        }
    }
}
