pub mod dashboard;

use gloo_net::http::{Request, Response};
use serde::Deserialize;
use shared::{ApiResponse, ErrorResponse};

use crate::settings;

fn api_base() -> String {
    settings::get_settings().api_base_url()
}

/// Common GET request handler
pub async fn get<T>(endpoint: &str) -> Result<T, String>
where
    T: for<'de> Deserialize<'de>,
{
    let url = format!("{}{}", api_base(), endpoint);
    log::debug!("GET request to: {}", url);

    let response = Request::get(&url).send().await.map_err(|e| {
        let error_msg = format!("Request failed: {}", e);
        log::error!("GET {} - {}", endpoint, error_msg);
        error_msg
    })?;

    read_response("GET", endpoint, response).await
}

/// POST without a request body
pub async fn post<T>(endpoint: &str) -> Result<T, String>
where
    T: for<'de> Deserialize<'de>,
{
    let url = format!("{}{}", api_base(), endpoint);
    log::debug!("POST request to: {}", url);

    let response = Request::post(&url).send().await.map_err(|e| {
        let error_msg = format!("Request failed: {}", e);
        log::error!("POST {} - {}", endpoint, error_msg);
        error_msg
    })?;

    read_response("POST", endpoint, response).await
}

async fn read_response<T>(method: &str, endpoint: &str, response: Response) -> Result<T, String>
where
    T: for<'de> Deserialize<'de>,
{
    if !response.ok() {
        log::warn!("{} {} - Non-OK response: {}", method, endpoint, response.status());
        let status = response.status();
        let error_response: Result<ErrorResponse, _> = response.json().await;
        return Err(match error_response {
            Ok(err) => {
                log::error!("{} {} - API error {}: {}", method, endpoint, err.code, err.error);
                err.error
            }
            Err(_) => {
                let error_msg = format!("HTTP error: {}", status);
                log::error!("{} {} - {}", method, endpoint, error_msg);
                error_msg
            }
        });
    }

    log::trace!("{} {} - Response received, parsing JSON", method, endpoint);
    let api_response: ApiResponse<T> = response.json().await.map_err(|e| {
        let error_msg = format!("Failed to parse response: {}", e);
        log::error!("{} {} - {}", method, endpoint, error_msg);
        error_msg
    })?;

    log::info!("{} {} - Success", method, endpoint);
    Ok(api_response.data)
}
