use shared::{DashboardView, FilterOptions, FilterSelection};

use super::{get, post};

/// Data set summary returned by the reload endpoint; only the count is shown.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct DatasetInfo {
    pub records: usize,
}

pub async fn fetch_filters() -> Result<FilterOptions, String> {
    get("/filters").await
}

pub async fn fetch_dashboard(selection: &FilterSelection) -> Result<DashboardView, String> {
    get(&dashboard_endpoint(selection)).await
}

pub async fn reload_dataset() -> Result<DatasetInfo, String> {
    post("/dataset/reload").await
}

/// `/dashboard?...` for `selection`, one URI-encoded `countries` pair per country.
pub fn dashboard_endpoint(selection: &FilterSelection) -> String {
    let mut endpoint = format!("/dashboard?year={}&month={}", selection.year, selection.month);
    for country in &selection.countries {
        endpoint.push_str("&countries=");
        endpoint.push_str(&String::from(js_sys::encode_uri_component(country)));
    }
    endpoint
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_endpoint() {
        let selection = FilterSelection::new(2015, 3, Vec::<String>::new());
        assert_eq!(dashboard_endpoint(&selection), "/dashboard?year=2015&month=3");
    }
}
