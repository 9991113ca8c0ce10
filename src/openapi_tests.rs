#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::OpenApi;
    use utoipa::openapi::{PathItemType, RefOr, schema::Schema};

    #[test]
    fn test_openapi_schema_generation() {
        let openapi = ApiDoc::openapi();

        assert!(openapi.components.is_some());
        let components = openapi.components.as_ref().unwrap();

        for name in [
            "ErrorResponse",
            "HealthResponse",
            "DatasetInfo",
            "FilterOptions",
            "DashboardView",
            "PeriodComparison",
            "ProductRank",
        ] {
            assert!(components.schemas.contains_key(name), "missing schema {}", name);
        }

        assert!(serde_json::to_string(&openapi).is_ok());
    }

    #[test]
    fn test_error_response_schema_structure() {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        let error_response_schema = components.schemas.get("ErrorResponse").unwrap();

        if let RefOr::T(Schema::Object(obj)) = error_response_schema {
            let properties = &obj.properties;
            assert!(properties.contains_key("error"));
            assert!(properties.contains_key("code"));
            assert!(properties.contains_key("success"));
        } else {
            panic!("ErrorResponse should be an object schema");
        }
    }

    #[test]
    fn test_dashboard_view_schema_structure() {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        let view_schema = components.schemas.get("DashboardView").unwrap();

        if let RefOr::T(Schema::Object(obj)) = view_schema {
            let properties = &obj.properties;
            for field in [
                "selection",
                "period",
                "revenue_by_month",
                "revenue_by_country",
                "revenue_by_month_and_category",
                "revenue_by_category",
                "orders_by_category_and_country",
                "top_products",
                "bottom_products",
                "notices",
            ] {
                assert!(properties.contains_key(field), "missing field {}", field);
            }
        } else {
            panic!("DashboardView should be an object schema");
        }
    }

    #[test]
    fn test_openapi_paths() {
        let openapi = ApiDoc::openapi();
        let paths = &openapi.paths.paths;

        for (path, method) in [
            ("/health", PathItemType::Get),
            ("/api/v1/filters", PathItemType::Get),
            ("/api/v1/dashboard", PathItemType::Get),
            ("/api/v1/dataset", PathItemType::Get),
            ("/api/v1/dataset/reload", PathItemType::Post),
        ] {
            let item = paths.get(path).unwrap_or_else(|| panic!("missing path {}", path));
            assert!(item.operations.contains_key(&method), "missing operation on {}", path);
        }

        let dashboard = paths
            .get("/api/v1/dashboard")
            .and_then(|item| item.operations.get(&PathItemType::Get))
            .unwrap();
        let responses = &dashboard.responses.responses;
        assert!(responses.contains_key("200"));
        assert!(responses.contains_key("400"));
        assert!(responses.contains_key("503"));

        let params: Vec<&str> = dashboard
            .parameters
            .as_ref()
            .unwrap()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(params, vec!["year", "month", "countries"]);
    }

    #[test]
    fn test_all_error_responses_reference_correct_schema() {
        let openapi_json = serde_json::to_string(&ApiDoc::openapi()).unwrap();

        assert!(!openapi_json.contains("common.ErrorResponse"));
        assert!(!openapi_json.contains("common::ErrorResponse"));
        assert!(openapi_json.contains("ErrorResponse"));
    }

    #[test]
    fn test_error_bodies_point_at_shared_error_schema() {
        let openapi = ApiDoc::openapi();
        let paths = &openapi.paths.paths;

        for (path, method, status) in [
            ("/health", PathItemType::Get, "500"),
            ("/api/v1/filters", PathItemType::Get, "503"),
            ("/api/v1/dashboard", PathItemType::Get, "400"),
            ("/api/v1/dataset", PathItemType::Get, "503"),
            ("/api/v1/dataset/reload", PathItemType::Post, "503"),
        ] {
            let operation = paths
                .get(path)
                .and_then(|item| item.operations.get(&method))
                .unwrap_or_else(|| panic!("missing operation on {}", path));
            let response = serde_json::to_string(&operation.responses.responses[status]).unwrap();
            assert!(
                response.contains("#/components/schemas/ErrorResponse"),
                "{} {} does not reference ErrorResponse: {}",
                path,
                status,
                response
            );
        }
    }
}
