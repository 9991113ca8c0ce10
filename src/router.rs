use crate::handlers::{
    dashboard::get_dashboard,
    dataset::{get_dataset, reload_dataset},
    filters::get_filters,
    health::health_check,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::debug;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        // Health check
        .route("/health", get(health_check))
        // Dashboard
        .route("/api/v1/filters", get(get_filters))
        .route("/api/v1/dashboard", get(get_dashboard))
        // Dataset
        .route("/api/v1/dataset", get(get_dataset))
        .route("/api/v1/dataset/reload", post(reload_dataset))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Built frontend, with index.html for client-side routes
    if let Some(static_dir) = &state.settings.static_dir {
        debug!("Serving frontend from {}", static_dir.display());
        let index = ServeFile::new(static_dir.join("index.html"));
        router = router.fallback_service(ServeDir::new(static_dir).not_found_service(index));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(state.settings.request_timeout()))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
