#[cfg(test)]
pub mod test_utils {
    use crate::config::{build_app_state, initialize_app_state, Settings};
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Two years, three countries; 2024 starts in January.
    pub const SALES_CSV: &str = "\
year,month,country,category,product,order_id,quantity,total,profit
2024,1,US,A,p1,1,10,100,20
2024,2,US,A,p1,2,5,50,10
2024,2,PE,B,p2,3,2,30,6
2024,3,CL,B,p3,4,1,15,3
2023,2,US,A,p1,5,7,70,7
";

    /// Settings pointing at `data_path`, defaults elsewhere.
    pub fn test_settings(data_path: &Path) -> Settings {
        Settings {
            data_path: data_path.to_path_buf(),
            bind_address: "127.0.0.1:0".to_string(),
            cache_ttl_secs: 60,
            cache_capacity: 100,
            static_dir: None,
            currency_prefix: "US$".to_string(),
            request_timeout_secs: 30,
        }
    }

    /// Writes `contents` to `sales.csv` inside `dir`.
    pub fn write_sales(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("sales.csv");
        std::fs::write(&path, contents).expect("Failed to write test CSV");
        path
    }

    /// Create AppState for testing, with the sample data already loaded
    pub async fn setup_test_app_state() -> (AppState, TempDir) {
        setup_test_app_state_with(SALES_CSV).await
    }

    /// Create AppState for testing over `contents`, already loaded
    pub async fn setup_test_app_state_with(contents: &str) -> (AppState, TempDir) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = write_sales(dir.path(), contents);
        let state = initialize_app_state(test_settings(&path))
            .await
            .expect("Failed to load test data");
        (state, dir)
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is read from RUST_LOG, defaulting to WARN.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing; keep the returned dir alive for the test.
    pub async fn setup_test_app() -> (Router, TempDir) {
        let _guard = init_test_tracing();

        let (state, dir) = setup_test_app_state().await;
        (create_router(state), dir)
    }

    /// Create axum app for testing over `contents`
    pub async fn setup_test_app_with(contents: &str) -> (Router, TempDir) {
        let _guard = init_test_tracing();

        let (state, dir) = setup_test_app_state_with(contents).await;
        (create_router(state), dir)
    }

    /// App whose data file does not exist; nothing is loaded up front.
    pub fn setup_test_app_without_data() -> (Router, TempDir) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let state = build_app_state(test_settings(&dir.path().join("missing.csv")));
        (create_router(state), dir)
    }
}
