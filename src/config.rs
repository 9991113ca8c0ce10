use anyhow::{Context, Result};
use config::{Config, Environment, File};
use moka::future::Cache;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::schemas::AppState;

/// Runtime settings.
///
/// Sources, lowest precedence first: built-in defaults, `storedash.toml` (or
/// the file given with `--config`), `STOREDASH_*` environment variables, CLI
/// flags.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// CSV file with the sales records
    pub data_path: PathBuf,
    /// Address the web server binds to
    pub bind_address: String,
    /// Lifetime of a cached dashboard
    pub cache_ttl_secs: u64,
    /// Maximum number of cached dashboards
    pub cache_capacity: u64,
    /// Built frontend to serve at `/`
    pub static_dir: Option<PathBuf>,
    /// Printed before money amounts
    pub currency_prefix: String,
    pub request_timeout_secs: u64,
}

impl Settings {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("data_path", "data/sales.csv")?
            .set_default("bind_address", "0.0.0.0:3000")?
            .set_default("cache_ttl_secs", 300_i64)?
            .set_default("cache_capacity", 1000_i64)?
            .set_default("currency_prefix", "US$")?
            .set_default("request_timeout_secs", 30_i64)?;

        builder = match config_path {
            Some(path) => {
                debug!("Reading settings from {}", path.display());
                builder.add_source(File::from(path).required(true))
            }
            None => builder.add_source(File::with_name("storedash").required(false)),
        };

        let settings: Settings = builder
            .add_source(Environment::with_prefix("STOREDASH"))
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid settings")?;

        debug!(?settings, "Settings loaded");
        Ok(settings)
    }

    pub fn with_data_path(mut self, data_path: Option<PathBuf>) -> Self {
        if let Some(data_path) = data_path {
            self.data_path = data_path;
        }
        self
    }

    pub fn with_bind_address(mut self, bind_address: Option<String>) -> Self {
        if let Some(bind_address) = bind_address {
            self.bind_address = bind_address;
        }
        self
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Builds the shared state without touching the data file.
pub fn build_app_state(settings: Settings) -> AppState {
    let dashboards = Cache::builder()
        .max_capacity(settings.cache_capacity)
        .time_to_live(settings.cache_ttl())
        .build();

    AppState {
        settings: Arc::new(settings),
        datasets: Cache::new(16),
        dashboards,
    }
}

/// Builds the shared state and loads the dataset; a missing or malformed file
/// aborts startup.
pub async fn initialize_app_state(settings: Settings) -> Result<AppState> {
    let state = build_app_state(settings);

    info!("Loading sales data from {}", state.settings.data_path.display());
    let dataset = state
        .dataset()
        .await
        .context("Cannot start without sales data")?;
    info!(
        "Loaded {} records from {}",
        dataset.records.len(),
        state.settings.data_path.display()
    );

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let file = write_config("");
        let settings = Settings::load(Some(file.path())).unwrap();

        assert_eq!(settings.data_path, PathBuf::from("data/sales.csv"));
        assert_eq!(settings.bind_address, "0.0.0.0:3000");
        assert_eq!(settings.cache_ttl(), Duration::from_secs(300));
        assert_eq!(settings.cache_capacity, 1000);
        assert_eq!(settings.currency_prefix, "US$");
        assert!(settings.static_dir.is_none());
    }

    #[test]
    fn test_file_and_overrides() {
        let file = write_config("data_path = \"/srv/sales.csv\"\ncurrency_prefix = \"S/\"\ncache_ttl_secs = 5\n");

        let settings = Settings::load(Some(file.path()))
            .unwrap()
            .with_bind_address(Some("127.0.0.1:8080".to_string()))
            .with_data_path(None);

        assert_eq!(settings.data_path, PathBuf::from("/srv/sales.csv"));
        assert_eq!(settings.currency_prefix, "S/");
        assert_eq!(settings.cache_ttl_secs, 5);
        assert_eq!(settings.bind_address, "127.0.0.1:8080");
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/storedash.toml"))).is_err());
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }
}
