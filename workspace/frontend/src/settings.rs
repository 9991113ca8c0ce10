use log::Level;
use web_sys::window;

/// Global application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Backend API host (e.g., "localhost" or "dash.example.com")
    pub api_host: String,

    /// Backend API port (e.g., 3000)
    pub api_port: u16,

    /// API path prefix (e.g., "/api/v1")
    pub api_path: String,

    /// Use HTTPS for API requests
    pub api_use_https: bool,

    /// Default log level for the application
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_host: "localhost".to_string(),
            api_port: 3000,
            api_path: "/api/v1".to_string(),
            api_use_https: false,
            log_level: Level::Info,
            debug_mode: false,
        }
    }
}

impl AppSettings {
    /// Settings from the page location, overridable through localStorage
    /// (`storedash_api_host`, `storedash_api_port`, `storedash_api_path`,
    /// `storedash_api_use_https`, `storedash_log_level`).
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            return settings;
        };
        let location = window.location();

        if let Ok(hostname) = location.hostname() {
            settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";
            if settings.debug_mode {
                settings.log_level = Level::Debug;
            }
            if !hostname.is_empty() {
                settings.api_host = hostname;
            }
        }
        if let Ok(protocol) = location.protocol() {
            settings.api_use_https = protocol == "https:";
        }

        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(api_host)) = storage.get_item("storedash_api_host") {
                settings.api_host = api_host;
            }

            if let Ok(Some(api_port)) = storage.get_item("storedash_api_port") {
                if let Ok(port_val) = api_port.parse::<u16>() {
                    settings.api_port = port_val;
                }
            }

            if let Ok(Some(api_path)) = storage.get_item("storedash_api_path") {
                settings.api_path = api_path;
            }

            if let Ok(Some(use_https)) = storage.get_item("storedash_api_use_https") {
                settings.api_use_https = use_https.to_lowercase() == "true";
            }

            if let Ok(Some(log_level)) = storage.get_item("storedash_log_level") {
                settings.log_level = parse_level(&log_level).unwrap_or(settings.log_level);
            }
        }

        settings
    }

    /// Get the base API URL (protocol + host + port + path)
    pub fn api_base_url(&self) -> String {
        let protocol = if self.api_use_https { "https" } else { "http" };
        format!("{}://{}:{}{}", protocol, self.api_host, self.api_port, self.api_path)
    }
}

fn parse_level(level: &str) -> Option<Level> {
    match level.to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::default());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
