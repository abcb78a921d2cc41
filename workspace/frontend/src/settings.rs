use log::Level;
use wasm_bindgen::JsValue;
use web_sys::window;

/// Global application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Backend API host (e.g., "localhost" or "api.agriverse.lk")
    pub api_host: String,

    /// Backend API port (e.g., 3000)
    pub api_port: u16,

    /// API path prefix (e.g., "/api/v1")
    pub api_path: String,

    /// Use HTTPS for API requests
    pub api_use_https: bool,

    /// Default log level for the application
    pub log_level: Level,

    /// Toast notification duration in milliseconds
    pub toast_duration_ms: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_host: "localhost".to_string(),
            api_port: 3000,
            api_path: "/api/v1".to_string(),
            api_use_https: false,
            log_level: Level::Info,
            toast_duration_ms: 5000,
        }
    }
}

impl AppSettings {
    /// Create settings from the window location, then apply any
    /// localStorage overrides. The page origin is the default API origin,
    /// so a bundle served by the backend itself needs no configuration.
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        if let Some(window) = window() {
            let location = window.location();

            if let Ok(hostname) = location.hostname() {
                if !hostname.is_empty() {
                    // Local development gets verbose logging
                    if hostname == "localhost" || hostname == "127.0.0.1" {
                        settings.log_level = Level::Debug;
                    }
                    settings.api_host = hostname;
                }
            }

            if let Ok(protocol) = location.protocol() {
                settings.api_use_https = protocol == "https:";
            }

            if let Ok(port) = location.port() {
                if let Ok(port_val) = port.parse::<u16>() {
                    settings.api_port = port_val;
                } else {
                    // Empty string when the origin uses the protocol default
                    settings.api_port = if settings.api_use_https { 443 } else { 80 };
                }
            }

            // Try to read from localStorage for custom settings
            if let Ok(Some(storage)) = window.local_storage() {
                // Read API host
                if let Ok(Some(api_host)) = storage.get_item("agriverse_api_host") {
                    settings.api_host = api_host;
                }

                // Read API port
                if let Ok(Some(api_port)) = storage.get_item("agriverse_api_port") {
                    if let Ok(port_val) = api_port.parse::<u16>() {
                        settings.api_port = port_val;
                    }
                }

                // Read API path
                if let Ok(Some(api_path)) = storage.get_item("agriverse_api_path") {
                    settings.api_path = api_path;
                }

                // Read API HTTPS flag
                if let Ok(Some(use_https)) = storage.get_item("agriverse_api_use_https") {
                    settings.api_use_https = use_https.to_lowercase() == "true";
                }

                // Read log level
                if let Ok(Some(log_level)) = storage.get_item("agriverse_log_level") {
                    settings.log_level = match log_level.to_lowercase().as_str() {
                        "error" => Level::Error,
                        "warn" => Level::Warn,
                        "info" => Level::Info,
                        "debug" => Level::Debug,
                        "trace" => Level::Trace,
                        _ => settings.log_level,
                    };
                }

                // Read toast duration
                if let Ok(Some(duration)) = storage.get_item("agriverse_toast_duration_ms") {
                    if let Ok(duration_val) = duration.parse::<u32>() {
                        settings.toast_duration_ms = duration_val;
                    }
                }
            }
        }

        settings
    }

    /// Save settings to localStorage
    pub fn save_to_storage(&self) -> Result<(), JsValue> {
        if let Some(window) = window() {
            if let Some(storage) = window.local_storage()? {
                storage.set_item("agriverse_api_host", &self.api_host)?;
                storage.set_item("agriverse_api_port", &self.api_port.to_string())?;
                storage.set_item("agriverse_api_path", &self.api_path)?;
                storage.set_item("agriverse_api_use_https", &self.api_use_https.to_string())?;
                storage.set_item(
                    "agriverse_log_level",
                    &format!("{:?}", self.log_level).to_lowercase(),
                )?;
                storage.set_item(
                    "agriverse_toast_duration_ms",
                    &self.toast_duration_ms.to_string(),
                )?;
            }
        }
        Ok(())
    }

    /// Get the base API URL (protocol + host + port + path prefix)
    pub fn api_base_url(&self) -> String {
        let protocol = if self.api_use_https { "https" } else { "http" };
        format!(
            "{}://{}:{}{}",
            protocol, self.api_host, self.api_port, self.api_path
        )
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::from_environment());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Update the global settings
pub fn update_settings<F>(f: F)
where
    F: FnOnce(&mut AppSettings),
{
    SETTINGS.with(|s| {
        let mut settings = s.borrow_mut();
        f(&mut settings);
    });
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
