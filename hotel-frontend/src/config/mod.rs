use hotel_core::error::AppError;
use secrecy::Secret;
use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub hotel_api: HotelApiSettings,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_session_secret")]
    pub session_secret: Secret<String>,
    /// OTLP collector endpoint for trace export.
    #[serde(default = "default_otlp_endpoint")]
    pub otlp_endpoint: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            session_secret: default_session_secret(),
            otlp_endpoint: default_otlp_endpoint(),
        }
    }
}

/// Settings for the external hotel REST backend.
#[derive(Deserialize, Clone)]
pub struct HotelApiSettings {
    /// Base URL including the API prefix, e.g. `http://localhost:8080/api`.
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
}

impl Default for HotelApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    9100
}

fn default_session_secret() -> Secret<String> {
    // Development fallback; override via APP_SERVER__SESSION_SECRET.
    Secret::new("change-me".to_string())
}

fn default_otlp_endpoint() -> String {
    "http://tempo:4317".to_string()
}

fn default_api_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

pub fn get_configuration() -> Result<Settings, AppError> {
    let base_path = std::env::current_dir()
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!("cannot determine current dir: {e}")))?;

    // Works both from the workspace root and from within the crate directory.
    let configuration_directory = if base_path.ends_with("hotel-frontend") {
        base_path.join("config")
    } else {
        base_path.join("hotel-frontend").join("config")
    };

    hotel_core::config::load_settings(&configuration_directory)
}
