//! Environment-backed configuration for the console and the live client.

use std::env;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";
pub const DEFAULT_DEBOUNCE_MS: u64 = 1500;

/// Top-level configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub telemetry: TelemetryConfig,
}

/// Settings for the remote API and the lookup debounce window.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub debounce_millis: u64,
}

impl ApiConfig {
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_millis)
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ENROLLDESK_DEBOUNCE_MS must be an integer number of milliseconds")]
    InvalidDebounce,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let base_url =
            env::var("ENROLLDESK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let debounce_millis = match env::var("ENROLLDESK_DEBOUNCE_MS") {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidDebounce)?,
            Err(_) => DEFAULT_DEBOUNCE_MS,
        };

        let log_level = env::var("ENROLLDESK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            api: ApiConfig {
                base_url,
                debounce_millis,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}
