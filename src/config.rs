use std::env;
use std::fmt;
use std::time::Duration;

use anyhow::{Context, anyhow};

use crate::weather::ScanMode;

pub const DEFAULT_PROVIDER_BASE_URL: &str = "http://api.openweathermap.org/data/2.5";

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub api_key: String,
    pub provider_base_url: String,
    pub request_timeout: Duration,
    pub scan_mode: ScanMode,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
        let timeout = env::var("WEATHER_TIMEOUT_SECS").unwrap_or_else(|_| "10".to_string());
        let scan_mode = env::var("FORECAST_SCAN").unwrap_or_else(|_| "early-exit".to_string());

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: port
                .parse()
                .with_context(|| format!("PORT must be a valid number, got '{port}'"))?,
            api_key: env::var("OPENWEATHERMAP_API_KEY").unwrap_or_default(),
            provider_base_url: env::var("OPENWEATHERMAP_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PROVIDER_BASE_URL.to_string()),
            request_timeout: Duration::from_secs(timeout.parse().with_context(|| {
                format!("WEATHER_TIMEOUT_SECS must be a whole number of seconds, got '{timeout}'")
            })?),
            scan_mode: parse_scan_mode(&scan_mode)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            api_key: String::new(),
            provider_base_url: DEFAULT_PROVIDER_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            scan_mode: ScanMode::default(),
        }
    }
}

// The key stays out of startup logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &if self.has_api_key() { "***" } else { "<unset>" })
            .field("provider_base_url", &self.provider_base_url)
            .field("request_timeout", &self.request_timeout)
            .field("scan_mode", &self.scan_mode)
            .finish()
    }
}

fn parse_scan_mode(value: &str) -> anyhow::Result<ScanMode> {
    match value.trim().to_lowercase().as_str() {
        "early-exit" | "strict" => Ok(ScanMode::EarlyExit),
        "exhaustive" | "lenient" => Ok(ScanMode::Exhaustive),
        other => Err(anyhow!(
            "FORECAST_SCAN must be 'early-exit' or 'exhaustive', got '{other}'"
        )),
    }
}
