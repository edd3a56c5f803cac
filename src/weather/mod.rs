pub mod client;
pub mod selector;

use async_trait::async_trait;

pub use client::{OpenWeatherClient, ProviderError};
pub use selector::{ScanMode, select_closest_to_noon};

/// Resolved conditions for one point in time, either current or forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// Provider group name, e.g. "Clouds" or "Drizzle".
    pub main_condition: String,
    /// Free-text description, e.g. "light rain".
    pub description: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
}

/// One 3-hour slot of the 5-day forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    pub timestamp: i64,
    pub weather: WeatherSnapshot,
}

/// Source of weather data. Failures are logged by the implementation and
/// surface here as `None`.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch_current(&self, city: &str) -> Option<WeatherSnapshot>;

    /// Forecast entries in the order the provider returned them.
    async fn fetch_forecast_list(&self, city: &str) -> Option<Vec<ForecastEntry>>;
}
