use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{ForecastEntry, WeatherSnapshot, WeatherSource};
use crate::config::Config;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },
    #[error("failed to parse {endpoint} JSON: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{endpoint} response carried no weather conditions")]
    EmptyConditions { endpoint: &'static str },
}

/// OpenWeatherMap client for the current-weather and 5-day/3-hour forecast
/// endpoints. Temperatures are requested in metric units.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config.provider_base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub async fn try_fetch_current(&self, city: &str) -> Result<WeatherSnapshot, ProviderError> {
        let parsed: OwCurrentResponse = self.get_json("weather", city).await?;
        parsed.into_snapshot("weather")
    }

    pub async fn try_fetch_forecast_list(
        &self,
        city: &str,
    ) -> Result<Vec<ForecastEntry>, ProviderError> {
        let parsed: OwForecastResponse = self.get_json("forecast", city).await?;
        Ok(forecast_entries(parsed))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        city: &str,
    ) -> Result<T, ProviderError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} q={} appid=***API_KEY*** units=metric", url, city);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|source| ProviderError::Transport { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| ProviderError::Transport { endpoint, source })?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| ProviderError::Decode { endpoint, source })
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn fetch_current(&self, city: &str) -> Option<WeatherSnapshot> {
        match self.try_fetch_current(city).await {
            Ok(snapshot) => {
                info!("Fetched current weather for {}: {}", city, snapshot.description);
                Some(snapshot)
            }
            Err(e) => {
                warn!("Error fetching current weather for {}: {}", city, e);
                None
            }
        }
    }

    async fn fetch_forecast_list(&self, city: &str) -> Option<Vec<ForecastEntry>> {
        match self.try_fetch_forecast_list(city).await {
            Ok(entries) => {
                info!("Fetched {} forecast entries for {}", entries.len(), city);
                Some(entries)
            }
            Err(e) => {
                warn!("Error fetching forecast weather for {}: {}", city, e);
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

/// Fields shared by the current response and each forecast slot.
#[derive(Debug, Deserialize)]
struct OwReading {
    main: OwMain,
    weather: Vec<OwCondition>,
    wind: OwWind,
}

impl OwReading {
    fn into_snapshot(self, endpoint: &'static str) -> Result<WeatherSnapshot, ProviderError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyConditions { endpoint })?;

        Ok(WeatherSnapshot {
            main_condition: condition.main,
            description: condition.description,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            humidity: self.main.humidity,
            pressure: self.main.pressure,
            wind_speed: self.wind.speed,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(flatten)]
    reading: OwReading,
}

impl OwCurrentResponse {
    fn into_snapshot(self, endpoint: &'static str) -> Result<WeatherSnapshot, ProviderError> {
        self.reading.into_snapshot(endpoint)
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    #[serde(flatten)]
    reading: OwReading,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    list: Vec<OwForecastEntry>,
}

/// Convert forecast slots, dropping any the provider sent without conditions.
fn forecast_entries(parsed: OwForecastResponse) -> Vec<ForecastEntry> {
    parsed
        .list
        .into_iter()
        .filter_map(|entry| {
            let dt = entry.dt;
            match entry.reading.into_snapshot("forecast") {
                Ok(weather) => Some(ForecastEntry {
                    timestamp: dt,
                    weather,
                }),
                Err(e) => {
                    warn!("Skipping forecast slot at {}: {}", dt, e);
                    None
                }
            }
        })
        .collect()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
