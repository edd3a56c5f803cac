use serde::{Deserialize, Serialize};

/// Request payload for the chat endpoint
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// Coarse weather classification used by the front end for theming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCategory {
    Clear,
    Clouds,
    Rain,
    Snow,
    Thunderstorm,
    Atmosphere,
    Default,
}

impl WeatherCategory {
    /// Classify a provider condition group such as "Drizzle" or "Haze".
    pub fn from_condition(main: &str) -> Self {
        match main.to_lowercase().as_str() {
            "clear" => Self::Clear,
            "clouds" => Self::Clouds,
            "rain" | "drizzle" => Self::Rain,
            "snow" => Self::Snow,
            "thunderstorm" => Self::Thunderstorm,
            "mist" | "smoke" | "haze" | "dust" | "fog" | "sand" | "ash" | "squall" | "tornado" => {
                Self::Atmosphere
            }
            _ => Self::Default,
        }
    }
}

/// Response payload for the chat endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub weather_category: WeatherCategory,
}

/// Response payload for the health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Service is healthy".to_string(),
        }
    }
}

impl ChatRequest {
    /// The message, if present and non-empty. Whitespace-only text is kept
    /// and answered like any other unparseable message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

impl ChatResponse {
    pub fn new(response: impl Into<String>, weather_category: WeatherCategory) -> Self {
        Self {
            response: response.into(),
            weather_category,
        }
    }

    /// A reply that carries no weather data
    pub fn plain(response: impl Into<String>) -> Self {
        Self::new(response, WeatherCategory::Default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_from_condition() {
        assert_eq!(WeatherCategory::from_condition("Clear"), WeatherCategory::Clear);
        assert_eq!(WeatherCategory::from_condition("Clouds"), WeatherCategory::Clouds);
        assert_eq!(WeatherCategory::from_condition("Drizzle"), WeatherCategory::Rain);
        assert_eq!(WeatherCategory::from_condition("Rain"), WeatherCategory::Rain);
        assert_eq!(WeatherCategory::from_condition("Snow"), WeatherCategory::Snow);
        assert_eq!(
            WeatherCategory::from_condition("Thunderstorm"),
            WeatherCategory::Thunderstorm
        );
        assert_eq!(WeatherCategory::from_condition("Haze"), WeatherCategory::Atmosphere);
        assert_eq!(WeatherCategory::from_condition("Tornado"), WeatherCategory::Atmosphere);
        assert_eq!(WeatherCategory::from_condition("Volcano"), WeatherCategory::Default);
    }

    #[test]
    fn chat_response_serializes_wire_names() {
        let body =
            serde_json::to_value(ChatResponse::new("hi", WeatherCategory::Atmosphere)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"response": "hi", "weather_category": "atmosphere"})
        );
    }

    #[test]
    fn empty_message_is_treated_as_missing() {
        let request: ChatRequest = serde_json::from_str(r#"{"message": ""}"#).unwrap();
        assert_eq!(request.message(), None);

        let request: ChatRequest = serde_json::from_str(r#"{"message": null}"#).unwrap();
        assert_eq!(request.message(), None);

        let request: ChatRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.message(), None);

        let request: ChatRequest = serde_json::from_str(r#"{"message": "hello"}"#).unwrap();
        assert_eq!(request.message(), Some("hello"));
    }

    #[test]
    fn whitespace_message_is_kept() {
        let request: ChatRequest = serde_json::from_str(r#"{"message": "   "}"#).unwrap();
        assert_eq!(request.message(), Some("   "));
    }
}
