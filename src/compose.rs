use chrono::NaiveDate;

use crate::intent::{Attribute, Intent};
use crate::models::{ChatResponse, WeatherCategory};
use crate::weather::WeatherSnapshot;

pub const HELP_MESSAGE: &str = "I'm sorry, I couldn't understand that. Please ask about the weather in a specific city, e.g., 'What's the weather in London?' or 'Weather in Paris tomorrow?'";

/// "Tuesday, 20 October"
pub fn format_target_date(date: NaiveDate) -> String {
    date.format("%A, %d %B").to_string()
}

impl Intent {
    /// "today" for current weather, "on Tuesday, 20 October" for forecasts.
    pub fn date_label(&self) -> String {
        if self.is_forecast {
            format!("on {}", format_target_date(self.target_date))
        } else {
            "today".to_string()
        }
    }
}

/// Render the reply for an interpreted message and whatever weather data
/// could be resolved for it.
pub fn compose(snapshot: Option<&WeatherSnapshot>, intent: &Intent) -> ChatResponse {
    let Some(city) = intent.city.as_deref() else {
        return ChatResponse::plain(HELP_MESSAGE);
    };

    let Some(weather) = snapshot else {
        return ChatResponse::plain(fetch_failure(city, intent));
    };

    let category = WeatherCategory::from_condition(&weather.main_condition);
    let date = intent.date_label();

    let text = match intent.attribute {
        Some(attribute) => answer_attribute(attribute, weather, city, &date),
        None => format!(
            "The weather in {city} {date} is {} with a temperature of {:.1}°C (feels like {:.1}°C). \
             Humidity is {}%, wind speed is {} m/s, and pressure is {} hPa.",
            weather.description,
            weather.temperature,
            weather.feels_like,
            weather.humidity,
            weather.wind_speed,
            weather.pressure,
        ),
    };

    ChatResponse::new(text, category)
}

fn fetch_failure(city: &str, intent: &Intent) -> String {
    if intent.is_forecast {
        format!(
            "Sorry, I couldn't fetch forecast data for {city} on {}. Please check the city name or try another date.",
            format_target_date(intent.target_date)
        )
    } else {
        format!(
            "Sorry, I couldn't fetch current weather data for {city}. Please check the city name."
        )
    }
}

fn answer_attribute(
    attribute: Attribute,
    weather: &WeatherSnapshot,
    city: &str,
    date: &str,
) -> String {
    let main = weather.main_condition.to_lowercase();
    let description = &weather.description;

    match attribute {
        Attribute::Humidity => format!("The humidity in {city} {date} is {}%.", weather.humidity),
        Attribute::Wind => {
            format!("The wind speed in {city} {date} is {} m/s.", weather.wind_speed)
        }
        Attribute::Pressure => {
            format!("The atmospheric pressure in {city} {date} is {} hPa.", weather.pressure)
        }
        Attribute::FeelsLike => {
            format!("It feels like {:.1}°C in {city} {date}.", weather.feels_like)
        }
        Attribute::Rain => {
            if matches!(main.as_str(), "rain" | "drizzle" | "thunderstorm") {
                format!("Yes, it is currently {description} in {city} {date}.")
            } else {
                format!("No, it is not raining in {city} {date}. It is {description}.")
            }
        }
        Attribute::Sun => {
            if main == "clear" {
                format!("Yes, it is sunny and clear skies in {city} {date}.")
            } else {
                format!("No, it's not sunny in {city} {date}. It is {description}.")
            }
        }
        Attribute::Cloud => {
            if main == "clouds" {
                format!("Yes, it is cloudy in {city} {date}.")
            } else {
                format!("No, it's not cloudy in {city} {date}. It is {description}.")
            }
        }
        Attribute::Snow => {
            if main == "snow" {
                format!("Yes, it is snowing in {city} {date}.")
            } else {
                format!("No, it is not snowing in {city} {date}. It is {description}.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(main: &str, description: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            main_condition: main.to_string(),
            description: description.to_string(),
            temperature: 14.27,
            feels_like: 13.0,
            humidity: 81.0,
            pressure: 1012.0,
            wind_speed: 4.1,
        }
    }

    fn intent(city: Option<&str>, forecast: bool, attribute: Option<Attribute>) -> Intent {
        Intent {
            is_forecast: forecast,
            target_date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            attribute,
            city: city.map(str::to_string),
        }
    }

    #[test]
    fn missing_city_gets_help() {
        let reply = compose(Some(&snapshot("Clear", "clear sky")), &intent(None, false, None));

        assert_eq!(reply.response, HELP_MESSAGE);
        assert_eq!(reply.weather_category, WeatherCategory::Default);
    }

    #[test]
    fn current_fetch_failure_names_city() {
        let reply = compose(None, &intent(Some("Atlantis"), false, None));

        assert_eq!(
            reply.response,
            "Sorry, I couldn't fetch current weather data for Atlantis. Please check the city name."
        );
        assert_eq!(reply.weather_category, WeatherCategory::Default);
    }

    #[test]
    fn forecast_fetch_failure_mentions_target_date() {
        let reply = compose(None, &intent(Some("Paris"), true, None));

        assert_eq!(
            reply.response,
            "Sorry, I couldn't fetch forecast data for Paris on Tuesday, 20 October. Please check the city name or try another date."
        );
    }

    #[test]
    fn full_sentence_for_current_weather() {
        let reply = compose(
            Some(&snapshot("Drizzle", "light intensity drizzle")),
            &intent(Some("London"), false, None),
        );

        assert_eq!(
            reply.response,
            "The weather in London today is light intensity drizzle with a temperature of 14.3°C (feels like 13.0°C). Humidity is 81%, wind speed is 4.1 m/s, and pressure is 1012 hPa."
        );
        assert_eq!(reply.weather_category, WeatherCategory::Rain);
    }

    #[test]
    fn forecast_uses_formatted_date_label() {
        let reply = compose(
            Some(&snapshot("Clouds", "broken clouds")),
            &intent(Some("Paris"), true, Some(Attribute::Humidity)),
        );

        assert_eq!(reply.response, "The humidity in Paris on Tuesday, 20 October is 81%.");
        assert_eq!(reply.weather_category, WeatherCategory::Clouds);
    }

    #[test]
    fn numeric_attribute_templates() {
        let weather = snapshot("Clear", "clear sky");
        let city = Some("Cairo");

        let wind = compose(Some(&weather), &intent(city, false, Some(Attribute::Wind)));
        assert_eq!(wind.response, "The wind speed in Cairo today is 4.1 m/s.");

        let pressure = compose(Some(&weather), &intent(city, false, Some(Attribute::Pressure)));
        assert_eq!(
            pressure.response,
            "The atmospheric pressure in Cairo today is 1012 hPa."
        );

        let feels = compose(Some(&weather), &intent(city, false, Some(Attribute::FeelsLike)));
        assert_eq!(feels.response, "It feels like 13.0°C in Cairo today.");
    }

    #[test]
    fn yes_no_questions() {
        let city = Some("Oslo");

        let storm = snapshot("Thunderstorm", "thunderstorm with rain");
        let reply = compose(Some(&storm), &intent(city, false, Some(Attribute::Rain)));
        assert_eq!(reply.response, "Yes, it is currently thunderstorm with rain in Oslo today.");
        assert_eq!(reply.weather_category, WeatherCategory::Thunderstorm);

        let clear = snapshot("Clear", "clear sky");
        let reply = compose(Some(&clear), &intent(city, false, Some(Attribute::Rain)));
        assert_eq!(reply.response, "No, it is not raining in Oslo today. It is clear sky.");

        let reply = compose(Some(&clear), &intent(city, false, Some(Attribute::Sun)));
        assert_eq!(reply.response, "Yes, it is sunny and clear skies in Oslo today.");

        let reply = compose(Some(&clear), &intent(city, false, Some(Attribute::Cloud)));
        assert_eq!(reply.response, "No, it's not cloudy in Oslo today. It is clear sky.");

        let snow = snapshot("Snow", "light snow");
        let reply = compose(Some(&snow), &intent(city, false, Some(Attribute::Snow)));
        assert_eq!(reply.response, "Yes, it is snowing in Oslo today.");

        let reply = compose(Some(&snow), &intent(city, false, Some(Attribute::Sun)));
        assert_eq!(reply.response, "No, it's not sunny in Oslo today. It is light snow.");

        let fog = snapshot("Fog", "fog");
        let reply = compose(Some(&fog), &intent(city, false, Some(Attribute::Snow)));
        assert_eq!(reply.response, "No, it is not snowing in Oslo today. It is fog.");
        assert_eq!(reply.weather_category, WeatherCategory::Atmosphere);
    }
}
