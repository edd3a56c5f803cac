//! Rule-based interpretation of a single chat message.
//!
//! Three ordered rule tables are evaluated top-down and the first match wins:
//! date phrases, city anchors and attribute keywords. Keep the tables in
//! priority order; a longer phrase must come before any phrase it contains.

use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use regex::Regex;
use thiserror::Error;

/// Furthest day ahead the provider's free forecast covers.
pub const FORECAST_HORIZON_DAYS: u64 = 5;

static DAYS_AHEAD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"in (\d+)\s*days").unwrap());

/// Specific weather attribute a message asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Humidity,
    Wind,
    Pressure,
    FeelsLike,
    Rain,
    Sun,
    Cloud,
    Snow,
}

/// Structured reading of one chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub is_forecast: bool,
    pub target_date: NaiveDate,
    pub attribute: Option<Attribute>,
    pub city: Option<String>,
}

/// The message asked for a day outside the forecast horizon.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("I can only provide a forecast up to 5 days from now.")]
pub struct BeyondHorizon {
    pub requested_days: String,
}

#[derive(Debug)]
enum DateRule {
    Phrase(&'static str, u64),
    DaysAhead,
}

const DATE_RULES: &[DateRule] = &[
    DateRule::Phrase("day after tomorrow", 2),
    DateRule::Phrase("tomorrow", 1),
    DateRule::Phrase("next day", 1),
    DateRule::DaysAhead,
];

const CITY_ANCHORS: &[&str] = &["weather in ", "in ", "of ", "for "];

const ATTRIBUTE_RULES: &[(&[&str], Attribute)] = &[
    (&["humidity"], Attribute::Humidity),
    (&["wind", "wind speed"], Attribute::Wind),
    (&["pressure"], Attribute::Pressure),
    (&["feels like", "feel like"], Attribute::FeelsLike),
    (&["raining", "rain", "is it wet"], Attribute::Rain),
    (&["sunny", "sun"], Attribute::Sun),
    (&["cloudy", "clouds"], Attribute::Cloud),
    (&["snowing", "snow"], Attribute::Snow),
];

/// A date phrase found in the message: how many days ahead it points and the
/// exact text to cut out before looking for a city.
#[derive(Debug, PartialEq, Eq)]
struct DateMatch {
    days: u64,
    phrase: String,
}

impl DateRule {
    fn apply(&self, text: &str) -> Option<Result<DateMatch, BeyondHorizon>> {
        match self {
            DateRule::Phrase(phrase, days) => text.contains(phrase).then(|| {
                Ok(DateMatch {
                    days: *days,
                    phrase: phrase.to_string(),
                })
            }),
            DateRule::DaysAhead => {
                let captures = DAYS_AHEAD_PATTERN.captures(text)?;
                let whole = captures.get(0)?.as_str();
                let number = captures.get(1)?.as_str();

                let result = match number.parse::<u64>() {
                    Ok(days) if (1..=FORECAST_HORIZON_DAYS).contains(&days) => Ok(DateMatch {
                        days,
                        phrase: whole.to_string(),
                    }),
                    _ => Err(BeyondHorizon {
                        requested_days: number.to_string(),
                    }),
                };
                Some(result)
            }
        }
    }
}

/// Interpret `message` relative to `today`.
///
/// Returns `Err(BeyondHorizon)` as soon as an "in N days" phrase falls outside
/// 1..=5; no city is extracted in that case.
pub fn interpret(message: &str, today: NaiveDate) -> Result<Intent, BeyondHorizon> {
    let lowered = normalize(message);

    let date_match = DATE_RULES
        .iter()
        .find_map(|rule| rule.apply(&lowered))
        .transpose()?;

    let (is_forecast, target_date, city_text) = match date_match {
        Some(m) => (
            true,
            today.checked_add_days(Days::new(m.days)).unwrap_or(today),
            lowered.replace(&m.phrase, ""),
        ),
        None => (false, today, lowered.clone()),
    };
    let city_text = city_text.split_whitespace().collect::<Vec<_>>().join(" ");

    Ok(Intent {
        is_forecast,
        target_date,
        attribute: extract_attribute(&lowered),
        city: extract_city(&city_text),
    })
}

/// Lowercase, strip trailing punctuation, then trim.
fn normalize(message: &str) -> String {
    message
        .trim_end_matches(|c: char| c.is_ascii_punctuation())
        .trim()
        .to_lowercase()
}

fn extract_attribute(lowered: &str) -> Option<Attribute> {
    ATTRIBUTE_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, attribute)| *attribute)
}

fn extract_city(text: &str) -> Option<String> {
    let anchored = CITY_ANCHORS
        .iter()
        .find_map(|anchor| text.split_once(anchor))
        .map(|(_, rest)| tidy_city(rest))
        .filter(|city| !city.is_empty());

    if anchored.is_some() {
        return anchored;
    }

    let last = tidy_city(text.split_whitespace().last()?);
    if last.is_empty() || last.eq_ignore_ascii_case("weather") {
        return None;
    }
    Some(last)
}

fn tidy_city(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| !matches!(c, '?' | '.' | '!')).collect();
    title_case(stripped.trim())
}

/// Capitalise the first letter of every alphabetic run.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
