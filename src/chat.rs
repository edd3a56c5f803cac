use chrono::{Local, NaiveDate, TimeZone};
use tracing::{debug, info};

use crate::compose::compose;
use crate::intent::interpret;
use crate::models::ChatResponse;
use crate::weather::{ScanMode, WeatherSource, select_closest_to_noon};

/// Answer one chat message: interpret it, fetch what it asks for, and render
/// the reply. Dates are resolved in the server's local time zone.
pub async fn answer(message: &str, source: &dyn WeatherSource, mode: ScanMode) -> ChatResponse {
    answer_at(message, source, mode, &Local, Local::now().date_naive()).await
}

/// Same as [`answer`] with an explicit time zone and "today".
pub async fn answer_at<Tz: TimeZone>(
    message: &str,
    source: &dyn WeatherSource,
    mode: ScanMode,
    tz: &Tz,
    today: NaiveDate,
) -> ChatResponse {
    let intent = match interpret(message, today) {
        Ok(intent) => intent,
        Err(beyond) => {
            info!("Rejecting forecast {} days out", beyond.requested_days);
            return ChatResponse::plain(beyond.to_string());
        }
    };
    debug!("Interpreted message as {:?}", intent);

    let Some(city) = intent.city.as_deref() else {
        return compose(None, &intent);
    };

    let snapshot = if intent.is_forecast {
        source.fetch_forecast_list(city).await.and_then(|entries| {
            select_closest_to_noon(&entries, intent.target_date, tz, mode)
                .map(|entry| entry.weather.clone())
        })
    } else {
        source.fetch_current(city).await
    };

    compose(snapshot.as_ref(), &intent)
}
