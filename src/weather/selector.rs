use chrono::{NaiveDate, NaiveTime, TimeZone};
use tracing::debug;

use super::ForecastEntry;

/// How the selector walks the forecast list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Trust the provider's chronological order and stop at the first entry
    /// past the target date.
    #[default]
    EarlyExit,
    /// Look at every entry. Tolerates out-of-order lists.
    Exhaustive,
}

/// Pick the entry on `target` (a calendar date in `tz`) whose time is closest
/// to noon. Ties keep the earliest entry seen.
pub fn select_closest_to_noon<'a, Tz: TimeZone>(
    entries: &'a [ForecastEntry],
    target: NaiveDate,
    tz: &Tz,
    mode: ScanMode,
) -> Option<&'a ForecastEntry> {
    let noon = local_noon(target, tz)?;
    let mut best: Option<(&ForecastEntry, i64)> = None;

    for entry in entries {
        let Some(at) = tz.timestamp_opt(entry.timestamp, 0).single() else {
            continue;
        };
        let date = at.date_naive();

        if date == target {
            let distance = (entry.timestamp - noon).abs();
            if best.is_none_or(|(_, min)| distance < min) {
                best = Some((entry, distance));
            }
        } else if date > target && mode == ScanMode::EarlyExit {
            debug!("Forecast list passed {} at {}, stopping scan", target, at.naive_local());
            break;
        }
    }

    best.map(|(entry, _)| entry)
}

/// Unix timestamp of 12:00 on `date` in `tz`. Falls back to the earliest
/// mapping when noon is ambiguous.
fn local_noon<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<i64> {
    let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0)?);
    tz.from_local_datetime(&noon).earliest().map(|at| at.timestamp())
}
