//! Normalization of raw forecast payloads into the dashboard view model
//!
//! `normalize` is a total function: missing sections, missing fields, short
//! arrays and `null` elements all degrade to defaults instead of errors.

use chrono::{DateTime, Duration, NaiveTime, SecondsFormat, TimeZone, Timelike, Utc};

use super::weather::{RawCurrent, RawDaily, RawForecast, RawHourly};
use super::weather_codes::lookup;
use super::{Condition, CurrentConditions, DailyPoint, Forecast, HourlyPoint};

/// Number of points in the hourly forecast
pub const HOURLY_POINTS: usize = 24;

/// Sunrise shown when the source has none for a day
pub const DEFAULT_SUNRISE: &str = "06:00";

/// Sunset shown when the source has none for a day
pub const DEFAULT_SUNSET: &str = "18:00";

/// Transform a raw forecast into the normalized view model
///
/// `now` is the local wall-clock time the hourly series is anchored on; its
/// zone decides the UTC offset of each hourly point.
/// Performs no I/O; identical inputs give identical outputs.
pub fn normalize<Tz: TimeZone>(raw: &RawForecast, now: DateTime<Tz>) -> Forecast {
    Forecast {
        current: normalize_current(raw.current.as_ref(), raw.daily.as_ref()),
        hourly: normalize_hourly(raw.hourly.as_ref(), now),
        daily: normalize_daily(raw.daily.as_ref()),
    }
}

fn normalize_current(current: Option<&RawCurrent>, daily: Option<&RawDaily>) -> CurrentConditions {
    let default = RawCurrent::default();
    let current = current.unwrap_or(&default);

    let weather_code = current.weather_code.unwrap_or(0);

    // The current section carries no UV index; borrow today's maximum.
    let uv_index = daily
        .and_then(|d| value_at(&d.uv_index_max, 0))
        .unwrap_or(0.0);

    CurrentConditions {
        temperature_celsius: current.temperature_2m.unwrap_or(0.0),
        condition: Condition::from(lookup(weather_code)),
        weather_code,
        wind_speed_kph: current.wind_speed_10m.unwrap_or(0.0),
        humidity_percent: current
            .relative_humidity_2m
            .filter(|h| h.is_finite())
            .map(|h| h.round().clamp(0.0, 100.0) as u8)
            .unwrap_or(0),
        pressure_mb: current.pressure_msl.unwrap_or(0.0),
        uv_index,
        is_daytime: current.is_day == Some(1),
    }
}

/// Build the 24-point hourly series starting at the current hour
///
/// Known defect, kept for compatibility: every point uses the calendar date of
/// `now`, so hours that wrap past midnight get today's date instead of
/// tomorrow's, and the series is read from indices 0-23 of the source arrays.
///
/// Each hour takes the offset its zone has at that local time, so a DST change
/// during the day shifts the later points. An hour skipped by the change maps
/// to the hour after it; a repeated hour maps to its first occurrence.
fn normalize_hourly<Tz: TimeZone>(hourly: Option<&RawHourly>, now: DateTime<Tz>) -> Vec<HourlyPoint> {
    let start_hour = now.hour() as usize;
    let today = now.date_naive();
    let zone = now.timezone();

    (0..HOURLY_POINTS)
        .map(|i| {
            let hour_index = (start_hour + i) % HOURLY_POINTS;
            let local = today.and_time(NaiveTime::MIN) + Duration::hours(hour_index as i64);
            let timestamp = zone
                .from_local_datetime(&local)
                .earliest()
                .or_else(|| zone.from_local_datetime(&(local + Duration::hours(1))).earliest())
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|| local.and_utc());

            HourlyPoint {
                timestamp_iso: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
                temperature_celsius: hourly.and_then(|h| value_at(&h.temperature_2m, hour_index)),
                condition: Condition::describe(hourly.and_then(|h| value_at(&h.weather_code, hour_index))),
            }
        })
        .collect()
}

fn normalize_daily(daily: Option<&RawDaily>) -> Vec<DailyPoint> {
    let Some(daily) = daily else {
        return Vec::new();
    };

    daily
        .time
        .iter()
        .enumerate()
        .map(|(i, date)| {
            let average = match (
                value_at(&daily.temperature_2m_max, i),
                value_at(&daily.temperature_2m_min, i),
            ) {
                (Some(max), Some(min)) => Some((max + min) / 2.0),
                _ => None,
            };

            DailyPoint {
                date: date.clone().unwrap_or_default(),
                average_temperature_celsius: average,
                condition: Condition::describe(value_at(&daily.weather_code, i)),
                sunrise: time_of_day(daily.sunrise.get(i).and_then(Option::as_deref))
                    .unwrap_or(DEFAULT_SUNRISE)
                    .to_string(),
                sunset: time_of_day(daily.sunset.get(i).and_then(Option::as_deref))
                    .unwrap_or(DEFAULT_SUNSET)
                    .to_string(),
            }
        })
        .collect()
}

/// Element `index` of a parallel array, if present and non-null
fn value_at<T: Copy>(values: &[Option<T>], index: usize) -> Option<T> {
    values.get(index).copied().flatten()
}

/// The time portion of an ISO local timestamp ("2024-07-15T05:30" -> "05:30")
fn time_of_day(timestamp: Option<&str>) -> Option<&str> {
    timestamp?
        .split('T')
        .nth(1)
        .filter(|time| !time.is_empty())
}
