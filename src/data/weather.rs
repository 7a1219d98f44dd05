//! Open-Meteo forecast API client
//!
//! This module fetches current conditions, the hourly series and the daily
//! series for a coordinate in one round trip. The response is kept in its raw
//! shape; see [`super::normalize`] for turning it into the view model.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, instrument};

use super::{ClientConfig, Coordinate, WeatherError};

/// Base URL for the Open-Meteo forecast API
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1";

/// Fields requested for the current snapshot
const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,is_day,precipitation,rain,showers,snowfall,weather_code,cloud_cover,pressure_msl,surface_pressure,wind_speed_10m,wind_direction_10m,wind_gusts_10m";

/// Fields requested for the hourly series
const HOURLY_FIELDS: &str = "temperature_2m,weather_code";

/// Fields requested for the daily series
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,sunrise,sunset,uv_index_max,precipitation_sum,rain_sum,showers_sum,snowfall_sum,precipitation_hours,precipitation_probability_max,wind_speed_10m_max,wind_gusts_10m_max,wind_direction_10m_dominant";

/// Client for fetching forecasts from the Open-Meteo API
#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    config: ClientConfig,
}

impl ForecastClient {
    /// Create a client with custom settings (base URL, timeout)
    pub fn with_config(config: ClientConfig) -> Result<Self, WeatherError> {
        Ok(Self {
            client: config.http_client()?,
            config,
        })
    }

    /// Fetch the raw forecast for the given coordinates
    ///
    /// # Returns
    /// * `Ok(RawForecast)` - The untouched response payload
    /// * `Err(WeatherError::InvalidCoordinates)` - Nothing was requested
    /// * `Err(_)` - Non-success status, network failure or a body that is not JSON
    #[instrument(skip(self), fields(lat = coordinate.latitude, lon = coordinate.longitude))]
    pub async fn fetch(&self, coordinate: Coordinate) -> Result<RawForecast, WeatherError> {
        if !coordinate.is_valid() {
            return Err(WeatherError::InvalidCoordinates);
        }

        let url = self.config.endpoint("forecast");
        let latitude = coordinate.latitude.to_string();
        let longitude = coordinate.longitude.to_string();
        debug!(%url, "requesting forecast");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", CURRENT_FIELDS),
                ("hourly", HOURLY_FIELDS),
                ("daily", DAILY_FIELDS),
                ("timezone", "auto"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "forecast returned non-success status");
            return Err(WeatherError::Status(status));
        }

        let text = response.text().await?;
        let raw = RawForecast::from_json(&text)?;
        debug!(
            hourly = raw.hourly.as_ref().map_or(0, |h| h.temperature_2m.len()),
            daily = raw.daily.as_ref().map_or(0, |d| d.time.len()),
            "forecast received"
        );

        Ok(raw)
    }
}

/// Forecast API response
///
/// Every section and field is optional and array elements may be `null`;
/// the payload is treated as untrusted input. A field of the wrong type reads
/// as absent instead of failing the whole payload, so only a body that is not
/// JSON at all is an error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawForecast {
    #[serde(default, deserialize_with = "lenient_section")]
    pub current: Option<RawCurrent>,
    #[serde(default, deserialize_with = "lenient_section")]
    pub hourly: Option<RawHourly>,
    #[serde(default, deserialize_with = "lenient_section")]
    pub daily: Option<RawDaily>,
}

impl RawForecast {
    /// Parse a response body
    ///
    /// Valid JSON of any shape yields a forecast; sections that are not
    /// objects are dropped.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(body)?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }
}

/// Current snapshot
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCurrent {
    #[serde(default, deserialize_with = "lenient_number")]
    pub temperature_2m: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub relative_humidity_2m: Option<f64>,
    #[serde(default, deserialize_with = "lenient_code")]
    pub is_day: Option<i64>,
    #[serde(default, deserialize_with = "lenient_code")]
    pub weather_code: Option<i64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pressure_msl: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub wind_speed_10m: Option<f64>,
}

/// Hourly series, parallel arrays indexed by hour
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawHourly {
    #[serde(default, deserialize_with = "lenient_texts")]
    pub time: Vec<Option<String>>,
    #[serde(default, deserialize_with = "lenient_numbers")]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_codes")]
    pub weather_code: Vec<Option<i64>>,
}

/// Daily series, parallel arrays indexed by day
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawDaily {
    #[serde(default, deserialize_with = "lenient_texts")]
    pub time: Vec<Option<String>>,
    #[serde(default, deserialize_with = "lenient_codes")]
    pub weather_code: Vec<Option<i64>>,
    #[serde(default, deserialize_with = "lenient_numbers")]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_numbers")]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_texts")]
    pub sunrise: Vec<Option<String>>,
    #[serde(default, deserialize_with = "lenient_texts")]
    pub sunset: Vec<Option<String>>,
    #[serde(default, deserialize_with = "lenient_numbers")]
    pub uv_index_max: Vec<Option<f64>>,
}

fn number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}

/// Integer codes; whole floats such as `3.0` count
fn code(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|v| v.is_finite() && v.fract() == 0.0)
            .map(|v| v as i64)
    })
}

fn text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// Elementwise conversion; anything but an array is an empty series
fn series<T>(value: &Value, element: fn(&Value) -> Option<T>) -> Vec<Option<T>> {
    value
        .as_array()
        .map(|items| items.iter().map(element).collect())
        .unwrap_or_default()
}

fn lenient_section<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(number(&Value::deserialize(deserializer)?))
}

fn lenient_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(code(&Value::deserialize(deserializer)?))
}

fn lenient_numbers<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Option<f64>>, D::Error> {
    Ok(series(&Value::deserialize(deserializer)?, number))
}

fn lenient_codes<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Option<i64>>, D::Error> {
    Ok(series(&Value::deserialize(deserializer)?, code))
}

fn lenient_texts<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Option<String>>, D::Error> {
    Ok(series(&Value::deserialize(deserializer)?, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sample valid Open-Meteo API response
    const VALID_RESPONSE: &str = r#"{
        "latitude": 41.25,
        "longitude": 69.25,
        "generationtime_ms": 0.123,
        "utc_offset_seconds": 18000,
        "timezone": "Asia/Tashkent",
        "timezone_abbreviation": "GMT+5",
        "elevation": 457.0,
        "current": {
            "time": "2024-07-15T14:00",
            "interval": 900,
            "temperature_2m": 22.5,
            "relative_humidity_2m": 65,
            "apparent_temperature": 23.8,
            "is_day": 1,
            "precipitation": 0.0,
            "weather_code": 0,
            "pressure_msl": 1012.4,
            "wind_speed_10m": 12.5,
            "wind_direction_10m": 270
        },
        "hourly": {
            "time": ["2024-07-15T00:00", "2024-07-15T01:00"],
            "temperature_2m": [15.2, null],
            "weather_code": [0, 3]
        },
        "daily": {
            "time": ["2024-07-15"],
            "weather_code": [2],
            "temperature_2m_max": [30.0],
            "temperature_2m_min": [18.0],
            "sunrise": ["2024-07-15T05:30"],
            "sunset": ["2024-07-15T20:15"],
            "uv_index_max": [7.5]
        }
    }"#;

    #[test]
    fn test_parse_valid_response() {
        let raw = RawForecast::from_json(VALID_RESPONSE).expect("Failed to parse valid response");

        let current = raw.current.expect("current section");
        assert_eq!(current.temperature_2m, Some(22.5));
        assert_eq!(current.relative_humidity_2m, Some(65.0));
        assert_eq!(current.is_day, Some(1));
        assert_eq!(current.weather_code, Some(0));
        assert_eq!(current.pressure_msl, Some(1012.4));

        let hourly = raw.hourly.expect("hourly section");
        assert_eq!(hourly.temperature_2m, vec![Some(15.2), None]);
        assert_eq!(hourly.weather_code, vec![Some(0), Some(3)]);

        let daily = raw.daily.expect("daily section");
        assert_eq!(daily.time.len(), 1);
        assert_eq!(daily.uv_index_max, vec![Some(7.5)]);
    }

    #[test]
    fn test_parse_missing_sections() {
        let raw = RawForecast::from_json(r#"{"latitude": 1.0}"#).expect("Failed to parse");
        assert!(raw.current.is_none());
        assert!(raw.hourly.is_none());
        assert!(raw.daily.is_none());
    }

    #[test]
    fn test_parse_missing_fields_within_section() {
        let raw =
            RawForecast::from_json(r#"{"daily": {"time": ["2024-07-15"]}}"#).expect("Failed to parse");
        let daily = raw.daily.expect("daily section");
        assert_eq!(daily.time.len(), 1);
        assert!(daily.sunrise.is_empty());
        assert!(daily.temperature_2m_max.is_empty());
    }

    #[test]
    fn test_parse_malformed_json() {
        assert!(RawForecast::from_json("{ invalid json }").is_err());
    }

    #[test]
    fn test_wrong_typed_fields_read_as_absent() {
        let raw = RawForecast::from_json(
            r#"{
                "current": {"weather_code": 3.0, "temperature_2m": "warm", "is_day": true},
                "hourly": {"temperature_2m": "n/a", "weather_code": [1, "x", 2.5, null]},
                "daily": {"time": ["2024-07-15", 7], "sunrise": [0], "uv_index_max": {"a": 1}}
            }"#,
        )
        .expect("Valid JSON should always parse");

        let current = raw.current.expect("current section");
        assert_eq!(current.weather_code, Some(3));
        assert_eq!(current.temperature_2m, None);
        assert_eq!(current.is_day, None);

        let hourly = raw.hourly.expect("hourly section");
        assert!(hourly.temperature_2m.is_empty());
        assert_eq!(hourly.weather_code, vec![Some(1), None, None, None]);

        let daily = raw.daily.expect("daily section");
        assert_eq!(daily.time, vec![Some("2024-07-15".to_string()), None]);
        assert_eq!(daily.sunrise, vec![None]);
        assert!(daily.uv_index_max.is_empty());
    }

    #[test]
    fn test_wrong_typed_sections_are_dropped() {
        let raw = RawForecast::from_json(r#"{"current": 5, "hourly": [1, 2], "daily": "soon"}"#)
            .expect("Valid JSON should always parse");
        assert!(raw.current.is_none());
        assert!(raw.daily.is_none());

        let raw = RawForecast::from_json("[1, 2, 3]").expect("Valid JSON should always parse");
        assert_eq!(raw, RawForecast::default());
    }

    #[test]
    fn test_field_lists_cover_normalized_fields() {
        for field in ["temperature_2m", "relative_humidity_2m", "is_day", "weather_code", "pressure_msl", "wind_speed_10m"] {
            assert!(CURRENT_FIELDS.split(',').any(|f| f == field), "current missing {}", field);
        }
        for field in ["weather_code", "temperature_2m_max", "temperature_2m_min", "sunrise", "sunset", "uv_index_max"] {
            assert!(DAILY_FIELDS.split(',').any(|f| f == field), "daily missing {}", field);
        }
        assert_eq!(HOURLY_FIELDS, "temperature_2m,weather_code");
    }

    #[tokio::test]
    async fn test_invalid_coordinates_rejected_without_request() {
        let client = ForecastClient::with_config(ClientConfig::new("http://127.0.0.1:9"))
            .expect("Failed to build client");

        let result = client.fetch(Coordinate::new(f64::NAN, 10.0)).await;
        assert!(matches!(result, Err(WeatherError::InvalidCoordinates)));
    }
}
