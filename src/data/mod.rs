//! Core data models for the weather dashboard
//!
//! This module contains the normalized view model rendered by the dashboard,
//! along with the clients and the normalizer that produce it.

pub mod error;
pub mod geocoding;
pub mod normalize;
pub mod service;
pub mod weather;
pub mod weather_codes;

pub use error::WeatherError;
pub use geocoding::{GeocodingClient, DEFAULT_GEOCODING_URL};
pub use normalize::normalize;
pub use service::WeatherService;
pub use weather::{ForecastClient, RawForecast, DEFAULT_FORECAST_URL};

use std::time::Duration;

use serde::{Deserialize, Serialize};

use weather_codes::{WeatherCodeEntry, UNKNOWN_ICON, UNKNOWN_TEXT};

/// Default per-request timeout for both API clients
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Geographic coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components are finite and within range
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Display metadata for a resolved place
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Place name as returned by geocoding
    pub name: String,
    /// Country name, empty when unknown
    pub country: String,
    /// First-level administrative region, empty when unknown
    pub region: String,
}

/// Best geocoding match for a city search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPlace {
    pub coordinate: Coordinate,
    pub location: Location,
}

/// Display text and icon of a weather condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    pub icon: String,
}

impl Condition {
    /// Condition for a forecast row: the exact table entry, or "Unknown"
    /// when the code is absent or not defined.
    pub fn describe(code: Option<i64>) -> Self {
        match code.and_then(weather_codes::find) {
            Some(entry) => Self::from(entry),
            None => Self {
                text: UNKNOWN_TEXT.to_string(),
                icon: UNKNOWN_ICON.to_string(),
            },
        }
    }
}

impl From<&WeatherCodeEntry> for Condition {
    fn from(entry: &WeatherCodeEntry) -> Self {
        Self {
            text: entry.text.to_string(),
            icon: entry.icon.to_string(),
        }
    }
}

/// Current conditions at the resolved location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Temperature in Celsius
    pub temperature_celsius: f64,
    /// Current weather condition
    pub condition: Condition,
    /// Raw WMO code, used for display accents
    pub weather_code: i64,
    /// Wind speed in km/h
    pub wind_speed_kph: f64,
    /// Relative humidity percentage (0-100)
    pub humidity_percent: u8,
    /// Mean sea level pressure in hPa
    pub pressure_mb: f64,
    /// Today's maximum UV index
    pub uv_index: f64,
    /// Whether the sun is up
    pub is_daytime: bool,
}

/// One point of the 24-hour forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    /// UTC timestamp, e.g. "2024-07-15T14:00:00.000Z"
    pub timestamp_iso: String,
    /// Temperature in Celsius, `None` when the source had no value
    pub temperature_celsius: Option<f64>,
    pub condition: Condition,
}

/// One day of the daily forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    /// Date as reported by the source, e.g. "2024-07-15"
    pub date: String,
    /// Mean of the day's max and min, `None` when either is missing
    pub average_temperature_celsius: Option<f64>,
    pub condition: Condition,
    /// Local sunrise, "HH:MM"
    pub sunrise: String,
    /// Local sunset, "HH:MM"
    pub sunset: String,
}

/// Normalized forecast produced from one API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub current: CurrentConditions,
    pub hourly: Vec<HourlyPoint>,
    pub daily: Vec<DailyPoint>,
}

/// Everything the dashboard renders
///
/// Starts empty. The location may be present before any forecast has arrived;
/// a new forecast always replaces the previous one as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub location: Option<Location>,
    pub forecast: Option<Forecast>,
}

impl ViewModel {
    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.forecast.is_none()
    }

    pub fn with_location(self, location: Location) -> Self {
        Self {
            location: Some(location),
            ..self
        }
    }

    pub fn with_forecast(self, forecast: Forecast) -> Self {
        Self {
            forecast: Some(forecast),
            ..self
        }
    }
}

/// Settings for one HTTP API client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without trailing slash, e.g. "https://api.open-meteo.com/v1"
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Join an endpoint path onto the base URL
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build the reqwest client for these settings
    pub(crate) fn http_client(&self) -> Result<reqwest::Client, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("weatherdash/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_validity() {
        assert!(Coordinate::new(41.26, 69.21).is_valid());
        assert!(Coordinate::new(-90.0, 180.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 69.21).is_valid());
        assert!(!Coordinate::new(41.26, f64::INFINITY).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -181.0).is_valid());
    }

    #[test]
    fn test_condition_describe_known_code() {
        let condition = Condition::describe(Some(3));
        assert_eq!(condition.text, "Overcast");
        assert_eq!(condition.icon, "\u{2601}\u{FE0F}");
    }

    #[test]
    fn test_condition_describe_missing_or_undefined_code() {
        for code in [None, Some(4), Some(-7), Some(100)] {
            let condition = Condition::describe(code);
            assert_eq!(condition.text, "Unknown");
            assert_eq!(condition.icon, UNKNOWN_ICON);
        }
    }

    #[test]
    fn test_view_model_starts_empty() {
        let view = ViewModel::default();
        assert!(view.is_empty());
        assert!(view.location.is_none());
        assert!(view.forecast.is_none());
    }

    #[test]
    fn test_view_model_location_before_forecast() {
        let view = ViewModel::default().with_location(Location {
            name: "Tashkent".to_string(),
            country: "Uzbekistan".to_string(),
            region: "Toshkent Shahri".to_string(),
        });

        assert!(!view.is_empty());
        assert!(view.forecast.is_none());
        assert_eq!(view.location.as_ref().map(|l| l.name.as_str()), Some("Tashkent"));
    }

    #[test]
    fn test_client_config_normalizes_base_url() {
        let config = ClientConfig::new("http://localhost:1234/v1/");
        assert_eq!(config.base_url, "http://localhost:1234/v1");
        assert_eq!(config.endpoint("/search"), "http://localhost:1234/v1/search");
        assert_eq!(config.endpoint("forecast"), "http://localhost:1234/v1/forecast");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_client_config_with_timeout() {
        let config = ClientConfig::new("http://x").with_timeout(Duration::from_secs(3));
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_view_model_serialization_roundtrip() {
        let view = ViewModel::default().with_location(Location {
            name: "Oslo".to_string(),
            country: "Norway".to_string(),
            region: String::new(),
        });

        let json = serde_json::to_string(&view).expect("Failed to serialize ViewModel");
        let back: ViewModel = serde_json::from_str(&json).expect("Failed to deserialize ViewModel");
        assert_eq!(back, view);
    }
}
