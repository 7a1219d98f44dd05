//! Open-Meteo geocoding client
//!
//! Resolves a free-text city name to the best matching coordinate pair and
//! its display metadata.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::{ClientConfig, Coordinate, Location, ResolvedPlace, WeatherError};

/// Base URL for the Open-Meteo geocoding API
pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1";

/// Client for resolving city names via the Open-Meteo geocoding API
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    config: ClientConfig,
}

impl GeocodingClient {
    /// Create a client with custom settings (base URL, timeout)
    pub fn with_config(config: ClientConfig) -> Result<Self, WeatherError> {
        Ok(Self {
            client: config.http_client()?,
            config,
        })
    }

    /// Resolve a city name to its best match
    ///
    /// # Returns
    /// * `Ok(ResolvedPlace)` - The first (highest ranked) result
    /// * `Err(WeatherError::EmptyQuery)` - The name was blank; nothing was requested
    /// * `Err(WeatherError::NotFound)` - The service returned no results
    /// * `Err(_)` - Transport failures (status, network, malformed body)
    #[instrument(skip(self))]
    pub async fn resolve(&self, city: &str) -> Result<ResolvedPlace, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::EmptyQuery);
        }

        let url = self.config.endpoint("search");
        debug!(%url, "requesting geocoding");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("name", city),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "geocoding returned non-success status");
            return Err(WeatherError::Status(status));
        }

        let text = response.text().await?;
        let body: GeocodingResponse = serde_json::from_str(&text)?;

        let place = body
            .results
            .and_then(|results| results.into_iter().next())
            .map(ResolvedPlace::from)
            .ok_or_else(|| WeatherError::NotFound(city.to_string()))?;

        info!(
            name = %place.location.name,
            latitude = place.coordinate.latitude,
            longitude = place.coordinate.longitude,
            "resolved city"
        );
        Ok(place)
    }
}

/// Geocoding API response
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<GeocodingResult>>,
}

/// A single geocoding match
#[derive(Debug, Deserialize)]
struct GeocodingResult {
    latitude: f64,
    longitude: f64,
    name: String,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    admin1: Option<String>,
}

impl From<GeocodingResult> for ResolvedPlace {
    fn from(result: GeocodingResult) -> Self {
        Self {
            coordinate: Coordinate::new(result.latitude, result.longitude),
            location: Location {
                name: result.name,
                country: result.country.unwrap_or_default(),
                region: result.admin1.unwrap_or_default(),
            },
        }
    }
}
