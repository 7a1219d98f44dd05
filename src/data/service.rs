//! City-to-forecast pipeline
//!
//! Chains the geocoder, the forecast client and the normalizer explicitly:
//! the coordinate returned by `resolve_city` is handed to `fetch_forecast`.

use chrono::{DateTime, TimeZone};
use tracing::{info, instrument};

use super::{
    normalize, ClientConfig, Coordinate, Forecast, ForecastClient, GeocodingClient,
    ResolvedPlace, WeatherError,
};

/// Geocoding and forecast clients bundled for the dashboard
#[derive(Debug, Clone)]
pub struct WeatherService {
    geocoder: GeocodingClient,
    forecaster: ForecastClient,
}

impl WeatherService {
    pub fn new(geocoder: GeocodingClient, forecaster: ForecastClient) -> Self {
        Self {
            geocoder,
            forecaster,
        }
    }

    /// Build both clients from their settings
    pub fn from_configs(
        geocoding: ClientConfig,
        forecast: ClientConfig,
    ) -> Result<Self, WeatherError> {
        Ok(Self::new(
            GeocodingClient::with_config(geocoding)?,
            ForecastClient::with_config(forecast)?,
        ))
    }

    /// Resolve a city name to coordinates and display metadata
    pub async fn resolve_city(&self, city: &str) -> Result<ResolvedPlace, WeatherError> {
        self.geocoder.resolve(city).await
    }

    /// Fetch and normalize the forecast for a coordinate
    pub async fn fetch_forecast<Tz: TimeZone>(
        &self,
        coordinate: Coordinate,
        now: DateTime<Tz>,
    ) -> Result<Forecast, WeatherError> {
        let raw = self.forecaster.fetch(coordinate).await?;
        Ok(normalize(&raw, now))
    }

    /// Resolve a city, then fetch its forecast
    ///
    /// The forecast is never requested when resolution fails.
    #[instrument(skip(self, now))]
    pub async fn load<Tz: TimeZone>(
        &self,
        city: &str,
        now: DateTime<Tz>,
    ) -> Result<(ResolvedPlace, Forecast), WeatherError> {
        let place = self.resolve_city(city).await?;
        let forecast = self.fetch_forecast(place.coordinate, now).await?;
        info!(
            location = %place.location.name,
            days = forecast.daily.len(),
            "forecast loaded"
        );
        Ok((place, forecast))
    }
}
