//! Errors shared by the geocoding and forecast clients

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while resolving a city or fetching its forecast
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The city name was empty after trimming; no request was made
    #[error("City name must not be empty")]
    EmptyQuery,

    /// Geocoding returned no match for the city
    #[error("City not found: {0}")]
    NotFound(String),

    /// Coordinates were not finite or out of range; no request was made
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// The service answered with a non-success status
    #[error("HTTP error! Status: {0}")]
    Status(StatusCode),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl WeatherError {
    /// Whether geocoding found no match
    pub fn is_not_found(&self) -> bool {
        matches!(self, WeatherError::NotFound(_))
    }

    /// Whether the failure came from the network or the remote service
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            WeatherError::Status(_) | WeatherError::RequestFailed(_) | WeatherError::ParseError(_)
        )
    }

    /// Message suitable for showing in the dashboard's error banner
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::EmptyQuery => "Please enter a city name.".to_string(),
            WeatherError::NotFound(city) => {
                format!("City not found: \"{}\". Check the spelling and try again.", city)
            }
            WeatherError::InvalidCoordinates => {
                "The location has no usable coordinates.".to_string()
            }
            WeatherError::Status(_)
            | WeatherError::RequestFailed(_)
            | WeatherError::ParseError(_) => {
                "Error fetching weather data. Please check your connection and try again."
                    .to_string()
            }
        }
    }
}
