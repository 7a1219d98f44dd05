//! Command-line interface parsing for weatherdash
//!
//! Handles the startup city, API endpoint overrides (useful against a local
//! mock server), the request timeout and the non-interactive `--once` mode.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::data::{ClientConfig, DEFAULT_FORECAST_URL, DEFAULT_GEOCODING_URL};

/// City shown when the dashboard starts
pub const DEFAULT_CITY: &str = "Tashkent";

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The city name is blank
    #[error("Invalid city: the city name must not be empty")]
    EmptyCity,

    /// The timeout is zero
    #[error("Invalid timeout: must be at least 1 second")]
    ZeroTimeout,

    /// `--json` only makes sense with `--once`
    #[error("--json requires --once")]
    JsonWithoutOnce,
}

/// weatherdash - current, hourly and daily weather for any city
#[derive(Parser, Debug)]
#[command(name = "weatherdash")]
#[command(about = "Terminal weather dashboard powered by Open-Meteo")]
#[command(version)]
pub struct Cli {
    /// City to show on startup
    #[arg(long, short, value_name = "CITY", default_value = DEFAULT_CITY)]
    pub city: String,

    /// Base URL of the geocoding API
    #[arg(long, value_name = "URL", default_value = DEFAULT_GEOCODING_URL)]
    pub geocoding_url: String,

    /// Base URL of the forecast API
    #[arg(long, value_name = "URL", default_value = DEFAULT_FORECAST_URL)]
    pub forecast_url: String,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub timeout: u64,

    /// Print the forecast once and exit instead of opening the dashboard
    #[arg(long)]
    pub once: bool,

    /// With --once, print the view model as JSON
    #[arg(long)]
    pub json: bool,
}

/// How the binary presents its results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Interactive terminal dashboard
    #[default]
    Dashboard,
    /// Print a text summary and exit
    Text,
    /// Print the view model as JSON and exit
    Json,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Trimmed startup city
    pub city: String,
    pub geocoding: ClientConfig,
    pub forecast: ClientConfig,
    pub output: OutputMode,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
            geocoding: ClientConfig::new(DEFAULT_GEOCODING_URL),
            forecast: ClientConfig::new(DEFAULT_FORECAST_URL),
            output: OutputMode::Dashboard,
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with validated settings
    /// * `Err(CliError)` if the city is blank, the timeout is zero, or
    ///   `--json` is given without `--once`
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let city = cli.city.trim();
        if city.is_empty() {
            return Err(CliError::EmptyCity);
        }
        if cli.timeout == 0 {
            return Err(CliError::ZeroTimeout);
        }

        let output = match (cli.once, cli.json) {
            (false, false) => OutputMode::Dashboard,
            (true, false) => OutputMode::Text,
            (true, true) => OutputMode::Json,
            (false, true) => return Err(CliError::JsonWithoutOnce),
        };

        let timeout = Duration::from_secs(cli.timeout);
        Ok(StartupConfig {
            city: city.to_string(),
            geocoding: ClientConfig::new(cli.geocoding_url.as_str()).with_timeout(timeout),
            forecast: ClientConfig::new(cli.forecast_url.as_str()).with_timeout(timeout),
            output,
        })
    }
}
