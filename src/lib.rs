//! weatherdash library
//!
//! Geocodes a city, fetches its Open-Meteo forecast, normalizes it into a
//! view model and renders it as a terminal dashboard. The modules are exposed
//! for use in integration tests.

pub mod app;
pub mod cli;
pub mod data;
pub mod logging;
pub mod refresh;
pub mod state;
pub mod ui;
