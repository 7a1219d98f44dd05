//! Plain-text rendering of a view model for one-shot runs

use std::fmt::Write;

use super::dashboard::{day_label, hour_label, location_label};
use super::theme::uv_level_text;
use crate::data::ViewModel;

/// Hourly points shown in the summary
const SUMMARY_HOURS: usize = 12;

/// Multi-line summary of the location, current conditions and forecast
pub fn summary(view: &ViewModel) -> String {
    let mut out = String::new();

    if let Some(location) = &view.location {
        let _ = writeln!(out, "{}", location_label(location));
    }

    let Some(forecast) = &view.forecast else {
        out.push_str("Weather data unavailable\n");
        return out;
    };

    let current = &forecast.current;
    let _ = writeln!(
        out,
        "{} {:.1}\u{00B0}C {} ({})",
        current.condition.icon,
        current.temperature_celsius,
        current.condition.text,
        if current.is_daytime { "day" } else { "night" },
    );
    let _ = writeln!(
        out,
        "Wind {:.1} km/h | Humidity {}% | Pressure {:.1} hPa | UV {:.1} ({})",
        current.wind_speed_kph,
        current.humidity_percent,
        current.pressure_mb,
        current.uv_index,
        uv_level_text(current.uv_index),
    );

    if !forecast.hourly.is_empty() {
        out.push_str("\nHourly\n");
        for point in forecast.hourly.iter().take(SUMMARY_HOURS) {
            let _ = writeln!(
                out,
                "  {}  {}  {}",
                hour_label(&point.timestamp_iso),
                point.condition.icon,
                format_temperature(point.temperature_celsius),
            );
        }
    }

    if !forecast.daily.is_empty() {
        out.push_str("\nDaily\n");
        for day in &forecast.daily {
            let _ = writeln!(
                out,
                "  {:<12} {}  {:<30} {:>7}  sunrise {}  sunset {}",
                day_label(&day.date),
                day.condition.icon,
                day.condition.text,
                format_temperature(day.average_temperature_celsius),
                day.sunrise,
                day.sunset,
            );
        }
    }

    out
}

fn format_temperature(temperature: Option<f64>) -> String {
    temperature
        .map(|t| format!("{:.1}\u{00B0}C", t))
        .unwrap_or_else(|| "--".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Condition, CurrentConditions, DailyPoint, Forecast, Location};

    fn view() -> ViewModel {
        ViewModel::default()
            .with_location(Location {
                name: "Tashkent".to_string(),
                country: "Uzbekistan".to_string(),
                region: "Toshkent Shahri".to_string(),
            })
            .with_forecast(Forecast {
                current: CurrentConditions {
                    temperature_celsius: 22.5,
                    condition: Condition::describe(Some(0)),
                    weather_code: 0,
                    wind_speed_kph: 12.5,
                    humidity_percent: 65,
                    pressure_mb: 1012.0,
                    uv_index: 2.0,
                    is_daytime: false,
                },
                hourly: Vec::new(),
                daily: vec![DailyPoint {
                    date: "2024-07-15".to_string(),
                    average_temperature_celsius: None,
                    condition: Condition::describe(None),
                    sunrise: "06:00".to_string(),
                    sunset: "18:00".to_string(),
                }],
            })
    }

    #[test]
    fn test_summary_lists_location_and_current() {
        let text = summary(&view());
        assert!(text.starts_with("Tashkent, Toshkent Shahri, Uzbekistan\n"));
        assert!(text.contains("22.5\u{00B0}C Clear sky (night)"));
        assert!(text.contains("Humidity 65%"));
        assert!(text.contains("UV 2.0 (Low)"));
        assert!(!text.contains("Hourly"));
    }

    #[test]
    fn test_summary_marks_missing_values() {
        let text = summary(&view());
        assert!(text.contains("Mon 15 Jul"));
        assert!(text.contains("Unknown"));
        assert!(text.contains("--"));
        assert!(text.contains("sunrise 06:00  sunset 18:00"));
    }

    #[test]
    fn test_summary_without_forecast() {
        let text = summary(&ViewModel::default());
        assert_eq!(text, "Weather data unavailable\n");
    }
}
