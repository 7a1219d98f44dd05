//! Colour palettes for the dark and light themes

use ratatui::style::Color;

use crate::data::weather_codes::{is_clear, is_rain};
use crate::state::Theme;

/// Accent used for rainy conditions
const RAIN_ACCENT: Color = Color::Rgb(0x55, 0x99, 0xff);
/// Accent used for clear conditions
const SUN_ACCENT: Color = Color::Rgb(0xff, 0xdd, 0x00);

/// Colours used by the dashboard widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Section headers and borders
    pub header: Color,
    /// Primary text
    pub primary: Color,
    /// Secondary/dimmed text
    pub secondary: Color,
    /// Placeholder for missing data
    pub unknown: Color,
    /// Error banner
    pub error: Color,
    /// Loading indicator and search box while editing
    pub highlight: Color,
    /// Accent for conditions that are neither rainy nor clear
    pub neutral_accent: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                header: Color::Cyan,
                primary: Color::White,
                secondary: Color::Gray,
                unknown: Color::DarkGray,
                error: Color::Red,
                highlight: Color::Yellow,
                neutral_accent: Color::White,
            },
            Theme::Light => Self {
                header: Color::Blue,
                primary: Color::Black,
                secondary: Color::DarkGray,
                unknown: Color::Gray,
                error: Color::Red,
                highlight: Color::Magenta,
                neutral_accent: Color::Black,
            },
        }
    }

    /// Accent colour for the current weather code
    pub fn accent(&self, weather_code: i64) -> Color {
        if is_rain(weather_code) {
            RAIN_ACCENT
        } else if is_clear(weather_code) {
            SUN_ACCENT
        } else {
            self.neutral_accent
        }
    }
}

/// Color for temperature (warmer = more red, cooler = more blue)
pub fn temperature_color(temp: f64) -> Color {
    if temp >= 30.0 {
        Color::Red
    } else if temp >= 25.0 {
        Color::LightRed
    } else if temp >= 20.0 {
        Color::Yellow
    } else if temp >= 15.0 {
        Color::Green
    } else if temp >= 10.0 {
        Color::Cyan
    } else {
        Color::Blue
    }
}

/// Returns the color for a UV index value
pub fn uv_index_color(uv: f64) -> Color {
    match uv as u32 {
        0..=2 => Color::Green,
        3..=5 => Color::Yellow,
        6..=7 => Color::LightRed,
        8..=10 => Color::Red,
        _ => Color::Magenta, // Extreme
    }
}

/// Returns the text description for a UV index value
pub fn uv_level_text(uv: f64) -> &'static str {
    match uv as u32 {
        0..=2 => "Low",
        3..=5 => "Moderate",
        6..=7 => "High",
        8..=10 => "Very High",
        _ => "Extreme",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accent_by_condition() {
        let palette = Palette::for_theme(Theme::Dark);
        assert_eq!(palette.accent(61), RAIN_ACCENT);
        assert_eq!(palette.accent(80), RAIN_ACCENT);
        assert_eq!(palette.accent(0), SUN_ACCENT);
        assert_eq!(palette.accent(1), SUN_ACCENT);
        assert_eq!(palette.accent(3), Color::White);
        assert_eq!(palette.accent(71), Color::White);
    }

    #[test]
    fn test_light_theme_neutral_accent_is_readable() {
        let palette = Palette::for_theme(Theme::Light);
        assert_eq!(palette.accent(45), Color::Black);
        assert_ne!(palette, Palette::for_theme(Theme::Dark));
    }

    #[test]
    fn test_temperature_color_bands() {
        assert_eq!(temperature_color(35.0), Color::Red);
        assert_eq!(temperature_color(22.5), Color::Yellow);
        assert_eq!(temperature_color(12.0), Color::Cyan);
        assert_eq!(temperature_color(-5.0), Color::Blue);
    }

    #[test]
    fn test_uv_level_text() {
        assert_eq!(uv_level_text(0.0), "Low");
        assert_eq!(uv_level_text(4.0), "Moderate");
        assert_eq!(uv_level_text(7.5), "High");
        assert_eq!(uv_level_text(9.0), "Very High");
        assert_eq!(uv_level_text(12.0), "Extreme");
    }

    #[test]
    fn test_uv_index_color() {
        assert_eq!(uv_index_color(1.0), Color::Green);
        assert_eq!(uv_index_color(6.0), Color::LightRed);
        assert_eq!(uv_index_color(11.0), Color::Magenta);
    }
}
