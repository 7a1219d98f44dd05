//! Static WMO weather code table
//!
//! Maps the integer weather codes reported by Open-Meteo to a display text
//! and an icon glyph. Only meteorologically defined codes are present.

use serde::Serialize;

/// A single entry of the weather code table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherCodeEntry {
    /// WMO weather code
    pub code: i64,
    /// Human-readable condition
    pub text: &'static str,
    /// Icon glyph
    pub icon: &'static str,
}

/// Text used when a forecast row carries no usable weather code
pub const UNKNOWN_TEXT: &str = "Unknown";

/// Icon used when a forecast row carries no usable weather code
pub const UNKNOWN_ICON: &str = "\u{2753}"; // ❓

const SUN: &str = "\u{2600}\u{FE0F}"; // ☀️
const SUN_BEHIND_SMALL_CLOUD: &str = "\u{1F324}\u{FE0F}"; // 🌤️
const SUN_BEHIND_CLOUD: &str = "\u{26C5}"; // ⛅
const CLOUD: &str = "\u{2601}\u{FE0F}"; // ☁️
const FOG: &str = "\u{1F32B}\u{FE0F}"; // 🌫️
const RAIN: &str = "\u{1F327}\u{FE0F}"; // 🌧️
const FREEZING_RAIN: &str = "\u{1F327}\u{FE0F}\u{2744}\u{FE0F}"; // 🌧️❄️
const SNOW: &str = "\u{2744}\u{FE0F}"; // ❄️
const SHOWERS: &str = "\u{1F326}\u{FE0F}"; // 🌦️
const SNOW_SHOWERS: &str = "\u{1F328}\u{FE0F}"; // 🌨️
const THUNDERSTORM: &str = "\u{26C8}\u{FE0F}"; // ⛈️

/// All defined weather codes, sorted by code. The first entry is the fallback.
pub static WEATHER_CODES: [WeatherCodeEntry; 28] = [
    WeatherCodeEntry { code: 0, text: "Clear sky", icon: SUN },
    WeatherCodeEntry { code: 1, text: "Mainly clear", icon: SUN_BEHIND_SMALL_CLOUD },
    WeatherCodeEntry { code: 2, text: "Partly cloudy", icon: SUN_BEHIND_CLOUD },
    WeatherCodeEntry { code: 3, text: "Overcast", icon: CLOUD },
    WeatherCodeEntry { code: 45, text: "Fog", icon: FOG },
    WeatherCodeEntry { code: 48, text: "Depositing rime fog", icon: FOG },
    WeatherCodeEntry { code: 51, text: "Light drizzle", icon: RAIN },
    WeatherCodeEntry { code: 53, text: "Moderate drizzle", icon: RAIN },
    WeatherCodeEntry { code: 55, text: "Dense drizzle", icon: RAIN },
    WeatherCodeEntry { code: 56, text: "Light freezing drizzle", icon: FREEZING_RAIN },
    WeatherCodeEntry { code: 57, text: "Dense freezing drizzle", icon: FREEZING_RAIN },
    WeatherCodeEntry { code: 61, text: "Slight rain", icon: RAIN },
    WeatherCodeEntry { code: 63, text: "Moderate rain", icon: RAIN },
    WeatherCodeEntry { code: 65, text: "Heavy rain", icon: RAIN },
    WeatherCodeEntry { code: 66, text: "Light freezing rain", icon: FREEZING_RAIN },
    WeatherCodeEntry { code: 67, text: "Heavy freezing rain", icon: FREEZING_RAIN },
    WeatherCodeEntry { code: 71, text: "Slight snow fall", icon: SNOW },
    WeatherCodeEntry { code: 73, text: "Moderate snow fall", icon: SNOW },
    WeatherCodeEntry { code: 75, text: "Heavy snow fall", icon: SNOW },
    WeatherCodeEntry { code: 77, text: "Snow grains", icon: SNOW },
    WeatherCodeEntry { code: 80, text: "Slight rain showers", icon: SHOWERS },
    WeatherCodeEntry { code: 81, text: "Moderate rain showers", icon: SHOWERS },
    WeatherCodeEntry { code: 82, text: "Violent rain showers", icon: SHOWERS },
    WeatherCodeEntry { code: 85, text: "Slight snow showers", icon: SNOW_SHOWERS },
    WeatherCodeEntry { code: 86, text: "Heavy snow showers", icon: SNOW_SHOWERS },
    WeatherCodeEntry { code: 95, text: "Thunderstorm", icon: THUNDERSTORM },
    WeatherCodeEntry { code: 96, text: "Thunderstorm with slight hail", icon: THUNDERSTORM },
    WeatherCodeEntry { code: 99, text: "Thunderstorm with heavy hail", icon: THUNDERSTORM },
];

/// Codes that count as rain for display accents (drizzle, rain, rain showers)
const RAIN_CODES: [i64; 13] = [51, 53, 55, 56, 57, 61, 63, 65, 66, 67, 80, 81, 82];

/// Get the exact table entry for a code
///
/// Returns `None` for codes the table does not define.
pub fn find(code: i64) -> Option<&'static WeatherCodeEntry> {
    WEATHER_CODES.iter().find(|entry| entry.code == code)
}

/// Look up a weather code, falling back to the code-0 entry
///
/// Accepts a bare code or an `Option`; a missing code is treated as 0.
/// Never fails: unknown and negative codes resolve to "Clear sky".
///
/// ```
/// use weatherdash::data::weather_codes::lookup;
///
/// assert_eq!(lookup(3).text, "Overcast");
/// assert_eq!(lookup(4).text, "Clear sky");
/// assert_eq!(lookup(None).text, "Clear sky");
/// ```
pub fn lookup(code: impl Into<Option<i64>>) -> &'static WeatherCodeEntry {
    code.into()
        .and_then(find)
        .unwrap_or(&WEATHER_CODES[0])
}

/// Whether the code describes rain
pub fn is_rain(code: i64) -> bool {
    RAIN_CODES.contains(&code)
}

/// Whether the code describes clear or mainly clear skies
pub fn is_clear(code: i64) -> bool {
    matches!(code, 0 | 1)
}
