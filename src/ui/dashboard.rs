//! Dashboard screen rendering
//!
//! Renders the search box, the status line, current conditions, the 24-hour
//! strip and the daily forecast for the current state snapshot.

use chrono::{DateTime, Local, NaiveDate};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::{temperature_color, uv_index_color, uv_level_text, Palette};
use super::widgets::TemperatureSparkline;
use crate::data::{CurrentConditions, DailyPoint, Forecast, HourlyPoint, Location};
use crate::state::{DashboardState, InputMode};

/// Width of one column in the hourly strip
const HOUR_COLUMN_WIDTH: u16 = 7;

/// Renders the full dashboard
pub fn render(frame: &mut Frame, state: &DashboardState) {
    let palette = Palette::for_theme(state.theme);
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search box
            Constraint::Length(1), // status line
            Constraint::Min(0),    // content
            Constraint::Length(1), // footer
        ])
        .split(area);

    render_search_box(frame, chunks[0], state, &palette);
    render_status_line(frame, chunks[1], state, &palette);

    if state.view.is_empty() {
        render_empty(frame, chunks[2], state, &palette);
    } else {
        render_content(frame, chunks[2], state, &palette);
    }

    render_footer(frame, chunks[3], state, &palette);
}

fn render_search_box(frame: &mut Frame, area: Rect, state: &DashboardState, palette: &Palette) {
    let editing = state.mode == InputMode::Editing;
    let border = if editing {
        palette.highlight
    } else {
        palette.header
    };

    let mut spans = vec![Span::styled(
        state.input.clone(),
        Style::default().fg(palette.primary),
    )];
    if editing {
        spans.push(Span::styled("_", Style::default().fg(palette.highlight)));
    } else if state.input.is_empty() {
        spans.push(Span::styled(
            "Enter city name",
            Style::default().fg(palette.unknown),
        ));
    }

    let block = Block::default()
        .title(" Search city ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_status_line(frame: &mut Frame, area: Rect, state: &DashboardState, palette: &Palette) {
    let line = if let Some(error) = &state.error {
        Line::from(Span::styled(
            format!(" ! {}", error),
            Style::default()
                .fg(palette.error)
                .add_modifier(Modifier::BOLD),
        ))
    } else if state.loading {
        Line::from(Span::styled(
            format!(" Loading weather for {}...", state.search_term),
            Style::default().fg(palette.highlight),
        ))
    } else {
        Line::from("")
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_empty(frame: &mut Frame, area: Rect, state: &DashboardState, palette: &Palette) {
    let message = if state.loading {
        "Loading..."
    } else {
        "Please enter a city name to see the weather"
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Percentage(45),
        ])
        .split(area);

    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(palette.secondary))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, chunks[1]);
}

fn render_content(frame: &mut Frame, area: Rect, state: &DashboardState, palette: &Palette) {
    let forecast = state.view.forecast.as_ref();
    let daily_rows = forecast.map_or(1, |f| f.daily.len().max(1)) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),              // current conditions
            Constraint::Length(6),              // hourly strip
            Constraint::Min(daily_rows.min(3) + 2), // daily forecast
        ])
        .split(area);

    render_current(frame, chunks[0], state.view.location.as_ref(), forecast, palette);
    render_hourly(frame, chunks[1], forecast.map(|f| f.hourly.as_slice()), palette);
    render_daily(frame, chunks[2], forecast.map(|f| f.daily.as_slice()), palette);
}

fn render_current(
    frame: &mut Frame,
    area: Rect,
    location: Option<&Location>,
    forecast: Option<&Forecast>,
    palette: &Palette,
) {
    let title = location.map_or_else(|| " Current ".to_string(), |l| format!(" {} ", location_label(l)));
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.header));

    let lines = match forecast {
        Some(forecast) => build_current_lines(&forecast.current, palette),
        None => vec![Line::from(Span::styled(
            "Weather data unavailable",
            Style::default().fg(palette.unknown),
        ))],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// "Name, Region, Country", skipping empty parts
pub(crate) fn location_label(location: &Location) -> String {
    [
        location.name.as_str(),
        location.region.as_str(),
        location.country.as_str(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(", ")
}

fn build_current_lines(current: &CurrentConditions, palette: &Palette) -> Vec<Line<'static>> {
    let accent = palette.accent(current.weather_code);
    let day_or_night = if current.is_daytime { "Day" } else { "Night" };

    vec![
        Line::from(vec![
            Span::raw(format!("{}  ", current.condition.icon)),
            Span::styled(
                format!("{:.1}\u{00B0}C", current.temperature_celsius),
                Style::default()
                    .fg(temperature_color(current.temperature_celsius))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                current.condition.text.clone(),
                Style::default().fg(accent),
            ),
        ]),
        Line::from(""),
        detail_line("Wind", format!("{:.1} km/h", current.wind_speed_kph), palette),
        detail_line("Humidity", format!("{}%", current.humidity_percent), palette),
        detail_line("Pressure", format!("{:.1} hPa", current.pressure_mb), palette),
        Line::from(vec![
            Span::styled(format!("{:<10}", "UV index"), Style::default().fg(palette.secondary)),
            Span::styled(
                format!("{:.1} ({})", current.uv_index, uv_level_text(current.uv_index)),
                Style::default().fg(uv_index_color(current.uv_index)),
            ),
            Span::styled(format!("   {}", day_or_night), Style::default().fg(palette.secondary)),
        ]),
    ]
}

fn detail_line(label: &str, value: String, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), Style::default().fg(palette.secondary)),
        Span::styled(value, Style::default().fg(palette.primary)),
    ])
}

fn render_hourly(frame: &mut Frame, area: Rect, hourly: Option<&[HourlyPoint]>, palette: &Palette) {
    let block = Block::default()
        .title(" Hourly forecast ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.header));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let hourly = match hourly {
        Some(points) if !points.is_empty() => points,
        _ => {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "No hourly forecast available",
                    Style::default().fg(palette.unknown),
                )),
                inner,
            );
            return;
        }
    };

    let columns = (inner.width / HOUR_COLUMN_WIDTH) as usize;
    let visible = &hourly[..hourly.len().min(columns)];

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(build_hourly_lines(visible, palette)), rows[0]);

    let temperatures: Vec<Option<f64>> = visible.iter().map(|p| p.temperature_celsius).collect();
    frame.render_widget(
        TemperatureSparkline::new(&temperatures)
            .column_width(HOUR_COLUMN_WIDTH)
            .current_position(0)
            .style(Style::default().fg(palette.header)),
        rows[1],
    );
}

/// Three lines: hour, icon, temperature, one fixed-width column per point
fn build_hourly_lines(points: &[HourlyPoint], palette: &Palette) -> Vec<Line<'static>> {
    let width = HOUR_COLUMN_WIDTH as usize;
    let mut hours = Vec::with_capacity(points.len());
    let mut icons = Vec::with_capacity(points.len());
    let mut temps = Vec::with_capacity(points.len());

    for point in points {
        hours.push(Span::styled(
            format!("{:<width$}", hour_label(&point.timestamp_iso)),
            Style::default().fg(palette.secondary),
        ));
        // Emoji are two cells wide
        icons.push(Span::raw(format!("{:<w$}", point.condition.icon, w = width - 1)));
        temps.push(match point.temperature_celsius {
            Some(t) => Span::styled(
                format!("{:<width$}", format!("{:.0}\u{00B0}C", t)),
                Style::default().fg(temperature_color(t)),
            ),
            None => Span::styled(format!("{:<width$}", "--"), Style::default().fg(palette.unknown)),
        });
    }

    vec![Line::from(hours), Line::from(icons), Line::from(temps)]
}

/// Local "HH:MM" for an RFC 3339 timestamp, or the raw text if unparsable
pub(crate) fn hour_label(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

fn render_daily(frame: &mut Frame, area: Rect, daily: Option<&[DailyPoint]>, palette: &Palette) {
    let block = Block::default()
        .title(" Daily forecast ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.header));

    let lines = match daily {
        Some(days) if !days.is_empty() => days.iter().map(|d| build_daily_line(d, palette)).collect(),
        _ => vec![Line::from(Span::styled(
            "No daily forecast available",
            Style::default().fg(palette.unknown),
        ))],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn build_daily_line(day: &DailyPoint, palette: &Palette) -> Line<'static> {
    let temperature = match day.average_temperature_celsius {
        Some(t) => Span::styled(
            format!("{:>7}", format!("{:.1}\u{00B0}C", t)),
            Style::default().fg(temperature_color(t)),
        ),
        None => Span::styled(format!("{:>7}", "--"), Style::default().fg(palette.unknown)),
    };

    Line::from(vec![
        Span::styled(
            format!("{:<12}", day_label(&day.date)),
            Style::default().fg(palette.primary),
        ),
        Span::raw(format!("{}  ", day.condition.icon)),
        Span::styled(
            format!("{:<30}", day.condition.text),
            Style::default().fg(palette.secondary),
        ),
        temperature,
        Span::styled(
            format!("   \u{2191} {}  \u{2193} {}", day.sunrise, day.sunset),
            Style::default().fg(palette.secondary),
        ),
    ])
}

/// "Mon 15 Jul" for an ISO date, or the raw text if unparsable
pub(crate) fn day_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%a %d %b").to_string())
        .unwrap_or_else(|_| date.to_string())
}

fn render_footer(frame: &mut Frame, area: Rect, state: &DashboardState, palette: &Palette) {
    let hint = match state.mode {
        InputMode::Editing => "Enter search  Esc cancel".to_string(),
        InputMode::Normal => {
            let updated = state
                .last_updated
                .map(|t| format!("  |  updated {}", t.format("%H:%M")))
                .unwrap_or_default();
            format!(
                "/ search  r refresh  t theme  l {}  ? help  q quit{}",
                state.language.code(),
                updated
            )
        }
    };

    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(palette.unknown))),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Condition, Coordinate, ResolvedPlace};
    use crate::state::Action;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(state: &DashboardState, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn sample_forecast() -> Forecast {
        Forecast {
            current: CurrentConditions {
                temperature_celsius: 22.5,
                condition: Condition::describe(Some(0)),
                weather_code: 0,
                wind_speed_kph: 12.5,
                humidity_percent: 65,
                pressure_mb: 1012.4,
                uv_index: 7.5,
                is_daytime: true,
            },
            hourly: (0..24)
                .map(|h| HourlyPoint {
                    timestamp_iso: format!("2024-07-15T{:02}:00:00.000Z", h),
                    temperature_celsius: if h == 3 { None } else { Some(15.0 + h as f64) },
                    condition: Condition::describe(Some(2)),
                })
                .collect(),
            daily: vec![DailyPoint {
                date: "2024-07-15".to_string(),
                average_temperature_celsius: Some(24.0),
                condition: Condition::describe(Some(61)),
                sunrise: "05:30".to_string(),
                sunset: "20:15".to_string(),
            }],
        }
    }

    fn loaded_state() -> DashboardState {
        let (state, _) = DashboardState::new("Tashkent").initial_search();
        let state = state
            .reduce(Action::LocationResolved {
                generation: 1,
                place: ResolvedPlace {
                    coordinate: Coordinate::new(41.26, 69.21),
                    location: Location {
                        name: "Tashkent".to_string(),
                        country: "Uzbekistan".to_string(),
                        region: String::new(),
                    },
                },
            })
            .0;
        state
            .reduce(Action::ForecastReady {
                generation: 1,
                forecast: sample_forecast(),
                fetched_at: Local::now(),
            })
            .0
    }

    #[test]
    fn test_empty_state_prompts_for_city() {
        let content = render_to_string(&DashboardState::new(""), 100, 30);
        assert!(content.contains("Please enter a city name"));
        assert!(content.contains("Search city"));
    }

    #[test]
    fn test_loaded_state_renders_all_sections() {
        let content = render_to_string(&loaded_state(), 120, 30);

        assert!(content.contains("Tashkent, Uzbekistan"));
        assert!(content.contains("22.5"));
        assert!(content.contains("Clear sky"));
        assert!(content.contains("Humidity"));
        assert!(content.contains("65%"));
        assert!(content.contains("1012.4 hPa"));
        assert!(content.contains("High"));
        assert!(content.contains("Hourly forecast"));
        assert!(content.contains("Daily forecast"));
        assert!(content.contains("Slight rain"));
        assert!(content.contains("05:30"));
        assert!(content.contains("20:15"));
    }

    #[test]
    fn test_location_renders_before_forecast() {
        let (state, _) = DashboardState::new("Oslo").initial_search();
        let state = state
            .reduce(Action::LocationResolved {
                generation: 1,
                place: ResolvedPlace {
                    coordinate: Coordinate::new(59.91, 10.75),
                    location: Location {
                        name: "Oslo".to_string(),
                        country: "Norway".to_string(),
                        region: "Oslo County".to_string(),
                    },
                },
            })
            .0;

        let content = render_to_string(&state, 100, 30);
        assert!(content.contains("Oslo, Oslo County, Norway"));
        assert!(content.contains("Weather data unavailable"));
        assert!(content.contains("Loading weather for Oslo"));
    }

    #[test]
    fn test_error_banner_with_previous_view() {
        let loaded = loaded_state();
        let (searching, _) = loaded.reduce(Action::Refresh);
        let (failed, _) = searching.reduce(Action::SearchFailed {
            generation: 2,
            message: "Error fetching weather data".to_string(),
        });

        let content = render_to_string(&failed, 120, 30);
        assert!(content.contains("Error fetching weather data"));
        assert!(content.contains("22.5"), "Previous forecast should stay visible");
    }

    #[test]
    fn test_editing_shows_cursor_and_hint() {
        let (state, _) = DashboardState::new("Par").reduce(Action::StartEditing);
        let content = render_to_string(&state, 100, 30);
        assert!(content.contains("Par_"));
        assert!(content.contains("Esc cancel"));
    }

    #[test]
    fn test_footer_shows_selected_language() {
        let (state, _) = DashboardState::new("Oslo").reduce(Action::CycleLanguage);
        let content = render_to_string(&state, 100, 30);
        assert!(content.contains("l ru"));
    }

    #[test]
    fn test_small_terminal_does_not_panic() {
        render_to_string(&loaded_state(), 20, 8);
    }

    #[test]
    fn test_location_label_skips_empty_parts() {
        let location = Location {
            name: "Monaco".to_string(),
            country: "Monaco".to_string(),
            region: String::new(),
        };
        assert_eq!(location_label(&location), "Monaco, Monaco");
    }

    #[test]
    fn test_day_label() {
        assert_eq!(day_label("2024-07-15"), "Mon 15 Jul");
        assert_eq!(day_label("not a date"), "not a date");
    }

    #[test]
    fn test_hour_label_falls_back_to_raw_text() {
        assert_eq!(hour_label("garbage"), "garbage");
        assert_eq!(hour_label("2024-07-15T14:00:00.000Z").len(), 5);
    }
}
