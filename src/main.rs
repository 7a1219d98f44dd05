//! weatherdash - current, hourly and daily weather for any city
//!
//! A terminal UI application that looks a city up with the Open-Meteo
//! geocoding API and shows its forecast.

use std::io;
use std::panic;
use std::process::ExitCode;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use weatherdash::app::App;
use weatherdash::cli::{Cli, OutputMode, StartupConfig};
use weatherdash::data::{ViewModel, WeatherService};
use weatherdash::{logging, ui};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let service = match WeatherService::from_configs(config.geocoding.clone(), config.forecast.clone()) {
        Ok(service) => service,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match config.output {
        OutputMode::Dashboard => match run_dashboard(config.city, service).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        },
        OutputMode::Text | OutputMode::Json => run_once(&config.city, &service, config.output).await,
    }
}

/// Fetch the forecast once and print it
async fn run_once(city: &str, service: &WeatherService, output: OutputMode) -> ExitCode {
    let _ = logging::init_stderr();

    let (place, forecast) = match service.load(city, Local::now()).await {
        Ok(loaded) => loaded,
        Err(e) => {
            error!(city, error = %e, "one-shot fetch failed");
            eprintln!("{}", e.user_message());
            return ExitCode::FAILURE;
        }
    };

    let view = ViewModel::default()
        .with_location(place.location)
        .with_forecast(forecast);

    if output == OutputMode::Json {
        match serde_json::to_string_pretty(&view) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", ui::summary(&view));
    }

    ExitCode::SUCCESS
}

/// Run the interactive dashboard until the user quits
async fn run_dashboard(
    city: String,
    service: WeatherService,
) -> Result<(), Box<dyn std::error::Error>> {
    // The terminal is ours, so logs go to a file; running without them is fine
    if let Ok(path) = logging::init_file(None) {
        info!(path = %path.display(), "logging to file");
    }

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(city, service);
    app.start();

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.poll_results();

        terminal.draw(|f| ui::render(f, &app.state))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
