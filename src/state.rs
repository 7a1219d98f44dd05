//! Dashboard state snapshots
//!
//! The dashboard state is never mutated in place. Every user action or search
//! result goes through [`DashboardState::reduce`], which returns the next
//! snapshot plus an optional effect for the runtime to carry out.

use chrono::{DateTime, Local};

use crate::data::{Coordinate, Forecast, ResolvedPlace, ViewModel};

/// Whether keystrokes edit the search box or drive the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Colour palette selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Interface language selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Russian,
    Uzbek,
}

impl Language {
    /// ISO 639-1 code
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Russian => "ru",
            Language::Uzbek => "uz",
        }
    }

    /// The next language in the selector
    pub fn next(self) -> Self {
        match self {
            Language::English => Language::Russian,
            Language::Russian => Language::Uzbek,
            Language::Uzbek => Language::English,
        }
    }
}

/// Everything that can change the dashboard state
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Focus the search box
    StartEditing,
    /// Type a character into the search box
    InputChar(char),
    /// Delete the last character of the search box
    Backspace,
    /// Leave the search box, restoring the committed term
    CancelEditing,
    /// Search for the text in the search box
    CommitSearch,
    /// Search the committed term again
    Refresh,
    ToggleTheme,
    /// Switch to the next interface language
    CycleLanguage,
    ToggleHelp,
    Quit,
    /// Geocoding for a search finished
    LocationResolved { generation: u64, place: ResolvedPlace },
    /// The forecast for a search arrived
    ForecastReady {
        generation: u64,
        forecast: Forecast,
        fetched_at: DateTime<Local>,
    },
    /// A search failed; `message` is shown to the user
    SearchFailed { generation: u64, message: String },
}

/// Work the runtime must start after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Resolve `city` and fetch its forecast, tagging results with `generation`
    Search { generation: u64, city: String },
}

/// One immutable snapshot of the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub mode: InputMode,
    /// Text currently in the search box
    pub input: String,
    /// Last committed search term
    pub search_term: String,
    /// Coordinate of the last resolved place
    pub coordinate: Option<Coordinate>,
    pub view: ViewModel,
    /// View as of the last search that finished successfully
    pub settled_view: ViewModel,
    pub loading: bool,
    /// Message for the error banner
    pub error: Option<String>,
    pub theme: Theme,
    pub language: Language,
    pub show_help: bool,
    /// Identifies the latest search; results from older searches are dropped
    pub generation: u64,
    /// When the current forecast was received
    pub last_updated: Option<DateTime<Local>>,
    pub should_quit: bool,
}

impl DashboardState {
    /// Initial state with `city` pre-filled in the search box
    pub fn new(city: impl Into<String>) -> Self {
        let city = city.into();
        Self {
            mode: InputMode::Normal,
            input: city.clone(),
            search_term: city,
            coordinate: None,
            view: ViewModel::default(),
            settled_view: ViewModel::default(),
            loading: false,
            error: None,
            theme: Theme::default(),
            language: Language::default(),
            show_help: false,
            generation: 0,
            last_updated: None,
            should_quit: false,
        }
    }

    /// Start the first search for the pre-filled city
    pub fn initial_search(&self) -> (Self, Option<Effect>) {
        self.begin_search(self.search_term.clone())
    }

    /// Compute the next snapshot for `action`
    pub fn reduce(&self, action: Action) -> (Self, Option<Effect>) {
        match action {
            Action::StartEditing => (
                Self {
                    mode: InputMode::Editing,
                    show_help: false,
                    ..self.clone()
                },
                None,
            ),
            Action::InputChar(c) if self.mode == InputMode::Editing => {
                let mut input = self.input.clone();
                input.push(c);
                (Self { input, ..self.clone() }, None)
            }
            Action::Backspace if self.mode == InputMode::Editing => {
                let mut input = self.input.clone();
                input.pop();
                (Self { input, ..self.clone() }, None)
            }
            Action::CancelEditing => (
                Self {
                    mode: InputMode::Normal,
                    input: self.search_term.clone(),
                    ..self.clone()
                },
                None,
            ),
            Action::CommitSearch => {
                let city = self.input.trim().to_string();
                if city.is_empty() {
                    // Blank input never triggers a request
                    return (
                        Self {
                            mode: InputMode::Normal,
                            input: self.search_term.clone(),
                            ..self.clone()
                        },
                        None,
                    );
                }
                let normal = Self {
                    mode: InputMode::Normal,
                    ..self.clone()
                };
                normal.begin_search(city)
            }
            Action::Refresh if self.mode == InputMode::Normal => {
                self.begin_search(self.search_term.clone())
            }
            Action::ToggleTheme => (
                Self {
                    theme: self.theme.toggled(),
                    ..self.clone()
                },
                None,
            ),
            Action::CycleLanguage => (
                Self {
                    language: self.language.next(),
                    ..self.clone()
                },
                None,
            ),
            Action::ToggleHelp => (
                Self {
                    show_help: !self.show_help,
                    ..self.clone()
                },
                None,
            ),
            Action::Quit => (
                Self {
                    should_quit: true,
                    ..self.clone()
                },
                None,
            ),
            Action::LocationResolved { generation, place } if generation == self.generation => {
                // A forecast for another place must not show under this name
                let view = if self.view.location.as_ref() == Some(&place.location) {
                    self.view.clone()
                } else {
                    ViewModel::default()
                };
                (
                    Self {
                        coordinate: Some(place.coordinate),
                        view: view.with_location(place.location),
                        ..self.clone()
                    },
                    None,
                )
            }
            Action::ForecastReady {
                generation,
                forecast,
                fetched_at,
            } if generation == self.generation => {
                let view = self.view.clone().with_forecast(forecast);
                (
                    Self {
                        settled_view: view.clone(),
                        view,
                        loading: false,
                        error: None,
                        last_updated: Some(fetched_at),
                        ..self.clone()
                    },
                    None,
                )
            }
            Action::SearchFailed {
                generation,
                message,
            } if generation == self.generation => (
                Self {
                    view: self.settled_view.clone(),
                    loading: false,
                    error: Some(message),
                    ..self.clone()
                },
                None,
            ),
            // Stale results and actions that do not apply in the current mode
            _ => (self.clone(), None),
        }
    }

    fn begin_search(&self, city: String) -> (Self, Option<Effect>) {
        let generation = self.generation + 1;
        (
            Self {
                input: city.clone(),
                search_term: city.clone(),
                loading: true,
                error: None,
                generation,
                ..self.clone()
            },
            Some(Effect::Search { generation, city }),
        )
    }
}
