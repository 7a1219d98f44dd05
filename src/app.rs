//! Application runtime for the weather dashboard
//!
//! Maps keyboard input to [`Action`]s, feeds them through the state reducer
//! and starts background searches for any [`Effect`] the reducer returns.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::data::WeatherService;
use crate::refresh::SearchWorker;
use crate::state::{Action, DashboardState, Effect, InputMode};

/// Main application struct owning the current state snapshot
pub struct App {
    /// Current dashboard snapshot
    pub state: DashboardState,
    /// Background search runner
    worker: SearchWorker,
}

impl App {
    /// Creates an app for `city` backed by `service`
    ///
    /// No request is made until [`App::start`] is called.
    pub fn new(city: impl Into<String>, service: WeatherService) -> Self {
        Self {
            state: DashboardState::new(city),
            worker: SearchWorker::new(service),
        }
    }

    /// Kick off the search for the startup city
    pub fn start(&mut self) {
        let (next, effect) = self.state.initial_search();
        self.apply(next, effect);
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit
    }

    /// Handles a key press
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if let Some(action) = action_for_key(&self.state, key_event) {
            self.dispatch(action);
        }
    }

    /// Replace the state with the reducer's output and run its effect
    pub fn dispatch(&mut self, action: Action) {
        let (next, effect) = self.state.reduce(action);
        self.apply(next, effect);
    }

    /// Apply every search result that has arrived since the last call
    ///
    /// Returns whether anything was applied.
    pub fn poll_results(&mut self) -> bool {
        let mut changed = false;
        while let Some(action) = self.worker.try_recv() {
            self.dispatch(action);
            changed = true;
        }
        changed
    }

    fn apply(&mut self, next: DashboardState, effect: Option<Effect>) {
        self.state = next;
        if let Some(Effect::Search { generation, city }) = effect {
            debug!(generation, city = %city, "starting search");
            // Dropping the handle detaches the task
            let _ = self.worker.spawn_search(generation, city);
        }
    }
}

/// The action a key press maps to in the given state, if any
pub fn action_for_key(state: &DashboardState, key_event: KeyEvent) -> Option<Action> {
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(Action::Quit);
    }

    // Help overlay intercepts all keys when shown
    if state.show_help {
        return match key_event.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Some(Action::ToggleHelp),
            _ => None,
        };
    }

    match state.mode {
        InputMode::Editing => match key_event.code {
            KeyCode::Enter => Some(Action::CommitSearch),
            KeyCode::Esc => Some(Action::CancelEditing),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) => Some(Action::InputChar(c)),
            _ => None,
        },
        InputMode::Normal => match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('/') | KeyCode::Char('s') => Some(Action::StartEditing),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('t') => Some(Action::ToggleTheme),
            KeyCode::Char('l') => Some(Action::CycleLanguage),
            KeyCode::Char('?') => Some(Action::ToggleHelp),
            _ => None,
        },
    }
}
