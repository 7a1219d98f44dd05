//! Terminal rendering for the weather dashboard
//!
//! Everything here draws from a [`DashboardState`] snapshot and never changes it.

pub mod dashboard;
pub mod help_overlay;
pub mod text;
pub mod theme;
pub mod widgets;

use ratatui::Frame;

use crate::state::DashboardState;
use theme::Palette;

pub use text::summary;

/// Draws the dashboard and, when requested, the help overlay on top
pub fn render(frame: &mut Frame, state: &DashboardState) {
    dashboard::render(frame, state);

    if state.show_help {
        help_overlay::render(frame, &Palette::for_theme(state.theme));
    }
}
