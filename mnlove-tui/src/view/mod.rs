//! View layer
//!
//! Reads the model and draws a frame. The map fills the screen, the panel
//! is anchored to its bottom edge, and the status bar takes the last row.

mod components;
pub mod layout;
mod theme;

use ratatui::Frame;

use crate::model::App;

pub fn render(app: &App, frame: &mut Frame) {
    let regions = layout::compute(frame.area(), app);
    let colors = theme::ThemeColors::for_app(app);

    components::map::render(app, &colors, frame, regions.map);
    if let Some(panel) = regions.panel {
        components::panel::render(app, &colors, frame, panel);
    }
    components::statusbar::render(app, &colors, frame, regions.status);
    components::overlay::render(app, &colors, frame);
}
