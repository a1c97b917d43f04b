//! Message layer
//!
//! Events are translated into messages; `update` is the only place that
//! applies them to the model.

mod app;
mod compose;
mod map;
mod panel;

pub use app::AppMessage;
pub use compose::ComposeMessage;
pub use map::MapMessage;
pub use panel::PanelMessage;
