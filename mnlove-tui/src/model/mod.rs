//! Model layer: application state

mod app;
mod camera;
pub mod projection;

pub use app::{map_viewport_px, App, STATUS_ROWS};
pub use camera::TerminalCamera;

#[cfg(test)]
pub(crate) use app::tests;
