//! Event layer
//!
//! Translates crossterm events into [`AppMessage`](crate::message::AppMessage)s.
//! Nothing here mutates the model.

mod handler;
mod keymap;

pub use handler::{handle_event, poll_event};
pub use keymap::DefaultKeymap;
