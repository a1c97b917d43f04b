//! Screen components

pub mod map;
pub mod overlay;
pub mod panel;
pub mod statusbar;
