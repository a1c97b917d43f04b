//! Collaborator traits the core drives but does not implement

mod map_camera;
mod url_history;

pub use map_camera::MapCamera;
pub use url_history::{MemoryHistory, UrlHistory};
