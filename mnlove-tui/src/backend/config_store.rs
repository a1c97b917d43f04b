//! Config file storage
//!
//! Stored as `<config dir>/mnlove-tui/config.json`.

use std::path::{Path, PathBuf};

use mnlove_core::MapUiConfig;

const APP_DIR: &str = "mnlove-tui";
const CONFIG_FILE: &str = "config.json";

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Load the config, falling back to defaults when the file is unreadable
/// or invalid.
pub fn load_config(path: Option<&Path>) -> MapUiConfig {
    let Some(path) = path else {
        log::warn!("no config directory; using defaults");
        return MapUiConfig::default();
    };
    match MapUiConfig::load_from_path(path) {
        Ok(config) => config,
        Err(e) => {
            e.log(&format!("load config {}", path.display()));
            MapUiConfig::default()
        }
    }
}
