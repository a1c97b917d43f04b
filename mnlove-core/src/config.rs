//! Map UI configuration
//!
//! Panel heights are fractions of the viewport so the same configuration
//! works on any screen; they are turned into pixels by
//! [`HeightThresholds::compute`] whenever the viewport is known.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{MapLoadState, PanelState, ShellVariant};

/// Distance below `tall` at which a drag position counts as tall.
pub const TALL_PROXIMITY_PX: f64 = 10.0;
/// Distance above `tiny` at which a drag position counts as tiny.
pub const TINY_PROXIMITY_PX: f64 = 10.0;
/// Slack above `low` within which a drag reads as "closed".
pub const CLOSED_DRAG_SLACK_PX: f64 = 20.0;

/// Zoom used when the URL carries coordinates without a zoom.
pub const DEFAULT_ZOOM: f64 = 12.0;
/// Statewide view used before anything else positions the camera.
pub const DEFAULT_CENTER: (f64, f64) = (46.7296, -94.6859);

/// Per-state panel heights as fractions of the viewport height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightFractions {
    pub tiny: f64,
    pub low: f64,
    pub main: f64,
    pub tall: f64,
}

impl Default for HeightFractions {
    fn default() -> Self {
        Self {
            tiny: 0.10,
            low: 0.30,
            main: 0.55,
            tall: 0.90,
        }
    }
}

/// Delays used by the URL synchronizer and drag controller, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Trailing debounce for camera move-end -> URL writes.
    pub move_debounce_ms: u64,
    /// Wait before selecting a pin from the URL, so pin data can load.
    pub pin_select_delay_ms: u64,
    /// Camera fly-to duration on mount.
    pub fly_duration_ms: u64,
    /// Wait after starting the fly-to before showing the location.
    pub settle_delay_ms: u64,
    /// Window after a drag release during which automatic height changes are ignored.
    pub manual_drag_suppress_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            move_debounce_ms: 1000,
            pin_select_delay_ms: 1000,
            fly_duration_ms: 1500,
            settle_delay_ms: 1600,
            manual_drag_suppress_ms: 100,
        }
    }
}

impl TimingConfig {
    pub fn move_debounce(&self) -> Duration {
        Duration::from_millis(self.move_debounce_ms)
    }

    pub fn pin_select_delay(&self) -> Duration {
        Duration::from_millis(self.pin_select_delay_ms)
    }

    pub fn fly_duration(&self) -> Duration {
        Duration::from_millis(self.fly_duration_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn manual_drag_suppress(&self) -> Duration {
        Duration::from_millis(self.manual_drag_suppress_ms)
    }
}

/// Top-level configuration of the map client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapUiConfig {
    pub variant: ShellVariant,
    pub heights: HeightFractions,
    pub timing: TimingConfig,
    pub default_zoom: f64,
    /// Write camera moves back to the URL.
    pub sync_camera_to_url: bool,
    /// Public site URL; shareable links are built from it.
    pub base_url: String,
    /// Backend origin for the REST provider.
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub map_access_token: Option<String>,
    pub event_bus_capacity: usize,
}

impl Default for MapUiConfig {
    fn default() -> Self {
        Self {
            variant: ShellVariant::default(),
            heights: HeightFractions::default(),
            timing: TimingConfig::default(),
            default_zoom: DEFAULT_ZOOM,
            sync_camera_to_url: true,
            base_url: "https://fortheloveofminnesota.com/map".to_string(),
            api_base_url: "https://fortheloveofminnesota.com".to_string(),
            api_token: None,
            map_access_token: None,
            event_bus_capacity: 64,
        }
    }
}

impl MapUiConfig {
    /// Parse from JSON; absent fields take their defaults.
    pub fn from_json(content: &str) -> CoreResult<Self> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| CoreError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| CoreError::Storage(e.to_string()))?;
        Self::from_json(&content)
    }

    pub fn save_to_path(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| CoreError::Storage(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(e.to_string()))?;
        fs::write(path, content).map_err(|e| CoreError::Storage(e.to_string()))
    }

    /// Heights must be increasing and within the viewport.
    pub fn validate(&self) -> CoreResult<()> {
        let h = &self.heights;
        let ordered = 0.0 < h.tiny && h.tiny < h.low && h.low < h.main && h.main < h.tall;
        if !ordered || h.tall > 1.0 {
            return Err(CoreError::Config(format!(
                "panel height fractions must satisfy 0 < tiny < low < main < tall <= 1, got {h:?}"
            )));
        }
        if !(0.0..=24.0).contains(&self.default_zoom) {
            return Err(CoreError::Config(format!(
                "default_zoom {} is outside 0..=24",
                self.default_zoom
            )));
        }
        if self.event_bus_capacity == 0 {
            return Err(CoreError::Config(
                "event_bus_capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Initial map status: blocked until a token is configured.
    pub fn initial_map_state(&self) -> MapLoadState {
        match self.map_access_token.as_deref() {
            Some(token) if !token.trim().is_empty() => MapLoadState::Loading,
            _ => MapLoadState::MissingToken,
        }
    }

    /// Like [`initial_map_state`](Self::initial_map_state), as an error.
    pub fn require_access_token(&self) -> CoreResult<&str> {
        self.map_access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(CoreError::MissingAccessToken)
    }
}

/// Pixel heights of each panel state for one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightThresholds {
    pub variant: ShellVariant,
    pub viewport_height: f64,
    /// `None` for shells without the tiny state.
    pub tiny: Option<f64>,
    pub low: f64,
    pub main: f64,
    pub tall: f64,
}

impl HeightThresholds {
    pub fn compute(viewport_height: f64, fractions: &HeightFractions, variant: ShellVariant) -> Self {
        let vh = viewport_height.max(0.0);
        Self {
            variant,
            viewport_height: vh,
            tiny: variant.has_tiny().then(|| (vh * fractions.tiny).round()),
            low: (vh * fractions.low).round(),
            main: (vh * fractions.main).round(),
            tall: (vh * fractions.tall).round(),
        }
    }

    /// Resting height of a state. `Tiny` falls back to `low` where absent.
    pub fn height_for(&self, state: PanelState) -> f64 {
        match state {
            PanelState::Hidden => 0.0,
            PanelState::Tiny => self.tiny.unwrap_or(self.low),
            PanelState::Low => self.low,
            PanelState::Main => self.main,
            PanelState::Tall => self.tall,
        }
    }

    /// Smallest height a drag may reach.
    pub fn min_drag_height(&self) -> f64 {
        self.tiny.unwrap_or(self.low)
    }

    /// Snappable states with their heights, smallest first.
    pub fn snap_points(&self) -> Vec<(PanelState, f64)> {
        let mut points = Vec::with_capacity(4);
        if let Some(tiny) = self.tiny {
            points.push((PanelState::Tiny, tiny));
        }
        points.push((PanelState::Low, self.low));
        points.push((PanelState::Main, self.main));
        points.push((PanelState::Tall, self.tall));
        points
    }

    /// Maps a state onto one this shell supports.
    pub fn normalize(&self, state: PanelState) -> PanelState {
        if state == PanelState::Tiny && self.tiny.is_none() {
            PanelState::Low
        } else {
            state
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn thresholds_scale_with_viewport() {
        let t = HeightThresholds::compute(800.0, &HeightFractions::default(), ShellVariant::MobileSheet);
        assert_eq!(t.tiny, Some(80.0));
        assert_eq!(t.low, 240.0);
        assert_eq!(t.main, 440.0);
        assert_eq!(t.tall, 720.0);
        assert_eq!(t.snap_points().len(), 4);
    }

    #[test]
    fn sidebar_has_no_tiny() {
        let t = HeightThresholds::compute(800.0, &HeightFractions::default(), ShellVariant::DesktopSidebar);
        assert!(t.tiny.is_none());
        assert_eq!(t.min_drag_height(), 240.0);
        assert_eq!(t.height_for(PanelState::Tiny), 240.0);
        assert_eq!(t.normalize(PanelState::Tiny), PanelState::Low);
        assert_eq!(t.snap_points()[0].0, PanelState::Low);
    }

    #[test]
    fn partial_json_takes_defaults() {
        let config = MapUiConfig::from_json(r#"{"variant":"desktop_sidebar","timing":{"move_debounce_ms":250}}"#)
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(config.variant, ShellVariant::DesktopSidebar);
        assert_eq!(config.timing.move_debounce_ms, 250);
        assert_eq!(config.timing.pin_select_delay_ms, 1000);
        assert!(config.sync_camera_to_url);
    }

    #[test]
    fn unordered_heights_are_rejected() {
        let err = MapUiConfig::from_json(r#"{"heights":{"low":0.6,"main":0.5}}"#);
        assert!(matches!(err, Err(CoreError::Config(_))));
    }

    #[test]
    fn invalid_json_is_config_error() {
        assert!(matches!(
            MapUiConfig::from_json("{not json"),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().unwrap_or_else(|e| panic!("{e}"));
        let path = dir.path().join("nested").join("config.json");
        let config = MapUiConfig {
            map_access_token: Some("pk.test".into()),
            default_zoom: 9.5,
            ..MapUiConfig::default()
        };
        config.save_to_path(&path).unwrap_or_else(|e| panic!("{e}"));
        let loaded = MapUiConfig::load_from_path(&path).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap_or_else(|e| panic!("{e}"));
        let loaded = MapUiConfig::load_from_path(&dir.path().join("absent.json"))
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(loaded, MapUiConfig::default());
    }

    #[test]
    fn blank_token_means_missing() {
        let config = MapUiConfig {
            map_access_token: Some("  ".into()),
            ..MapUiConfig::default()
        };
        assert_eq!(config.initial_map_state(), MapLoadState::MissingToken);
        assert!(matches!(
            config.require_access_token(),
            Err(CoreError::MissingAccessToken)
        ));
    }
}
