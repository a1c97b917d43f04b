//! Panel view-state types

use serde::{Deserialize, Serialize};

/// Discrete visibility/height mode of the bottom sheet or sidebar.
///
/// Ordered from smallest to largest so `Ord` matches visual height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelState {
    Hidden,
    Tiny,
    Low,
    Main,
    Tall,
}

impl PanelState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelState::Hidden => "hidden",
            PanelState::Tiny => "tiny",
            PanelState::Low => "low",
            PanelState::Main => "main",
            PanelState::Tall => "tall",
        }
    }
}

impl std::fmt::Display for PanelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which presentation shell hosts the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellVariant {
    /// Bottom sheet over the map; has the `Tiny` peek state.
    #[default]
    MobileSheet,
    /// Left sidebar on wide screens; no `Tiny` state.
    DesktopSidebar,
}

impl ShellVariant {
    pub fn has_tiny(&self) -> bool {
        matches!(self, ShellVariant::MobileSheet)
    }
}

/// Everything the panel state manager reads. Owned by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanelInputs {
    pub is_search_active: bool,
    pub has_pin_selection: bool,
    pub has_location_selection: bool,
    pub has_mention_type_filter: bool,
    pub is_modal_open: bool,
    /// Current continuous height in pixels.
    pub panel_height: f64,
    /// State the user snapped to with a drag, if any.
    pub explicit_target_state: Option<PanelState>,
}

impl PanelInputs {
    /// A pin or a location is selected.
    pub fn has_selection(&self) -> bool {
        self.has_pin_selection || self.has_location_selection
    }
}

/// Derived output of the panel state manager.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelView {
    pub current_state: PanelState,
    pub should_show_close_icon: bool,
    pub should_show_mention_types: bool,
    pub should_be_open: bool,
    /// Height the panel should settle at for `current_state`.
    pub target_height: f64,
}
