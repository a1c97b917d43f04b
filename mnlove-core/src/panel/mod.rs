//! Panel state manager
//!
//! Derives the single active [`PanelState`] and its display flags from the
//! shell's inputs. Resolution is a strict priority list; the first rule that
//! matches wins.

mod controller;

pub use controller::PanelController;

use crate::config::{HeightThresholds, TALL_PROXIMITY_PX, TINY_PROXIMITY_PX};
use crate::types::{PanelInputs, PanelState, PanelView};

/// Resolve the panel view for one set of inputs.
pub fn resolve(inputs: &PanelInputs, thresholds: &HeightThresholds) -> PanelView {
    let state = resolve_state(inputs, thresholds);
    view_for(state, inputs, thresholds)
}

fn resolve_state(inputs: &PanelInputs, thresholds: &HeightThresholds) -> PanelState {
    if inputs.is_modal_open {
        return PanelState::Hidden;
    }
    if let Some(explicit) = inputs.explicit_target_state {
        return thresholds.normalize(explicit);
    }
    // A selected pin outranks an active search.
    if inputs.has_pin_selection {
        return PanelState::Tall;
    }
    if inputs.is_search_active {
        return PanelState::Main;
    }
    if inputs.panel_height >= thresholds.tall - TALL_PROXIMITY_PX {
        return PanelState::Tall;
    }
    if let Some(tiny) = thresholds.tiny {
        if inputs.panel_height <= tiny + TINY_PROXIMITY_PX {
            return PanelState::Tiny;
        }
    }
    if inputs.has_location_selection || inputs.has_mention_type_filter {
        return PanelState::Main;
    }
    PanelState::Low
}

fn view_for(state: PanelState, inputs: &PanelInputs, thresholds: &HeightThresholds) -> PanelView {
    let should_show_close_icon =
        inputs.is_search_active || inputs.has_selection() || state != PanelState::Low;
    let should_show_mention_types = !inputs.is_search_active
        && !inputs.has_pin_selection
        && !matches!(state, PanelState::Tall | PanelState::Tiny);
    let should_be_open = !matches!(
        state,
        PanelState::Low | PanelState::Tiny | PanelState::Hidden
    );

    PanelView {
        current_state: state,
        should_show_close_icon,
        should_show_mention_types,
        should_be_open,
        target_height: thresholds.height_for(state),
    }
}
