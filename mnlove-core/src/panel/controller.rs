//! Panel controller: inputs, continuous height and drag for one shell

use std::time::{Duration, Instant};

use crate::config::{HeightFractions, HeightThresholds};
use crate::drag::{DragBounds, DragController, DragUpdate};
use crate::timer::SuppressionWindow;
use crate::types::{LngLat, PanelInputs, PanelState, PanelView, ShellVariant};

use super::resolve;

/// What the panel currently shows details for.
#[derive(Debug, Clone, PartialEq)]
enum Selection {
    Pin(String),
    Location(LngLat),
}

/// Owns the panel state of one shell instance.
///
/// Input setters only record intent. [`sync_height`](Self::sync_height)
/// moves the continuous height towards the derived target, and is held off
/// for a short window after the user releases a drag.
#[derive(Debug)]
pub struct PanelController {
    variant: ShellVariant,
    fractions: HeightFractions,
    suppress_for: Duration,
    thresholds: HeightThresholds,
    inputs: PanelInputs,
    selection: Option<Selection>,
    is_open: bool,
    drag: DragController,
    suppression: SuppressionWindow,
    /// Set when an input change should re-derive the state from the resting
    /// height instead of the current one.
    reset_pending: bool,
}

impl PanelController {
    pub fn new(
        variant: ShellVariant,
        fractions: HeightFractions,
        viewport_height: f64,
        suppress_for: Duration,
    ) -> Self {
        let thresholds = HeightThresholds::compute(viewport_height, &fractions, variant);
        Self {
            variant,
            fractions,
            suppress_for,
            thresholds,
            inputs: PanelInputs {
                panel_height: thresholds.low,
                ..PanelInputs::default()
            },
            selection: None,
            is_open: false,
            drag: DragController::new(),
            suppression: SuppressionWindow::default(),
            reset_pending: false,
        }
    }

    pub fn variant(&self) -> ShellVariant {
        self.variant
    }

    pub fn thresholds(&self) -> &HeightThresholds {
        &self.thresholds
    }

    pub fn inputs(&self) -> &PanelInputs {
        &self.inputs
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Height to render: zero while hidden, otherwise the continuous height.
    pub fn height(&self) -> f64 {
        if self.inputs.is_modal_open {
            0.0
        } else {
            self.inputs.panel_height
        }
    }

    pub fn view(&self) -> PanelView {
        if self.reset_pending && !self.drag.is_dragging() {
            let baseline = PanelInputs {
                panel_height: self.thresholds.low,
                ..self.inputs
            };
            resolve(&baseline, &self.thresholds)
        } else {
            resolve(&self.inputs, &self.thresholds)
        }
    }

    pub fn set_search_active(&mut self, active: bool) {
        if self.inputs.is_search_active != active {
            self.inputs.is_search_active = active;
            self.supersede_override();
        }
    }

    /// Select a pin. Picking a different pin counts as a new interaction.
    pub fn select_pin(&mut self, pin_id: &str) {
        self.select(Selection::Pin(pin_id.to_string()));
    }

    /// Select a map point. Picking a different point counts as a new interaction.
    pub fn select_location(&mut self, at: LngLat) {
        self.select(Selection::Location(at));
    }

    fn select(&mut self, selection: Selection) {
        if self.selection.as_ref() == Some(&selection) {
            return;
        }
        self.inputs.has_pin_selection = matches!(selection, Selection::Pin(_));
        self.inputs.has_location_selection = matches!(selection, Selection::Location(_));
        self.selection = Some(selection);
        self.supersede_override();
    }

    pub fn set_mention_type_filter(&mut self, active: bool) {
        if self.inputs.has_mention_type_filter != active {
            self.inputs.has_mention_type_filter = active;
            self.supersede_override();
        }
    }

    /// The modal hides the panel without disturbing what it returns to.
    pub fn set_modal_open(&mut self, open: bool) {
        self.inputs.is_modal_open = open;
        if open {
            self.drag.cancel();
        }
    }

    pub fn set_explicit_target(&mut self, state: Option<PanelState>) {
        self.inputs.explicit_target_state = state.map(|s| self.thresholds.normalize(s));
        self.reset_pending = false;
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
        if self.inputs.has_selection() {
            self.inputs.has_pin_selection = false;
            self.inputs.has_location_selection = false;
            self.supersede_override();
        }
    }

    /// Recompute thresholds, keeping the panel in the same state.
    pub fn set_viewport_height(&mut self, viewport_height: f64) {
        let state = self.view().current_state;
        self.thresholds = HeightThresholds::compute(viewport_height, &self.fractions, self.variant);
        self.drag.cancel();
        if state != PanelState::Hidden {
            self.inputs.panel_height = self.thresholds.height_for(state);
        }
    }

    /// Move the height to the derived target. Returns whether anything changed.
    pub fn sync_height(&mut self, now: Instant) -> bool {
        if self.drag.is_dragging() || self.suppression.is_active(now) {
            return false;
        }
        let view = self.view();
        self.reset_pending = false;
        let was_open = self.is_open;
        self.is_open = view.should_be_open;
        if view.current_state == PanelState::Hidden {
            return was_open != self.is_open;
        }
        let changed = (self.inputs.panel_height - view.target_height).abs() > f64::EPSILON;
        if changed {
            log::debug!(
                "panel {} -> {:.0}px",
                view.current_state,
                view.target_height
            );
            self.inputs.panel_height = view.target_height;
        }
        changed || was_open != self.is_open
    }

    pub fn begin_drag(&mut self, y: f64) {
        if self.inputs.is_modal_open {
            return;
        }
        let state = self.view().current_state;
        let bounds = DragBounds::for_context(&self.thresholds, self.inputs.is_search_active, state);
        self.drag.begin(y, self.inputs.panel_height, bounds);
    }

    pub fn update_drag(&mut self, y: f64) -> Option<DragUpdate> {
        let update = self.drag.update(y, &self.thresholds)?;
        self.inputs.panel_height = update.height;
        self.is_open = update.is_open;
        Some(update)
    }

    /// Release: snap, pin the snapped state as the explicit target and hold
    /// off automatic height changes briefly.
    pub fn end_drag(&mut self, now: Instant) -> Option<PanelState> {
        let state = self.drag.end(&self.thresholds)?;
        self.set_explicit_target(Some(state));
        self.inputs.panel_height = self.thresholds.height_for(state);
        self.is_open = self.view().should_be_open;
        self.suppression.arm(now, self.suppress_for);
        Some(state)
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    fn supersede_override(&mut self) {
        self.inputs.explicit_target_state = None;
        self.reset_pending = true;
    }
}
