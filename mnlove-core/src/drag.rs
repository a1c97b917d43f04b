//! Drag/snap controller for the panel handle
//!
//! The shell forwards pointer positions only while a gesture is active.
//! Heights grow as the pointer moves up, so `y` deltas are inverted.

use crate::config::{HeightThresholds, CLOSED_DRAG_SLACK_PX};
use crate::types::PanelState;

/// Height range a gesture may move through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragBounds {
    pub min: f64,
    pub max: f64,
}

impl DragBounds {
    /// Tall is reachable only when search is active or the panel is already tall.
    pub fn for_context(
        thresholds: &HeightThresholds,
        is_search_active: bool,
        current_state: PanelState,
    ) -> Self {
        let max = if is_search_active || current_state == PanelState::Tall {
            thresholds.tall
        } else {
            thresholds.main
        };
        Self {
            min: thresholds.min_drag_height(),
            max,
        }
    }

    pub fn clamp(&self, height: f64) -> f64 {
        height.max(self.min).min(self.max)
    }
}

#[derive(Debug, Clone, Copy)]
struct Gesture {
    start_y: f64,
    start_height: f64,
    bounds: DragBounds,
    height: f64,
}

/// Result of one pointer move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragUpdate {
    pub height: f64,
    /// Optimistic open flag while the finger is still down.
    pub is_open: bool,
}

#[derive(Debug, Default)]
pub struct DragController {
    gesture: Option<Gesture>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, start_y: f64, start_height: f64, bounds: DragBounds) {
        log::trace!("drag begin at y={start_y} height={start_height}");
        self.gesture = Some(Gesture {
            start_y,
            start_height,
            bounds,
            height: start_height,
        });
    }

    /// `None` when no gesture is active.
    pub fn update(&mut self, current_y: f64, thresholds: &HeightThresholds) -> Option<DragUpdate> {
        let gesture = self.gesture.as_mut()?;
        let height = gesture
            .bounds
            .clamp(gesture.start_height + (gesture.start_y - current_y));
        gesture.height = height;
        Some(DragUpdate {
            height,
            is_open: height > thresholds.low + CLOSED_DRAG_SLACK_PX,
        })
    }

    /// Finish the gesture and return the state its last height snaps to.
    pub fn end(&mut self, thresholds: &HeightThresholds) -> Option<PanelState> {
        let gesture = self.gesture.take()?;
        let state = snap(gesture.height, thresholds);
        log::debug!("drag released at {:.0}px, snapped to {state}", gesture.height);
        Some(state)
    }

    pub fn cancel(&mut self) {
        self.gesture = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn current_height(&self) -> Option<f64> {
        self.gesture.map(|g| g.height)
    }
}

/// Nearest snap state by midpoints between adjacent heights.
/// A height exactly on a midpoint belongs to the upper state.
pub fn snap(height: f64, thresholds: &HeightThresholds) -> PanelState {
    let points = thresholds.snap_points();
    for pair in points.windows(2) {
        let (state, lower) = pair[0];
        let (_, upper) = pair[1];
        if height < (lower + upper) / 2.0 {
            return state;
        }
    }
    points.last().map_or(PanelState::Low, |(state, _)| *state)
}
