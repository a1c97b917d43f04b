//! Map camera abstract Trait

use std::time::Duration;

use crate::types::{CameraPosition, LngLat};

/// Camera control of the external map renderer.
///
/// Calls are fire-and-forget: the renderer animates on its own and reports
/// the final position through its move-end notification.
pub trait MapCamera: Send + Sync {
    /// Animated flight, used for programmatic navigation.
    fn fly_to(&self, target: CameraPosition, duration: Duration);

    /// Short easing move, used for small adjustments.
    fn ease_to(&self, target: CameraPosition, duration: Duration);

    fn center(&self) -> LngLat;

    fn zoom(&self) -> f64;

    /// Whether the style and tiles are loaded and the camera accepts moves.
    fn is_loaded(&self) -> bool;

    fn position(&self) -> CameraPosition {
        CameraPosition {
            center: self.center(),
            zoom: self.zoom(),
        }
    }
}
