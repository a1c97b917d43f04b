//! Flat projection of map coordinates onto terminal cells
//!
//! One column covers 8 pixels of a 256-pixel web-mercator tile; rows are
//! twice as tall as columns.

use ratatui::layout::Rect;

use mnlove_core::types::{CameraPosition, LngLat, LAT_RANGE, LNG_RANGE};

pub fn degrees_per_col(zoom: f64) -> f64 {
    360.0 / (2f64.powf(zoom) * 32.0)
}

pub fn degrees_per_row(zoom: f64) -> f64 {
    degrees_per_col(zoom) * 2.0
}

/// Longitude and latitude spans shown in `area`, as canvas bounds.
pub fn bounds(camera: &CameraPosition, area: Rect) -> ([f64; 2], [f64; 2]) {
    let half_w = f64::from(area.width) / 2.0 * degrees_per_col(camera.zoom);
    let half_h = f64::from(area.height) / 2.0 * degrees_per_row(camera.zoom);
    (
        [camera.center.lng - half_w, camera.center.lng + half_w],
        [camera.center.lat - half_h, camera.center.lat + half_h],
    )
}

/// Center moved by whole cells; `dy > 0` moves south.
pub fn pan(camera: &CameraPosition, dx: i16, dy: i16) -> CameraPosition {
    let lat = camera.center.lat - f64::from(dy) * degrees_per_row(camera.zoom);
    let lng = camera.center.lng + f64::from(dx) * degrees_per_col(camera.zoom);
    CameraPosition {
        center: LngLat::new(
            lat.clamp(*LAT_RANGE.start(), *LAT_RANGE.end()),
            lng.clamp(*LNG_RANGE.start(), *LNG_RANGE.end()),
        ),
        zoom: camera.zoom,
    }
}
