//! Map coordinate types

use serde::{Deserialize, Serialize};

/// Valid latitude range in degrees.
pub const LAT_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
/// Valid longitude range in degrees.
pub const LNG_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;
/// Zoom levels the map accepts.
pub const ZOOM_RANGE: std::ops::RangeInclusive<f64> = 0.0..=24.0;

/// A geographic point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lat: f64,
    pub lng: f64,
}

impl LngLat {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && LAT_RANGE.contains(&self.lat)
            && LNG_RANGE.contains(&self.lng)
    }
}

/// Map camera center and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPosition {
    pub center: LngLat,
    pub zoom: f64,
}

impl CameraPosition {
    pub fn new(lat: f64, lng: f64, zoom: f64) -> Self {
        Self {
            center: LngLat::new(lat, lng),
            zoom,
        }
    }
}

/// Query-string view of the map: either a pin or a location, never both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlMapState {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub zoom: Option<f64>,
    pub pin_id: Option<String>,
}

impl UrlMapState {
    /// Both coordinates present.
    pub fn center(&self) -> Option<LngLat> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(LngLat::new(lat, lng)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lat.is_none() && self.lng.is_none() && self.zoom.is_none() && self.pin_id.is_none()
    }
}
