//! Type definitions

mod geo;
mod load;
mod panel;

pub use geo::{CameraPosition, LngLat, UrlMapState, LAT_RANGE, LNG_RANGE, ZOOM_RANGE};
pub use load::{LoadState, MapLoadState};
pub use panel::{PanelInputs, PanelState, PanelView, ShellVariant};

// Re-export provider data types
pub use mnlove_provider::{
    AtlasEntity, AtlasEntityKind, AtlasEntityPatch, AtlasType, BoundingBox, CreatePinRequest,
    Group, NearbyQuery, Pin, PinQuery, StatsSummary,
};
