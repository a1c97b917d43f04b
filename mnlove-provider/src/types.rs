use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============ Pins / Mentions ============

/// A user-created geolocated mention dropped on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pin {
    /// Opaque server identifier, also used as the `pin` query parameter.
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    /// Free-form text of the mention.
    #[serde(default)]
    pub description: Option<String>,
    /// Mention type slug (e.g. `"event"`, `"question"`), drives the filter chips.
    #[serde(default)]
    pub mention_type: Option<String>,
    /// Author's display name; guests show as `None`.
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Body of a pin creation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePinRequest {
    pub lat: f64,
    pub lng: f64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_type: Option<String>,
    /// Group the pin is posted to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

/// Geographic bounding box, `west,south,east,north` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    /// Query-string form expected by the pins endpoint.
    pub fn to_query_value(&self) -> String {
        format!("{},{},{},{}", self.west, self.south, self.east, self.north)
    }
}

/// Filters for the community feed listing.
///
/// # Default
///
/// `limit = 50`, `offset = 0`, no filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinQuery {
    pub limit: u32,
    pub offset: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
}

impl Default for PinQuery {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
            mention_type: None,
            bbox: None,
        }
    }
}

impl PinQuery {
    /// Maximum page size the API accepts.
    pub const MAX_LIMIT: u32 = 200;

    /// Render as `(key, value)` pairs for the request URL.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.limit.clamp(1, Self::MAX_LIMIT).to_string()),
            ("offset", self.offset.to_string()),
        ];
        if let Some(ref mention_type) = self.mention_type {
            pairs.push(("mentionType", mention_type.clone()));
        }
        if let Some(bbox) = self.bbox {
            pairs.push(("bbox", bbox.to_query_value()));
        }
        pairs
    }
}

/// Radius search around a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyQuery {
    pub lat: f64,
    pub lng: f64,
    pub radius_m: u32,
}

// ============ Groups / Stats ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub member_count: u32,
}

/// Community-wide counters shown on the feed header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    #[serde(default)]
    pub total_pins: u64,
    #[serde(default)]
    pub pins_last_24h: u64,
    #[serde(default)]
    pub active_users: u64,
    #[serde(default)]
    pub total_views: u64,
}

// ============ Atlas ============

/// Kind of curated place shown as an atlas layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtlasEntityKind {
    City,
    County,
    Neighborhood,
    School,
    Park,
    Lake,
}

impl AtlasEntityKind {
    pub fn all() -> &'static [AtlasEntityKind] {
        &[
            AtlasEntityKind::City,
            AtlasEntityKind::County,
            AtlasEntityKind::Neighborhood,
            AtlasEntityKind::School,
            AtlasEntityKind::Park,
            AtlasEntityKind::Lake,
        ]
    }

    /// Path segment and map layer identifier.
    pub fn slug(&self) -> &'static str {
        match self {
            AtlasEntityKind::City => "cities",
            AtlasEntityKind::County => "counties",
            AtlasEntityKind::Neighborhood => "neighborhoods",
            AtlasEntityKind::School => "schools",
            AtlasEntityKind::Park => "parks",
            AtlasEntityKind::Lake => "lakes",
        }
    }

    /// Singular label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            AtlasEntityKind::City => "city",
            AtlasEntityKind::County => "county",
            AtlasEntityKind::Neighborhood => "neighborhood",
            AtlasEntityKind::School => "school",
            AtlasEntityKind::Park => "park",
            AtlasEntityKind::Lake => "lake",
        }
    }
}

/// Atlas type descriptor listed by the atlas index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasType {
    pub kind: AtlasEntityKind,
    pub display_name: String,
    #[serde(default)]
    pub entity_count: u32,
    /// Whether the layer is shown by default.
    #[serde(default)]
    pub visible: bool,
}

/// A curated, admin-managed place record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasEntity {
    pub id: String,
    pub kind: AtlasEntityKind,
    pub name: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// Partial update for an atlas entity; absent fields stay untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasEntityPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl AtlasEntityPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.lat.is_none()
            && self.lng.is_none()
            && self.description.is_none()
            && self.website.is_none()
    }

    /// Apply the patch to a local copy, as the server would.
    pub fn apply_to(&self, entity: &mut AtlasEntity) {
        if let Some(ref name) = self.name {
            entity.name.clone_from(name);
        }
        if let Some(lat) = self.lat {
            entity.lat = Some(lat);
        }
        if let Some(lng) = self.lng {
            entity.lng = Some(lng);
        }
        if let Some(ref description) = self.description {
            entity.description = Some(description.clone());
        }
        if let Some(ref website) = self.website {
            entity.website = Some(website.clone());
        }
    }
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default, alias = "message")]
    pub error: Option<String>,
}
