use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    AtlasEntity, AtlasEntityKind, AtlasEntityPatch, AtlasType, CreatePinRequest, Group,
    NearbyQuery, Pin, PinQuery, StatsSummary,
};

/// Backend collaborator for everything the map client reads or writes.
///
/// The UI never talks to the backend directly; it goes through this trait
/// so the services can be exercised against an in-memory double.
#[async_trait]
pub trait MapDataProvider: Send + Sync {
    /// Identifier used in logs.
    fn id(&self) -> &'static str;

    // ===== Pins / mentions =====

    /// Community feed listing.
    async fn list_pins(&self, query: &PinQuery) -> Result<Vec<Pin>>;

    /// Drop a new pin.
    async fn create_pin(&self, req: &CreatePinRequest) -> Result<Pin>;

    /// Pins within `radius_m` of a point, nearest first.
    async fn nearby_pins(&self, query: &NearbyQuery) -> Result<Vec<Pin>>;

    // ===== Groups / analytics =====

    async fn list_groups(&self) -> Result<Vec<Group>>;

    async fn stats_summary(&self) -> Result<StatsSummary>;

    // ===== Atlas =====

    async fn list_atlas_types(&self) -> Result<Vec<AtlasType>>;

    async fn list_atlas_entities(&self, kind: AtlasEntityKind) -> Result<Vec<AtlasEntity>>;

    /// Admin edit; returns the entity as stored.
    async fn update_atlas_entity(
        &self,
        kind: AtlasEntityKind,
        id: &str,
        patch: &AtlasEntityPatch,
    ) -> Result<AtlasEntity>;

    /// Admin delete.
    async fn delete_atlas_entity(&self, kind: AtlasEntityKind, id: &str) -> Result<()>;
}
