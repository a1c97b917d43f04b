//! Atlas layer service
//!
//! Keeps the loaded entities per layer so admin edits can show up before
//! the backend confirms them. A rejected edit is rolled back.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{CoreError, CoreResult};
use crate::events::AppEvent;
use crate::services::{into_load_state, ServiceContext};
use crate::types::{AtlasEntity, AtlasEntityKind, AtlasEntityPatch, AtlasType, LoadState};

/// Atlas layer service
pub struct AtlasService {
    ctx: Arc<ServiceContext>,
    layers: RwLock<HashMap<AtlasEntityKind, Vec<AtlasEntity>>>,
}

impl AtlasService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            layers: RwLock::new(HashMap::new()),
        }
    }

    pub async fn load_types(&self) -> LoadState<Vec<AtlasType>> {
        let result = self
            .ctx
            .provider
            .list_atlas_types()
            .await
            .map_err(CoreError::from);
        into_load_state(result, "load atlas types")
    }

    /// Fetch a layer and cache it.
    pub async fn load_layer(&self, kind: AtlasEntityKind) -> LoadState<Vec<AtlasEntity>> {
        let result = self
            .ctx
            .provider
            .list_atlas_entities(kind)
            .await
            .map_err(CoreError::from);
        if let Ok(entities) = &result {
            self.write_layers().insert(kind, entities.clone());
        }
        into_load_state(result, &format!("load atlas layer {}", kind.slug()))
    }

    /// Cached entities of a layer, including unconfirmed edits.
    pub fn entities(&self, kind: AtlasEntityKind) -> Vec<AtlasEntity> {
        self.layers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }

    /// Announce a click on an entity of a loaded layer.
    pub fn entity_clicked(&self, kind: AtlasEntityKind, id: &str) -> CoreResult<()> {
        let entity = self.find(kind, id)?;
        self.ctx.bus.publish(AppEvent::AtlasEntityClicked {
            kind,
            id: entity.id,
            name: entity.name,
        });
        Ok(())
    }

    /// Apply `patch` locally, then persist it. On failure the local copy is
    /// restored and the error returned.
    pub async fn update_entity(
        &self,
        kind: AtlasEntityKind,
        id: &str,
        patch: &AtlasEntityPatch,
    ) -> CoreResult<AtlasEntity> {
        if patch.is_empty() {
            return Err(CoreError::Validation("nothing to update".into()));
        }
        let previous = self.find(kind, id)?;
        let mut optimistic = previous.clone();
        patch.apply_to(&mut optimistic);
        self.put(kind, optimistic);

        match self.ctx.provider.update_atlas_entity(kind, id, patch).await {
            Ok(stored) => {
                self.put(kind, stored.clone());
                self.ctx.bus.publish(AppEvent::AtlasRefresh { layer: kind });
                Ok(stored)
            }
            Err(e) => {
                log::warn!("rolling back edit of {} {id}", kind.slug());
                self.put(kind, previous);
                Err(e.into())
            }
        }
    }

    /// Remove locally, then delete on the backend; restores the entity at
    /// its old position when the backend refuses.
    pub async fn delete_entity(&self, kind: AtlasEntityKind, id: &str) -> CoreResult<()> {
        let (index, removed) = {
            let mut layers = self.write_layers();
            let layer = layers.entry(kind).or_default();
            let index = layer
                .iter()
                .position(|e| e.id == id)
                .ok_or_else(|| not_loaded(kind, id))?;
            (index, layer.remove(index))
        };

        match self.ctx.provider.delete_atlas_entity(kind, id).await {
            Ok(()) => {
                self.ctx.bus.publish(AppEvent::AtlasRefresh { layer: kind });
                Ok(())
            }
            Err(e) => {
                log::warn!("rolling back delete of {} {id}", kind.slug());
                let mut layers = self.write_layers();
                let layer = layers.entry(kind).or_default();
                layer.insert(index.min(layer.len()), removed);
                Err(e.into())
            }
        }
    }

    fn find(&self, kind: AtlasEntityKind, id: &str) -> CoreResult<AtlasEntity> {
        self.entities(kind)
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| not_loaded(kind, id))
    }

    fn put(&self, kind: AtlasEntityKind, entity: AtlasEntity) {
        let mut layers = self.write_layers();
        let layer = layers.entry(kind).or_default();
        match layer.iter_mut().find(|e| e.id == entity.id) {
            Some(slot) => *slot = entity,
            None => layer.push(entity),
        }
    }

    fn write_layers(
        &self,
    ) -> std::sync::RwLockWriteGuard<'_, HashMap<AtlasEntityKind, Vec<AtlasEntity>>> {
        self.layers.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_loaded(kind: AtlasEntityKind, id: &str) -> CoreError {
    CoreError::Validation(format!("{} {id} is not loaded", kind.label()))
}
