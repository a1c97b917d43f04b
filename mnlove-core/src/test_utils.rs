//! Test helpers
//!
//! Mock collaborators and small factories for the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use mnlove_provider::{MapDataProvider, ProviderError, Result as ProviderResult};
use tokio::sync::{Notify, RwLock};

use crate::traits::MapCamera;
use crate::types::{
    AtlasEntity, AtlasEntityKind, AtlasEntityPatch, AtlasType, CameraPosition, CreatePinRequest,
    Group, LngLat, NearbyQuery, Pin, PinQuery, StatsSummary,
};

pub fn sample_pin(id: &str, lat: f64, lng: f64) -> Pin {
    Pin {
        id: id.to_string(),
        lat,
        lng,
        description: Some(format!("pin {id}")),
        mention_type: None,
        author: None,
        media_url: None,
        created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().unwrap_or_default(),
    }
}

pub fn sample_entity(kind: AtlasEntityKind, id: &str, name: &str) -> AtlasEntity {
    AtlasEntity {
        id: id.to_string(),
        kind,
        name: name.to_string(),
        lat: Some(44.92),
        lng: Some(-93.3),
        description: None,
        website: None,
    }
}

// ===== MockCamera =====

pub struct MockCamera {
    loaded: AtomicBool,
    position: Mutex<CameraPosition>,
    flights: Mutex<Vec<(CameraPosition, Duration)>>,
}

impl MockCamera {
    pub fn new(loaded: bool) -> Self {
        Self {
            loaded: AtomicBool::new(loaded),
            position: Mutex::new(CameraPosition::new(46.7296, -94.6859, 6.0)),
            flights: Mutex::new(Vec::new()),
        }
    }

    pub fn set_position(&self, position: CameraPosition) {
        *self.position.lock().unwrap_or_else(PoisonError::into_inner) = position;
    }

    pub fn flights(&self) -> Vec<(CameraPosition, Duration)> {
        self.flights
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl MapCamera for MockCamera {
    fn fly_to(&self, target: CameraPosition, duration: Duration) {
        self.flights
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((target, duration));
        self.set_position(target);
    }

    fn ease_to(&self, target: CameraPosition, _duration: Duration) {
        self.set_position(target);
    }

    fn center(&self) -> LngLat {
        self.position
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .center
    }

    fn zoom(&self) -> f64 {
        self.position
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .zoom
    }

    fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }
}

// ===== MockProvider =====

pub struct MockProvider {
    pins: RwLock<Vec<Pin>>,
    entities: RwLock<HashMap<AtlasEntityKind, Vec<AtlasEntity>>>,
    /// If Some, every call returns this error
    fail: RwLock<Option<ProviderError>>,
    nearby_calls: AtomicUsize,
    /// Hold the first nearby call until it is aborted
    gate_first_nearby: AtomicBool,
    gate: Notify,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            pins: RwLock::new(Vec::new()),
            entities: RwLock::new(HashMap::new()),
            fail: RwLock::new(None),
            nearby_calls: AtomicUsize::new(0),
            gate_first_nearby: AtomicBool::new(false),
            gate: Notify::new(),
        }
    }

    pub async fn fail_with(&self, err: Option<ProviderError>) {
        *self.fail.write().await = err;
    }

    pub async fn add_pin(&self, pin: Pin) {
        self.pins.write().await.push(pin);
    }

    pub async fn add_entity(&self, entity: AtlasEntity) {
        self.entities
            .write()
            .await
            .entry(entity.kind)
            .or_default()
            .push(entity);
    }

    pub async fn pin_count(&self) -> usize {
        self.pins.read().await.len()
    }

    pub async fn entity_count(&self, kind: AtlasEntityKind) -> usize {
        self.entities.read().await.get(&kind).map_or(0, Vec::len)
    }

    pub fn gate_first_nearby(&self) {
        self.gate_first_nearby.store(true, Ordering::SeqCst);
    }

    async fn check_fail(&self) -> ProviderResult<()> {
        match self.fail.read().await.clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MapDataProvider for MockProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn list_pins(&self, query: &PinQuery) -> ProviderResult<Vec<Pin>> {
        self.check_fail().await?;
        let pins = self.pins.read().await;
        Ok(pins
            .iter()
            .filter(|p| query.mention_type.is_none() || p.mention_type == query.mention_type)
            .take(query.limit as usize)
            .cloned()
            .collect())
    }

    async fn create_pin(&self, req: &CreatePinRequest) -> ProviderResult<Pin> {
        self.check_fail().await?;
        let mut pins = self.pins.write().await;
        let pin = Pin {
            id: format!("pin-{}", pins.len() + 1),
            lat: req.lat,
            lng: req.lng,
            description: Some(req.description.clone()),
            mention_type: req.mention_type.clone(),
            author: None,
            media_url: None,
            created_at: Utc::now(),
        };
        pins.push(pin.clone());
        Ok(pin)
    }

    async fn nearby_pins(&self, _query: &NearbyQuery) -> ProviderResult<Vec<Pin>> {
        let call = self.nearby_calls.fetch_add(1, Ordering::SeqCst);
        if call == 0 && self.gate_first_nearby.load(Ordering::SeqCst) {
            self.gate.notified().await;
        }
        self.check_fail().await?;
        Ok(self.pins.read().await.clone())
    }

    async fn list_groups(&self) -> ProviderResult<Vec<Group>> {
        self.check_fail().await?;
        Ok(vec![Group {
            id: "g1".into(),
            name: "Twin Cities Birders".into(),
            member_count: 12,
        }])
    }

    async fn stats_summary(&self) -> ProviderResult<StatsSummary> {
        self.check_fail().await?;
        Ok(StatsSummary {
            total_pins: self.pins.read().await.len() as u64,
            ..StatsSummary::default()
        })
    }

    async fn list_atlas_types(&self) -> ProviderResult<Vec<AtlasType>> {
        self.check_fail().await?;
        let entities = self.entities.read().await;
        Ok(AtlasEntityKind::all()
            .iter()
            .map(|kind| AtlasType {
                kind: *kind,
                display_name: kind.slug().to_string(),
                entity_count: entities.get(kind).map_or(0, |v| v.len() as u32),
                visible: true,
            })
            .collect())
    }

    async fn list_atlas_entities(&self, kind: AtlasEntityKind) -> ProviderResult<Vec<AtlasEntity>> {
        self.check_fail().await?;
        Ok(self
            .entities
            .read()
            .await
            .get(&kind)
            .cloned()
            .unwrap_or_default())
    }

    async fn update_atlas_entity(
        &self,
        kind: AtlasEntityKind,
        id: &str,
        patch: &AtlasEntityPatch,
    ) -> ProviderResult<AtlasEntity> {
        self.check_fail().await?;
        let mut entities = self.entities.write().await;
        let entity = entities
            .get_mut(&kind)
            .and_then(|layer| layer.iter_mut().find(|e| e.id == id))
            .ok_or_else(|| ProviderError::NotFound {
                endpoint: format!("atlas/{}", kind.slug()),
                resource: kind.label().to_string(),
                id: id.to_string(),
            })?;
        patch.apply_to(entity);
        Ok(entity.clone())
    }

    async fn delete_atlas_entity(&self, kind: AtlasEntityKind, id: &str) -> ProviderResult<()> {
        self.check_fail().await?;
        if let Some(layer) = self.entities.write().await.get_mut(&kind) {
            layer.retain(|e| e.id != id);
        }
        Ok(())
    }
}
