//! Data service
//!
//! Runs feed and atlas requests on a tokio runtime and hands the results
//! back to the UI loop over a channel.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;

use mnlove_core::types::{
    AtlasEntity, AtlasEntityKind, CreatePinRequest, LoadState, NearbyQuery, Pin, PinQuery, StatsSummary,
};
use mnlove_core::{AtlasService, CoreResult, EventBus, FeedService, MapUiConfig, ServiceContext};
use mnlove_provider::{MapDataProvider, RestProvider};

/// Completed request, delivered to the UI loop.
#[derive(Debug)]
pub enum BackendEvent {
    Feed(LoadState<Vec<Pin>>),
    Nearby(CoreResult<Vec<Pin>>),
    Stats(LoadState<StatsSummary>),
    Layer(AtlasEntityKind, LoadState<Vec<AtlasEntity>>),
    /// Outcome of posting a new pin; success is also announced on the bus.
    PinPosted(CoreResult<Pin>),
}

pub struct Backend {
    runtime: Runtime,
    feed: Arc<FeedService>,
    atlas: Arc<AtlasService>,
    tx: Sender<BackendEvent>,
    rx: Receiver<BackendEvent>,
}

impl Backend {
    /// Connect to the configured API.
    pub fn new(config: &MapUiConfig, bus: EventBus) -> Result<Self> {
        let provider = RestProvider::new(config.api_base_url.clone(), config.api_token.clone())
            .context("failed to build API client")?;
        Self::with_provider(Arc::new(provider), bus)
    }

    pub fn with_provider(provider: Arc<dyn MapDataProvider>, bus: EventBus) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .context("failed to start async runtime")?;
        let ctx = Arc::new(ServiceContext::new(provider, bus));
        let (tx, rx) = mpsc::channel();
        Ok(Self {
            runtime,
            feed: Arc::new(FeedService::new(ctx.clone())),
            atlas: Arc::new(AtlasService::new(ctx)),
            tx,
            rx,
        })
    }

    pub fn request_feed(&self, query: PinQuery) {
        let feed = self.feed.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let _ = tx.send(BackendEvent::Feed(feed.load_feed(&query).await));
        });
    }

    /// Nearby pins; a newer request supersedes one still in flight.
    pub fn request_nearby(&self, query: NearbyQuery) {
        let feed = self.feed.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let _ = tx.send(BackendEvent::Nearby(feed.nearby(query).await));
        });
    }

    pub fn cancel_nearby(&self) {
        self.feed.cancel_nearby();
    }

    pub fn create_pin(&self, request: CreatePinRequest) {
        let feed = self.feed.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let _ = tx.send(BackendEvent::PinPosted(feed.create_pin(&request).await));
        });
    }

    pub fn request_stats(&self) {
        let feed = self.feed.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let _ = tx.send(BackendEvent::Stats(feed.load_stats().await));
        });
    }

    pub fn request_layer(&self, kind: AtlasEntityKind) {
        let atlas = self.atlas.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let _ = tx.send(BackendEvent::Layer(kind, atlas.load_layer(kind).await));
        });
    }

    /// Announce a click on a loaded atlas entity.
    pub fn atlas_entity_clicked(&self, kind: AtlasEntityKind, id: &str) -> CoreResult<()> {
        self.atlas.entity_clicked(kind, id)
    }

    /// Results that arrived since the last call.
    pub fn drain(&self) -> Vec<BackendEvent> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use async_trait::async_trait;
    use mnlove_core::types::{AtlasEntityPatch, AtlasType, Group};
    use mnlove_provider::{ProviderError, Result as ProviderResult};

    use super::*;

    /// Answers every listing with one lake and no pins; writes are refused.
    struct StaticProvider;

    fn lake() -> AtlasEntity {
        AtlasEntity {
            id: "harriet".into(),
            kind: AtlasEntityKind::Lake,
            name: "Lake Harriet".into(),
            lat: Some(44.92),
            lng: Some(-93.30),
            description: None,
            website: None,
        }
    }

    fn refused() -> ProviderError {
        ProviderError::PermissionDenied {
            endpoint: "static".into(),
            raw_message: None,
        }
    }

    #[async_trait]
    impl MapDataProvider for StaticProvider {
        fn id(&self) -> &'static str {
            "static"
        }

        async fn list_pins(&self, _query: &PinQuery) -> ProviderResult<Vec<Pin>> {
            Ok(Vec::new())
        }

        async fn create_pin(&self, _req: &CreatePinRequest) -> ProviderResult<Pin> {
            Err(refused())
        }

        async fn nearby_pins(&self, _query: &NearbyQuery) -> ProviderResult<Vec<Pin>> {
            Ok(Vec::new())
        }

        async fn list_groups(&self) -> ProviderResult<Vec<Group>> {
            Ok(Vec::new())
        }

        async fn stats_summary(&self) -> ProviderResult<StatsSummary> {
            Ok(StatsSummary::default())
        }

        async fn list_atlas_types(&self) -> ProviderResult<Vec<AtlasType>> {
            Ok(Vec::new())
        }

        async fn list_atlas_entities(&self, kind: AtlasEntityKind) -> ProviderResult<Vec<AtlasEntity>> {
            Ok(if kind == AtlasEntityKind::Lake {
                vec![lake()]
            } else {
                Vec::new()
            })
        }

        async fn update_atlas_entity(
            &self,
            _kind: AtlasEntityKind,
            _id: &str,
            _patch: &AtlasEntityPatch,
        ) -> ProviderResult<AtlasEntity> {
            Err(refused())
        }

        async fn delete_atlas_entity(&self, _kind: AtlasEntityKind, _id: &str) -> ProviderResult<()> {
            Err(refused())
        }
    }

    fn collect(backend: &Backend, expected: usize) -> Vec<BackendEvent> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut events = Vec::new();
        while events.len() < expected && Instant::now() < deadline {
            events.extend(backend.drain());
            std::thread::sleep(Duration::from_millis(5));
        }
        events
    }

    #[test]
    fn results_come_back_over_the_channel() {
        let backend = Backend::with_provider(Arc::new(StaticProvider), EventBus::new(8)).unwrap();
        backend.request_feed(PinQuery::default());
        backend.request_layer(AtlasEntityKind::Lake);

        let events = collect(&backend, 2);
        assert_eq!(events.len(), 2);
        assert!(events
            .iter()
            .any(|e| matches!(e, BackendEvent::Feed(LoadState::Loaded(pins)) if pins.is_empty())));
        assert!(events.iter().any(|e| matches!(
            e,
            BackendEvent::Layer(AtlasEntityKind::Lake, LoadState::Loaded(lakes)) if lakes.len() == 1
        )));
    }

    #[test]
    fn clicking_a_loaded_lake_is_announced() {
        let bus = EventBus::new(8);
        let mut events = bus.subscribe();
        let backend = Backend::with_provider(Arc::new(StaticProvider), bus).unwrap();
        backend.request_layer(AtlasEntityKind::Lake);
        assert_eq!(collect(&backend, 1).len(), 1);

        backend
            .atlas_entity_clicked(AtlasEntityKind::Lake, "harriet")
            .unwrap();
        assert_eq!(
            events.drain(),
            vec![mnlove_core::AppEvent::AtlasEntityClicked {
                kind: AtlasEntityKind::Lake,
                id: "harriet".into(),
                name: "Lake Harriet".into(),
            }]
        );
    }

    #[test]
    fn refused_pin_comes_back_as_error() {
        let backend = Backend::with_provider(Arc::new(StaticProvider), EventBus::new(8)).unwrap();
        backend.create_pin(CreatePinRequest {
            lat: 44.97,
            lng: -93.26,
            description: "Loons on Cedar Lake".into(),
            mention_type: None,
            group_id: None,
        });
        let events = collect(&backend, 1);
        assert!(matches!(
            events.as_slice(),
            [BackendEvent::PinPosted(Err(mnlove_core::CoreError::Provider(_)))]
        ));
    }
}
