//! Shared helpers for the integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use mnlove_core::types::{CameraPosition, LngLat};
use mnlove_core::{CurrentCell, EventBus, MapCamera, MapUiConfig, MemoryHistory, UrlMapSync};

pub const BASE_URL: &str = "https://example.test/map";

/// Camera that jumps straight to every target.
pub struct InstantCamera {
    position: Mutex<CameraPosition>,
}

impl InstantCamera {
    pub fn new() -> Self {
        Self {
            position: Mutex::new(CameraPosition::new(46.73, -94.69, 6.0)),
        }
    }
}

impl MapCamera for InstantCamera {
    fn fly_to(&self, target: CameraPosition, _duration: Duration) {
        *self.position.lock().unwrap_or_else(PoisonError::into_inner) = target;
    }

    fn ease_to(&self, target: CameraPosition, duration: Duration) {
        self.fly_to(target, duration);
    }

    fn center(&self) -> LngLat {
        self.position.lock().unwrap_or_else(PoisonError::into_inner).center
    }

    fn zoom(&self) -> f64 {
        self.position.lock().unwrap_or_else(PoisonError::into_inner).zoom
    }

    fn is_loaded(&self) -> bool {
        true
    }
}

pub struct SyncHarness {
    pub sync: UrlMapSync,
    pub history: Arc<MemoryHistory>,
    pub selected_pin: CurrentCell<Option<String>>,
    pub bus: EventBus,
}

pub fn sync_harness(initial_url: &str) -> SyncHarness {
    let config = MapUiConfig {
        base_url: BASE_URL.to_string(),
        ..MapUiConfig::default()
    };
    let history = Arc::new(MemoryHistory::new(initial_url));
    let bus = EventBus::new(config.event_bus_capacity);
    let selected_pin = CurrentCell::new(None);
    let sync = UrlMapSync::new(
        &config,
        history.clone(),
        Arc::new(InstantCamera::new()),
        bus.clone(),
        selected_pin.clone(),
    );
    SyncHarness {
        sync,
        history,
        selected_pin,
        bus,
    }
}
