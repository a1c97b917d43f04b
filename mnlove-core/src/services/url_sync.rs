//! URL <-> map synchronizer
//!
//! Reads the query string once on mount to position the camera or select a
//! pin, and writes camera moves back to the URL (debounced, replace-only).

use std::sync::Arc;
use std::time::Instant;

use crate::cell::CurrentCell;
use crate::config::{MapUiConfig, TimingConfig};
use crate::error::CoreResult;
use crate::events::{AppEvent, EventBus};
use crate::timer::{Debouncer, TimerQueue};
use crate::traits::{MapCamera, UrlHistory};
use crate::types::{CameraPosition, UrlMapState};
use crate::url_codec;

#[derive(Debug, Clone, PartialEq)]
enum SyncAction {
    SelectPin(String),
    /// Camera has settled after a mount-time fly-to.
    FinishNavigation(CameraPosition),
}

pub struct UrlMapSync {
    history: Arc<dyn UrlHistory>,
    camera: Arc<dyn MapCamera>,
    bus: EventBus,
    /// Currently selected pin, owned by the shell.
    selected_pin: CurrentCell<Option<String>>,
    base_url: String,
    timing: TimingConfig,
    default_zoom: f64,
    sync_enabled: bool,
    initialized: bool,
    pending_fly_to: Option<CameraPosition>,
    is_navigating: bool,
    move_debounce: Debouncer<CameraPosition>,
    timers: TimerQueue<SyncAction>,
}

impl UrlMapSync {
    pub fn new(
        config: &MapUiConfig,
        history: Arc<dyn UrlHistory>,
        camera: Arc<dyn MapCamera>,
        bus: EventBus,
        selected_pin: CurrentCell<Option<String>>,
    ) -> Self {
        Self {
            history,
            camera,
            bus,
            selected_pin,
            base_url: config.base_url.clone(),
            timing: config.timing,
            default_zoom: config.default_zoom,
            sync_enabled: config.sync_camera_to_url,
            initialized: false,
            pending_fly_to: None,
            is_navigating: false,
            move_debounce: Debouncer::new(config.timing.move_debounce()),
            timers: TimerQueue::new(),
        }
    }

    pub fn is_navigating(&self) -> bool {
        self.is_navigating
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// A mount-time fly-to is waiting for the map to load.
    pub fn has_pending_fly_to(&self) -> bool {
        self.pending_fly_to.is_some()
    }

    // ===== URL writes =====

    pub fn update_url_for_location(&self, lat: f64, lng: f64, zoom: Option<f64>) -> CoreResult<()> {
        let url = url_codec::with_location(&self.history.current_url(), lat, lng, zoom)?;
        self.write(&url);
        Ok(())
    }

    /// Pin URLs win over any pending camera write.
    pub fn update_url_for_pin(&mut self, pin_id: &str) -> CoreResult<()> {
        let url = url_codec::with_pin(&self.history.current_url(), pin_id)?;
        self.move_debounce.cancel();
        self.write(&url);
        Ok(())
    }

    pub fn clear_url_params(&self) -> CoreResult<()> {
        let url = url_codec::without_map_params(&self.history.current_url())?;
        self.write(&url);
        Ok(())
    }

    fn write(&self, url: &str) {
        if url != self.history.current_url() {
            log::debug!("url -> {url}");
            self.history.replace(url);
        }
    }

    // ===== URL reads =====

    pub fn get_url_state(&self) -> UrlMapState {
        url_codec::parse_url_state(&self.history.current_url())
    }

    /// Public link to what the map currently shows.
    pub fn get_shareable_url(&self) -> CoreResult<String> {
        let state = self.get_url_state();
        if let Some(pin_id) = state.pin_id.as_deref() {
            return url_codec::shareable_pin_url(&self.base_url, pin_id);
        }
        let base = url_codec::without_map_params(&self.base_url)?;
        match state.center() {
            Some(center) => url_codec::with_location(&base, center.lat, center.lng, state.zoom),
            None => {
                let position = self.camera.position();
                url_codec::with_location(
                    &base,
                    position.center.lat,
                    position.center.lng,
                    Some(position.zoom),
                )
            }
        }
    }

    pub fn get_shareable_pin_url(&self, pin_id: &str) -> CoreResult<String> {
        url_codec::shareable_pin_url(&self.base_url, pin_id)
    }

    // ===== Lifecycle =====

    /// Apply the URL to the map once. Later calls do nothing.
    pub fn initialize(&mut self, now: Instant) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        let state = self.get_url_state();
        if let Some(pin_id) = state.pin_id {
            log::info!("restoring pin {pin_id} from URL");
            self.timers.schedule_after(
                now,
                self.timing.pin_select_delay(),
                SyncAction::SelectPin(pin_id),
            );
        } else if let Some(center) = state.center() {
            let target = CameraPosition {
                center,
                zoom: state.zoom.unwrap_or(self.default_zoom),
            };
            log::info!(
                "restoring location {:.5},{:.5} z{:.1} from URL",
                center.lat,
                center.lng,
                target.zoom
            );
            if self.camera.is_loaded() {
                self.start_navigation(target, now);
            } else {
                self.pending_fly_to = Some(target);
            }
        }
    }

    /// The map finished loading; run a fly-to that was waiting for it.
    pub fn on_map_loaded(&mut self, now: Instant) {
        if let Some(target) = self.pending_fly_to.take() {
            self.start_navigation(target, now);
        }
    }

    fn start_navigation(&mut self, target: CameraPosition, now: Instant) {
        self.camera.fly_to(target, self.timing.fly_duration());
        self.is_navigating = true;
        self.move_debounce.cancel();
        self.timers.schedule_after(
            now,
            self.timing.settle_delay(),
            SyncAction::FinishNavigation(target),
        );
    }

    /// Camera stopped moving.
    pub fn on_move_end(&mut self, position: CameraPosition, now: Instant) {
        if self.sync_enabled {
            self.move_debounce.push(position, now);
        }
    }

    /// Fire due timers. Returns whether anything happened.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut fired = false;
        for action in self.timers.drain_due(now) {
            fired = true;
            match action {
                SyncAction::SelectPin(pin_id) => {
                    self.bus.publish(AppEvent::SelectPinById { pin_id });
                }
                SyncAction::FinishNavigation(target) => {
                    self.is_navigating = false;
                    self.bus.publish(AppEvent::ShowLocation {
                        lat: target.center.lat,
                        lng: target.center.lng,
                        zoom: Some(target.zoom),
                    });
                    self.bus.publish(AppEvent::OpenPanel);
                }
            }
        }

        if let Some(position) = self.move_debounce.poll(now) {
            fired = true;
            let pin_selected = self.selected_pin.with(Option::is_some);
            if pin_selected || self.is_navigating {
                log::trace!("skipping camera URL write (pin={pin_selected}, navigating={})", self.is_navigating);
            } else if let Err(e) = self.update_url_for_location(
                position.center.lat,
                position.center.lng,
                Some(position.zoom),
            ) {
                e.log("camera URL write");
            }
        }
        fired
    }

    /// Cancel every timer; used when the map view goes away.
    pub fn dispose(&mut self) {
        self.timers.cancel_all();
        self.move_debounce.cancel();
        self.pending_fly_to = None;
        self.is_navigating = false;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::test_utils::MockCamera;
    use crate::traits::MemoryHistory;

    const BASE: &str = "https://example.test/map";

    struct Fixture {
        sync: UrlMapSync,
        history: Arc<MemoryHistory>,
        camera: Arc<MockCamera>,
        selected: CurrentCell<Option<String>>,
        events: crate::events::EventSubscriber,
    }

    fn fixture(url: &str, loaded: bool) -> Fixture {
        let history = Arc::new(MemoryHistory::new(url));
        let camera = Arc::new(MockCamera::new(loaded));
        let bus = EventBus::new(16);
        let events = bus.subscribe();
        let selected = CurrentCell::new(None);
        let config = MapUiConfig {
            base_url: BASE.to_string(),
            ..MapUiConfig::default()
        };
        let sync = UrlMapSync::new(
            &config,
            history.clone(),
            camera.clone(),
            bus,
            selected.clone(),
        );
        Fixture {
            sync,
            history,
            camera,
            selected,
            events,
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn pin_in_url_selects_after_delay() {
        let t0 = Instant::now();
        let mut f = fixture("https://example.test/map?pin=abc", true);
        f.sync.initialize(t0);
        assert!(!f.sync.poll(t0 + ms(999)));
        assert!(f.events.drain().is_empty());
        assert!(f.sync.poll(t0 + ms(1000)));
        assert_eq!(
            f.events.drain(),
            vec![AppEvent::SelectPinById {
                pin_id: "abc".into()
            }]
        );
        assert!(f.camera.flights().is_empty());
    }

    #[test]
    fn location_in_url_flies_then_shows() {
        let t0 = Instant::now();
        let mut f = fixture("https://example.test/map?lat=44.9&lng=-93.1", true);
        f.sync.initialize(t0);
        assert_eq!(
            f.camera.flights(),
            vec![(CameraPosition::new(44.9, -93.1, 12.0), ms(1500))]
        );
        assert!(f.sync.is_navigating());

        f.sync.poll(t0 + ms(1599));
        assert!(f.events.drain().is_empty());
        f.sync.poll(t0 + ms(1600));
        assert!(!f.sync.is_navigating());
        assert_eq!(
            f.events.drain(),
            vec![
                AppEvent::ShowLocation {
                    lat: 44.9,
                    lng: -93.1,
                    zoom: Some(12.0)
                },
                AppEvent::OpenPanel,
            ]
        );
    }

    #[test]
    fn fly_to_waits_for_map_load() {
        let t0 = Instant::now();
        let mut f = fixture("https://example.test/map?lat=45&lng=-93&zoom=9", false);
        f.sync.initialize(t0);
        assert!(f.camera.flights().is_empty());
        assert!(f.sync.has_pending_fly_to());

        // never loading is not an error; nothing fires
        assert!(!f.sync.poll(t0 + ms(5000)));

        f.sync.on_map_loaded(t0 + ms(6000));
        assert_eq!(f.camera.flights().len(), 1);
        f.sync.poll(t0 + ms(7600));
        assert_eq!(f.events.drain().len(), 2);
    }

    #[test]
    fn initialize_is_one_shot() {
        let t0 = Instant::now();
        let mut f = fixture("https://example.test/map?lat=45&lng=-93", true);
        f.sync.initialize(t0);
        f.sync.initialize(t0);
        assert_eq!(f.camera.flights().len(), 1);
        assert!(f.sync.is_initialized());
    }

    #[test]
    fn malformed_url_does_nothing() {
        let t0 = Instant::now();
        let mut f = fixture("https://example.test/map?lat=north&lng=-93&pin=", true);
        f.sync.initialize(t0);
        assert!(f.camera.flights().is_empty());
        assert!(!f.sync.poll(t0 + ms(5000)));
    }

    #[test]
    fn move_burst_collapses_to_one_write() {
        let t0 = Instant::now();
        let mut f = fixture(BASE, true);
        for i in 0..10u32 {
            let step = f64::from(i);
            let at = t0 + ms(u64::from(i) * 50);
            f.sync
                .on_move_end(CameraPosition::new(44.0 + step / 100.0, -93.0, 10.0), at);
            f.sync.poll(at);
        }
        assert_eq!(f.history.write_count(), 0);
        f.sync.poll(t0 + ms(1450));
        assert_eq!(f.history.write_count(), 1);
        assert_eq!(
            f.history.current_url(),
            "https://example.test/map?lat=44.09000&lng=-93.00000&zoom=10.0"
        );
    }

    #[test]
    fn selected_pin_blocks_camera_writes() {
        let t0 = Instant::now();
        let mut f = fixture("https://example.test/map?pin=abc", true);
        f.selected.set(Some("abc".into()));
        f.sync.on_move_end(CameraPosition::new(45.0, -93.0, 11.0), t0);
        f.sync.poll(t0 + ms(1000));
        assert_eq!(f.history.write_count(), 0);
        assert_eq!(f.sync.get_url_state().pin_id.as_deref(), Some("abc"));
    }

    #[test]
    fn navigation_blocks_camera_writes() {
        let t0 = Instant::now();
        let mut f = fixture("https://example.test/map?lat=45&lng=-93", true);
        f.sync.initialize(t0);
        f.sync.on_move_end(CameraPosition::new(46.0, -94.0, 8.0), t0);
        f.sync.poll(t0 + ms(1000));
        assert_eq!(f.history.write_count(), 0);
    }

    #[test]
    fn disabled_sync_ignores_moves() {
        let t0 = Instant::now();
        let history = Arc::new(MemoryHistory::new(BASE));
        let config = MapUiConfig {
            sync_camera_to_url: false,
            ..MapUiConfig::default()
        };
        let mut sync = UrlMapSync::new(
            &config,
            history.clone(),
            Arc::new(MockCamera::new(true)),
            EventBus::new(4),
            CurrentCell::new(None),
        );
        sync.on_move_end(CameraPosition::new(45.0, -93.0, 11.0), t0);
        sync.poll(t0 + ms(2000));
        assert_eq!(history.write_count(), 0);
    }

    #[test]
    fn dispose_cancels_pending_work() {
        let t0 = Instant::now();
        let mut f = fixture("https://example.test/map?pin=abc", true);
        f.sync.initialize(t0);
        f.sync.on_move_end(CameraPosition::new(45.0, -93.0, 11.0), t0);
        f.sync.dispose();
        assert!(!f.sync.poll(t0 + ms(5000)));
        assert!(f.events.drain().is_empty());
    }

    #[test]
    fn pin_and_location_are_exclusive() {
        let mut f = fixture("https://example.test/map?tab=feed", true);
        f.sync.update_url_for_pin("abc").unwrap_or_else(|e| panic!("{e}"));
        let state = f.sync.get_url_state();
        assert_eq!(state.pin_id.as_deref(), Some("abc"));
        assert!(state.center().is_none() && state.zoom.is_none());

        f.sync
            .update_url_for_location(44.9, -93.1, Some(12.0))
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(
            f.history.current_url(),
            "https://example.test/map?tab=feed&lat=44.90000&lng=-93.10000&zoom=12.0"
        );
        assert!(f.sync.get_url_state().pin_id.is_none());

        f.sync.clear_url_params().unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(f.history.current_url(), "https://example.test/map?tab=feed");
    }

    #[test]
    fn shareable_urls_use_public_base() {
        let mut f = fixture("http://localhost:3000/map?tab=feed", true);
        f.sync
            .update_url_for_location(44.97769, -93.26501, Some(14.3))
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(
            f.sync.get_shareable_url().unwrap_or_default(),
            "https://example.test/map?lat=44.97769&lng=-93.26501&zoom=14.3"
        );
        assert_eq!(
            f.sync.get_shareable_pin_url("p1").unwrap_or_default(),
            "https://example.test/map?pin=p1"
        );
        f.sync.update_url_for_pin("p2").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(
            f.sync.get_shareable_url().unwrap_or_default(),
            "https://example.test/map?pin=p2"
        );
    }

    #[test]
    fn shareable_url_falls_back_to_camera() {
        let f = fixture(BASE, true);
        f.camera.set_position(CameraPosition::new(46.5, -94.25, 7.0));
        assert_eq!(
            f.sync.get_shareable_url().unwrap_or_default(),
            "https://example.test/map?lat=46.50000&lng=-94.25000&zoom=7.0"
        );
    }
}
