//! Application state

use std::sync::Arc;

use mnlove_core::types::{
    AtlasEntity, CameraPosition, LngLat, LoadState, MapLoadState, Pin, StatsSummary,
};
use mnlove_core::{
    CurrentCell, EventBus, EventSubscriber, MapStyle, MapUiConfig, MemoryHistory, PanelController,
    UrlMapSync,
};

use super::TerminalCamera;
use crate::backend::Backend;
use crate::util::rows_to_px;

/// Rows reserved below the map for the status bar.
pub const STATUS_ROWS: u16 = 1;

pub struct App {
    pub should_quit: bool,

    pub config: MapUiConfig,

    /// Terminal size as `(cols, rows)`.
    pub size: (u16, u16),

    pub panel: PanelController,

    pub camera: Arc<TerminalCamera>,

    /// In-process stand-in for the browser address bar.
    pub history: Arc<MemoryHistory>,

    pub url_sync: UrlMapSync,

    pub bus: EventBus,
    pub events: EventSubscriber,

    /// Shared with `url_sync`, which reads it when a move ends.
    pub selected_pin: CurrentCell<Option<String>>,
    pub selected_location: Option<LngLat>,

    pub search_active: bool,
    pub mention_filter: Option<String>,

    pub map_state: MapLoadState,
    pub overlay_dismissed: bool,
    pub map_style: MapStyle,
    pub dark_theme: bool,

    pub feed: LoadState<Vec<Pin>>,
    pub nearby: LoadState<Vec<Pin>>,
    pub stats: LoadState<StatsSummary>,
    pub lakes: LoadState<Vec<AtlasEntity>>,

    pub status_message: Option<String>,

    /// Description being typed for a new pin.
    pub compose: Option<String>,

    /// `None` when running without an API connection (tests, offline).
    pub backend: Option<Backend>,
}

impl App {
    pub fn new(
        config: MapUiConfig,
        initial_url: String,
        size: (u16, u16),
        bus: EventBus,
        backend: Option<Backend>,
    ) -> Self {
        let camera = Arc::new(TerminalCamera::new(CameraPosition {
            center: LngLat::new(
                mnlove_core::config::DEFAULT_CENTER.0,
                mnlove_core::config::DEFAULT_CENTER.1,
            ),
            zoom: config.default_zoom,
        }));
        let history = Arc::new(MemoryHistory::new(initial_url));
        let selected_pin = CurrentCell::new(None);
        let url_sync = UrlMapSync::new(
            &config,
            history.clone(),
            camera.clone(),
            bus.clone(),
            selected_pin.clone(),
        );
        let panel = PanelController::new(
            config.variant,
            config.heights,
            map_viewport_px(size.1),
            config.timing.manual_drag_suppress(),
        );

        Self {
            should_quit: false,
            map_state: config.initial_map_state(),
            size,
            panel,
            camera,
            history,
            url_sync,
            events: bus.subscribe(),
            bus,
            selected_pin,
            selected_location: None,
            search_active: false,
            mention_filter: None,
            overlay_dismissed: false,
            map_style: MapStyle::default(),
            dark_theme: true,
            feed: LoadState::Idle,
            nearby: LoadState::Idle,
            stats: LoadState::Idle,
            lakes: LoadState::Idle,
            status_message: None,
            compose: None,
            backend,
            config,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn selected_pin_id(&self) -> Option<String> {
        self.selected_pin.get()
    }

    /// The selected pin, if it is among the loaded ones.
    pub fn selected_pin(&self) -> Option<Pin> {
        let id = self.selected_pin_id()?;
        self.find_pin(&id)
    }

    pub fn find_pin(&self, id: &str) -> Option<Pin> {
        self.feed
            .data()
            .into_iter()
            .chain(self.nearby.data())
            .flatten()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Feed pins passing the mention type filter.
    pub fn visible_pins(&self) -> Vec<Pin> {
        self.feed
            .items_or_empty()
            .into_iter()
            .filter(|p| match &self.mention_filter {
                Some(kind) => p.mention_type.as_ref() == Some(kind),
                None => true,
            })
            .collect()
    }

    /// Distinct mention types in the loaded feed, in first-seen order.
    pub fn mention_types(&self) -> Vec<String> {
        let mut types: Vec<String> = Vec::new();
        for pin in self.feed.data().into_iter().flatten() {
            if let Some(kind) = &pin.mention_type {
                if !types.contains(kind) {
                    types.push(kind.clone());
                }
            }
        }
        types
    }

    /// The blocking overlay or an undismissed failure.
    pub fn overlay(&self) -> Option<&MapLoadState> {
        match &self.map_state {
            MapLoadState::MissingToken => Some(&self.map_state),
            MapLoadState::Failed(_) if !self.overlay_dismissed => Some(&self.map_state),
            _ => None,
        }
    }
}

/// Pixel height the panel is measured against for a terminal of `rows`.
pub fn map_viewport_px(rows: u16) -> f64 {
    rows_to_px(rows.saturating_sub(STATUS_ROWS))
}
