//! Update layer
//!
//! The only place that mutates the model. `update` applies one message,
//! `tick` advances timers and drains what arrived from the event bus and
//! the backend. Both finish by re-deriving the panel height.

mod compose;
mod events;
mod map;
mod panel;

use std::time::Instant;

use mnlove_core::types::{AtlasEntityKind, LoadState, MapLoadState, PinQuery};

use crate::message::AppMessage;
use crate::model::{map_viewport_px, App};

pub fn update(app: &mut App, msg: AppMessage, now: Instant) {
    match msg {
        AppMessage::Quit => {
            app.url_sync.dispose();
            app.should_quit = true;
        }
        AppMessage::Map(map_msg) => map::update(app, map_msg),
        AppMessage::Panel(panel_msg) => panel::update(app, panel_msg, now),
        AppMessage::Compose(compose_msg) => compose::update(app, compose_msg),
        AppMessage::Resize(cols, rows) => {
            app.size = (cols, rows);
            app.panel.set_viewport_height(map_viewport_px(rows));
        }
        AppMessage::ShowShareUrl => match app.url_sync.get_shareable_url() {
            Ok(url) => app.set_status(url),
            Err(e) => {
                e.log("shareable url");
                app.set_status(format!("Could not build link: {e}"));
            }
        },
        AppMessage::Refresh => request_data(app),
        AppMessage::DismissOverlay => app.overlay_dismissed = true,
        AppMessage::ClearStatus => app.clear_status(),
        AppMessage::Noop => {}
    }
    app.panel.sync_height(now);
}

/// Advance time-driven state.
pub fn tick(app: &mut App, now: Instant) {
    if app.map_state == MapLoadState::Loading {
        app.map_state = MapLoadState::Ready;
        app.camera.set_loaded(true);
        log::info!("map ready");
        app.url_sync.on_map_loaded(now);
        request_data(app);
    }

    if let Some(position) = app.camera.tick(now) {
        app.url_sync.on_move_end(position, now);
    }
    app.url_sync.poll(now);

    for event in app.events.drain() {
        events::handle_app_event(app, event, now);
    }
    if let Some(backend) = &app.backend {
        for event in backend.drain() {
            events::handle_backend_event(app, event);
        }
    }

    app.panel.sync_height(now);
}

/// Reload the feed, stats, and the lakes layer.
pub fn request_data(app: &mut App) {
    let Some(backend) = &app.backend else {
        return;
    };
    app.feed = LoadState::Loading;
    app.stats = LoadState::Loading;
    app.lakes = LoadState::Loading;
    backend.request_feed(PinQuery {
        mention_type: app.mention_filter.clone(),
        ..PinQuery::default()
    });
    backend.request_stats();
    backend.request_layer(AtlasEntityKind::Lake);
}
