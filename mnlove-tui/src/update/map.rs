//! Camera and selection updates

use std::time::Duration;

use mnlove_core::types::{AtlasEntityKind, CameraPosition, LngLat, LoadState, NearbyQuery, Pin, ZOOM_RANGE};
use mnlove_core::MapCamera;

use crate::message::MapMessage;
use crate::model::{projection, App};

/// Manual camera moves ease over this long.
const EASE: Duration = Duration::from_millis(200);
/// Selecting a pin never zooms out past this.
const PIN_ZOOM: f64 = 14.0;
const NEARBY_RADIUS_M: u32 = 1500;

pub fn update(app: &mut App, msg: MapMessage) {
    match msg {
        MapMessage::Pan { dx, dy } => {
            let target = projection::pan(&app.camera.position(), dx, dy);
            app.camera.ease_to(target, EASE);
        }
        MapMessage::ZoomIn => zoom_by(app, 1.0),
        MapMessage::ZoomOut => zoom_by(app, -1.0),
        MapMessage::NextPin => {
            let pins = app.visible_pins();
            if pins.is_empty() {
                app.set_status("No pins loaded");
                return;
            }
            let current = app.selected_pin_id();
            let next = current
                .and_then(|id| pins.iter().position(|p| p.id == id))
                .map_or(0, |i| (i + 1) % pins.len());
            let pin = pins[next].clone();
            select_pin(app, &pin);
        }
        MapMessage::SelectCenter => {
            let center = app.camera.center();
            click_atlas_entity_at(app, center);
            select_location(app, center);
            let zoom = app.camera.zoom();
            if let Err(e) = app.url_sync.update_url_for_location(center.lat, center.lng, Some(zoom)) {
                e.log("location URL write");
            }
        }
        MapMessage::CycleStyle => {
            app.bus.publish(mnlove_core::AppEvent::MapStyleChanged {
                style: app.map_style.next(),
            });
        }
        MapMessage::ToggleTheme => {
            app.bus.publish(mnlove_core::AppEvent::ThemeToggled);
        }
    }
}

/// Report a lake under the crosshair, if any.
fn click_atlas_entity_at(app: &App, at: LngLat) {
    let Some(backend) = &app.backend else {
        return;
    };
    let reach = projection::degrees_per_col(app.camera.zoom()) * 2.0;
    let hit = app.lakes.data().into_iter().flatten().find(|lake| match (lake.lat, lake.lng) {
        (Some(lat), Some(lng)) => (lat - at.lat).abs() <= reach && (lng - at.lng).abs() <= reach,
        _ => false,
    });
    if let Some(lake) = hit {
        if let Err(e) = backend.atlas_entity_clicked(AtlasEntityKind::Lake, &lake.id) {
            e.log("atlas click");
        }
    }
}

fn zoom_by(app: &App, delta: f64) {
    let position = app.camera.position();
    let zoom = (position.zoom + delta).clamp(*ZOOM_RANGE.start(), *ZOOM_RANGE.end());
    app.camera.ease_to(CameraPosition { zoom, ..position }, EASE);
}

/// Select a loaded pin: panel, URL, and camera follow.
pub fn select_pin(app: &mut App, pin: &Pin) {
    select_pin_id(app, &pin.id);
    let zoom = app.camera.zoom().max(PIN_ZOOM);
    app.camera.fly_to(
        CameraPosition::new(pin.lat, pin.lng, zoom),
        app.config.timing.fly_duration(),
    );
}

/// Select by id; the pin itself may still be loading.
pub fn select_pin_id(app: &mut App, pin_id: &str) {
    app.selected_pin.set(Some(pin_id.to_string()));
    app.selected_location = None;
    app.panel.select_pin(pin_id);
    if let Err(e) = app.url_sync.update_url_for_pin(pin_id) {
        e.log("pin URL write");
    }
}

/// Select a point on the map and look for pins around it.
pub fn select_location(app: &mut App, at: LngLat) {
    app.selected_pin.set(None);
    app.selected_location = Some(at);
    app.panel.select_location(at);
    request_nearby(app, at);
}

pub fn clear_selection(app: &mut App) {
    app.selected_pin.set(None);
    app.selected_location = None;
    app.panel.clear_selection();
    if let Some(backend) = &app.backend {
        backend.cancel_nearby();
    }
    app.nearby = LoadState::Idle;
    if let Err(e) = app.url_sync.clear_url_params() {
        e.log("clear URL");
    }
}

pub fn request_nearby(app: &mut App, at: LngLat) {
    if let Some(backend) = &app.backend {
        app.nearby = LoadState::Loading;
        backend.request_nearby(NearbyQuery {
            lat: at.lat,
            lng: at.lng,
            radius_m: NEARBY_RADIUS_M,
        });
    }
}
