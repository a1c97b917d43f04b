//! Event bus and backend results

use std::time::Instant;

use mnlove_core::types::{AtlasEntityKind, LngLat, LoadState, PanelState};
use mnlove_core::{AppEvent, CoreError};

use super::map;
use crate::backend::BackendEvent;
use crate::model::App;

pub fn handle_app_event(app: &mut App, event: AppEvent, now: Instant) {
    match event {
        AppEvent::SelectPinById { pin_id } => match app.find_pin(&pin_id) {
            Some(pin) => map::select_pin(app, &pin),
            None => {
                log::info!("pin {pin_id} selected before it loaded");
                map::select_pin_id(app, &pin_id);
            }
        },
        AppEvent::ShowLocation { lat, lng, .. } => {
            map::select_location(app, LngLat::new(lat, lng));
        }
        AppEvent::OpenPanel => {
            // Settle the pending location first so "open" is judged on the
            // state the user will see.
            app.panel.sync_height(now);
            if !app.panel.is_open() {
                app.panel.set_explicit_target(Some(PanelState::Main));
            }
        }
        AppEvent::PinCreated { pin } => {
            app.set_status(format!("Pin {} added", pin.id));
            if let LoadState::Loaded(pins) = &mut app.feed {
                pins.insert(0, pin);
            }
        }
        AppEvent::AtlasEntityClicked { kind, name, .. } => {
            app.set_status(format!("{}: {name}", kind.label()));
        }
        AppEvent::AtlasRefresh { layer } => {
            if let Some(backend) = &app.backend {
                backend.request_layer(layer);
            }
        }
        AppEvent::MapStyleChanged { style } => {
            log::debug!("map style {style:?}");
            app.map_style = style;
        }
        AppEvent::ThemeToggled => app.dark_theme = !app.dark_theme,
    }
}

pub fn handle_backend_event(app: &mut App, event: BackendEvent) {
    match event {
        BackendEvent::Feed(state) => app.feed = state,
        BackendEvent::Nearby(Ok(pins)) => app.nearby = LoadState::Loaded(pins),
        BackendEvent::Nearby(Err(CoreError::Superseded)) => {}
        BackendEvent::Nearby(Err(e)) => {
            e.log("nearby search");
            app.nearby = LoadState::Failed(e.to_string());
        }
        BackendEvent::Stats(state) => app.stats = state,
        BackendEvent::Layer(AtlasEntityKind::Lake, state) => app.lakes = state,
        BackendEvent::Layer(kind, _) => log::debug!("ignoring {} layer", kind.slug()),
        BackendEvent::PinPosted(Ok(pin)) => map::select_pin(app, &pin),
        BackendEvent::PinPosted(Err(e)) => {
            e.log("create pin");
            app.set_status(format!("Pin not posted: {e}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::{pin, test_app, TEST_URL};
    use mnlove_core::UrlHistory;

    #[test]
    fn select_by_id_before_load_keeps_id() {
        let mut app = test_app(TEST_URL);
        handle_app_event(
            &mut app,
            AppEvent::SelectPinById {
                pin_id: "late".into(),
            },
            Instant::now(),
        );
        assert_eq!(app.selected_pin_id().as_deref(), Some("late"));
        assert!(app.panel.inputs().has_pin_selection);
        assert_eq!(app.history.current_url(), format!("{TEST_URL}?pin=late"));
    }

    #[test]
    fn open_panel_does_not_override_open_panel() {
        let mut app = test_app(TEST_URL);
        let now = Instant::now();
        app.panel.set_explicit_target(Some(PanelState::Tall));
        app.panel.sync_height(now);
        handle_app_event(&mut app, AppEvent::OpenPanel, now);
        app.panel.sync_height(now);
        assert_eq!(app.panel.view().current_state, PanelState::Tall);
    }

    #[test]
    fn open_panel_raises_closed_panel() {
        let mut app = test_app(TEST_URL);
        let now = Instant::now();
        handle_app_event(&mut app, AppEvent::OpenPanel, now);
        app.panel.sync_height(now);
        assert_eq!(app.panel.view().current_state, PanelState::Main);
    }

    #[test]
    fn created_pin_joins_feed() {
        let mut app = test_app(TEST_URL);
        app.feed = LoadState::Loaded(vec![pin("old", 45.0, -93.0, None)]);
        handle_app_event(
            &mut app,
            AppEvent::PinCreated {
                pin: pin("new", 45.0, -93.0, None),
            },
            Instant::now(),
        );
        let ids: Vec<_> = app.feed.items_or_empty().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["new", "old"]);
    }

    #[test]
    fn superseded_nearby_is_dropped() {
        let mut app = test_app(TEST_URL);
        app.nearby = LoadState::Loading;
        handle_backend_event(&mut app, BackendEvent::Nearby(Err(CoreError::Superseded)));
        assert!(app.nearby.is_loading());
        handle_backend_event(
            &mut app,
            BackendEvent::Nearby(Err(CoreError::Validation("bad radius".into()))),
        );
        assert!(app.nearby.error().is_some());
    }

    #[test]
    fn posted_pin_is_selected() {
        let mut app = test_app(TEST_URL);
        handle_backend_event(&mut app, BackendEvent::PinPosted(Ok(pin("fresh", 46.0, -94.0, None))));
        assert_eq!(app.selected_pin_id().as_deref(), Some("fresh"));
        assert_eq!(app.history.current_url(), format!("{TEST_URL}?pin=fresh"));
    }

    #[test]
    fn rejected_pin_reports_reason() {
        let mut app = test_app(TEST_URL);
        handle_backend_event(
            &mut app,
            BackendEvent::PinPosted(Err(CoreError::Validation("description must not be empty".into()))),
        );
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Pin not posted")));
    }
}
