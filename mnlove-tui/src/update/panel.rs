//! Panel updates

use std::time::Instant;

use mnlove_core::types::{LoadState, PanelState};
use mnlove_core::MapCamera;

use super::map;
use crate::message::PanelMessage;
use crate::model::App;

pub fn update(app: &mut App, msg: PanelMessage, now: Instant) {
    match msg {
        PanelMessage::ToggleSearch => set_search(app, !app.search_active),
        PanelMessage::ToggleMentionFilter => cycle_mention_filter(app),
        PanelMessage::ToggleModal => {
            let open = !app.panel.inputs().is_modal_open;
            app.panel.set_modal_open(open);
        }
        PanelMessage::Close => close(app),
        PanelMessage::DragStart(y) => app.panel.begin_drag(y),
        PanelMessage::DragMove(y) => {
            app.panel.update_drag(y);
        }
        PanelMessage::DragEnd => {
            if let Some(state) = app.panel.end_drag(now) {
                log::debug!("panel dragged to {state}");
            }
        }
    }
}

fn set_search(app: &mut App, active: bool) {
    app.search_active = active;
    app.panel.set_search_active(active);
    if active {
        let center = app.camera.center();
        map::request_nearby(app, center);
    } else if app.selected_location.is_none() {
        if let Some(backend) = &app.backend {
            backend.cancel_nearby();
        }
        app.nearby = LoadState::Idle;
    }
}

/// None, then each known mention type, then None again.
fn cycle_mention_filter(app: &mut App) {
    let types = app.mention_types();
    let next = match &app.mention_filter {
        None => types.first().cloned(),
        Some(current) => types
            .iter()
            .position(|t| t == current)
            .and_then(|i| types.get(i + 1).cloned()),
    };
    app.mention_filter = next;
    app.panel.set_mention_type_filter(app.mention_filter.is_some());
    match &app.mention_filter {
        Some(kind) => app.set_status(format!("Showing {kind} mentions")),
        None => app.set_status("Showing all mentions"),
    }
}

/// Esc peels back one layer at a time.
fn close(app: &mut App) {
    if app.panel.inputs().is_modal_open {
        app.panel.set_modal_open(false);
    } else if app.search_active {
        set_search(app, false);
    } else if app.panel.inputs().has_selection() {
        map::clear_selection(app);
    } else if app.panel.is_open() {
        app.panel.set_explicit_target(Some(PanelState::Low));
    }
}
