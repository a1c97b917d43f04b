//! New pin composer

use mnlove_core::services::MAX_DESCRIPTION_LEN;
use mnlove_core::types::CreatePinRequest;
use mnlove_core::MapCamera;

use crate::message::ComposeMessage;
use crate::model::App;

pub fn update(app: &mut App, msg: ComposeMessage) {
    match msg {
        ComposeMessage::Start => {
            app.compose = Some(String::new());
            app.clear_status();
        }
        ComposeMessage::Input(c) => {
            if let Some(draft) = &mut app.compose {
                if draft.chars().count() < MAX_DESCRIPTION_LEN {
                    draft.push(c);
                }
            }
        }
        ComposeMessage::Backspace => {
            if let Some(draft) = &mut app.compose {
                draft.pop();
            }
        }
        ComposeMessage::Submit => submit(app),
        ComposeMessage::Cancel => app.compose = None,
    }
}

/// Post the draft at the selected location, or the map center when nothing
/// is selected. A blank draft keeps the composer open.
fn submit(app: &mut App) {
    let Some(draft) = app.compose.as_deref() else {
        return;
    };
    let description = draft.trim().to_string();
    if description.is_empty() {
        app.set_status("Type a description first");
        return;
    }
    app.compose = None;

    let at = app.selected_location.unwrap_or_else(|| app.camera.center());
    let Some(backend) = &app.backend else {
        app.set_status("Offline: pin not posted");
        return;
    };
    backend.create_pin(CreatePinRequest {
        lat: at.lat,
        lng: at.lng,
        description,
        mention_type: app.mention_filter.clone(),
        group_id: None,
    });
    app.set_status("Posting pin…");
}
