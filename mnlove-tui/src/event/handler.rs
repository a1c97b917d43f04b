//! Event handler

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::event::keymap::DefaultKeymap;
use crate::message::{AppMessage, ComposeMessage, MapMessage, PanelMessage};
use crate::model::App;
use crate::util::rows_to_px;
use crate::view::layout;

/// Wait up to `timeout` for the next terminal event.
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

pub fn handle_event(event: Event, app: &App) -> AppMessage {
    match event {
        Event::Key(key) => handle_key_event(key, app),
        Event::Mouse(mouse) => handle_mouse_event(mouse, app),
        Event::Resize(cols, rows) => AppMessage::Resize(cols, rows),
        _ => AppMessage::Noop,
    }
}

fn handle_key_event(key: KeyEvent, app: &App) -> AppMessage {
    // Press only; Windows terminals also report release and repeat.
    if key.kind != KeyEventKind::Press {
        return AppMessage::Noop;
    }

    if DefaultKeymap::FORCE_QUIT.matches(&key) {
        return AppMessage::Quit;
    }

    // The composer takes every key, `q` included.
    if app.compose.is_some() {
        return handle_compose_key(key);
    }

    if DefaultKeymap::QUIT.matches(&key) {
        return AppMessage::Quit;
    }

    // A failure overlay swallows keys until dismissed.
    if app.overlay().is_some_and(|s| !s.is_blocking()) {
        return if DefaultKeymap::CLOSE.matches(&key) || key.code == KeyCode::Enter {
            AppMessage::DismissOverlay
        } else {
            AppMessage::Noop
        };
    }

    let pan = match key.code {
        KeyCode::Left => Some((-4, 0)),
        KeyCode::Right => Some((4, 0)),
        KeyCode::Up => Some((0, -2)),
        KeyCode::Down => Some((0, 2)),
        _ => None,
    };
    if let Some((dx, dy)) = pan {
        if key.modifiers.is_empty() {
            return AppMessage::Map(MapMessage::Pan { dx, dy });
        }
    }

    if DefaultKeymap::CLOSE.matches(&key) {
        AppMessage::Panel(PanelMessage::Close)
    } else if DefaultKeymap::ZOOM_IN.matches(&key) || DefaultKeymap::ZOOM_IN_ALT.matches(&key) {
        AppMessage::Map(MapMessage::ZoomIn)
    } else if DefaultKeymap::ZOOM_OUT.matches(&key) {
        AppMessage::Map(MapMessage::ZoomOut)
    } else if DefaultKeymap::NEXT_PIN.matches(&key) {
        AppMessage::Map(MapMessage::NextPin)
    } else if DefaultKeymap::SELECT_CENTER.matches(&key) {
        AppMessage::Map(MapMessage::SelectCenter)
    } else if DefaultKeymap::CYCLE_STYLE.matches(&key) {
        AppMessage::Map(MapMessage::CycleStyle)
    } else if DefaultKeymap::TOGGLE_THEME.matches(&key) {
        AppMessage::Map(MapMessage::ToggleTheme)
    } else if DefaultKeymap::SEARCH.matches(&key) {
        AppMessage::Panel(PanelMessage::ToggleSearch)
    } else if DefaultKeymap::FILTER.matches(&key) {
        AppMessage::Panel(PanelMessage::ToggleMentionFilter)
    } else if DefaultKeymap::MODAL.matches(&key) {
        AppMessage::Panel(PanelMessage::ToggleModal)
    } else if DefaultKeymap::SHARE.matches(&key) {
        AppMessage::ShowShareUrl
    } else if DefaultKeymap::REFRESH.matches(&key) {
        AppMessage::Refresh
    } else if DefaultKeymap::ADD_PIN.matches(&key) {
        AppMessage::Compose(ComposeMessage::Start)
    } else {
        AppMessage::Noop
    }
}

fn handle_compose_key(key: KeyEvent) -> AppMessage {
    let msg = match key.code {
        KeyCode::Enter => ComposeMessage::Submit,
        KeyCode::Esc => ComposeMessage::Cancel,
        KeyCode::Backspace => ComposeMessage::Backspace,
        KeyCode::Char(c) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
            ComposeMessage::Input(c)
        }
        _ => return AppMessage::Noop,
    };
    AppMessage::Compose(msg)
}

/// Presses on the handle row start a drag; moves and releases are only
/// forwarded while one is in progress.
fn handle_mouse_event(mouse: MouseEvent, app: &App) -> AppMessage {
    let y = rows_to_px(mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let area = Rect::new(0, 0, app.size.0, app.size.1);
            let regions = layout::compute(area, app);
            match regions.handle {
                Some(handle) if handle.y == mouse.row => {
                    AppMessage::Panel(PanelMessage::DragStart(y))
                }
                _ => AppMessage::Noop,
            }
        }
        MouseEventKind::Drag(MouseButton::Left) if app.panel.is_dragging() => {
            AppMessage::Panel(PanelMessage::DragMove(y))
        }
        MouseEventKind::Up(MouseButton::Left) if app.panel.is_dragging() => {
            AppMessage::Panel(PanelMessage::DragEnd)
        }
        _ => AppMessage::Noop,
    }
}
