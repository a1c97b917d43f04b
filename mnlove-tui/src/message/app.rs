//! Top-level message

use super::{ComposeMessage, MapMessage, PanelMessage};

#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    Quit,

    Map(MapMessage),

    Panel(PanelMessage),

    Compose(ComposeMessage),

    /// Terminal resized to `(cols, rows)`.
    Resize(u16, u16),

    /// Put the shareable URL in the status bar.
    ShowShareUrl,

    /// Reload feed and atlas data.
    Refresh,

    /// Dismiss a non-blocking map error overlay.
    DismissOverlay,

    ClearStatus,

    /// Ignored event.
    Noop,
}
