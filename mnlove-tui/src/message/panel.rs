//! Panel messages

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelMessage {
    ToggleSearch,
    ToggleMentionFilter,
    ToggleModal,
    /// Esc: leave search first, then drop the selection.
    Close,
    /// Pointer pressed on the handle, in virtual pixels from the top.
    DragStart(f64),
    DragMove(f64),
    DragEnd,
}
