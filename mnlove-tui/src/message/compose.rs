//! New pin composer messages

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeMessage {
    /// Open the composer at the selected location or the map center.
    Start,
    Input(char),
    Backspace,
    Submit,
    Cancel,
}
