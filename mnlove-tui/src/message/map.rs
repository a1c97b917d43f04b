//! Map camera messages

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapMessage {
    /// Pan by whole screen cells.
    Pan { dx: i16, dy: i16 },
    ZoomIn,
    ZoomOut,
    /// Select the next loaded pin.
    NextPin,
    /// Select the location under the crosshair.
    SelectCenter,
    CycleStyle,
    ToggleTheme,
}
