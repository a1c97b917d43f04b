//! Utilities

mod terminal;

pub use terminal::{init_terminal, restore_terminal, Term};

/// Virtual pixels per terminal row. Panel heights are computed in pixels so
/// the thresholds behave the same as on a screen.
pub const ROW_PX: f64 = 20.0;

pub fn rows_to_px(rows: u16) -> f64 {
    f64::from(rows) * ROW_PX
}

/// Whole rows covering `px`, capped at `max_rows`.
pub fn px_to_rows(px: f64, max_rows: u16) -> u16 {
    let rows = (px / ROW_PX).round().max(0.0);
    if rows >= f64::from(max_rows) {
        max_rows
    } else {
        // rows is in 0..max_rows here
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rows = rows as u16;
        rows
    }
}
