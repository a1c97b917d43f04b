//! Screen regions

use ratatui::layout::Rect;

use crate::model::{App, STATUS_ROWS};
use crate::util::px_to_rows;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub map: Rect,
    /// `None` while the panel is hidden or fully collapsed.
    pub panel: Option<Rect>,
    /// First row of the panel; pressing here starts a drag.
    pub handle: Option<Rect>,
    pub status: Rect,
}

pub fn compute(area: Rect, app: &App) -> Regions {
    let status_rows = STATUS_ROWS.min(area.height);
    let map = Rect::new(area.x, area.y, area.width, area.height - status_rows);
    let status = Rect::new(area.x, map.bottom(), area.width, status_rows);

    let rows = px_to_rows(app.panel.height(), map.height);
    let (panel, handle) = if rows == 0 {
        (None, None)
    } else {
        let panel = Rect::new(map.x, map.bottom() - rows, map.width, rows);
        (Some(panel), Some(Rect { height: 1, ..panel }))
    };

    Regions {
        map,
        panel,
        handle,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::{test_app, TEST_URL};
    use std::time::Instant;

    #[test]
    fn resting_panel_sits_on_bottom_of_map() {
        let app = test_app(TEST_URL);
        let regions = compute(Rect::new(0, 0, 80, 41), &app);
        assert_eq!(regions.map, Rect::new(0, 0, 80, 40));
        assert_eq!(regions.status, Rect::new(0, 40, 80, 1));
        // 30% of 40 rows
        assert_eq!(regions.panel, Some(Rect::new(0, 28, 80, 12)));
        assert_eq!(regions.handle, Some(Rect::new(0, 28, 80, 1)));
    }

    #[test]
    fn modal_removes_panel() {
        let mut app = test_app(TEST_URL);
        app.panel.set_modal_open(true);
        app.panel.sync_height(Instant::now());
        let regions = compute(Rect::new(0, 0, 80, 41), &app);
        assert_eq!(regions.panel, None);
        assert_eq!(regions.handle, None);
    }

    #[test]
    fn tiny_terminal_does_not_underflow() {
        let app = test_app(TEST_URL);
        let regions = compute(Rect::new(0, 0, 10, 1), &app);
        assert_eq!(regions.map.height, 0);
        assert_eq!(regions.panel, None);
    }
}
