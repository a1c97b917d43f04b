//! Map load overlay

use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use mnlove_core::types::MapLoadState;

use crate::model::App;
use crate::view::theme::ThemeColors;

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub fn render(app: &App, colors: &ThemeColors, frame: &mut Frame) {
    let Some(state) = app.overlay() else {
        return;
    };
    let (title, lines) = match state {
        MapLoadState::MissingToken => (
            " Map unavailable ",
            vec![
                Line::from("No map access token is configured."),
                Line::from(""),
                Line::styled(
                    "Set \"map_access_token\" in config.json and restart.",
                    colors.muted(),
                ),
            ],
        ),
        MapLoadState::Failed(reason) => (
            " Map error ",
            vec![
                Line::from(reason.clone()),
                Line::from(""),
                Line::styled("Press Enter to continue", colors.muted()),
            ],
        ),
        MapLoadState::Loading | MapLoadState::Ready => return,
    };

    let area = centered_rect(56, 7, frame.area());
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.error))
        .style(Style::default().bg(colors.panel_bg).fg(colors.fg));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
