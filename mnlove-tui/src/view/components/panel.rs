//! Bottom panel

use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use mnlove_core::types::{LoadState, Pin};

use crate::model::App;
use crate::view::theme::ThemeColors;

/// Feed rows shown before "and N more".
const FEED_ROWS: usize = 20;

pub fn render(app: &App, colors: &ThemeColors, frame: &mut Frame, area: Rect) {
    let view = app.panel.view();
    frame.render_widget(Clear, area);

    let mut block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.panel_bg).fg(colors.fg))
        .title(Line::from(" ━━━ ").alignment(Alignment::Center))
        .title(Line::styled(format!(" {} ", view.current_state), colors.muted()).alignment(Alignment::Left));
    if view.should_show_close_icon {
        block = block.title(Line::from(" ✕ ").alignment(Alignment::Right));
    }

    let mut lines = Vec::new();
    if view.should_show_mention_types {
        lines.push(chips(app, colors));
        lines.push(Line::from(""));
    }
    lines.extend(body(app, colors));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn chips(app: &App, colors: &ThemeColors) -> Line<'static> {
    let mut spans = vec![Span::styled(" all ", colors.chip(app.mention_filter.is_none()))];
    for kind in app.mention_types() {
        let active = app.mention_filter.as_deref() == Some(kind.as_str());
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {kind} "), colors.chip(active)));
    }
    Line::from(spans)
}

fn body(app: &App, colors: &ThemeColors) -> Vec<Line<'static>> {
    if let Some(pin) = app.selected_pin() {
        return pin_details(app, &pin, colors);
    }
    if let Some(id) = app.selected_pin_id() {
        return vec![Line::styled(format!("Loading pin {id}…"), colors.muted())];
    }
    if let Some(at) = app.selected_location {
        let mut lines = vec![
            Line::styled(format!("{:.5}, {:.5}", at.lat, at.lng), colors.title()),
            Line::from(""),
        ];
        lines.extend(pin_list("Nearby", &app.nearby, colors));
        return lines;
    }
    if app.search_active {
        return pin_list("Near the crosshair", &app.nearby, colors);
    }

    let mut lines = Vec::new();
    if let Some(stats) = app.stats.data() {
        lines.push(Line::styled(
            format!("{} pins on the map", stats.total_pins),
            colors.muted(),
        ));
    }
    let feed = match &app.feed {
        LoadState::Loaded(_) => LoadState::Loaded(app.visible_pins()),
        other => other.clone(),
    };
    lines.extend(pin_list("Community feed", &feed, colors));
    lines
}

fn pin_details(app: &App, pin: &Pin, colors: &ThemeColors) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(
        pin.description.clone().unwrap_or_else(|| "(no description)".to_string()),
        colors.title(),
    )];
    let mut meta = Vec::new();
    if let Some(kind) = &pin.mention_type {
        meta.push(kind.clone());
    }
    meta.push(pin.author.clone().unwrap_or_else(|| "guest".to_string()));
    meta.push(pin.created_at.format("%Y-%m-%d").to_string());
    lines.push(Line::styled(meta.join(" · "), colors.muted()));
    lines.push(Line::styled(format!("{:.5}, {:.5}", pin.lat, pin.lng), colors.muted()));
    if let Ok(url) = app.url_sync.get_shareable_pin_url(&pin.id) {
        lines.push(Line::from(""));
        lines.push(Line::styled(url, Style::default().fg(colors.highlight)));
    }
    lines
}

fn pin_list(title: &str, state: &LoadState<Vec<Pin>>, colors: &ThemeColors) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(title.to_string(), colors.title())];
    match state {
        LoadState::Idle => {}
        LoadState::Loading => lines.push(Line::styled("Loading…", colors.muted())),
        LoadState::Failed(msg) => {
            lines.push(Line::styled(msg.clone(), Style::default().fg(colors.error)));
        }
        LoadState::Loaded(pins) if pins.is_empty() => {
            lines.push(Line::styled("Nothing here yet", colors.muted()));
        }
        LoadState::Loaded(pins) => {
            for pin in pins.iter().take(FEED_ROWS) {
                let kind = pin.mention_type.as_deref().unwrap_or("mention");
                let text = pin.description.as_deref().unwrap_or("");
                lines.push(Line::from(vec![
                    Span::styled(format!("{kind:>10} "), colors.muted()),
                    Span::raw(text.to_string()),
                ]));
            }
            if pins.len() > FEED_ROWS {
                lines.push(Line::styled(
                    format!("and {} more", pins.len() - FEED_ROWS),
                    colors.muted(),
                ));
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::{pin, test_app, TEST_URL};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::time::Instant;

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 41)).unwrap();
        terminal.draw(|frame| crate::view::render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn resting_panel_shows_feed_and_chips() {
        let mut app = test_app(TEST_URL);
        app.feed = LoadState::Loaded(vec![pin("a", 46.0, -94.0, Some("event"))]);
        let screen = draw(&app);
        assert!(screen.contains("low"));
        assert!(screen.contains("Community feed"));
        assert!(screen.contains(" all "));
        assert!(!screen.contains('✕'));
    }

    #[test]
    fn selected_pin_shows_details_and_close() {
        let mut app = test_app(TEST_URL);
        app.feed = LoadState::Loaded(vec![pin("a", 46.0, -94.0, Some("event"))]);
        crate::update::update(
            &mut app,
            crate::message::AppMessage::Map(crate::message::MapMessage::NextPin),
            Instant::now(),
        );
        let screen = draw(&app);
        assert!(screen.contains("tall"));
        assert!(screen.contains("pin a"));
        assert!(screen.contains('✕'));
        assert!(!screen.contains(" all "));
    }

    #[test]
    fn missing_token_overlay_is_drawn() {
        let config = mnlove_core::MapUiConfig::default();
        let bus = mnlove_core::EventBus::new(4);
        let app = App::new(config, TEST_URL.into(), (80, 41), bus, None);
        assert!(draw(&app).contains("Map unavailable"));
    }
}
