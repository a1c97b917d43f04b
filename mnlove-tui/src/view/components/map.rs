//! Map canvas

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Map, MapResolution};
use ratatui::widgets::Block;
use ratatui::Frame;

use mnlove_core::MapCamera;

use crate::model::{projection, App};
use crate::view::theme::ThemeColors;

pub fn render(app: &App, colors: &ThemeColors, frame: &mut Frame, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let camera = app.camera.position();
    let (x_bounds, y_bounds) = projection::bounds(&camera, area);
    let selected = app.selected_pin_id();
    let pins = app.visible_pins();
    let lakes = app.lakes.items_or_empty();
    let nearby = app.nearby.items_or_empty();

    let canvas = Canvas::default()
        .block(Block::default().style(Style::default().bg(colors.map_bg)))
        .background_color(colors.map_bg)
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: colors.coastline,
            });
            ctx.layer();

            for lake in &lakes {
                if let (Some(lat), Some(lng)) = (lake.lat, lake.lng) {
                    ctx.print(lng, lat, Span::styled("◆", Style::default().fg(colors.lake)));
                }
            }
            for pin in pins.iter().chain(nearby.iter()) {
                let is_selected = selected.as_deref() == Some(pin.id.as_str());
                let style = if is_selected {
                    Style::default()
                        .fg(colors.pin_selected)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.pin)
                };
                ctx.print(pin.lng, pin.lat, Span::styled("●", style));
            }
            if let Some(at) = app.selected_location {
                ctx.print(at.lng, at.lat, Span::styled("◎", Style::default().fg(colors.pin_selected)));
            }
            ctx.print(
                camera.center.lng,
                camera.center.lat,
                Span::styled("+", Style::default().fg(colors.fg)),
            );
        });

    frame.render_widget(canvas, area);
}
