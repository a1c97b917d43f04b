//! Colors

use ratatui::style::{Color, Modifier, Style};

use mnlove_core::MapStyle;

use crate::model::App;

#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub fg: Color,
    pub panel_bg: Color,
    pub border: Color,
    pub highlight: Color,
    pub error: Color,
    pub muted: Color,
    pub pin: Color,
    pub pin_selected: Color,
    pub lake: Color,
    pub map_bg: Color,
    pub coastline: Color,
}

impl ThemeColors {
    pub fn for_app(app: &App) -> Self {
        let mut colors = if app.dark_theme {
            Self::dark()
        } else {
            Self::light()
        };
        let (map_bg, coastline) = match (app.map_style, app.dark_theme) {
            (MapStyle::Satellite, _) => (Color::Rgb(28, 44, 30), Color::Rgb(120, 150, 100)),
            (MapStyle::Dark, _) => (Color::Rgb(12, 12, 16), Color::Rgb(70, 70, 90)),
            (MapStyle::Streets, true) => (Color::Rgb(30, 30, 30), Color::Rgb(110, 110, 110)),
            (MapStyle::Streets, false) => (Color::Rgb(240, 236, 226), Color::Rgb(150, 140, 120)),
        };
        colors.map_bg = map_bg;
        colors.coastline = coastline;
        colors
    }

    pub fn dark() -> Self {
        Self {
            fg: Color::Rgb(212, 212, 212),
            panel_bg: Color::Rgb(37, 37, 38),
            border: Color::Rgb(62, 62, 62),
            highlight: Color::Rgb(0, 122, 204),
            error: Color::Rgb(244, 135, 113),
            muted: Color::Rgb(128, 128, 128),
            pin: Color::Rgb(255, 99, 71),
            pin_selected: Color::Rgb(255, 215, 0),
            lake: Color::Rgb(86, 156, 214),
            map_bg: Color::Rgb(30, 30, 30),
            coastline: Color::Rgb(110, 110, 110),
        }
    }

    pub fn light() -> Self {
        Self {
            fg: Color::Rgb(51, 51, 51),
            panel_bg: Color::Rgb(250, 250, 250),
            border: Color::Rgb(204, 204, 204),
            highlight: Color::Rgb(0, 102, 204),
            error: Color::Rgb(215, 58, 73),
            muted: Color::Rgb(128, 128, 128),
            pin: Color::Rgb(200, 40, 40),
            pin_selected: Color::Rgb(176, 136, 0),
            lake: Color::Rgb(30, 100, 180),
            map_bg: Color::Rgb(240, 236, 226),
            coastline: Color::Rgb(150, 140, 120),
        }
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn chip(&self, active: bool) -> Style {
        if active {
            Style::default()
                .bg(self.highlight)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.highlight)
        }
    }

    pub fn statusbar(&self) -> Style {
        Style::default().bg(self.highlight).fg(Color::White)
    }

    pub fn hint_key(&self) -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }
}
