//! Status bar

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use mnlove_core::UrlHistory;

use crate::event::DefaultKeymap;
use crate::model::App;
use crate::view::theme::ThemeColors;

pub fn render(app: &App, colors: &ThemeColors, frame: &mut Frame, area: Rect) {
    if let Some(draft) = &app.compose {
        let line = Line::from(vec![
            Span::styled("New pin: ", colors.hint_key()),
            Span::raw(format!("{draft}▏")),
            Span::raw(" │ "),
            Span::styled("enter", colors.hint_key()),
            Span::raw(" post │ "),
            Span::styled(DefaultKeymap::CLOSE.label, colors.hint_key()),
            Span::raw(" cancel"),
        ]);
        frame.render_widget(Paragraph::new(line).style(colors.statusbar()), area);
        return;
    }

    let mut spans = Vec::new();
    for (i, (key, desc)) in hints(app).iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" │ "));
        }
        spans.push(Span::styled(*key, colors.hint_key()));
        spans.push(Span::raw(" "));
        spans.push(Span::raw(*desc));
    }

    spans.push(Span::raw(" │ "));
    match &app.status_message {
        Some(msg) => spans.push(Span::styled(msg.clone(), Style::default().fg(colors.pin_selected))),
        None => spans.push(Span::raw(app.history.current_url())),
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(colors.statusbar());
    frame.render_widget(paragraph, area);
}

fn hints(app: &App) -> Vec<(&'static str, &'static str)> {
    let mut hints = vec![("←↑↓→", "pan"), (DefaultKeymap::SEARCH.label, "search")];
    if app.panel.inputs().has_selection() || app.search_active {
        hints.push((DefaultKeymap::CLOSE.label, "close"));
    } else {
        hints.push((DefaultKeymap::NEXT_PIN.label, "next pin"));
        hints.push((DefaultKeymap::SELECT_CENTER.label, "pick"));
    }
    hints.push((DefaultKeymap::ADD_PIN.label, "add pin"));
    hints.push((DefaultKeymap::SHARE.label, "share"));
    hints.push((DefaultKeymap::QUIT.label, "quit"));
    hints
}
