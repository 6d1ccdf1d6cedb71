//! The bottom status line.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, View};

/// Render key hints, the fetch indicator, and any status message.
pub fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let hints = match app.view {
        View::Card => "e: encounter  d: dex  ?: help  q: quit",
        View::Dex => "hjkl: move  e: encounter  d: card  ?: help  q: quit",
    };

    let mut spans = vec![Span::styled(hints, app.theme.dim)];

    if app.fetching {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("Searching...", app.theme.title));
    }

    if let Some(status) = &app.status {
        let style = if status.starts_with("Error") {
            app.theme.error
        } else {
            app.theme.dim
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(status.clone(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
