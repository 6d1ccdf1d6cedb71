//! Top-level rendering.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::{App, View};
use crate::ui::widgets::{card, dex_grid, status_bar};

/// Render one frame.
pub fn render(f: &mut Frame, app: &App) {
    let [main, status] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(f.area());

    match app.view {
        View::Card => card::render_card(f, app, main),
        View::Dex => dex_grid::render_dex(f, app, main),
    }

    status_bar::render_status(f, app, status);

    if app.show_help {
        render_help(f);
    }
}

fn render_help(f: &mut Frame) {
    let area = centered_rect(f.area(), 36, 10);
    f.render_widget(Clear, area);

    let text = Text::from(vec![
        Line::from("e / space   encounter now"),
        Line::from("d / tab     toggle dex view"),
        Line::from("h j k l     move in the dex"),
        Line::from("g / G       first / last slot"),
        Line::from("q / esc     quit"),
        Line::from(""),
        Line::from("Press any key to close"),
    ]);
    f.render_widget(
        Paragraph::new(text).block(Block::default().title("Help").borders(Borders::ALL)),
        area,
    );
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
