//! The collection grid page.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{App, GRID_COLUMNS};
use dex_core::dex_label;

/// Render the dex grid with the selected slot's details beneath it.
pub fn render_dex(f: &mut Frame, app: &App, area: Rect) {
    let [grid_area, detail_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(5)]).areas(area);

    render_grid(f, app, grid_area);
    render_detail(f, app, detail_area);
}

fn render_grid(f: &mut Frame, app: &App, area: Rect) {
    let grid = app.session().grid();
    if grid.is_empty() || area.height == 0 {
        return;
    }

    let total_rows = grid.len().div_ceil(GRID_COLUMNS);
    let visible_rows = area.height as usize;
    let selected_row = (app.selected_id as usize - 1) / GRID_COLUMNS;
    let first_row = if selected_row >= visible_rows {
        selected_row + 1 - visible_rows
    } else {
        0
    };

    let cell_width = (area.width as usize / GRID_COLUMNS).saturating_sub(1).max(5);

    let mut lines = Vec::with_capacity(visible_rows);
    for row in first_row..total_rows.min(first_row + visible_rows) {
        let mut spans = Vec::with_capacity(GRID_COLUMNS * 2);
        for col in 0..GRID_COLUMNS {
            let index = row * GRID_COLUMNS + col;
            if index >= grid.len() {
                break;
            }
            let id = index as u32 + 1;
            let slot = grid.slot(id).expect("index stays within the grid");

            let name = if slot.revealed {
                slot.name.as_deref().unwrap_or("?")
            } else {
                "***"
            };
            let label = fit(&format!("{} {}", dex_label(id), name), cell_width);

            let style = if id == app.selected_id {
                app.theme.selected
            } else if !slot.shiny_times.is_empty() {
                app.theme.shiny
            } else if slot.revealed {
                app.theme.revealed
            } else {
                app.theme.unrevealed
            };

            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(Text::from(lines)), area);
}

fn render_detail(f: &mut Frame, app: &App, area: Rect) {
    let Some(slot) = app.selected_slot() else {
        return;
    };

    let title = if slot.revealed {
        format!(
            "{} {}",
            dex_label(app.selected_id),
            slot.name.as_deref().unwrap_or("?")
        )
    } else {
        format!("{} ???", dex_label(app.selected_id))
    };

    let mut lines = vec![Line::styled(title, app.theme.title)];
    if slot.shiny_times.is_empty() {
        lines.push(Line::styled(
            "No shiny encountered yet.",
            app.theme.dim,
        ));
    } else {
        // Most recent first; the list only ever grows.
        for stamp in slot.shiny_times.iter().rev().take(2) {
            lines.push(Line::styled(format!("Shiny: {stamp}"), app.theme.shiny));
        }
    }

    let grid = app.session().grid();
    lines.push(Line::styled(
        format!("Registered: {}/{}", grid.revealed_count(), grid.len()),
        app.theme.dim,
    ));

    f.render_widget(
        Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::TOP)),
        area,
    );
}

/// Truncate or pad `label` to exactly `width` characters.
fn fit(label: &str, width: usize) -> String {
    let mut out: String = label.chars().take(width).collect();
    while out.chars().count() < width {
        out.push(' ');
    }
    out
}
