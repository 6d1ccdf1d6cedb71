//! The encounter card page.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use dex_core::Stats;

/// Render the current encounter card.
pub fn render_card(f: &mut Frame, app: &App, area: Rect) {
    let Some(record) = &app.current else {
        let message = app
            .status
            .as_deref()
            .unwrap_or("Waiting for the first encounter...");
        let [_, middle, _] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);
        f.render_widget(
            Paragraph::new(message).alignment(Alignment::Center),
            middle,
        );
        return;
    };

    let [sprite_area, banner_area, title_area, type_area, flavor_area, since_area, stats_area] =
        Layout::vertical([
            Constraint::Min(8),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .areas(area);

    let sprite_text = match &app.current_sprite {
        Some(sprite) => Text::from(sprite.to_lines(area.width.saturating_sub(4))),
        None => Text::from("(no sprite)"),
    };
    f.render_widget(
        Paragraph::new(sprite_text).alignment(Alignment::Center),
        sprite_area,
    );

    if record.shiny {
        f.render_widget(
            Paragraph::new(Line::styled("✨ SHINY ✨", app.theme.shiny))
                .alignment(Alignment::Center),
            banner_area,
        );
    }

    let title_style = if record.shiny {
        app.theme.shiny
    } else {
        app.theme.title
    };
    f.render_widget(
        Paragraph::new(Line::styled(
            format!("{} – {}", record.dex_label(), record.name),
            title_style,
        ))
        .alignment(Alignment::Center),
        title_area,
    );

    f.render_widget(
        Paragraph::new(Line::styled(
            format!("Type: {}", record.type_line()),
            app.theme.dim,
        ))
        .alignment(Alignment::Center),
        type_area,
    );

    f.render_widget(
        Paragraph::new(record.flavor.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        flavor_area,
    );

    f.render_widget(
        Paragraph::new(Line::styled(app.since_line.clone(), app.theme.dim))
            .alignment(Alignment::Center),
        since_area,
    );

    f.render_widget(
        Paragraph::new(Line::styled(stats_line(&app.stats), app.theme.dim))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        stats_area,
    );
}

/// Format the stats line. Most-encountered only appears once a name has
/// repeated.
fn stats_line(stats: &Stats) -> String {
    let mut parts = vec![format!("Encounters: {}", stats.total)];
    if let Some((name, count)) = &stats.most_encountered {
        if *count > 1 {
            parts.push(format!("Most encountered: {name} ({count})"));
        }
    }
    if let Some((name, count)) = &stats.top_shiny {
        parts.push(format!("Top shiny: {name} ({count})"));
    }
    parts.join("  |  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_line_hides_singleton_most_encountered() {
        let stats = Stats {
            total: 2,
            most_encountered: Some(("Pikachu".to_string(), 1)),
            top_shiny: None,
        };
        assert_eq!(stats_line(&stats), "Encounters: 2");
    }

    #[test]
    fn stats_line_shows_repeats_and_top_shiny() {
        let stats = Stats {
            total: 5,
            most_encountered: Some(("Pikachu".to_string(), 3)),
            top_shiny: Some(("Charizard".to_string(), 1)),
        };
        assert_eq!(
            stats_line(&stats),
            "Encounters: 5  |  Most encountered: Pikachu (3)  |  Top shiny: Charizard (1)"
        );
    }
}
