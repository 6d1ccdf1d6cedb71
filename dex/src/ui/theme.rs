//! Color theme for the widget.

use ratatui::style::{Color, Modifier, Style};

/// Styles used across the widget.
pub struct Theme {
    /// Shiny banner and highlights.
    pub shiny: Style,
    /// Card title line.
    pub title: Style,
    /// Secondary text (types, since line, stats).
    pub dim: Style,
    /// Revealed grid cells.
    pub revealed: Style,
    /// Unrevealed grid cells.
    pub unrevealed: Style,
    /// The grid cursor.
    pub selected: Style,
    /// Error messages.
    pub error: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            shiny: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            title: Style::default().add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Gray),
            revealed: Style::default().fg(Color::White),
            unrevealed: Style::default().fg(Color::DarkGray),
            selected: Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
            error: Style::default().fg(Color::Red),
        }
    }
}
