//! Main application state.

use chrono::{DateTime, Utc};
use dex_core::{DexEvent, DexSession, DexSlot, EncounterRecord, Stats};
use std::time::Duration;
use tracing::debug;

use crate::ui::sprite::SpriteImage;
use crate::ui::theme::Theme;

/// Grid columns, matching the fixed widget width.
pub const GRID_COLUMNS: usize = 5;

/// Which page is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// The current encounter card.
    #[default]
    Card,
    /// The collection grid.
    Dex,
}

/// Main application state.
///
/// Owns the session (the single mutation path); everything else here is
/// display state derived from session notifications.
pub struct App {
    session: DexSession,

    /// The most recently completed encounter.
    pub current: Option<EncounterRecord>,
    /// Decoded sprite for the current encounter.
    pub current_sprite: Option<SpriteImage>,
    /// Statistics for the stats line.
    pub stats: Stats,
    /// The "time since last shiny" line.
    pub since_line: String,
    /// Status or error line, cleared by the next completed encounter.
    pub status: Option<String>,

    /// Active page.
    pub view: View,
    /// Grid cursor, a dex identifier.
    pub selected_id: u32,
    /// Help overlay visibility.
    pub show_help: bool,

    /// True while a fetch is in flight.
    pub fetching: bool,
    pub should_quit: bool,

    pub theme: Theme,
}

impl App {
    /// Create the application around an opened session.
    pub fn new(session: DexSession) -> Self {
        let stats = session.stats();
        let mut app = Self {
            session,
            current: None,
            current_sprite: None,
            stats,
            since_line: String::new(),
            status: Some("Waiting for the first encounter...".to_string()),
            view: View::default(),
            selected_id: 1,
            show_help: false,
            fetching: false,
            should_quit: false,
            theme: Theme::default(),
        };
        app.refresh_since_line(Utc::now());
        app
    }

    /// The session backing this app.
    pub fn session(&self) -> &DexSession {
        &self.session
    }

    /// Interval between automatic encounters.
    pub fn encounter_interval(&self) -> Duration {
        self.session.config().encounter_interval
    }

    /// Interval between since-line recomputes.
    pub fn since_interval(&self) -> Duration {
        self.session.config().since_interval
    }

    /// Mark a fetch in flight.
    pub fn begin_fetch(&mut self) {
        self.fetching = true;
    }

    /// Record a failed generation attempt. The next timer tick retries.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.fetching = false;
        self.status = Some(format!("Error: {}", message.into()));
    }

    /// Apply a completed encounter through the session and fold the
    /// resulting notifications into display state.
    pub async fn apply_encounter(&mut self, record: EncounterRecord, now: DateTime<Utc>) {
        self.fetching = false;
        self.status = None;

        for event in self.session.apply(record, now).await {
            match event {
                DexEvent::Encounter(record) => {
                    self.current_sprite = record
                        .sprite
                        .as_deref()
                        .and_then(SpriteImage::load);
                    self.current = Some(record);
                }
                DexEvent::ShinyRecorded(_) => {
                    self.refresh_since_line(now);
                }
                DexEvent::SlotChanged { id, .. } => {
                    debug!(id, "dex slot updated");
                }
                DexEvent::StatsChanged(stats) => {
                    self.stats = stats;
                }
            }
        }
    }

    /// Recompute the "time since last shiny" line. Pure function of
    /// already-persisted state, no I/O.
    pub fn refresh_since_line(&mut self, now: DateTime<Utc>) {
        self.since_line = match self.session.time_since_last_shiny(now) {
            None => "No shiny encountered yet.".to_string(),
            Some(d) if d.num_minutes() == 0 => "Shiny just now!".to_string(),
            Some(d) if d.num_minutes() == 1 => "1 minute since last shiny!".to_string(),
            Some(d) => format!("{} minutes since last shiny!", d.num_minutes()),
        };
    }

    /// Switch between the card and the collection grid.
    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            View::Card => View::Dex,
            View::Dex => View::Card,
        };
    }

    /// Move the grid cursor, clamped to the grid.
    pub fn move_selection(&mut self, dx: i32, dy: i32) {
        let len = self.session.grid().len() as i32;
        if len == 0 {
            return;
        }
        let current = self.selected_id as i32 - 1;
        let next = (current + dx + dy * GRID_COLUMNS as i32).clamp(0, len - 1);
        self.selected_id = next as u32 + 1;
    }

    /// Jump the grid cursor to an identifier, clamped to the grid.
    pub fn select(&mut self, id: u32) {
        let len = self.session.grid().len() as u32;
        if len > 0 {
            self.selected_id = id.clamp(1, len);
        }
    }

    /// The slot under the grid cursor.
    pub fn selected_slot(&self) -> Option<&DexSlot> {
        self.session.grid().slot(self.selected_id)
    }
}
