//! Shiny encounter history.
//!
//! Shiny encounters are logged separately from the ledger in their own
//! durable document. Entries store localized date and time strings; all
//! stamping and parse-back uses one fixed timezone (UTC) so "time since"
//! arithmetic stays coherent across restarts.

use crate::encounter::dex_label;
use crate::persist::{load_json_or_default, write_json, PersistError};
use crate::stats::most_common;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const TIME_FORMAT: &str = "%I:%M %p";
const DATE_FORMAT: &str = "%d/%m/%Y";

/// One shiny encounter, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShinyEntry {
    /// Dex number label, e.g. `#006`.
    pub dex: String,

    /// Display name at the time of the encounter.
    pub name: String,

    /// Time of day, e.g. `02:15 PM`.
    pub time: String,

    /// Date, e.g. `01/01/2024`.
    pub date: String,
}

impl ShinyEntry {
    /// Stamp a new entry for an encounter of `id` at `now`.
    pub fn stamped(id: u32, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            dex: dex_label(id),
            name: name.into(),
            time: now.format(TIME_FORMAT).to_string(),
            date: now.format(DATE_FORMAT).to_string(),
        }
    }

    /// The identifier encoded in the dex label.
    pub fn id(&self) -> Option<u32> {
        self.dex.strip_prefix('#').and_then(|n| n.parse().ok())
    }

    /// Reconstruct the timestamp from the stored date and time.
    ///
    /// `None` when the stored strings do not parse (hand-edited or foreign
    /// documents).
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let joined = format!("{} {}", self.date, self.time);
        NaiveDateTime::parse_from_str(&joined, "%d/%m/%Y %I:%M %p")
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Display line for a slot's shiny list, e.g. `02:15 PM – 01/01/2024`.
    pub fn tooltip_line(&self) -> String {
        format!("{} – {}", self.time, self.date)
    }
}

/// The shiny history: ordered entries plus their durable document.
#[derive(Debug)]
pub struct ShinyHistory {
    path: PathBuf,
    entries: Vec<ShinyEntry>,
}

impl ShinyHistory {
    /// Load the history from `path`, treating a missing or corrupt document
    /// as empty.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_json_or_default(&path).await;
        Self { path, entries }
    }

    /// Append one entry and persist the whole list atomically.
    pub async fn record(&mut self, entry: ShinyEntry) -> Result<(), PersistError> {
        self.entries.push(entry);
        write_json(&self.path, &self.entries).await
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[ShinyEntry] {
        &self.entries
    }

    /// Number of shiny encounters ever recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no shiny has ever been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The reconstructed timestamp of the most recent entry.
    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.entries.last()?.timestamp()
    }

    /// Time elapsed since the most recent shiny.
    ///
    /// `None` when the history is empty (or its last entry does not parse).
    pub fn time_since_last(&self, now: DateTime<Utc>) -> Option<Duration> {
        Some(now - self.last_timestamp()?)
    }

    /// The most frequent shiny name and its count.
    pub fn top_shiny(&self) -> Option<(String, usize)> {
        most_common(self.entries.iter().map(|e| e.name.as_str()))
    }
}
