//! The encounter ledger.
//!
//! An append-only log of every encounter plus the derived seen set and
//! id-to-name map, persisted as one whole-state JSON document after every
//! mutation. A missing or corrupt document degrades to an empty ledger.

use crate::encounter::EncounterRecord;
use crate::persist::{load_json_or_default, write_json, PersistError};
use crate::stats::most_common;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Durable ledger state. Field names are the on-disk JSON keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    /// One display name per encounter, in order, duplicates allowed.
    #[serde(default)]
    pub names: Vec<String>,

    /// Every identifier ever encountered.
    #[serde(default)]
    pub ids: BTreeSet<u32>,

    /// Latest display name seen for each identifier.
    #[serde(default)]
    pub names_by_id: BTreeMap<u32, String>,
}

/// The encounter ledger: in-memory state plus its durable document.
#[derive(Debug)]
pub struct EncounterLedger {
    path: PathBuf,
    state: LedgerState,
}

impl EncounterLedger {
    /// Load the ledger from `path`, treating a missing or corrupt document
    /// as empty.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = load_json_or_default(&path).await;
        Self { path, state }
    }

    /// Append one encounter and persist the whole state atomically.
    ///
    /// The in-memory state is updated even when the write fails; the caller
    /// decides whether a lost write matters.
    pub async fn record(&mut self, encounter: &EncounterRecord) -> Result<(), PersistError> {
        self.state.names.push(encounter.name.clone());
        self.state.ids.insert(encounter.id);
        self.state
            .names_by_id
            .insert(encounter.id, encounter.name.clone());
        write_json(&self.path, &self.state).await
    }

    /// The current ledger state.
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Total number of encounters ever recorded.
    pub fn total(&self) -> usize {
        self.state.names.len()
    }

    /// The most frequently encountered name and its count.
    pub fn most_encountered(&self) -> Option<(String, usize)> {
        most_common(self.state.names.iter().map(String::as_str))
    }
}
