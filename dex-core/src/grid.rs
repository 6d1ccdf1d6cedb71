//! The dex grid projection.
//!
//! One slot per possible identifier. Slots are pure value types derived from
//! the ledger and the cache; the whole grid can be rebuilt from persisted
//! facts alone and owns no rendering state. Rendering layers subscribe to
//! slot-changed notifications instead.

use crate::ledger::LedgerState;
use crate::shiny::ShinyEntry;
use std::path::PathBuf;

/// One collection slot.
///
/// `Unrevealed -> Revealed` is one-way; within `Revealed`, sprite and name
/// may be overwritten on every later encounter while `shiny_times` only
/// grows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DexSlot {
    /// Whether this identifier has ever been encountered.
    pub revealed: bool,

    /// Sprite shown in the grid, when one is cached.
    pub sprite: Option<PathBuf>,

    /// Latest display name.
    pub name: Option<String>,

    /// One display line per shiny encounter of this identifier, append-only.
    pub shiny_times: Vec<String>,
}

/// Fixed-size collection grid indexed by identifier `1..=max_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct DexGrid {
    slots: Vec<DexSlot>,
}

impl DexGrid {
    /// Create an all-unrevealed grid for identifiers `1..=max_id`.
    pub fn new(max_id: u32) -> Self {
        Self {
            slots: vec![DexSlot::default(); max_id as usize],
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True for a zero-slot grid.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The slot for `id`, if it is in range.
    pub fn slot(&self, id: u32) -> Option<&DexSlot> {
        if id == 0 {
            return None;
        }
        self.slots.get(id as usize - 1)
    }

    fn slot_mut(&mut self, id: u32) -> Option<&mut DexSlot> {
        if id == 0 {
            return None;
        }
        self.slots.get_mut(id as usize - 1)
    }

    /// Reveal a slot and overwrite its sprite and name.
    ///
    /// Idempotent for already-revealed slots. Identifiers outside the grid
    /// are ignored.
    pub fn reveal(&mut self, id: u32, sprite: Option<PathBuf>, name: impl Into<String>) {
        if let Some(slot) = self.slot_mut(id) {
            slot.revealed = true;
            slot.sprite = sprite;
            slot.name = Some(name.into());
        }
    }

    /// Append a shiny display line to a slot.
    pub fn record_shiny(&mut self, id: u32, line: impl Into<String>) {
        if let Some(slot) = self.slot_mut(id) {
            slot.shiny_times.push(line.into());
        }
    }

    /// Rebuild slot state from persisted facts.
    ///
    /// Reveals every identifier in the ledger's seen set, naming it from the
    /// id-to-name map and pointing it at whatever sprite `lookup` finds on
    /// disk. Replaying the same ledger twice yields the same grid.
    pub fn rebuild_from_ledger(
        &mut self,
        ledger: &LedgerState,
        lookup: impl Fn(u32) -> Option<PathBuf>,
    ) {
        for &id in &ledger.ids {
            let name = ledger.names_by_id.get(&id).cloned().unwrap_or_default();
            self.reveal(id, lookup(id), name);
        }
    }

    /// Replay shiny history entries into slot timestamp lists.
    pub fn replay_shiny_history(&mut self, entries: &[ShinyEntry]) {
        for entry in entries {
            if let Some(id) = entry.id() {
                self.record_shiny(id, entry.tooltip_line());
            }
        }
    }

    /// Number of revealed slots.
    pub fn revealed_count(&self) -> usize {
        self.slots.iter().filter(|s| s.revealed).count()
    }

    /// Iterate slots with their identifiers, in dex order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &DexSlot)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (i as u32 + 1, slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::{BTreeMap, BTreeSet};

    #[test]
    fn starts_fully_unrevealed() {
        let grid = DexGrid::new(5);
        assert_eq!(grid.len(), 5);
        assert_eq!(grid.revealed_count(), 0);
        assert_eq!(grid.slot(3), Some(&DexSlot::default()));
        assert_eq!(grid.slot(0), None);
        assert_eq!(grid.slot(6), None);
    }

    #[test]
    fn reveal_is_one_way_and_overwrites_fields() {
        let mut grid = DexGrid::new(10);
        grid.reveal(7, Some(PathBuf::from("a.png")), "Squirtle");
        grid.reveal(7, Some(PathBuf::from("b.png")), "Squirtle");

        let slot = grid.slot(7).unwrap();
        assert!(slot.revealed);
        assert_eq!(slot.sprite.as_deref(), Some(std::path::Path::new("b.png")));
        assert_eq!(slot.name.as_deref(), Some("Squirtle"));
    }

    #[test]
    fn out_of_range_mutations_are_ignored() {
        let mut grid = DexGrid::new(3);
        grid.reveal(99, None, "Ghost");
        grid.record_shiny(0, "never");
        assert_eq!(grid.revealed_count(), 0);
    }

    #[test]
    fn shiny_times_only_grow() {
        let mut grid = DexGrid::new(10);
        grid.record_shiny(6, "10:00 AM – 01/01/2024");
        grid.record_shiny(6, "11:00 AM – 02/01/2024");
        assert_eq!(
            grid.slot(6).unwrap().shiny_times,
            vec!["10:00 AM – 01/01/2024", "11:00 AM – 02/01/2024"]
        );
    }

    #[test]
    fn rebuild_is_idempotent() {
        let ledger = LedgerState {
            names: vec!["Pikachu".to_string(), "Charizard".to_string()],
            ids: BTreeSet::from([6, 25, 9999]),
            names_by_id: BTreeMap::from([
                (6, "Charizard".to_string()),
                (25, "Pikachu".to_string()),
            ]),
        };

        let lookup = |id: u32| (id == 25).then(|| PathBuf::from("25_normal.png"));

        let mut first = DexGrid::new(493);
        first.rebuild_from_ledger(&ledger, lookup);
        let mut second = first.clone();
        second.rebuild_from_ledger(&ledger, lookup);

        assert_eq!(first, second);
        assert_eq!(first.revealed_count(), 2);
        assert_eq!(first.slot(25).unwrap().name.as_deref(), Some("Pikachu"));
        assert!(first.slot(25).unwrap().sprite.is_some());
        assert!(first.slot(6).unwrap().sprite.is_none());
    }

    #[test]
    fn replay_routes_entries_to_their_slots() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 14, 15, 0).unwrap();
        let entries = vec![
            ShinyEntry::stamped(6, "Charizard", now),
            ShinyEntry::stamped(6, "Charizard", now),
            ShinyEntry::stamped(25, "Pikachu", now),
        ];

        let mut grid = DexGrid::new(493);
        grid.replay_shiny_history(&entries);

        assert_eq!(grid.slot(6).unwrap().shiny_times.len(), 2);
        assert_eq!(grid.slot(25).unwrap().shiny_times.len(), 1);
        assert_eq!(
            grid.slot(6).unwrap().shiny_times[0],
            "02:15 PM – 01/01/2024"
        );
    }
}
