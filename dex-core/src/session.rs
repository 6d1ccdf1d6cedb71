//! DexSession, the single mutation path.
//!
//! All ledger, history, and grid mutation flows through
//! [`DexSession::apply`], so whole-state persistence is never concurrent
//! with itself. Encounter generation runs elsewhere (a worker task) and
//! posts completed records here.

use crate::cache::{CacheKind, ObjectCache};
use crate::config::DexConfig;
use crate::encounter::EncounterRecord;
use crate::events::DexEvent;
use crate::grid::DexGrid;
use crate::ledger::{EncounterLedger, LedgerState};
use crate::shiny::{ShinyEntry, ShinyHistory};
use crate::stats::Stats;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors from opening a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The widget's durable state, loaded at startup and mutated on one path.
pub struct DexSession {
    config: DexConfig,
    cache: Arc<ObjectCache>,
    ledger: EncounterLedger,
    history: ShinyHistory,
    grid: DexGrid,
}

impl DexSession {
    /// Open a session: load both persisted documents and rebuild the grid
    /// projection from them plus on-disk sprite presence.
    pub async fn open(config: DexConfig, cache: Arc<ObjectCache>) -> Result<Self, SessionError> {
        cache.ensure_dir().await?;

        let ledger = EncounterLedger::load(config.ledger_path()).await;
        let history = ShinyHistory::load(config.shiny_history_path()).await;

        let mut grid = DexGrid::new(config.max_id);
        grid.rebuild_from_ledger(ledger.state(), |id| {
            cache.cached_path(id, CacheKind::SpriteNormal)
        });
        grid.replay_shiny_history(history.entries());

        info!(
            encounters = ledger.total(),
            shinies = history.len(),
            revealed = grid.revealed_count(),
            "session opened"
        );

        Ok(Self {
            config,
            cache,
            ledger,
            history,
            grid,
        })
    }

    /// Record one generated encounter and return the surface notifications.
    ///
    /// Persistence is best effort: a failed write costs that one update and
    /// a warning, it never interrupts the widget.
    pub async fn apply(&mut self, record: EncounterRecord, now: DateTime<Utc>) -> Vec<DexEvent> {
        let mut events = vec![DexEvent::Encounter(record.clone())];

        if let Err(e) = self.ledger.record(&record).await {
            warn!(error = %e, "failed to persist encounter ledger");
        }

        if record.shiny {
            let entry = ShinyEntry::stamped(record.id, record.name.clone(), now);
            self.grid.record_shiny(record.id, entry.tooltip_line());
            if let Err(e) = self.history.record(entry.clone()).await {
                warn!(error = %e, "failed to persist shiny history");
            }
            info!(id = record.id, name = %record.name, "shiny recorded");
            events.push(DexEvent::ShinyRecorded(entry));
        }

        self.grid
            .reveal(record.id, record.sprite.clone(), record.name.clone());
        if let Some(slot) = self.grid.slot(record.id) {
            events.push(DexEvent::SlotChanged {
                id: record.id,
                slot: slot.clone(),
            });
        }

        events.push(DexEvent::StatsChanged(self.stats()));
        events
    }

    /// The widget configuration.
    pub fn config(&self) -> &DexConfig {
        &self.config
    }

    /// The object cache backing this session.
    pub fn cache(&self) -> &Arc<ObjectCache> {
        &self.cache
    }

    /// The current ledger state.
    pub fn ledger(&self) -> &LedgerState {
        self.ledger.state()
    }

    /// The shiny history, oldest first.
    pub fn shiny_history(&self) -> &[ShinyEntry] {
        self.history.entries()
    }

    /// The grid projection.
    pub fn grid(&self) -> &DexGrid {
        &self.grid
    }

    /// Current headline statistics.
    pub fn stats(&self) -> Stats {
        Stats {
            total: self.ledger.total(),
            most_encountered: self.ledger.most_encountered(),
            top_shiny: self.history.top_shiny(),
        }
    }

    /// Time since the most recent shiny, `None` when none is recorded.
    pub fn time_since_last_shiny(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.history.time_since_last(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> DexConfig {
        DexConfig::new().with_max_id(151).with_cache_root(dir.path())
    }

    fn record(id: u32, name: &str, shiny: bool) -> EncounterRecord {
        EncounterRecord {
            id,
            name: name.to_string(),
            types: vec!["Normal".to_string()],
            flavor: "Flavor.".to_string(),
            sprite: None,
            shiny,
        }
    }

    #[tokio::test]
    async fn apply_emits_events_in_order() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        let cache = Arc::new(ObjectCache::new(&config.cache_root));
        let mut session = DexSession::open(config, cache).await.unwrap();

        let events = session.apply(record(25, "Pikachu", false), Utc::now()).await;
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], DexEvent::Encounter(_)));
        assert!(matches!(events[1], DexEvent::SlotChanged { id: 25, .. }));
        assert!(matches!(events[2], DexEvent::StatsChanged(_)));

        let events = session.apply(record(6, "Charizard", true), Utc::now()).await;
        assert_eq!(events.len(), 4);
        assert!(matches!(events[1], DexEvent::ShinyRecorded(_)));
    }

    #[tokio::test]
    async fn reopening_restores_the_projection() {
        let dir = TempDir::new().unwrap();

        {
            let config = config(&dir);
            let cache = Arc::new(ObjectCache::new(&config.cache_root));
            let mut session = DexSession::open(config, cache).await.unwrap();
            session.apply(record(25, "Pikachu", false), Utc::now()).await;
            session.apply(record(6, "Charizard", true), Utc::now()).await;
        }

        let config = config(&dir);
        let cache = Arc::new(ObjectCache::new(&config.cache_root));
        let session = DexSession::open(config, cache).await.unwrap();

        assert_eq!(session.ledger().names.len(), 2);
        assert_eq!(session.grid().revealed_count(), 2);
        assert_eq!(session.shiny_history().len(), 1);
        assert_eq!(session.grid().slot(6).unwrap().shiny_times.len(), 1);
        assert!(session.time_since_last_shiny(Utc::now()).is_some());
    }
}
