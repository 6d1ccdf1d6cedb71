//! Pokédex encounter engine.
//!
//! This crate is the persistence and state-machine core of the encounter
//! widget:
//! - a content-addressed on-disk cache of fetched catalog records
//! - a random encounter generator (uniform identifier draw plus an
//!   independent shiny coin flip)
//! - the durable encounter ledger and shiny history
//! - the dex grid projection, rebuildable from persisted facts alone
//! - a session façade that keeps all mutation on one path and emits
//!   notifications for the rendering surface
//!
//! # Quick Start
//!
//! ```ignore
//! use dex_core::{DexConfig, DexSession, EncounterGenerator, ObjectCache};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DexConfig::new();
//!     let cache = Arc::new(ObjectCache::new(&config.cache_root));
//!     let catalog = Arc::new(pokeapi::Client::new());
//!
//!     let generator = EncounterGenerator::new(catalog, cache.clone(), &config);
//!     let mut session = DexSession::open(config, cache).await?;
//!
//!     let record = generator.generate().await?;
//!     for event in session.apply(record, chrono::Utc::now()).await {
//!         println!("{event:?}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod catalog;
pub mod config;
pub mod encounter;
pub mod events;
pub mod grid;
pub mod ledger;
pub mod persist;
pub mod session;
pub mod shiny;
pub mod stats;
pub mod testing;

// Primary public API
pub use cache::{CacheError, CacheKind, ObjectCache};
pub use catalog::Catalog;
pub use config::DexConfig;
pub use encounter::{dex_label, EncounterError, EncounterGenerator, EncounterRecord};
pub use events::DexEvent;
pub use grid::{DexGrid, DexSlot};
pub use ledger::{EncounterLedger, LedgerState};
pub use persist::PersistError;
pub use session::{DexSession, SessionError};
pub use shiny::{ShinyEntry, ShinyHistory};
pub use stats::Stats;
