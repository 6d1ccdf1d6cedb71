//! Widget configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Highest creature identifier rolled by default (the Gen IV dex cap).
pub const DEFAULT_MAX_ID: u32 = 493;

/// Default per-encounter shiny probability.
pub const DEFAULT_SHINY_RATE: f64 = 1.0 / 8192.0;

/// Configuration for the encounter widget.
///
/// All options have working defaults; override them with the `with_*`
/// builders.
#[derive(Debug, Clone)]
pub struct DexConfig {
    /// Highest creature identifier to roll, inclusive.
    pub max_id: u32,

    /// Per-encounter shiny probability, in (0, 1).
    pub shiny_rate: f64,

    /// How often a new encounter is generated.
    pub encounter_interval: Duration,

    /// How often the "time since last shiny" display is recomputed.
    pub since_interval: Duration,

    /// Directory holding cached documents, sprites, and persisted state.
    pub cache_root: PathBuf,

    /// Language tag used to select flavor text.
    pub language: String,
}

impl DexConfig {
    /// Create a configuration with defaults and the standard cache root.
    pub fn new() -> Self {
        Self {
            max_id: DEFAULT_MAX_ID,
            shiny_rate: DEFAULT_SHINY_RATE,
            encounter_interval: Duration::from_secs(60),
            since_interval: Duration::from_secs(30),
            cache_root: default_cache_root(),
            language: "en".to_string(),
        }
    }

    /// Set the highest creature identifier to roll.
    pub fn with_max_id(mut self, max_id: u32) -> Self {
        self.max_id = max_id;
        self
    }

    /// Set the per-encounter shiny probability.
    pub fn with_shiny_rate(mut self, rate: f64) -> Self {
        self.shiny_rate = rate;
        self
    }

    /// Set the encounter generation interval.
    pub fn with_encounter_interval(mut self, interval: Duration) -> Self {
        self.encounter_interval = interval;
        self
    }

    /// Set the since-last-shiny recompute interval.
    pub fn with_since_interval(mut self, interval: Duration) -> Self {
        self.since_interval = interval;
        self
    }

    /// Set the cache root directory.
    pub fn with_cache_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.cache_root = root.into();
        self
    }

    /// Set the flavor text language tag.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Path of the durable encounter ledger document.
    pub fn ledger_path(&self) -> PathBuf {
        self.cache_root.join("encounter_data.json")
    }

    /// Path of the durable shiny history document.
    pub fn shiny_history_path(&self) -> PathBuf {
        self.cache_root.join("shiny_seen.json")
    }

    /// Path of the widget log file.
    pub fn log_path(&self) -> PathBuf {
        self.cache_root.join("dex.log")
    }
}

impl Default for DexConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Standard cache root: `$XDG_CACHE_HOME/pokedex`, falling back to
/// `~/.cache/pokedex`.
pub fn default_cache_root() -> PathBuf {
    let base = std::env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".cache")
        });
    base.join("pokedex")
}
