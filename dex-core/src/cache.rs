//! Content-addressed on-disk cache for fetched catalog records.
//!
//! Entries are keyed by (identifier, kind), written once after a fully
//! successful fetch, and never evicted or invalidated. Concurrent misses for
//! the same key may fetch twice; each writer replaces the file atomically,
//! so the race costs a duplicate download, never a corrupt entry.

use crate::persist::write_atomic;
use std::future::Future;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

/// Errors from cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fetch error: {0}")]
    Fetch(#[from] pokeapi::Error),
}

/// The kind of record stored for one creature identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKind {
    /// The `pokemon/{id}` document.
    Profile,
    /// The `pokemon-species/{id}` document.
    Species,
    /// The normal front sprite.
    SpriteNormal,
    /// The shiny front sprite.
    SpriteShiny,
}

impl CacheKind {
    /// Deterministic file name for one cache entry.
    pub fn file_name(&self, id: u32) -> String {
        match self {
            CacheKind::Profile => format!("pokemon_{id}.json"),
            CacheKind::Species => format!("species_{id}.json"),
            CacheKind::SpriteNormal => format!("{id}_normal.png"),
            CacheKind::SpriteShiny => format!("{id}_shiny.png"),
        }
    }

    /// Sprite kind for the given variant.
    pub fn sprite(shiny: bool) -> CacheKind {
        if shiny {
            CacheKind::SpriteShiny
        } else {
            CacheKind::SpriteNormal
        }
    }
}

/// On-disk cache rooted at a single directory.
#[derive(Debug)]
pub struct ObjectCache {
    root: PathBuf,
}

impl ObjectCache {
    /// Create a cache handle rooted at `root`. The directory is created
    /// lazily by [`ObjectCache::ensure_dir`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the cache directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<(), std::io::Error> {
        fs::create_dir_all(&self.root).await
    }

    /// The cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the entry for (id, kind) lives, whether or not it exists yet.
    pub fn entry_path(&self, id: u32, kind: CacheKind) -> PathBuf {
        self.root.join(kind.file_name(id))
    }

    /// Path to a cached entry, if one is present on disk.
    pub fn cached_path(&self, id: u32, kind: CacheKind) -> Option<PathBuf> {
        let path = self.entry_path(id, kind);
        path.exists().then_some(path)
    }

    /// Return the cached entry for (id, kind), fetching and persisting it on
    /// a miss.
    ///
    /// `fetch` is only invoked when no entry exists; its raw result is
    /// written verbatim, and only after a fully successful fetch. Fetch
    /// failures propagate unmodified and leave no file behind. Concurrent
    /// callers missing on the same key are not deduplicated.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        id: u32,
        kind: CacheKind,
        fetch: F,
    ) -> Result<Vec<u8>, CacheError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<u8>, pokeapi::Error>>,
    {
        let path = self.entry_path(id, kind);
        match fs::read(&path).await {
            Ok(bytes) => return Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        debug!(id, ?kind, "cache miss");
        let bytes = fetch().await?;
        write_atomic(&path, &bytes).await?;
        Ok(bytes)
    }
}
