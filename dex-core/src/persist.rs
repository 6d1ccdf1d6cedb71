//! Durable storage helpers.
//!
//! Every persisted document is whole-state JSON, replaced atomically via a
//! temporary sibling file and rename so an interrupted write never leaves a
//! half-written document behind.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::warn;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize `value` and atomically replace the document at `path`.
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    let content = serde_json::to_string_pretty(value)?;
    write_atomic(path, content.as_bytes()).await?;
    Ok(())
}

/// Write `bytes` to `path` through a temporary sibling file and rename.
pub async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), std::io::Error> {
    let tmp = tmp_path(path);
    fs::write(&tmp, bytes).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Load a JSON document, degrading to the default value when the file is
/// missing or unparseable.
pub async fn load_json_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    match fs::read_to_string(path).await {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "discarding unparseable document");
                T::default()
            }
        },
        Err(_) => T::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Doc {
        items: Vec<String>,
    }

    #[tokio::test]
    async fn round_trips_a_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");

        let doc = Doc {
            items: vec!["a".to_string(), "b".to_string()],
        };
        write_json(&path, &doc).await.unwrap();

        let loaded: Doc = load_json_or_default(&path).await;
        assert_eq!(loaded, doc);
    }

    #[tokio::test]
    async fn missing_file_loads_default() {
        let dir = TempDir::new().unwrap();
        let loaded: Doc = load_json_or_default(&dir.path().join("absent.json")).await;
        assert_eq!(loaded, Doc::default());
    }

    #[tokio::test]
    async fn corrupt_file_loads_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        fs::write(&path, b"{\"items\": [truncated").await.unwrap();

        let loaded: Doc = load_json_or_default(&path).await;
        assert_eq!(loaded, Doc::default());
    }

    #[tokio::test]
    async fn atomic_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");

        write_json(&path, &Doc::default()).await.unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["doc.json".to_string()]);
    }
}
