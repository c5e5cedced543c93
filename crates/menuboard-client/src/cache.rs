// ============================================================================
// Menu Board Client - Document Cache
// File: crates/menuboard-client/src/cache.rs
// ============================================================================
//! Device-local copy of the last applied document
//!
//! The display falls back to it when the server is unreachable, and the
//! admin keeps its draft here between sessions.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use menuboard_core::MenuDocument;

use crate::error::ClientError;

/// Read a JSON file. Missing or unreadable content is `None`; a corrupt
/// cache must never keep the device from starting.
pub(crate) async fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring corrupt file {:?}: {}", path, e);
            None
        }
    }
}

/// Replace a JSON file through a temp file and rename.
pub(crate) async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ClientError> {
    let body = serde_json::to_string_pretty(value).map_err(|e| ClientError::Storage(e.to_string()))?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| ClientError::Storage(e.to_string()))?;
    }

    let temp = path.with_extension("json.tmp");
    tokio::fs::write(&temp, body)
        .await
        .map_err(|e| ClientError::Storage(e.to_string()))?;
    if let Err(e) = tokio::fs::rename(&temp, path).await {
        let _ = tokio::fs::remove_file(&temp).await;
        return Err(ClientError::Storage(e.to_string()));
    }
    Ok(())
}

pub struct DocumentCache {
    path: PathBuf,
}

impl DocumentCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Option<MenuDocument> {
        let document = read_json::<MenuDocument>(&self.path).await?;
        debug!(version = ?document.last_updated, "Loaded cached menu from {:?}", self.path);
        Some(document)
    }

    pub async fn save(&self, document: &MenuDocument) -> Result<(), ClientError> {
        write_json(&self.path, document).await
    }
}
