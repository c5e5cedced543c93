// ============================================================================
// Menu Board Infrastructure - File Menu Repository
// File: crates/menuboard-infrastructure/src/storage/file_menu_repo.rs
// ============================================================================

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, error};

use menuboard_core::domain::MenuDocument;
use menuboard_core::error::DomainError;
use menuboard_core::repositories::MenuRepository;
use menuboard_shared::new_id;

/// JSON file holding the whole document. Writes go to a temp file in the
/// same directory and are renamed over the target.
pub struct FileMenuRepository {
    path: PathBuf,
}

impl FileMenuRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "menu.json".to_string());
        self.path.with_file_name(format!(".{}.{}.tmp", name, new_id()))
    }
}

#[async_trait]
impl MenuRepository for FileMenuRepository {
    async fn get(&self) -> Result<Option<MenuDocument>, DomainError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                error!("Failed to read menu file {:?}: {}", self.path, e);
                return Err(DomainError::StorageError(e.to_string()));
            }
        };

        serde_json::from_str(&raw).map(Some).map_err(|e| {
            error!("Menu file {:?} is not a valid document: {}", self.path, e);
            DomainError::StorageError(e.to_string())
        })
    }

    async fn put(&self, document: &MenuDocument) -> Result<(), DomainError> {
        let body = serde_json::to_string_pretty(document)
            .map_err(|e| DomainError::StorageError(e.to_string()))?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| DomainError::StorageError(e.to_string()))?;
        }

        let temp = self.temp_path();
        if let Err(e) = tokio::fs::write(&temp, body).await {
            error!("Failed to write temp menu file {:?}: {}", temp, e);
            return Err(DomainError::StorageError(e.to_string()));
        }
        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            error!("Failed to replace menu file {:?}: {}", self.path, e);
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(DomainError::StorageError(e.to_string()));
        }

        debug!("Menu written to {:?}", self.path);
        Ok(())
    }
}
