//! Uploaded images on the local filesystem, served under `/uploads`

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::error;
use uuid::Uuid;

use menuboard_core::error::DomainError;
use menuboard_core::repositories::ImageRepository;
use menuboard_shared::{constants::UPLOADS_URL_PREFIX, now_millis};

pub struct FsImageRepository {
    uploads_dir: PathBuf,
}

impl FsImageRepository {
    pub fn new(uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            uploads_dir: uploads_dir.into(),
        }
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }
}

/// `<millis>-<6 random chars>.<ext>`
fn image_file_name(extension: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}.{}", now_millis(), &suffix[..6], extension)
}

#[async_trait]
impl ImageRepository for FsImageRepository {
    async fn save(&self, bytes: Vec<u8>, extension: &str) -> Result<String, DomainError> {
        tokio::fs::create_dir_all(&self.uploads_dir).await.map_err(|e| {
            error!("Failed to create uploads dir {:?}: {}", self.uploads_dir, e);
            DomainError::StorageError(e.to_string())
        })?;

        let file_name = image_file_name(extension);
        let path = self.uploads_dir.join(&file_name);
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            error!("Failed to write image {:?}: {}", path, e);
            DomainError::StorageError(e.to_string())
        })?;

        Ok(format!("{}/{}", UPLOADS_URL_PREFIX, file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_writes_file_and_returns_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FsImageRepository::new(dir.path().join("uploads"));

        let url = repo.save(vec![0x89, b'P', b'N', b'G'], "png").await.unwrap();
        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".png"));

        let file_name = url.trim_start_matches("/uploads/");
        let stored = std::fs::read(repo.uploads_dir().join(file_name)).unwrap();
        assert_eq!(stored, vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_file_name_shape() {
        let name = image_file_name("webp");
        let (stem, ext) = name.rsplit_once('.').unwrap();
        let (millis, suffix) = stem.split_once('-').unwrap();
        assert_eq!(ext, "webp");
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), 6);
    }
}
