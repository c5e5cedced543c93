// ============================================================================
// Menu Board Core - Image Upload Service
// File: crates/menuboard-core/src/services/image_service.rs
// ============================================================================
//! Accepts images as base64 data URLs and hands them to the image store

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{info, warn};

use crate::error::DomainError;
use crate::repositories::ImageRepository;

/// `data:image/<type>;base64,<data>` split into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDataUrl {
    pub mime_type: String,
    pub base64_data: String,
}

impl ParsedDataUrl {
    pub fn parse(data_url: &str) -> Result<Self, DomainError> {
        let re = regex::Regex::new(r"^data:(image/[a-zA-Z0-9.+-]+);base64,(.+)$")
            .map_err(|e| DomainError::InternalError(e.to_string()))?;
        let caps = re.captures(data_url).ok_or(DomainError::InvalidDataUrl)?;
        Ok(Self {
            mime_type: caps[1].to_string(),
            base64_data: caps[2].to_string(),
        })
    }

    /// File extension for the accepted image types.
    pub fn extension(&self) -> Option<&'static str> {
        mime_to_extension(&self.mime_type)
    }
}

pub fn mime_to_extension(mime_type: &str) -> Option<&'static str> {
    match mime_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

pub struct ImageUploadService<I: ImageRepository + ?Sized> {
    image_repo: Arc<I>,
    max_upload_bytes: usize,
}

impl<I: ImageRepository + ?Sized> ImageUploadService<I> {
    pub fn new(image_repo: Arc<I>, max_upload_bytes: usize) -> Self {
        Self {
            image_repo,
            max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Store an uploaded data URL, returning its public URL.
    pub async fn upload_data_url(&self, data_url: &str) -> Result<String, DomainError> {
        let parsed = ParsedDataUrl::parse(data_url)?;
        let extension = parsed
            .extension()
            .ok_or_else(|| DomainError::UnsupportedImageType(parsed.mime_type.clone()))?;

        let bytes = decode_base64(&parsed.base64_data).ok_or(DomainError::InvalidDataUrl)?;
        if bytes.is_empty() {
            return Err(DomainError::EmptyImage);
        }
        self.check_size(bytes.len())?;

        let size = bytes.len();
        let url = self.image_repo.save(bytes, extension).await?;
        info!(url = %url, size, "Image uploaded");
        Ok(url)
    }

    /// Store base64 PNG bytes produced by the AI backend.
    pub async fn store_generated_png(&self, base64_data: &str) -> Result<String, DomainError> {
        let bytes = match decode_base64(base64_data) {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => {
                warn!("Generated image payload was empty or unreadable");
                return Err(DomainError::NoImage);
            }
        };
        self.check_size(bytes.len())?;
        self.image_repo.save(bytes, "png").await
    }

    fn check_size(&self, size: usize) -> Result<(), DomainError> {
        if size > self.max_upload_bytes {
            warn!(size, max = self.max_upload_bytes, "Image rejected: too large");
            return Err(DomainError::ImageTooLarge {
                size,
                max: self.max_upload_bytes,
            });
        }
        Ok(())
    }
}

fn decode_base64(data: &str) -> Option<Vec<u8>> {
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD.decode(compact).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockImageRepository;

    fn png_data_url(bytes: &[u8]) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(bytes))
    }

    #[test]
    fn test_parse_data_url() {
        let parsed = ParsedDataUrl::parse("data:image/webp;base64,AAAA").unwrap();
        assert_eq!(parsed.mime_type, "image/webp");
        assert_eq!(parsed.extension(), Some("webp"));
        assert!(matches!(
            ParsedDataUrl::parse("https://example.com/a.png"),
            Err(DomainError::InvalidDataUrl)
        ));
        assert!(matches!(
            ParsedDataUrl::parse("data:text/plain;base64,AAAA"),
            Err(DomainError::InvalidDataUrl)
        ));
    }

    #[tokio::test]
    async fn test_upload_saves_with_extension() {
        let mut repo = MockImageRepository::new();
        repo.expect_save()
            .withf(|bytes, extension| bytes.as_slice() == [1u8, 2, 3] && extension.to_string() == "png")
            .times(1)
            .returning(|_, _| Ok("/uploads/1-abcdef.png".to_string()));

        let service = ImageUploadService::new(Arc::new(repo), 1024);
        let url = service.upload_data_url(&png_data_url(&[1, 2, 3])).await.unwrap();
        assert_eq!(url, "/uploads/1-abcdef.png");
    }

    #[tokio::test]
    async fn test_upload_rejections() {
        let mut repo = MockImageRepository::new();
        repo.expect_save().never();
        let service = ImageUploadService::new(Arc::new(repo), 4);

        let gif = format!("data:image/gif;base64,{}", STANDARD.encode([1u8]));
        assert!(matches!(
            service.upload_data_url(&gif).await,
            Err(DomainError::UnsupportedImageType(_))
        ));
        assert!(matches!(
            service.upload_data_url("data:image/png;base64,====").await,
            Err(DomainError::InvalidDataUrl) | Err(DomainError::EmptyImage)
        ));
        assert!(matches!(
            service.upload_data_url(&png_data_url(&[0; 5])).await,
            Err(DomainError::ImageTooLarge { size: 5, max: 4 })
        ));
    }

    #[tokio::test]
    async fn test_generated_png_must_not_be_empty() {
        let mut repo = MockImageRepository::new();
        repo.expect_save().never();
        let service = ImageUploadService::new(Arc::new(repo), 1024);
        assert!(matches!(service.store_generated_png("").await, Err(DomainError::NoImage)));
    }
}
