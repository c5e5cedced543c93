//! Image repository trait (port)

use async_trait::async_trait;

use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Stores the bytes under a fresh name and returns the public URL.
    async fn save(&self, bytes: Vec<u8>, extension: &str) -> Result<String, DomainError>;
}
