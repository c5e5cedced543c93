//! AI content generator trait (port)

use async_trait::async_trait;

use crate::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedImage {
    /// Base64 image bytes, stored locally as PNG
    Base64(String),
    /// Remote URL handed back as-is
    Url(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_image(
        &self,
        request_id: &str,
        prompt: &str,
    ) -> Result<Option<GeneratedImage>, DomainError>;

    async fn generate_text(&self, request_id: &str, prompt: &str) -> Result<String, DomainError>;
}
