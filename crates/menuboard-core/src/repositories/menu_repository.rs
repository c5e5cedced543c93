//! Menu repository trait (port)

use async_trait::async_trait;

use crate::domain::MenuDocument;
use crate::error::DomainError;

/// Whole-document store. `put` replaces everything that was there.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// `None` when nothing was ever published.
    async fn get(&self) -> Result<Option<MenuDocument>, DomainError>;
    async fn put(&self, document: &MenuDocument) -> Result<(), DomainError>;
}
