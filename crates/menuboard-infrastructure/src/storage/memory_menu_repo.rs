//! In-memory menu repository, used by tests and ephemeral servers

use async_trait::async_trait;
use tokio::sync::RwLock;

use menuboard_core::domain::MenuDocument;
use menuboard_core::error::DomainError;
use menuboard_core::repositories::MenuRepository;

#[derive(Default)]
pub struct InMemoryMenuRepository {
    document: RwLock<Option<MenuDocument>>,
}

impl InMemoryMenuRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: MenuDocument) -> Self {
        Self {
            document: RwLock::new(Some(document)),
        }
    }
}

#[async_trait]
impl MenuRepository for InMemoryMenuRepository {
    async fn get(&self) -> Result<Option<MenuDocument>, DomainError> {
        Ok(self.document.read().await.clone())
    }

    async fn put(&self, document: &MenuDocument) -> Result<(), DomainError> {
        *self.document.write().await = Some(document.clone());
        Ok(())
    }
}
