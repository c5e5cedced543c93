// ============================================================================
// Menu Board Core - Menu Service
// File: crates/menuboard-core/src/services/menu_service.rs
// ============================================================================
//! Read and publish the shared menu document (last write wins)

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{info, warn};

use menuboard_shared::{next_stamp, now_millis};

use crate::domain::MenuDocument;
use crate::error::DomainError;
use crate::repositories::MenuRepository;

pub struct MenuService<R: MenuRepository + ?Sized> {
    menu_repo: Arc<R>,
    write_lock: Mutex<()>,
}

impl<R: MenuRepository + ?Sized> MenuService<R> {
    pub fn new(menu_repo: Arc<R>) -> Self {
        Self {
            menu_repo,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn current(&self) -> Result<Option<MenuDocument>, DomainError> {
        self.menu_repo.get().await
    }

    /// Replace the stored document with `payload`, stamped with a fresh
    /// `lastUpdated` strictly above the stored one.
    pub async fn publish(&self, payload: Value) -> Result<MenuDocument, DomainError> {
        let mut document = MenuDocument::from_payload(payload).inspect_err(|e| {
            warn!("Publish rejected: {}", e);
        })?;
        document.validate_document().inspect_err(|e| {
            warn!("Publish rejected: {}", e);
        })?;

        let _guard = self.write_lock.lock().await;

        let previous = self.menu_repo.get().await?.and_then(|doc| doc.last_updated);
        let previous = previous.max(document.last_updated);
        document.last_updated = Some(next_stamp(previous, now_millis()));

        self.menu_repo.put(&document).await?;

        info!(
            last_updated = document.last_updated,
            categories = document.categories.len(),
            dishes = document.dishes.len(),
            promotions = document.promotions.len(),
            "Menu published"
        );
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockMenuRepository;
    use serde_json::json;

    fn payload() -> Value {
        serde_json::to_value(MenuDocument::seed()).unwrap()
    }

    #[tokio::test]
    async fn test_publish_stamps_above_stored_version() {
        let far_future = now_millis() + 1_000_000;
        let mut repo = MockMenuRepository::new();
        repo.expect_get().returning(move || {
            let mut doc = MenuDocument::seed();
            doc.last_updated = Some(far_future);
            Ok(Some(doc))
        });
        repo.expect_put().times(1).returning(|_| Ok(()));

        let service = MenuService::new(Arc::new(repo));
        let saved = service.publish(payload()).await.unwrap();
        assert_eq!(saved.last_updated, Some(far_future + 1));
    }

    #[tokio::test]
    async fn test_publish_on_empty_store_uses_clock() {
        let before = now_millis();
        let mut repo = MockMenuRepository::new();
        repo.expect_get().returning(|| Ok(None));
        repo.expect_put().times(1).returning(|_| Ok(()));

        let service = MenuService::new(Arc::new(repo));
        let saved = service.publish(payload()).await.unwrap();
        assert!(saved.last_updated.unwrap() >= before);
    }

    #[tokio::test]
    async fn test_invalid_shape_never_writes() {
        let mut repo = MockMenuRepository::new();
        repo.expect_get().never();
        repo.expect_put().never();

        let service = MenuService::new(Arc::new(repo));
        let err = service.publish(json!({ "dishes": [] })).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn test_duplicate_ids_never_write() {
        let mut repo = MockMenuRepository::new();
        repo.expect_put().never();

        let mut body = payload();
        let first = body["categories"][0].clone();
        body["categories"].as_array_mut().unwrap().push(first);

        let service = MenuService::new(Arc::new(repo));
        let err = service.publish(body).await.unwrap_err();
        assert!(matches!(err, DomainError::DuplicateId { set: "category", .. }));
    }

    #[tokio::test]
    async fn test_out_of_range_stamp_is_rejected() {
        let mut repo = MockMenuRepository::new();
        repo.expect_get().never();
        repo.expect_put().never();
        let service = MenuService::new(Arc::new(repo));

        for stamp in [i64::MAX, -1] {
            let mut body = payload();
            body["lastUpdated"] = json!(stamp);
            let err = service.publish(body).await.unwrap_err();
            assert!(matches!(err, DomainError::ValidationError(_)));
        }
    }

    #[tokio::test]
    async fn test_storage_failure_is_reported() {
        let mut repo = MockMenuRepository::new();
        repo.expect_get().returning(|| Ok(None));
        repo.expect_put()
            .returning(|_| Err(DomainError::StorageError("disk full".to_string())));

        let service = MenuService::new(Arc::new(repo));
        let err = service.publish(payload()).await.unwrap_err();
        assert!(matches!(err, DomainError::StorageError(_)));
    }
}
