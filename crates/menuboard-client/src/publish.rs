// ============================================================================
// Menu Board Client - Publish Pipeline
// File: crates/menuboard-client/src/publish.rs
// Description: Local draft editing and publishing for the admin
// ============================================================================
//! Publish pipeline
//!
//! Edits only ever touch the local draft. `publish` checks the endpoint and
//! the session before any network call, stamps a fresh `lastUpdated` and
//! sends the whole document. A 401 from any authorized call clears the
//! stored session.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use menuboard_core::{Category, Dish, MenuDocument, Promotion, Theme};
use menuboard_shared::{next_stamp, now_millis};

use crate::cache::DocumentCache;
use crate::error::{ClientError, PublishError};
use crate::profile::{AdminProfile, ProfileStore};
use crate::remote::MenuRemote;
use crate::sync::{SyncClient, SyncOutcome, SyncSource};

pub struct PublishPipeline<R: MenuRemote + ?Sized> {
    remote: Arc<R>,
    sync: SyncClient<R>,
    profiles: ProfileStore,
    profile: Mutex<AdminProfile>,
}

impl<R: MenuRemote + ?Sized> PublishPipeline<R> {
    pub fn new(remote: Arc<R>, cache: DocumentCache, profiles: ProfileStore, profile: AdminProfile) -> Self {
        let sync = SyncClient::new(remote.clone(), cache, profile.endpoint().map(str::to_string));
        Self {
            remote,
            sync,
            profiles,
            profile: Mutex::new(profile),
        }
    }

    /// Load the stored profile and draft.
    pub async fn open(remote: Arc<R>, cache: DocumentCache, profiles: ProfileStore) -> Self {
        let profile = profiles.load().await;
        let pipeline = Self::new(remote, cache, profiles, profile);
        pipeline.sync.restore().await;
        pipeline
    }

    pub async fn profile(&self) -> AdminProfile {
        self.profile.lock().await.clone()
    }

    pub async fn draft(&self) -> MenuDocument {
        self.sync.document().await
    }

    /// Pull the remote document. A different `lastUpdated` replaces the
    /// draft, unsaved edits included.
    pub async fn pull(&self) -> SyncOutcome {
        let outcome = self.sync.sync().await;
        if let SyncOutcome::Updated { source: SyncSource::Remote, .. } = outcome {
            let mut profile = self.profile.lock().await;
            if profile.has_unsaved_changes {
                warn!("Remote menu replaced unpublished draft edits");
            }
            profile.has_unsaved_changes = false;
            self.store(&profile).await;
        }
        outcome
    }

    /// Save the endpoint and resync when it changed.
    pub async fn set_endpoint(&self, url: &str) -> Result<Option<SyncOutcome>, ClientError> {
        {
            let mut profile = self.profile.lock().await;
            let url = url.trim();
            profile.remote_url = (!url.is_empty()).then(|| url.to_string());
            self.profiles.save(&profile).await?;
        }

        let endpoint = self.profile.lock().await.endpoint().map(str::to_string);
        if self.sync.set_endpoint(endpoint).await {
            return Ok(Some(self.pull().await));
        }
        Ok(None)
    }

    pub async fn login(&self, password: &str) -> Result<(), PublishError> {
        let endpoint = self
            .profile
            .lock()
            .await
            .endpoint()
            .map(str::to_string)
            .ok_or(PublishError::NoEndpoint)?;

        let token = self
            .remote
            .login(&endpoint, password)
            .await
            .map_err(|e| match e.status() {
                Some(401) => PublishError::Unauthorized,
                _ => PublishError::Failed(e.to_string()),
            })?;

        let mut profile = self.profile.lock().await;
        profile.token = Some(token);
        self.profiles
            .save(&profile)
            .await
            .map_err(|e| PublishError::Failed(e.to_string()))?;
        info!("Admin session stored");
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let mut profile = self.profile.lock().await;
        profile.clear_session();
        self.profiles.save(&profile).await
    }

    // ------------------------------------------------------------------
    // Draft edits
    // ------------------------------------------------------------------

    async fn edit<T>(&self, f: impl FnOnce(&mut MenuDocument) -> T) -> Result<T, ClientError> {
        let result = self.sync.update_local(f).await?;
        self.mark_unsaved().await?;
        Ok(result)
    }

    async fn mark_unsaved(&self) -> Result<(), ClientError> {
        let mut profile = self.profile.lock().await;
        if !profile.has_unsaved_changes {
            profile.has_unsaved_changes = true;
            self.profiles.save(&profile).await?;
        }
        Ok(())
    }

    /// Returns true when an existing dish was replaced.
    pub async fn upsert_dish(&self, dish: Dish) -> Result<bool, ClientError> {
        self.edit(|doc| doc.upsert_dish(dish)).await
    }

    pub async fn remove_dish(&self, id: &str) -> Result<Option<Dish>, ClientError> {
        self.edit(|doc| doc.remove_dish(id)).await
    }

    pub async fn add_category(&self, name: &str) -> Result<Category, ClientError> {
        let added = self
            .sync
            .update_local(|doc| doc.add_category(name).cloned())
            .await?
            .map_err(|e| ClientError::Invalid(e.to_string()))?;
        self.mark_unsaved().await?;
        Ok(added)
    }

    pub async fn remove_category(&self, id: &str) -> Result<Option<Category>, ClientError> {
        self.edit(|doc| doc.remove_category(id)).await
    }

    pub async fn toggle_category(&self, id: &str) -> Result<Option<bool>, ClientError> {
        self.edit(|doc| doc.toggle_category_visibility(id)).await
    }

    pub async fn upsert_promotion(&self, promotion: Promotion) -> Result<bool, ClientError> {
        self.edit(|doc| doc.upsert_promotion(promotion)).await
    }

    pub async fn toggle_promotion(&self, id: &str) -> Result<Option<bool>, ClientError> {
        self.edit(|doc| doc.toggle_promotion(id)).await
    }

    pub async fn remove_promotion(&self, id: &str) -> Result<Option<Promotion>, ClientError> {
        self.edit(|doc| doc.remove_promotion(id)).await
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<(), ClientError> {
        self.edit(|doc| doc.set_theme(theme)).await
    }

    pub async fn set_footer_message(&self, message: &str) -> Result<(), ClientError> {
        self.edit(|doc| doc.set_footer_message(message)).await
    }

    // ------------------------------------------------------------------
    // Remote writes
    // ------------------------------------------------------------------

    /// Endpoint and a live token, or the reason there are none.
    async fn credentials(&self) -> Result<(String, String), PublishError> {
        let mut profile = self.profile.lock().await;
        let endpoint = profile
            .endpoint()
            .map(str::to_string)
            .ok_or(PublishError::NoEndpoint)?;
        let session = profile.session().ok_or(PublishError::NoSession)?;

        if session.is_expired() {
            warn!("Stored admin session expired");
            profile.clear_session();
            self.store(&profile).await;
            return Err(PublishError::SessionExpired);
        }
        Ok((endpoint, session.as_str().to_string()))
    }

    async fn on_remote_error(&self, err: ClientError) -> PublishError {
        match err.status() {
            Some(401) => {
                warn!("Server rejected the admin session");
                let mut profile = self.profile.lock().await;
                profile.clear_session();
                self.store(&profile).await;
                PublishError::Unauthorized
            }
            Some(400) => match err {
                ClientError::Status { code, .. } => PublishError::Rejected(code),
                other => PublishError::Rejected(other.to_string()),
            },
            _ => PublishError::Failed(err.to_string()),
        }
    }

    async fn store(&self, profile: &AdminProfile) {
        if let Err(e) = self.profiles.save(profile).await {
            warn!("Failed to save admin profile: {}", e);
        }
    }

    pub async fn publish(&self) -> Result<MenuDocument, PublishError> {
        let (endpoint, token) = self.credentials().await?;

        let mut document = self.sync.document().await;
        let previous = document.last_updated;
        document.last_updated = Some(next_stamp(previous, now_millis()));

        let stored = match self.remote.publish_menu(&endpoint, &token, &document).await {
            Ok(stored) => stored,
            Err(e) => {
                let err = self.on_remote_error(e).await;
                warn!("Publish failed: {}", err);
                return Err(err);
            }
        };

        if let Err(e) = self.sync.accept(stored.clone()).await {
            warn!("Published menu could not be cached: {}", e);
        }
        let mut profile = self.profile.lock().await;
        profile.has_unsaved_changes = false;
        self.store(&profile).await;

        info!(version = ?stored.last_updated, previous = ?previous, "Menu published");
        Ok(stored)
    }

    /// Upload a `data:image/...;base64,` URL; returns the stored image URL.
    pub async fn upload_image(&self, data_url: &str) -> Result<String, PublishError> {
        let (endpoint, token) = self.credentials().await?;
        match self.remote.upload_image(&endpoint, &token, data_url).await {
            Ok(url) => Ok(url),
            Err(e) => Err(self.on_remote_error(e).await),
        }
    }

    /// AI dish photo. Any failure leaves the dish unchanged.
    pub async fn generate_image(&self, name: &str, description: &str) -> Option<String> {
        let (endpoint, token) = self.credentials().await.ok()?;
        match self.remote.generate_image(&endpoint, &token, name, description).await {
            Ok(url) if !url.is_empty() => Some(url),
            Ok(_) => None,
            Err(e) => {
                let err = self.on_remote_error(e).await;
                warn!("AI image generation failed: {}", err);
                None
            }
        }
    }

    /// AI description rewrite. Empty or failed responses yield `None`.
    pub async fn improve_description(&self, name: &str, description: &str) -> Option<String> {
        let (endpoint, token) = self.credentials().await.ok()?;
        match self
            .remote
            .improve_description(&endpoint, &token, name, description)
            .await
        {
            Ok(text) => Some(text.trim().to_string()).filter(|t| !t.is_empty()),
            Err(e) => {
                let err = self.on_remote_error(e).await;
                warn!("AI description failed: {}", err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::MockMenuRemote;
    use menuboard_security::JwtService;

    fn live_token() -> String {
        JwtService::new("secret".to_string(), 30).generate_admin_token().unwrap()
    }

    fn expired_token() -> String {
        JwtService::new("secret".to_string(), -1).generate_admin_token().unwrap()
    }

    fn pipeline(
        remote: MockMenuRemote,
        dir: &tempfile::TempDir,
        profile: AdminProfile,
    ) -> PublishPipeline<MockMenuRemote> {
        PublishPipeline::new(
            Arc::new(remote),
            DocumentCache::new(dir.path().join("menu.json")),
            ProfileStore::new(dir.path().join("profile.json")),
            profile,
        )
    }

    fn logged_in(token: String) -> AdminProfile {
        AdminProfile {
            remote_url: Some("http://menu.local".to_string()),
            token: Some(token),
            has_unsaved_changes: false,
        }
    }

    #[tokio::test]
    async fn test_no_endpoint_rejected_without_network_call() {
        let dir = tempfile::tempdir().unwrap();
        let mut remote = MockMenuRemote::new();
        remote.expect_publish_menu().never();

        let profile = AdminProfile {
            remote_url: None,
            token: Some(live_token()),
            has_unsaved_changes: true,
        };
        let p = pipeline(remote, &dir, profile);
        assert!(matches!(p.publish().await, Err(PublishError::NoEndpoint)));
    }

    #[tokio::test]
    async fn test_missing_session_rejected_without_network_call() {
        let dir = tempfile::tempdir().unwrap();
        let mut remote = MockMenuRemote::new();
        remote.expect_publish_menu().never();

        let mut profile = logged_in(String::new());
        profile.token = None;
        let p = pipeline(remote, &dir, profile);
        let err = p.publish().await.unwrap_err();
        assert!(matches!(err, PublishError::NoSession));
        assert!(err.requires_login());
    }

    #[tokio::test]
    async fn test_expired_session_is_cleared_before_sending() {
        let dir = tempfile::tempdir().unwrap();
        let mut remote = MockMenuRemote::new();
        remote.expect_publish_menu().never();

        let p = pipeline(remote, &dir, logged_in(expired_token()));
        assert!(matches!(p.publish().await, Err(PublishError::SessionExpired)));
        assert_eq!(p.profile().await.token, None);
    }

    #[tokio::test]
    async fn test_publish_stamps_and_adopts_result() {
        let dir = tempfile::tempdir().unwrap();
        let token = live_token();
        let expected_token = token.clone();

        let mut remote = MockMenuRemote::new();
        remote
            .expect_publish_menu()
            .withf(move |endpoint, token, doc| {
                endpoint == "http://menu.local" && token == expected_token && doc.last_updated.is_some()
            })
            .times(2)
            .returning(|_, _, doc| Ok(doc.clone()));

        let p = pipeline(remote, &dir, logged_in(token));
        p.set_footer_message("Добро пожаловать").await.unwrap();
        assert!(p.profile().await.has_unsaved_changes);

        let first = p.publish().await.unwrap();
        let second = p.publish().await.unwrap();

        assert_eq!(first.footer_message, "Добро пожаловать");
        assert!(second.last_updated > first.last_updated);
        assert_eq!(p.draft().await, second);
        assert!(!p.profile().await.has_unsaved_changes);
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session_and_keeps_draft() {
        let dir = tempfile::tempdir().unwrap();
        let mut remote = MockMenuRemote::new();
        remote.expect_publish_menu().times(1).returning(|_, _, _| {
            Err(ClientError::Status { status: 401, code: "invalid_token".to_string() })
        });

        let p = pipeline(remote, &dir, logged_in(live_token()));
        p.set_footer_message("черновик").await.unwrap();

        let err = p.publish().await.unwrap_err();
        assert!(matches!(err, PublishError::Unauthorized));

        let profile = p.profile().await;
        assert_eq!(profile.token, None);
        assert!(profile.has_unsaved_changes);
        let draft = p.draft().await;
        assert_eq!(draft.last_updated, None);
        assert_eq!(draft.footer_message, "черновик");
    }

    #[tokio::test]
    async fn test_validation_and_transport_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut remote = MockMenuRemote::new();
        let mut calls = 0;
        remote.expect_publish_menu().times(2).returning(move |_, _, _| {
            calls += 1;
            if calls == 1 {
                Err(ClientError::Status { status: 400, code: "duplicate_id".to_string() })
            } else {
                Err(ClientError::Network("timed out".to_string()))
            }
        });

        let p = pipeline(remote, &dir, logged_in(live_token()));
        let rejected = p.publish().await.unwrap_err();
        assert!(matches!(rejected, PublishError::Rejected(ref code) if code == "duplicate_id"));
        assert!(!rejected.requires_login());

        let failed = p.publish().await.unwrap_err();
        assert!(failed.is_retryable());
        assert!(p.profile().await.token.is_some());
    }

    #[tokio::test]
    async fn test_edits_persist_draft_and_flag() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline(MockMenuRemote::new(), &dir, AdminProfile::default());

        let category = p.add_category("Напитки").await.unwrap();
        assert_eq!(p.toggle_category(&category.id).await.unwrap(), Some(false));
        assert!(matches!(p.add_category("").await, Err(ClientError::Invalid(_))));

        let reopened = PublishPipeline::open(
            Arc::new(MockMenuRemote::new()),
            DocumentCache::new(dir.path().join("menu.json")),
            ProfileStore::new(dir.path().join("profile.json")),
        )
        .await;
        assert!(reopened.profile().await.has_unsaved_changes);
        let draft = reopened.draft().await;
        assert!(draft.category(&category.id).is_some_and(|c| !c.is_visible));
    }

    async fn reopen(dir: &tempfile::TempDir) -> PublishPipeline<MockMenuRemote> {
        PublishPipeline::open(
            Arc::new(MockMenuRemote::new()),
            DocumentCache::new(dir.path().join("menu.json")),
            ProfileStore::new(dir.path().join("profile.json")),
        )
        .await
    }

    #[tokio::test]
    async fn test_unpublished_edits_survive_restarts() {
        let dir = tempfile::tempdir().unwrap();

        reopen(&dir).await.set_footer_message("first edit").await.unwrap();
        reopen(&dir).await.set_theme(Theme::Autumn).await.unwrap();

        let p = reopen(&dir).await;
        let draft = p.draft().await;
        assert_eq!(draft.footer_message, "first edit");
        assert_eq!(draft.theme, Theme::Autumn);
        assert_eq!(draft.last_updated, None);
        assert!(p.profile().await.has_unsaved_changes);
    }

    #[tokio::test]
    async fn test_endpoint_change_pulls_remote() {
        let dir = tempfile::tempdir().unwrap();
        let mut remote = MockMenuRemote::new();
        remote
            .expect_fetch_menu()
            .withf(|endpoint| endpoint == "http://other")
            .times(1)
            .returning(|_| {
                let mut doc = MenuDocument::seed();
                doc.last_updated = Some(77);
                Ok(Some(doc))
            });

        let p = pipeline(remote, &dir, logged_in(live_token()));
        p.set_footer_message("local").await.unwrap();

        let outcome = p.set_endpoint("http://other").await.unwrap();
        assert!(matches!(outcome, Some(SyncOutcome::Updated { version: Some(77), .. })));
        assert!(!p.profile().await.has_unsaved_changes);
        // unchanged endpoint, no refetch
        assert_eq!(p.set_endpoint("http://other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let dir = tempfile::tempdir().unwrap();
        let mut remote = MockMenuRemote::new();
        remote
            .expect_login()
            .withf(|_, password| password == "pw")
            .returning(|_, _| Ok("a.b.c".to_string()));

        let mut profile = logged_in(String::new());
        profile.token = None;
        let p = pipeline(remote, &dir, profile);
        p.login("pw").await.unwrap();
        assert_eq!(p.profile().await.token.as_deref(), Some("a.b.c"));

        p.logout().await.unwrap();
        assert_eq!(p.profile().await.token, None);
    }

    #[tokio::test]
    async fn test_ai_failures_degrade_to_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut remote = MockMenuRemote::new();
        remote.expect_improve_description().returning(|_, _, _, _| {
            Err(ClientError::Status { status: 503, code: "ai_not_configured".to_string() })
        });
        remote
            .expect_generate_image()
            .returning(|_, _, _, _| Ok("/uploads/1-abcdef.png".to_string()));

        let p = pipeline(remote, &dir, logged_in(live_token()));
        assert_eq!(p.improve_description("Борщ", "").await, None);
        assert_eq!(
            p.generate_image("Борщ", "").await.as_deref(),
            Some("/uploads/1-abcdef.png")
        );
    }
}
