//! Admin profile persisted next to the draft

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use menuboard_security::SessionToken;

use crate::cache::{read_json, write_json};
use crate::error::ClientError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    #[serde(default)]
    pub remote_url: Option<String>,

    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub has_unsaved_changes: bool,
}

impl AdminProfile {
    pub fn endpoint(&self) -> Option<&str> {
        self.remote_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn session(&self) -> Option<SessionToken> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(SessionToken::parse)
    }

    pub fn clear_session(&mut self) {
        self.token = None;
    }
}

pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> AdminProfile {
        read_json(&self.path).await.unwrap_or_default()
    }

    pub async fn save(&self, profile: &AdminProfile) -> Result<(), ClientError> {
        write_json(&self.path, profile).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_endpoint_is_unset() {
        let profile = AdminProfile {
            remote_url: Some("   ".to_string()),
            token: Some(String::new()),
            has_unsaved_changes: false,
        };
        assert_eq!(profile.endpoint(), None);
        assert!(profile.session().is_none());
    }

    #[tokio::test]
    async fn test_profile_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("profile.json"));
        assert_eq!(store.load().await, AdminProfile::default());

        let profile = AdminProfile {
            remote_url: Some("http://menu.local:3000".to_string()),
            token: Some("a.b.c".to_string()),
            has_unsaved_changes: true,
        };
        store.save(&profile).await.unwrap();
        assert_eq!(store.load().await, profile);
    }
}
