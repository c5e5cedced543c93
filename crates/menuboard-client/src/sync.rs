// ============================================================================
// Menu Board Client - Sync Client
// File: crates/menuboard-client/src/sync.rs
// Description: Remote/cache reconciliation on `lastUpdated`
// ============================================================================
//! Sync client shared by the admin and the display
//!
//! A fetched document replaces the held copy only when its `lastUpdated`
//! differs. Failures fall back to the local cache and are only logged.
//! Every call takes a sequence number when it starts; a result is dropped
//! when a later-started call has already applied one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use menuboard_core::MenuDocument;
use menuboard_shared::Millis;

use crate::cache::DocumentCache;
use crate::error::ClientError;
use crate::remote::MenuRemote;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncSource {
    Remote,
    Cache,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The held document was replaced.
    Updated {
        version: Option<Millis>,
        source: SyncSource,
    },
    /// Same `lastUpdated`, or nothing to fall back to.
    Unchanged,
    /// A later sync already applied its result.
    Superseded,
}

struct Held {
    document: MenuDocument,
    applied_seq: u64,
}

pub struct SyncClient<R: MenuRemote + ?Sized> {
    remote: Arc<R>,
    cache: DocumentCache,
    endpoint: RwLock<Option<String>>,
    held: Mutex<Held>,
    seq: AtomicU64,
}

impl<R: MenuRemote + ?Sized> SyncClient<R> {
    /// Starts from the built-in seed document.
    pub fn new(remote: Arc<R>, cache: DocumentCache, endpoint: Option<String>) -> Self {
        Self {
            remote,
            cache,
            endpoint: RwLock::new(clean_endpoint(endpoint)),
            held: Mutex::new(Held {
                document: MenuDocument::seed(),
                applied_seq: 0,
            }),
            seq: AtomicU64::new(0),
        }
    }

    pub async fn endpoint(&self) -> Option<String> {
        self.endpoint.read().await.clone()
    }

    /// Returns `true` when the endpoint actually changed.
    pub async fn set_endpoint(&self, endpoint: Option<String>) -> bool {
        let endpoint = clean_endpoint(endpoint);
        let mut current = self.endpoint.write().await;
        if *current == endpoint {
            return false;
        }
        info!(endpoint = ?endpoint, "Remote endpoint changed");
        *current = endpoint;
        true
    }

    pub async fn document(&self) -> MenuDocument {
        self.held.lock().await.document.clone()
    }

    pub async fn version(&self) -> Option<Millis> {
        self.held.lock().await.document.last_updated
    }

    /// Load the local cache without touching the network. The cached copy
    /// becomes the baseline whatever its `lastUpdated`, so an unpublished
    /// draft survives a restart.
    pub async fn restore(&self) -> SyncOutcome {
        let seq = self.next_seq();
        let Some(document) = self.cache.load().await else {
            return SyncOutcome::Unchanged;
        };

        let mut held = self.held.lock().await;
        if seq <= held.applied_seq {
            return SyncOutcome::Superseded;
        }
        held.applied_seq = seq;
        let version = document.last_updated;
        debug!(version = ?version, "Restored menu from cache");
        held.document = document;
        SyncOutcome::Updated { version, source: SyncSource::Cache }
    }

    pub async fn sync(&self) -> SyncOutcome {
        let seq = self.next_seq();

        let fetched = match self.endpoint().await {
            Some(endpoint) => match self.remote.fetch_menu(&endpoint).await {
                Ok(Some(document)) => Some(document),
                Ok(None) => {
                    debug!(seq, "Remote has no document yet, using cache");
                    None
                }
                Err(e) => {
                    warn!(seq, "Menu fetch failed, using cache: {}", e);
                    None
                }
            },
            None => None,
        };

        match fetched {
            Some(document) => self.apply(seq, document, SyncSource::Remote).await,
            None => match self.cache.load().await {
                Some(document) => self.apply(seq, document, SyncSource::Cache).await,
                None => SyncOutcome::Unchanged,
            },
        }
    }

    /// Mutate the held document in place and persist it to the cache.
    pub async fn update_local<T>(
        &self,
        edit: impl FnOnce(&mut MenuDocument) -> T,
    ) -> Result<T, ClientError> {
        let mut held = self.held.lock().await;
        let result = edit(&mut held.document);
        self.cache.save(&held.document).await?;
        Ok(result)
    }

    /// Adopt a document returned by a successful publish. Syncs started
    /// before this point can no longer overwrite it.
    pub async fn accept(&self, document: MenuDocument) -> Result<(), ClientError> {
        let mut held = self.held.lock().await;
        held.applied_seq = held.applied_seq.max(self.seq.load(Ordering::SeqCst));
        held.document = document;
        self.cache.save(&held.document).await
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn apply(&self, seq: u64, document: MenuDocument, source: SyncSource) -> SyncOutcome {
        let mut held = self.held.lock().await;
        if seq <= held.applied_seq {
            debug!(seq, applied = held.applied_seq, "Dropping stale sync result");
            return SyncOutcome::Superseded;
        }
        held.applied_seq = seq;

        if document.last_updated == held.document.last_updated {
            return SyncOutcome::Unchanged;
        }

        let version = document.last_updated;
        info!(version = ?version, previous = ?held.document.last_updated, ?source, "Menu updated");
        held.document = document;

        if source == SyncSource::Remote {
            if let Err(e) = self.cache.save(&held.document).await {
                warn!("Failed to mirror menu into cache: {}", e);
            }
        }

        SyncOutcome::Updated { version, source }
    }
}

fn clean_endpoint(endpoint: Option<String>) -> Option<String> {
    endpoint
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
}
