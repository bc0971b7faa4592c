use std::sync::Arc;

use redacao_core::GeminiClient;
use redacao_store::{
    BlobStoreRef, FeedStoreRef, IdentityProviderRef, InMemoryBlobStore, InMemoryFeedStore,
    InMemoryIdentityProvider, InMemoryNotificationStore, InMemoryProfileStore,
    InMemorySessionStore, NotificationStoreRef, ProfileStoreRef, SessionStoreRef,
};
use tracing::warn;

use crate::config::AppConfig;

/// Application state shared with all routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// `None` when no API key is configured; the grading endpoint reports
    /// that per-request instead of failing the whole process.
    pub gemini: Option<Arc<GeminiClient>>,
    pub identity: IdentityProviderRef,
    pub sessions: SessionStoreRef,
    pub profiles: ProfileStoreRef,
    pub feed: FeedStoreRef,
    pub notifications: NotificationStoreRef,
    pub blobs: BlobStoreRef,
}

impl AppState {
    /// State backed by the in-memory adapters.
    pub fn in_memory(config: AppConfig) -> Self {
        let gemini = match GeminiClient::new(config.gemini.clone()) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                warn!(error = %e, "Gemini client unavailable; grading endpoint will report it");
                None
            }
        };

        Self {
            config: Arc::new(config),
            gemini,
            identity: Arc::new(InMemoryIdentityProvider::new()),
            sessions: Arc::new(InMemorySessionStore::new()),
            profiles: Arc::new(InMemoryProfileStore::new()),
            feed: Arc::new(InMemoryFeedStore::new()),
            notifications: Arc::new(InMemoryNotificationStore::new()),
            blobs: Arc::new(InMemoryBlobStore::new()),
        }
    }
}
