//! Session management for the HTTP surface.
//!
//! Replaces the original UI's ambient current-user global with explicit,
//! lifecycle-scoped sessions: one is opened on sign-in, looked up per
//! request, and torn down on sign-out. Auth-state changes are published on
//! a broadcast channel so interested components subscribe instead of
//! polling shared mutable state.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// Sessions outlive sign-in for a day unless torn down earlier.
const SESSION_TTL_HOURS: i64 = 24;

/// An authenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque bearer token handed to the client
    pub token: String,
    /// Account the session belongs to
    pub uid: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    fn new(uid: String) -> Self {
        let now = Utc::now();
        Self {
            token: Uuid::new_v4().to_string(),
            uid,
            created_at: now,
            expires_at: now + Duration::hours(SESSION_TTL_HOURS),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Auth-state change, observable via [`SessionStore::subscribe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn { uid: String },
    SignedOut { uid: String },
}

/// Trait defining the interface for session stores
#[async_trait]
pub trait SessionStore: Send + Sync + Debug {
    /// Open a session for the given account and emit `SignedIn`.
    async fn create(&self, uid: &str) -> StoreResult<Session>;

    /// Look up a session by token; expired sessions read as not found.
    async fn get(&self, token: &str) -> StoreResult<Session>;

    /// Tear down a session and emit `SignedOut`.
    async fn delete(&self, token: &str) -> StoreResult<()>;

    /// Drop expired sessions, returning how many were removed.
    async fn cleanup_expired(&self) -> StoreResult<usize>;

    /// Subscribe to auth-state changes.
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}

/// Type alias for Arc-wrapped SessionStore trait objects
pub type SessionStoreRef = Arc<dyn SessionStore>;

/// In-memory implementation of SessionStore
#[derive(Debug)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    events: broadcast::Sender<AuthEvent>,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            sessions: RwLock::new(HashMap::new()),
            events,
        }
    }
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, uid: &str) -> StoreResult<Session> {
        let session = Session::new(uid.to_string());

        let mut sessions = self.sessions.write().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;
        sessions.insert(session.token.clone(), session.clone());
        debug!(uid = %session.uid, "Opened session");

        // Nobody listening is fine.
        let _ = self.events.send(AuthEvent::SignedIn {
            uid: session.uid.clone(),
        });

        Ok(session)
    }

    async fn get(&self, token: &str) -> StoreResult<Session> {
        let sessions = self.sessions.read().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire read lock: {}", e))
        })?;

        let session = sessions
            .get(token)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("session".to_string()))?;

        if session.is_expired() {
            return Err(StoreError::NotFound("session expired".to_string()));
        }

        Ok(session)
    }

    async fn delete(&self, token: &str) -> StoreResult<()> {
        let mut sessions = self.sessions.write().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;

        let session = sessions
            .remove(token)
            .ok_or_else(|| StoreError::NotFound("session".to_string()))?;
        debug!(uid = %session.uid, "Closed session");

        let _ = self.events.send(AuthEvent::SignedOut { uid: session.uid });

        Ok(())
    }

    async fn cleanup_expired(&self) -> StoreResult<usize> {
        let mut sessions = self.sessions.write().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;

        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired());

        Ok(before - sessions.len())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::test;

    #[test]
    async fn create_and_get_session() {
        let store = InMemorySessionStore::new();

        let session = store.create("uid-1").await.unwrap();
        let fetched = store.get(&session.token).await.unwrap();
        assert_eq!(fetched.uid, "uid-1");
        assert!(!fetched.is_expired());
    }

    #[test]
    async fn delete_tears_down_the_session() {
        let store = InMemorySessionStore::new();
        let session = store.create("uid-1").await.unwrap();

        store.delete(&session.token).await.unwrap();
        let result = store.get(&session.token).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    async fn auth_events_are_observable() {
        let store = InMemorySessionStore::new();
        let mut events = store.subscribe();

        let session = store.create("uid-1").await.unwrap();
        store.delete(&session.token).await.unwrap();

        assert_eq!(
            events.recv().await.unwrap(),
            AuthEvent::SignedIn {
                uid: "uid-1".to_string()
            }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            AuthEvent::SignedOut {
                uid: "uid-1".to_string()
            }
        );
    }

    #[test]
    async fn expired_sessions_read_as_not_found_and_get_cleaned_up() {
        let store = InMemorySessionStore::new();
        let session = store.create("uid-1").await.unwrap();

        // Force expiry.
        {
            let mut sessions = store.sessions.write().unwrap();
            sessions.get_mut(&session.token).unwrap().expires_at =
                Utc::now() - Duration::seconds(1);
        }

        assert!(matches!(
            store.get(&session.token).await,
            Err(StoreError::NotFound(_))
        ));
        assert_eq!(store.cleanup_expired().await.unwrap(), 1);
    }
}
