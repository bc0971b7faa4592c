use std::fmt::Debug;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// What happened to the recipient's post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Like,
    Comment,
}

/// Notification record (collection `notificacoes` in the original app:
/// para/por/tipo/horario). Recipients are display names, matching the
/// original keying.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: String,
    pub recipient: String,
    pub actor: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait NotificationStore: Send + Sync + Debug {
    async fn push(
        &self,
        recipient: &str,
        actor: &str,
        kind: NotificationKind,
    ) -> StoreResult<Notification>;

    /// Notifications for one recipient, newest first (equality filter plus
    /// ordering, the only query shape the original app uses).
    async fn list_for(&self, recipient: &str) -> StoreResult<Vec<Notification>>;
}

/// Type alias for Arc-wrapped NotificationStore trait objects
pub type NotificationStoreRef = Arc<dyn NotificationStore>;

/// In-memory implementation of NotificationStore
#[derive(Debug, Default)]
pub struct InMemoryNotificationStore {
    notifications: RwLock<Vec<Notification>>,
}

impl InMemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationStore for InMemoryNotificationStore {
    async fn push(
        &self,
        recipient: &str,
        actor: &str,
        kind: NotificationKind,
    ) -> StoreResult<Notification> {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            recipient: recipient.to_string(),
            actor: actor.to_string(),
            kind,
            created_at: Utc::now(),
        };

        let mut notifications = self.notifications.write().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;
        notifications.push(notification.clone());

        Ok(notification)
    }

    async fn list_for(&self, recipient: &str) -> StoreResult<Vec<Notification>> {
        let notifications = self.notifications.read().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut matching: Vec<Notification> = notifications
            .iter()
            .filter(|n| n.recipient == recipient)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(matching)
    }
}
