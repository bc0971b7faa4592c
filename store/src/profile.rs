use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Per-user profile document (collection `usuarios` in the original app).
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub grade_level: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub grade_level: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

#[async_trait]
pub trait ProfileStore: Send + Sync + Debug {
    async fn upsert(&self, profile: Profile) -> StoreResult<()>;

    async fn get(&self, uid: &str) -> StoreResult<Profile>;

    /// Apply a partial update and bump `updated_at`.
    async fn update(&self, uid: &str, update: ProfileUpdate) -> StoreResult<Profile>;
}

/// Type alias for Arc-wrapped ProfileStore trait objects
pub type ProfileStoreRef = Arc<dyn ProfileStore>;

/// In-memory implementation of ProfileStore
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, Profile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn upsert(&self, profile: Profile) -> StoreResult<()> {
        let mut profiles = self.profiles.write().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;
        profiles.insert(profile.uid.clone(), profile);
        Ok(())
    }

    async fn get(&self, uid: &str) -> StoreResult<Profile> {
        let profiles = self.profiles.read().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire read lock: {}", e))
        })?;
        profiles
            .get(uid)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(uid.to_string()))
    }

    async fn update(&self, uid: &str, update: ProfileUpdate) -> StoreResult<Profile> {
        let mut profiles = self.profiles.write().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;

        let profile = profiles
            .get_mut(uid)
            .ok_or_else(|| StoreError::NotFound(uid.to_string()))?;

        if let Some(name) = update.name {
            profile.name = name;
        }
        if let Some(grade_level) = update.grade_level {
            profile.grade_level = Some(grade_level);
        }
        if let Some(bio) = update.bio {
            profile.bio = Some(bio);
        }
        if let Some(avatar_url) = update.avatar_url {
            profile.avatar_url = Some(avatar_url);
        }
        profile.updated_at = Utc::now();

        Ok(profile.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::test;

    fn sample(uid: &str) -> Profile {
        let now = Utc::now();
        Profile {
            uid: uid.to_string(),
            name: "Ana".to_string(),
            email: "ana@escola.br".to_string(),
            grade_level: Some("2º ano".to_string()),
            bio: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    async fn upsert_and_get() {
        let store = InMemoryProfileStore::new();
        store.upsert(sample("uid-1")).await.unwrap();

        let profile = store.get("uid-1").await.unwrap();
        assert_eq!(profile.name, "Ana");
        assert_eq!(profile.grade_level.as_deref(), Some("2º ano"));
    }

    #[test]
    async fn partial_update_bumps_timestamp() {
        let store = InMemoryProfileStore::new();
        store.upsert(sample("uid-1")).await.unwrap();
        let before = store.get("uid-1").await.unwrap();

        let updated = store
            .update(
                "uid-1",
                ProfileUpdate {
                    bio: Some("Estudante de redação".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.bio.as_deref(), Some("Estudante de redação"));
        assert_eq!(updated.name, "Ana");
        assert!(updated.updated_at >= before.updated_at);
    }

    #[test]
    async fn update_of_missing_profile_is_not_found() {
        let store = InMemoryProfileStore::new();
        let result = store.update("ghost", ProfileUpdate::default()).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }
}
