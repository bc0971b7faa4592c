use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// A stored binary object.
#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Binary object storage boundary. `put` returns a retrievable download
/// URL, the way the managed blob platform does.
#[async_trait]
pub trait BlobStore: Send + Sync + Debug {
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> StoreResult<String>;

    async fn get(&self, path: &str) -> StoreResult<StoredBlob>;
}

/// Type alias for Arc-wrapped BlobStore trait objects
pub type BlobStoreRef = Arc<dyn BlobStore>;

/// Builds the per-user, timestamped upload path for a post image.
pub fn post_image_path(uid: &str, filename: &str) -> String {
    format!("posts/{}/{}_{}", uid, Utc::now().timestamp_millis(), filename)
}

/// In-memory implementation of BlobStore. Download URLs point back at the
/// server's own `/blobs/` route.
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<String, StoredBlob>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> StoreResult<String> {
        let mut blobs = self.blobs.write().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;

        debug!(path, size = bytes.len(), "Stored blob");
        blobs.insert(
            path.to_string(),
            StoredBlob {
                bytes,
                content_type: content_type.to_string(),
            },
        );

        Ok(format!("/blobs/{}", path))
    }

    async fn get(&self, path: &str) -> StoreResult<StoredBlob> {
        let blobs = self.blobs.read().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire read lock: {}", e))
        })?;
        blobs
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }
}
