//! Social feed collection (`redagram` in the original app).
//!
//! Posts embed their like list and comment list, matching the original
//! denormalized documents. Like operations are atomic set-adds performed
//! under a single write lock: re-liking is idempotent and concurrent likers
//! cannot overwrite each other, which the original read-modify-write array
//! replace allowed.

use std::fmt::Debug;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// Comment embedded in a feed post. The author's account id is kept for
/// authorization checks but never serialized; display names can collide.
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    #[serde(skip_serializing)]
    pub author_uid: String,
    pub author: String,
    pub avatar: String,
    pub text: String,
    pub likes: Vec<String>,
}

/// A feed post.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: String,
    #[serde(skip_serializing)]
    pub author_uid: String,
    pub author: String,
    pub avatar: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub likes: Vec<String>,
    pub comments: Vec<Comment>,
    pub image_url: Option<String>,
}

/// Fields supplied when publishing a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_uid: String,
    pub author: String,
    pub avatar: String,
    pub text: String,
    pub image_url: Option<String>,
}

/// Fields supplied when commenting.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub author_uid: String,
    pub author: String,
    pub avatar: String,
    pub text: String,
}

#[async_trait]
pub trait FeedStore: Send + Sync + Debug {
    async fn create_post(&self, new_post: NewPost) -> StoreResult<Post>;

    /// All posts, newest first.
    async fn list_posts(&self) -> StoreResult<Vec<Post>>;

    async fn get_post(&self, id: &str) -> StoreResult<Post>;

    async fn delete_post(&self, id: &str) -> StoreResult<()>;

    /// Add `uid` to the post's like set. Idempotent.
    async fn like_post(&self, id: &str, uid: &str) -> StoreResult<Post>;

    async fn add_comment(&self, id: &str, comment: NewComment) -> StoreResult<Post>;

    /// Add `uid` to the like set of the comment at `index`. Idempotent.
    async fn like_comment(&self, id: &str, index: usize, uid: &str) -> StoreResult<Post>;

    async fn delete_comment(&self, id: &str, index: usize) -> StoreResult<Post>;

    /// Live subscription: the receiver always holds the latest ordered
    /// snapshot of the feed. Dropping it cancels the subscription.
    fn subscribe(&self) -> watch::Receiver<Vec<Post>>;
}

/// Type alias for Arc-wrapped FeedStore trait objects
pub type FeedStoreRef = Arc<dyn FeedStore>;

/// In-memory implementation of FeedStore
#[derive(Debug)]
pub struct InMemoryFeedStore {
    posts: RwLock<Vec<Post>>,
    snapshots: watch::Sender<Vec<Post>>,
}

impl Default for InMemoryFeedStore {
    fn default() -> Self {
        let (snapshots, _) = watch::channel(Vec::new());
        Self {
            posts: RwLock::new(Vec::new()),
            snapshots,
        }
    }
}

impl InMemoryFeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` on the post with the given id and publishes the resulting
    /// snapshot, all under one write lock.
    fn mutate_post<F>(&self, id: &str, f: F) -> StoreResult<Post>
    where
        F: FnOnce(&mut Post) -> StoreResult<()>,
    {
        let mut posts = self.posts.write().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;

        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        f(post)?;
        let updated = post.clone();

        let _ = self.snapshots.send(posts.clone());
        Ok(updated)
    }
}

#[async_trait]
impl FeedStore for InMemoryFeedStore {
    async fn create_post(&self, new_post: NewPost) -> StoreResult<Post> {
        let post = Post {
            id: Uuid::new_v4().to_string(),
            author_uid: new_post.author_uid,
            author: new_post.author,
            avatar: new_post.avatar,
            text: new_post.text,
            created_at: Utc::now(),
            likes: Vec::new(),
            comments: Vec::new(),
            image_url: new_post.image_url,
        };

        let mut posts = self.posts.write().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;
        // Newest first.
        posts.insert(0, post.clone());
        debug!(id = %post.id, author = %post.author, "Published post");

        let _ = self.snapshots.send(posts.clone());
        Ok(post)
    }

    async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        let posts = self.posts.read().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(posts.clone())
    }

    async fn get_post(&self, id: &str) -> StoreResult<Post> {
        let posts = self.posts.read().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire read lock: {}", e))
        })?;
        posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn delete_post(&self, id: &str) -> StoreResult<()> {
        let mut posts = self.posts.write().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;

        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }

        let _ = self.snapshots.send(posts.clone());
        Ok(())
    }

    async fn like_post(&self, id: &str, uid: &str) -> StoreResult<Post> {
        self.mutate_post(id, |post| {
            if !post.likes.iter().any(|l| l == uid) {
                post.likes.push(uid.to_string());
            }
            Ok(())
        })
    }

    async fn add_comment(&self, id: &str, comment: NewComment) -> StoreResult<Post> {
        self.mutate_post(id, |post| {
            post.comments.push(Comment {
                author_uid: comment.author_uid,
                author: comment.author,
                avatar: comment.avatar,
                text: comment.text,
                likes: Vec::new(),
            });
            Ok(())
        })
    }

    async fn like_comment(&self, id: &str, index: usize, uid: &str) -> StoreResult<Post> {
        self.mutate_post(id, |post| {
            let comment = post
                .comments
                .get_mut(index)
                .ok_or_else(|| StoreError::NotFound(format!("comment {}", index)))?;
            if !comment.likes.iter().any(|l| l == uid) {
                comment.likes.push(uid.to_string());
            }
            Ok(())
        })
    }

    async fn delete_comment(&self, id: &str, index: usize) -> StoreResult<Post> {
        self.mutate_post(id, |post| {
            if index >= post.comments.len() {
                return Err(StoreError::NotFound(format!("comment {}", index)));
            }
            post.comments.remove(index);
            Ok(())
        })
    }

    fn subscribe(&self) -> watch::Receiver<Vec<Post>> {
        self.snapshots.subscribe()
    }
}
