//! Boundaries to the managed backend-as-a-service collaborators.
//!
//! Each module defines the trait the server programs against together with
//! an in-memory adapter. The adapters stand in for the managed platform
//! (identity provider, document store, blob storage); swapping in a real
//! one is a matter of implementing the trait.

pub mod blob;
pub mod error;
pub mod feed;
pub mod identity;
pub mod notification;
pub mod profile;
pub mod session;

pub use blob::{post_image_path, BlobStore, BlobStoreRef, InMemoryBlobStore, StoredBlob};
pub use error::{StoreError, StoreResult};
pub use feed::{Comment, FeedStore, FeedStoreRef, InMemoryFeedStore, NewComment, NewPost, Post};
pub use identity::{IdentityProvider, IdentityProviderRef, InMemoryIdentityProvider, UserAccount};
pub use notification::{
    InMemoryNotificationStore, Notification, NotificationKind, NotificationStore,
    NotificationStoreRef,
};
pub use profile::{InMemoryProfileStore, Profile, ProfileStore, ProfileStoreRef, ProfileUpdate};
pub use session::{AuthEvent, InMemorySessionStore, Session, SessionStore, SessionStoreRef};
