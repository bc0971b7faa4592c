use thiserror::Error;

/// Errors surfaced by the storage boundaries.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Storage error: {0}")]
    StorageError(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
