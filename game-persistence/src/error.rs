use game_core::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage lock was poisoned")]
    LockPoisoned,
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

impl From<StorageError> for StoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(err) => StoreError::Io(err),
            StorageError::Serialization(err) => StoreError::Json(err.to_string()),
            StorageError::LockPoisoned => StoreError::LockPoisoned,
        }
    }
}
