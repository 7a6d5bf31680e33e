use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid transcript scope: {0}")]
    Scope(#[from] memoria_core::error::CoreError),

    #[error("stored transcript belongs to {found}, expected {expected}")]
    ScopeMismatch { expected: String, found: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("transcript store lock poisoned")]
    Poisoned,
}
