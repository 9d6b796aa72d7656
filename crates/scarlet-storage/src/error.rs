//! Storage error types.

use scarlet_guests::GuestError;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The task running a mutation panicked or was cancelled.
    #[error("mutation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// The mutation was rejected by the guest list rules.
    #[error(transparent)]
    Rule(#[from] GuestError),
}

impl StorageError {
    /// Returns the rule error, if this is one.
    pub fn as_rule(&self) -> Option<&GuestError> {
        match self {
            StorageError::Rule(err) => Some(err),
            _ => None,
        }
    }
}
