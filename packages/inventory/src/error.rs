// ABOUTME: Domain error type for inventory operations
// ABOUTME: Maps onto HTTP status classes in the API layer

use stockroom_storage::StorageError;
use thiserror::Error;

/// Inventory errors
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl InventoryError {
    /// Message to surface to the caller. Storage errors pass the underlying
    /// message through unchanged.
    pub fn message(&self) -> String {
        match self {
            InventoryError::Storage(inner) => inner.to_string(),
            other => other.to_string(),
        }
    }
}

pub type InventoryResult<T> = Result<T, InventoryError>;
