//! Catalog error types.

use thiserror::Error;

use crate::ItemHandle;

/// Errors reported by the media catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No item is registered under the given handle.
    #[error("no catalog entry for item {0:?}")]
    ItemNotFound(ItemHandle),

    /// The catalog's backing store failed.
    #[error("catalog storage error: {message}")]
    Storage { message: String },
}

impl CatalogError {
    /// Create a storage error from any displayable source.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
