//! Engine error types.

use std::path::PathBuf;

use thiserror::Error;

use galleria_core::CatalogError;

use crate::CancelCause;

/// Errors surfaced by the operation engine.
#[derive(Debug, Error)]
pub enum OpsError {
    /// Another bulk operation's terminal message has not been consumed yet.
    #[error("a bulk operation is already in flight")]
    Busy,

    /// The worker thread could not be spawned.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// I/O failure at a specific path.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source of a copy is not a regular file.
    #[error("not a regular file: {path}")]
    NotAFile { path: PathBuf },

    /// Cancellation was observed mid-operation.
    #[error("interrupted: {cause}")]
    Interrupted { cause: CancelCause },

    /// No free destination name within the suffix bound.
    #[error("could not resolve name collision for '{name}' in {dir}")]
    NameCollision { dir: PathBuf, name: String },

    /// The media catalog rejected a lookup or record update.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl OpsError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
