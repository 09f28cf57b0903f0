//! Operation descriptors and their typed callbacks.

use serde::{Deserialize, Serialize};
use strum::Display;

use galleria_core::{AlbumRef, ItemHandle};

use crate::context::OperationContext;
use crate::error::OpsError;
use crate::progress::PopupOp;

/// The kind of bulk operation being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum OperationKind {
    Move,
    Copy,
    Delete,
}

/// Outcome of one target's `operate` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    /// The item was processed successfully.
    Done,
    /// Processed successfully, with a secondary notification.
    Note(PopupOp),
    /// This item failed; the operation continues with the next target.
    Failed(PopupOp),
    /// Cancellation was observed mid-item. Not counted as an error; the
    /// worker aborts at its next checkpoint.
    Interrupted,
}

/// Per-target work callback, run on the worker thread.
///
/// Returning `Err` signals a structural failure and aborts the whole
/// operation with [`crate::CancelCause::Error`]; per-item failures are
/// reported through [`ItemOutcome::Failed`] instead.
pub type OperateFn =
    Box<dyn FnMut(&OperationContext, ItemHandle) -> Result<ItemOutcome, OpsError> + Send>;

/// Invoked exactly once, on the interactive thread, when the operation's
/// view must refresh (terminal message consumed).
pub type UpdateFn = Box<dyn FnMut() + Send>;

/// Invoked on the interactive thread with the zero-based target index of
/// each item that actually left its album.
pub type RemoveItemFn = Box<dyn FnMut(usize) + Send>;

/// Everything the worker needs for one bulk operation.
///
/// The target list is read-only once the worker starts; the descriptor
/// moves into the worker thread at spawn time.
pub struct OperationDescriptor {
    /// What this operation does.
    pub kind: OperationKind,
    /// Ordered targets, resolved through the catalog per item.
    pub targets: Vec<ItemHandle>,
    /// Destination album for move/copy; `None` for delete.
    pub destination: Option<AlbumRef>,
    /// The per-target work step.
    pub operate: OperateFn,
}

impl OperationDescriptor {
    /// Create a descriptor.
    pub fn new(
        kind: OperationKind,
        targets: Vec<ItemHandle>,
        destination: Option<AlbumRef>,
        operate: OperateFn,
    ) -> Self {
        Self {
            kind,
            targets,
            destination,
            operate,
        }
    }

    /// Total target count.
    pub fn total(&self) -> u64 {
        self.targets.len() as u64
    }
}

impl std::fmt::Debug for OperationDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationDescriptor")
            .field("kind", &self.kind)
            .field("targets", &self.targets.len())
            .field("destination", &self.destination)
            .finish_non_exhaustive()
    }
}
