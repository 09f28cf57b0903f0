//! Background bulk media-operation engine for galleria.
//!
//! This crate performs long-running, user-initiated filesystem mutations
//! (moving, copying, or deleting many media files) on a dedicated worker
//! thread while the interactive thread renders progress and can cancel
//! the operation for several independent reasons.
//!
//! The two threads are coupled by a strict one-item-at-a-time handshake:
//! the worker processes one target, pushes one progress record, then
//! blocks until the interactive thread has consumed and rendered that
//! record. Cancellation is cooperative and multi-cause (user cancel,
//! storage ejection, error, application reset), checked at item
//! boundaries and between copy chunks.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use galleria_core::{AlbumRef, MemoryCatalog};
//! use galleria_ops::{move_operation, BulkEngine, Coordinator, FileExecutor};
//! # use galleria_ops::{OperationOutcome, PopupOp, ProgressPresenter};
//! # struct Bar;
//! # impl ProgressPresenter for Bar {
//! #     fn progress(&mut self, _: u64, _: u64) {}
//! #     fn popup(&mut self, _: PopupOp) {}
//! #     fn done(&mut self, _: &OperationOutcome) {}
//! # }
//!
//! # async fn demo(targets: Vec<galleria_core::ItemHandle>) {
//! let catalog = Arc::new(MemoryCatalog::new());
//! let executor = Arc::new(FileExecutor::new());
//! let engine = BulkEngine::new();
//!
//! let descriptor = move_operation(
//!     catalog,
//!     executor,
//!     targets,
//!     AlbumRef::new("/media/albums/trip", "Trip"),
//! );
//! let running = engine
//!     .begin_operation(descriptor, Box::new(|| {}), None)
//!     .unwrap();
//!
//! let mut presenter = Bar;
//! let outcome = Coordinator::drive(running, &mut presenter).await;
//! tracing::info!(summary = %outcome.summary(), "operation done");
//! # }
//! ```

mod bulk;
mod cancel;
mod collision;
mod context;
mod coordinator;
mod descriptor;
mod engine;
mod error;
mod executor;
mod handshake;
mod progress;
mod worker;

pub use bulk::{copy_operation, delete_operation, move_operation};
pub use cancel::{CancelCause, CancelCell, OperationPhase};
pub use collision::{resolve_unique_name, ResolvedName, MAX_RENAME_ATTEMPTS};
pub use context::OperationContext;
pub use coordinator::{Coordinator, OperationOutcome, ProgressPresenter};
pub use descriptor::{
    ItemOutcome, OperateFn, OperationDescriptor, OperationKind, RemoveItemFn, UpdateFn,
};
pub use engine::{BulkEngine, RunningOperation};
pub use error::OpsError;
pub use executor::{FileExecutor, COPY_CHUNK_SIZE};
pub use handshake::Handshake;
pub use progress::{PopupOp, ProgressMessage};
