//! Operation registration API.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc;

use crate::cancel::{CancelCause, OperationPhase};
use crate::context::OperationContext;
use crate::descriptor::{OperationDescriptor, RemoveItemFn, UpdateFn};
use crate::error::OpsError;
use crate::progress::ProgressMessage;
use crate::worker;

/// Interactive-thread handle to one in-flight operation: the progress
/// receiver, the shared context, and the registered view callbacks.
///
/// Consumed by [`crate::Coordinator::drive`]; the receiver is dropped
/// only after the terminal message has been observed.
pub struct RunningOperation {
    pub(crate) ctx: Arc<OperationContext>,
    pub(crate) rx: mpsc::UnboundedReceiver<ProgressMessage>,
    pub(crate) total: u64,
    pub(crate) update: UpdateFn,
    pub(crate) remove_item: Option<RemoveItemFn>,
}

impl RunningOperation {
    /// The shared context, e.g. to hand to a storage-event handler.
    pub fn context(&self) -> Arc<OperationContext> {
        Arc::clone(&self.ctx)
    }

    /// Total target count of this operation.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Receive the next raw progress message. Exposed for embedders that
    /// drive the channel themselves instead of using the coordinator.
    pub async fn recv(&mut self) -> Option<ProgressMessage> {
        self.rx.recv().await
    }

    /// Acknowledge the last message, releasing the worker for one more
    /// unit of work.
    pub fn acknowledge(&self) {
        self.ctx.signal_continue();
    }

    /// Tear the operation down after consuming its terminal message.
    pub fn finish(&self) {
        self.ctx.finish();
    }
}

/// Entry point for starting and cancelling bulk operations.
///
/// At most one operation is in flight at a time: a new one is rejected
/// with [`OpsError::Busy`] until the previous operation's terminal
/// message has been consumed.
#[derive(Default)]
pub struct BulkEngine {
    current: Mutex<Option<Arc<OperationContext>>>,
}

impl BulkEngine {
    /// Create an engine with no operation in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a bulk operation on a background worker thread and return
    /// immediately.
    ///
    /// `update` fires once, when the operation's view must refresh;
    /// `remove_item` (optional) fires per item that left its album.
    pub fn begin_operation(
        &self,
        descriptor: OperationDescriptor,
        update: UpdateFn,
        remove_item: Option<RemoveItemFn>,
    ) -> Result<RunningOperation, OpsError> {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(ctx) = current.as_ref() {
            if ctx.phase() != OperationPhase::Idle {
                return Err(OpsError::Busy);
            }
        }

        let total = descriptor.total();
        let (tx, rx) = mpsc::unbounded_channel();
        let ctx = Arc::new(OperationContext::new(tx));
        ctx.begin();

        tracing::info!(kind = %descriptor.kind, total, "starting bulk operation");
        // The thread is detached: completion is inferred solely from the
        // terminal progress message.
        let _detached = worker::spawn(descriptor, Arc::clone(&ctx)).map_err(OpsError::Spawn)?;

        *current = Some(Arc::clone(&ctx));
        Ok(RunningOperation {
            ctx,
            rx,
            total,
            update,
            remove_item,
        })
    }

    /// Write the cancellation cell of the in-flight operation. Returns
    /// false when no operation is running.
    ///
    /// Storage-event handlers call this with
    /// [`CancelCause::StorageRemoved`]; an application reset with
    /// [`CancelCause::Reset`].
    pub fn request_cancel(&self, cause: CancelCause) -> bool {
        let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        match current.as_ref() {
            Some(ctx) if ctx.phase() != OperationPhase::Idle => {
                tracing::warn!(%cause, "cancellation requested");
                ctx.request_cancel(cause);
                true
            }
            _ => false,
        }
    }

    /// Whether an operation is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|ctx| ctx.phase() != OperationPhase::Idle)
    }
}
