//! Shared per-operation context.

use tokio::sync::mpsc;

use crate::cancel::{CancelCause, CancelCell, OperationPhase};
use crate::handshake::Handshake;
use crate::progress::ProgressMessage;

/// Sole owner of one operation's synchronization state: the cancellation
/// cell, the handshake, and the progress sender.
///
/// Shared as an `Arc` between the engine, the worker thread, and the
/// coordinator; everything it owns is released when the last clone drops,
/// which happens deterministically once the terminal progress message has
/// been consumed.
#[derive(Debug)]
pub struct OperationContext {
    cancel: CancelCell,
    handshake: Handshake,
    tx: mpsc::UnboundedSender<ProgressMessage>,
}

impl OperationContext {
    pub(crate) fn new(tx: mpsc::UnboundedSender<ProgressMessage>) -> Self {
        Self {
            cancel: CancelCell::new(),
            handshake: Handshake::new(),
            tx,
        }
    }

    /// The cancellation cell, for checkpoints inside file primitives.
    pub fn cancel_cell(&self) -> &CancelCell {
        &self.cancel
    }

    /// Checkpoint accessor: the cancellation cause, if one is set.
    pub fn cancelled(&self) -> Option<CancelCause> {
        self.cancel.cancelled()
    }

    /// Current operation phase.
    pub fn phase(&self) -> OperationPhase {
        self.cancel.phase()
    }

    /// Request cancellation of this operation.
    pub fn request_cancel(&self, cause: CancelCause) {
        self.cancel.cancel(cause);
    }

    /// Release the worker for one more unit of work.
    pub fn signal_continue(&self) {
        self.handshake.signal_continue();
    }

    pub(crate) fn begin(&self) -> bool {
        self.cancel.begin()
    }

    pub(crate) fn finish(&self) {
        self.cancel.finish();
    }

    pub(crate) fn wait_for_continue(&self) {
        self.handshake.wait_for_continue();
    }

    /// Worker side: push one progress record. A send failure means the
    /// consumer is gone, which only happens after the terminal message,
    /// so it is ignored.
    pub(crate) fn push(&self, msg: ProgressMessage) {
        let _ = self.tx.send(msg);
    }
}
