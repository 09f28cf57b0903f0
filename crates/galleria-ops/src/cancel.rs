//! Multi-cause cancellation state shared between the two threads.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use strum::Display;

/// Why an operation was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum CancelCause {
    /// The user cancelled from the progress UI.
    #[strum(to_string = "cancelled by user")]
    UserCancel,
    /// Removable storage was ejected mid-operation.
    #[strum(to_string = "storage removed")]
    StorageRemoved,
    /// A structural failure forced the operation to stop.
    #[strum(to_string = "operation error")]
    Error,
    /// The application is resetting.
    #[strum(to_string = "application reset")]
    Reset,
}

/// Phase of the one in-flight operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationPhase {
    /// No operation in flight.
    Idle,
    /// Operation running, not cancelled.
    Running,
    /// Cancellation requested; the worker stops at its next checkpoint.
    Cancelled(CancelCause),
}

/// Lock-protected cancellation cell.
///
/// Written by the interactive thread and storage-event handlers, read by
/// the worker before each new unit of work and between copy chunks.
/// Cancellation is cooperative: a unit already mid-flight finishes (or
/// aborts at its own chunk boundary); nothing is interrupted mid-syscall.
#[derive(Debug)]
pub struct CancelCell {
    phase: Mutex<OperationPhase>,
}

impl CancelCell {
    /// Create an idle cell.
    pub fn new() -> Self {
        Self {
            phase: Mutex::new(OperationPhase::Idle),
        }
    }

    /// Mark the start of an operation. Returns false if one is already
    /// in flight (the cell is not idle).
    pub fn begin(&self) -> bool {
        let mut phase = self.lock();
        if *phase != OperationPhase::Idle {
            return false;
        }
        *phase = OperationPhase::Running;
        true
    }

    /// Request cancellation. The latest writer wins; a request while idle
    /// is ignored because there is nothing to abort.
    pub fn cancel(&self, cause: CancelCause) {
        let mut phase = self.lock();
        if *phase == OperationPhase::Idle {
            return;
        }
        *phase = OperationPhase::Cancelled(cause);
    }

    /// The centralized checkpoint: returns the cause if cancellation has
    /// been requested.
    pub fn cancelled(&self) -> Option<CancelCause> {
        match *self.lock() {
            OperationPhase::Cancelled(cause) => Some(cause),
            _ => None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> OperationPhase {
        *self.lock()
    }

    /// Tear the cell down to idle once the terminal progress message has
    /// been consumed.
    pub fn finish(&self) {
        *self.lock() = OperationPhase::Idle;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, OperationPhase> {
        self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CancelCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_rejects_while_running() {
        let cell = CancelCell::new();
        assert!(cell.begin());
        assert!(!cell.begin());
        cell.finish();
        assert!(cell.begin());
    }

    #[test]
    fn cancel_while_idle_is_ignored() {
        let cell = CancelCell::new();
        cell.cancel(CancelCause::UserCancel);
        assert_eq!(cell.phase(), OperationPhase::Idle);
        assert!(cell.cancelled().is_none());
    }

    #[test]
    fn latest_cancel_cause_wins() {
        let cell = CancelCell::new();
        cell.begin();
        cell.cancel(CancelCause::UserCancel);
        cell.cancel(CancelCause::StorageRemoved);
        assert_eq!(cell.cancelled(), Some(CancelCause::StorageRemoved));
    }

    #[test]
    fn finish_returns_to_idle() {
        let cell = CancelCell::new();
        cell.begin();
        cell.cancel(CancelCause::Reset);
        cell.finish();
        assert_eq!(cell.phase(), OperationPhase::Idle);
    }
}
