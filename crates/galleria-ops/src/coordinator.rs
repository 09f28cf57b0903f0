//! Interactive-thread consumption of the progress channel.

use serde::{Deserialize, Serialize};

use crate::cancel::CancelCause;
use crate::engine::RunningOperation;
use crate::progress::PopupOp;

/// Rendering consumer of operation progress. Purely presentational: the
/// engine decides what happened, the presenter decides how it looks.
pub trait ProgressPresenter {
    /// A target was processed; `finished` of `total` are done.
    fn progress(&mut self, finished: u64, total: u64);

    /// A secondary notification for the current item.
    fn popup(&mut self, op: PopupOp);

    /// The operation reached its terminal state.
    fn done(&mut self, outcome: &OperationOutcome);
}

/// User-facing disposition of a finished operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationOutcome {
    /// All targets processed, no per-item failures.
    Completed { finished: u64 },
    /// All targets processed, some failed.
    CompletedWithErrors { finished: u64, errors: u64 },
    /// Aborted before the queue was exhausted.
    Cancelled(CancelCause),
}

/// Drives one operation's progress channel on the interactive thread.
pub struct Coordinator;

impl Coordinator {
    /// Consume progress messages until the terminal one, rendering
    /// through `presenter` and pacing the worker via the handshake.
    ///
    /// Each non-terminal message is always acknowledged, even when
    /// cancellation is already in effect: the worker catches the
    /// cancellation on its own next checkpoint, so withholding the
    /// release would only leave it blocked forever.
    ///
    /// The `update` callback fires exactly once, after the terminal
    /// message; the receiver and callbacks are dropped in the terminal
    /// branch and nowhere else.
    pub async fn drive<P: ProgressPresenter>(
        mut op: RunningOperation,
        presenter: &mut P,
    ) -> OperationOutcome {
        loop {
            let Some(msg) = op.recv().await else {
                // Worker vanished without a terminal message; treat it
                // as a structural error so the UI is not left hanging.
                tracing::error!("progress channel closed without terminal message");
                let outcome = OperationOutcome::Cancelled(CancelCause::Error);
                (op.update)();
                op.finish();
                presenter.done(&outcome);
                return outcome;
            };

            if let Some(popup) = msg.popup {
                presenter.popup(popup);
            }

            if msg.in_progress {
                presenter.progress(msg.finished as u64, op.total);
                if msg.changed {
                    if let Some(remove) = op.remove_item.as_mut() {
                        remove((msg.finished - 1) as usize);
                    }
                }
                op.acknowledge();
                continue;
            }

            let outcome = match (msg.is_aborted(), msg.cause, msg.errors) {
                (true, cause, _) => {
                    OperationOutcome::Cancelled(cause.unwrap_or(CancelCause::Error))
                }
                (false, _, 0) => OperationOutcome::Completed {
                    finished: msg.finished as u64,
                },
                (false, _, errors) => OperationOutcome::CompletedWithErrors {
                    finished: msg.finished as u64,
                    errors,
                },
            };

            (op.update)();
            op.finish();
            presenter.done(&outcome);
            return outcome;
        }
    }
}

impl OperationOutcome {
    /// Short human-readable summary for the terminal notification.
    pub fn summary(&self) -> String {
        match self {
            Self::Completed { finished } => format!("completed {finished} items"),
            Self::CompletedWithErrors { finished, errors } => {
                format!("completed {finished} items, {errors} failed")
            }
            Self::Cancelled(cause) => format!("{cause}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summaries_read_naturally() {
        assert_eq!(
            OperationOutcome::Completed { finished: 3 }.summary(),
            "completed 3 items"
        );
        assert_eq!(
            OperationOutcome::CompletedWithErrors {
                finished: 5,
                errors: 2
            }
            .summary(),
            "completed 5 items, 2 failed"
        );
        assert_eq!(
            OperationOutcome::Cancelled(CancelCause::StorageRemoved).summary(),
            "storage removed"
        );
    }
}
