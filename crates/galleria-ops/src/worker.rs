//! The background worker thread's per-item loop.

use std::io;
use std::sync::Arc;
use std::thread;

use crate::cancel::CancelCause;
use crate::context::OperationContext;
use crate::descriptor::{ItemOutcome, OperationDescriptor};
use crate::progress::{PopupOp, ProgressMessage};

/// Spawn the worker thread for one bulk operation.
///
/// A spawn failure is reported synchronously; no message is ever sent on
/// the progress channel in that case.
pub(crate) fn spawn(
    descriptor: OperationDescriptor,
    ctx: Arc<OperationContext>,
) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("galleria-ops-worker".into())
        .spawn(move || run(descriptor, ctx))
}

/// The operation loop.
///
/// The first item starts immediately, without waiting for an initial
/// release, so the progress display never appears stalled. Every later
/// iteration is gated: push one message, wait for the interactive thread
/// to acknowledge it, then re-check cancellation before starting the
/// next item. Per-item failures are recorded and the loop continues;
/// only the cancellation cell stops it early.
fn run(descriptor: OperationDescriptor, ctx: Arc<OperationContext>) {
    let OperationDescriptor {
        kind,
        targets,
        mut operate,
        ..
    } = descriptor;
    let total = targets.len() as u64;
    tracing::debug!(%kind, total, "bulk operation worker started");

    let mut finished = 0u64;
    let mut errors = 0u64;

    for handle in targets {
        // (popup, item left its album, counts toward the finished total)
        let (popup, changed, processed) = match operate(&ctx, handle) {
            Ok(ItemOutcome::Done) => (None, true, true),
            Ok(ItemOutcome::Note(popup)) => (Some(popup), popup.item_changed(), true),
            Ok(ItemOutcome::Failed(popup)) => {
                errors += 1;
                (Some(popup), false, true)
            }
            // Rolled back mid-item; the rendered count must not advance.
            Ok(ItemOutcome::Interrupted) => (None, false, false),
            Err(err) => {
                // Structural failure: abort the remaining queue.
                tracing::error!(?handle, error = %err, "operate step failed, aborting operation");
                ctx.request_cancel(CancelCause::Error);
                errors += 1;
                (Some(PopupOp::ItemFailed), false, true)
            }
        };

        if processed {
            finished += 1;
        }
        ctx.push(ProgressMessage::item(finished, errors, popup, changed));
        ctx.wait_for_continue();

        if let Some(cause) = ctx.cancelled() {
            tracing::info!(%cause, finished, total, "bulk operation aborted");
            ctx.push(ProgressMessage::aborted(cause, errors));
            return;
        }
    }

    tracing::debug!(finished, errors, "bulk operation finished");
    ctx.push(ProgressMessage::done(finished, errors));
}
