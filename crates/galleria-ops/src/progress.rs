//! Progress messages carried from the worker to the interactive thread.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::CancelCause;

/// Secondary-notification codes attached to a per-item progress message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum PopupOp {
    /// A destination name collision was resolved with a numeric suffix.
    #[strum(to_string = "duplicate name resolved")]
    DuplicateRenamed,
    /// The item already lives in the destination album; nothing was done.
    #[strum(to_string = "already in album")]
    SameAlbum,
    /// The item's filesystem operation failed; the operation continued.
    #[strum(to_string = "item failed")]
    ItemFailed,
    /// The filesystem operation succeeded but the catalog update failed.
    #[strum(to_string = "catalog update failed")]
    CatalogFailed,
}

impl PopupOp {
    /// Whether the item actually left its album, i.e. the view's
    /// per-item-remove callback should fire for it.
    pub fn item_changed(&self) -> bool {
        matches!(self, Self::DuplicateRenamed)
    }

    /// Whether the code reports a per-item failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::ItemFailed | Self::CatalogFailed)
    }
}

/// One fixed-shape progress record.
///
/// Exactly one record per processed target plus exactly one terminal
/// record (`in_progress == false`); `finished == -1` marks an aborted
/// operation's terminal record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressMessage {
    /// Count of targets processed so far; -1 on the abort terminal.
    pub finished: i64,
    /// False only on the terminal record.
    pub in_progress: bool,
    /// Running count of per-item failures.
    pub errors: u64,
    /// Whether this item actually left its album. False for same-album
    /// no-ops, failed items, and items rolled back by cancellation.
    pub changed: bool,
    /// Secondary notification for this item, if any.
    pub popup: Option<PopupOp>,
    /// Cancellation cause, set on the abort terminal only.
    pub cause: Option<CancelCause>,
}

impl ProgressMessage {
    /// Per-item record with the running finished count.
    pub fn item(finished: u64, errors: u64, popup: Option<PopupOp>, changed: bool) -> Self {
        Self {
            finished: finished as i64,
            in_progress: true,
            errors,
            changed,
            popup,
            cause: None,
        }
    }

    /// Terminal record of a run that processed every target.
    pub fn done(finished: u64, errors: u64) -> Self {
        Self {
            finished: finished as i64,
            in_progress: false,
            errors,
            changed: false,
            popup: None,
            cause: None,
        }
    }

    /// Terminal record of an aborted run.
    pub fn aborted(cause: CancelCause, errors: u64) -> Self {
        Self {
            finished: -1,
            in_progress: false,
            errors,
            changed: false,
            popup: None,
            cause: Some(cause),
        }
    }

    /// Whether this is the terminal record.
    pub fn is_terminal(&self) -> bool {
        !self.in_progress
    }

    /// Whether this is the terminal record of an aborted run.
    pub fn is_aborted(&self) -> bool {
        self.is_terminal() && self.finished < 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_messages_are_in_progress() {
        let msg = ProgressMessage::item(3, 1, Some(PopupOp::ItemFailed), false);
        assert_eq!(msg.finished, 3);
        assert!(msg.in_progress);
        assert!(!msg.is_terminal());
        assert_eq!(msg.errors, 1);
        assert!(!msg.changed);
    }

    #[test]
    fn terminal_records_never_mark_a_change() {
        assert!(!ProgressMessage::done(2, 0).changed);
        assert!(!ProgressMessage::aborted(CancelCause::Reset, 0).changed);
    }

    #[test]
    fn done_terminal_carries_true_count() {
        let msg = ProgressMessage::done(5, 0);
        assert!(msg.is_terminal());
        assert!(!msg.is_aborted());
        assert_eq!(msg.finished, 5);
        assert!(msg.cause.is_none());
    }

    #[test]
    fn abort_terminal_encodes_minus_one() {
        let msg = ProgressMessage::aborted(CancelCause::UserCancel, 2);
        assert!(msg.is_aborted());
        assert_eq!(msg.finished, -1);
        assert_eq!(msg.cause, Some(CancelCause::UserCancel));
    }

    #[test]
    fn popup_classification() {
        assert!(PopupOp::DuplicateRenamed.item_changed());
        assert!(!PopupOp::SameAlbum.item_changed());
        assert!(PopupOp::ItemFailed.is_failure());
        assert!(PopupOp::CatalogFailed.is_failure());
        assert!(!PopupOp::DuplicateRenamed.is_failure());
    }
}
