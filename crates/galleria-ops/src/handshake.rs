//! Single-slot rendezvous between the worker and the interactive thread.

use std::sync::{Condvar, Mutex, PoisonError};
use std::time::Duration;

/// A boolean release flag plus condvar implementing strict alternation:
/// the worker processes one unit of work, then blocks here until the
/// interactive thread has consumed and rendered the matching progress
/// message.
///
/// Single-slot: signalling twice before a wait is a no-op, not a queued
/// permit, so the worker can never run more than one item ahead of the
/// progress display.
#[derive(Debug)]
pub struct Handshake {
    released: Mutex<bool>,
    cond: Condvar,
}

impl Handshake {
    /// Create a handshake with no release pending.
    pub fn new() -> Self {
        Self {
            released: Mutex::new(false),
            cond: Condvar::new(),
        }
    }

    /// Interactive-thread side: release the worker for one more unit.
    pub fn signal_continue(&self) {
        let mut released = self
            .released
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !*released {
            *released = true;
            self.cond.notify_one();
        }
    }

    /// Worker side: block until released, consuming the release.
    pub fn wait_for_continue(&self) {
        let mut released = self
            .released
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        while !*released {
            released = self
                .cond
                .wait(released)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *released = false;
    }

    /// Bounded wait, returning whether a release was consumed. Used by
    /// tests to observe the single-slot invariant without hanging.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let mut released = self
            .released
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let deadline = std::time::Instant::now() + timeout;
        while !*released {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            if remaining.is_zero() {
                return false;
            }
            let (guard, result) = self
                .cond
                .wait_timeout(released, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            released = guard;
            if result.timed_out() && !*released {
                return false;
            }
        }
        *released = false;
        true
    }
}

impl Default for Handshake {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use super::*;

    const SHORT: Duration = Duration::from_millis(50);

    #[test]
    fn signal_before_wait_is_consumed() {
        let hs = Handshake::new();
        hs.signal_continue();
        assert!(hs.wait_timeout(SHORT));
    }

    #[test]
    fn double_signal_yields_single_wake() {
        let hs = Handshake::new();
        hs.signal_continue();
        hs.signal_continue();
        assert!(hs.wait_timeout(SHORT));
        // The second signal was absorbed, not queued.
        assert!(!hs.wait_timeout(SHORT));
    }

    #[test]
    fn wait_blocks_until_signalled() {
        let hs = Arc::new(Handshake::new());
        let waiter = Arc::clone(&hs);
        let handle = thread::spawn(move || {
            waiter.wait_for_continue();
        });
        thread::sleep(Duration::from_millis(20));
        hs.signal_continue();
        handle.join().unwrap();
        // The release was consumed by the woken thread.
        assert!(!hs.wait_timeout(SHORT));
    }
}
