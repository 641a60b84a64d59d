use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::Duration;

/// One-shot cancellation for a debounced job.
///
/// The flag lives under the same mutex the condvar waits on, so a
/// `cancel()` that races a waiter entering [`CancelSignal::wait`] is never
/// lost: the waiter either sees the flag before sleeping or is woken.
#[derive(Debug, Default)]
pub struct CancelSignal {
    cancelled: Mutex<bool>,
    woken: Condvar,
}

impl CancelSignal {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, bool> {
        self.cancelled
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Mark as cancelled and wake every waiter. Idempotent.
    pub fn cancel(&self) {
        let mut cancelled = self.state();
        *cancelled = true;
        self.woken.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.state()
    }

    /// Sleep through a debounce window.
    ///
    /// Returns `true` as soon as the signal is cancelled, `false` once the
    /// whole window elapsed without cancellation.
    pub fn wait(&self, window: Duration) -> bool {
        let guard = self.state();
        let (cancelled, _) = self
            .woken
            .wait_timeout_while(guard, window, |cancelled| !*cancelled)
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *cancelled
    }
}
