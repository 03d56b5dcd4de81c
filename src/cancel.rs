//! Whole-client cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

/// Set-once cancellation flag shared by the client and every operation it has
/// in flight.
///
/// Raising the flag is irreversible: it models the client shutting down, not
/// pausing. Operations observe it at every await point and settle with a
/// cancellation error rather than being silently dropped.
#[derive(Debug, Default)]
pub(crate) struct CancelFlag {
    raised: AtomicBool,
    notify: Notify,
}

impl CancelFlag {
    pub(crate) fn cancel(&self) {
        self.raised.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }

    /// Resolves once the flag has been raised; pends forever otherwise.
    ///
    /// The `Notify` registration happens before the flag re-check, so a
    /// `cancel()` racing with this call cannot be missed.
    pub(crate) async fn cancelled(&self) {
        loop {
            if self.is_cancelled() {
                return;
            }
            let notified = self.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}
