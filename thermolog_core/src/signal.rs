//! Single-slot readiness signal bridging the source's production context to
//! the consumer task.
//!
//! Built on a bounded capacity-1 channel: a notification `try_send`s into
//! the slot and is dropped when the slot is already full, so any number of
//! notifications between consumer wakeups coalesce into exactly one pending
//! wake. The notify side never blocks and never allocates, which makes it
//! safe to call from an interrupt-style context.

use crate::error::{AcquireError, Report, Result};
use crossbeam_channel as xch;
use thermolog_traits::ReadyCallback;

pub struct ReadySignal {
    tx: xch::Sender<()>,
    rx: xch::Receiver<()>,
}

impl ReadySignal {
    pub fn new() -> Self {
        let (tx, rx) = xch::bounded(1);
        Self { tx, rx }
    }

    /// Arm the pending-wake slot. A full slot means a wake is already
    /// pending and the call is a no-op.
    pub fn notify(&self) {
        let _ = self.tx.try_send(());
    }

    /// A clonable notifier for the source's production context.
    pub fn notifier(&self) -> ReadyCallback {
        let tx = self.tx.clone();
        std::sync::Arc::new(move || {
            let _ = tx.try_send(());
        })
    }

    /// Block the consumer until a notification is pending, then clear it.
    /// There is deliberately no timeout variant; indefinite blocking is
    /// correct here, and shutdown paths wake the consumer via `notify`.
    pub fn wait(&self) -> Result<()> {
        self.rx
            .recv()
            .map_err(|_| Report::new(AcquireError::State("readiness signal disconnected".into())))
    }

    /// Clear a pending notification if one exists. Never blocks.
    pub fn try_wait(&self) -> bool {
        self.rx.try_recv().is_ok()
    }
}

impl Default for ReadySignal {
    fn default() -> Self {
        Self::new()
    }
}
