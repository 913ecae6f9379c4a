//! Fixed-interval emission gate.
//!
//! The drain loop consumes every batch; the pacer only decides which
//! reduced statistics turn into report lines. Emission cadence is therefore
//! decoupled from how fast batches arrive.

use std::sync::Arc;
use std::time::{Duration, Instant};
use thermolog_traits::Clock;

pub struct ReportPacer {
    interval_ms: u64,
    clock: Arc<dyn Clock + Send + Sync>,
    epoch: Instant,
    last_emit_ms: Option<u64>,
}

impl ReportPacer {
    pub fn new(interval: Duration, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        let epoch = clock.now();
        Self {
            interval_ms: (interval.as_millis().min(u128::from(u64::MAX))) as u64,
            clock,
            epoch,
            last_emit_ms: None,
        }
    }

    /// True when the configured interval has elapsed since the previous
    /// emission (or when nothing was emitted yet); resets the interval
    /// timer on a true return.
    pub fn should_emit(&mut self) -> bool {
        let now = self.clock.ms_since(self.epoch);
        if let Some(last) = self.last_emit_ms {
            if now.saturating_sub(last) < self.interval_ms {
                return false;
            }
        }
        self.last_emit_ms = Some(now);
        true
    }
}
