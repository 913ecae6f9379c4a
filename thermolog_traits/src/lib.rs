pub mod clock;

pub use clock::{Clock, MonotonicClock};

use std::sync::{Arc, Mutex};

/// Lowest continuous sampling rate the acquisition engine can sustain, in Hz.
pub const SAMPLE_RATE_HZ_MIN: u32 = 611;
/// Highest continuous sampling rate the acquisition engine can sustain, in Hz.
pub const SAMPLE_RATE_HZ_MAX: u32 = 83_333;

/// One conversion result from the acquisition hardware: the channel it was
/// sampled on plus the unsigned code, masked to the configured bit width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSample {
    pub channel: u8,
    pub code: u16,
}

/// Result of a zero-wait batch read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// `n >= 1` samples were placed in the caller's buffer.
    Samples(usize),
    /// Nothing is buffered right now. This is the normal end-of-drain
    /// outcome, not an error.
    NoData,
}

/// Callback fired from the source's production context when a frame of
/// samples becomes available. Implementations must not block and must not
/// allocate; the registered closure may be invoked concurrently with the
/// consumer.
pub type ReadyCallback = Arc<dyn Fn() + Send + Sync>;

/// Contract for a continuous-mode sample source.
///
/// Lifecycle is strict: register callbacks, `start`, any number of
/// `try_read` calls, `stop`, `teardown`. Restarting a consumed source is
/// not supported.
pub trait SampleSource {
    /// Register the data-ready callback. Must be called before `start`.
    fn on_frame_ready(&mut self, cb: ReadyCallback);

    /// Register a callback for internal pool overflow. Sources that flush
    /// stale data on overflow may ignore the registration, which is what
    /// the default does.
    fn on_pool_overflow(&mut self, _cb: ReadyCallback) {}

    /// Begin continuous sampling at the configured rate.
    fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Replace `out`'s contents with up to `max_samples` buffered samples,
    /// without waiting. Returns `ReadOutcome::NoData` when the internal
    /// store is empty; a `Samples(n)` outcome always has `n >= 1`.
    fn try_read(
        &mut self,
        out: &mut Vec<RawSample>,
        max_samples: usize,
    ) -> Result<ReadOutcome, Box<dyn std::error::Error + Send + Sync>>;

    /// Halt sampling. The production context fires no callbacks after this
    /// returns.
    fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Release source resources. Must follow `stop`.
    fn teardown(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Shared handle so a caller can keep inspecting a source that was moved
/// into a session. Forwards every call to the guarded inner source; a
/// poisoned lock surfaces as an error (or is ignored for the infallible
/// callback registration, matching the inner contract).
impl<T: SampleSource + ?Sized> SampleSource for Arc<Mutex<T>> {
    fn on_frame_ready(&mut self, cb: ReadyCallback) {
        if let Ok(mut inner) = self.lock() {
            inner.on_frame_ready(cb);
        }
    }

    fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match self.lock() {
            Ok(mut inner) => inner.start(),
            Err(_) => Err("sample source mutex poisoned".into()),
        }
    }

    fn try_read(
        &mut self,
        out: &mut Vec<RawSample>,
        max_samples: usize,
    ) -> Result<ReadOutcome, Box<dyn std::error::Error + Send + Sync>> {
        match self.lock() {
            Ok(mut inner) => inner.try_read(out, max_samples),
            Err(_) => Err("sample source mutex poisoned".into()),
        }
    }

    fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match self.lock() {
            Ok(mut inner) => inner.stop(),
            Err(_) => Err("sample source mutex poisoned".into()),
        }
    }

    fn teardown(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match self.lock() {
            Ok(mut inner) => inner.teardown(),
            Err(_) => Err("sample source mutex poisoned".into()),
        }
    }
}

/// Line-oriented destination for rendered measurement reports.
pub trait ReportSink {
    fn emit(&mut self, line: &str);
}
