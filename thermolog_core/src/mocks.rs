//! Test and helper mocks for thermolog_core.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use thermolog_traits::{Clock, RawSample, ReadOutcome, ReadyCallback, ReportSink, SampleSource};

/// One scripted `try_read` outcome.
#[derive(Debug, Clone)]
pub enum ScriptedRead {
    /// Deliver these codes as a batch.
    Batch(Vec<u16>),
    /// Report the store as empty.
    NoData,
    /// Fail the read with this message.
    Fail(&'static str),
}

/// Sample source driven by a fixed script; an exhausted script reads as
/// `NoData`. The registered ready callback is exposed so tests can fire the
/// "frame ready" event as the production context would.
pub struct ScriptedSource {
    script: VecDeque<ScriptedRead>,
    ready_cb: Option<ReadyCallback>,
    channel: u8,
    pub started: bool,
    pub stopped: bool,
    pub torn_down: bool,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = ScriptedRead>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ready_cb: None,
            channel: 6,
            started: false,
            stopped: false,
            torn_down: false,
        }
    }

    /// The callback registered via `on_frame_ready`, if any. Call it
    /// outside any lock to mimic the asynchronous production context.
    pub fn ready_callback(&self) -> Option<ReadyCallback> {
        self.ready_cb.clone()
    }

    /// Script entries not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl SampleSource for ScriptedSource {
    fn on_frame_ready(&mut self, cb: ReadyCallback) {
        self.ready_cb = Some(cb);
    }

    fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.started = true;
        Ok(())
    }

    fn try_read(
        &mut self,
        out: &mut Vec<RawSample>,
        max_samples: usize,
    ) -> Result<ReadOutcome, Box<dyn std::error::Error + Send + Sync>> {
        out.clear();
        match self.script.pop_front() {
            None | Some(ScriptedRead::NoData) => Ok(ReadOutcome::NoData),
            Some(ScriptedRead::Batch(codes)) => {
                out.extend(codes.iter().take(max_samples).map(|&code| RawSample {
                    channel: self.channel,
                    code,
                }));
                Ok(ReadOutcome::Samples(out.len()))
            }
            Some(ScriptedRead::Fail(msg)) => Err(msg.into()),
        }
    }

    fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.stopped = true;
        Ok(())
    }

    fn teardown(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.torn_down = true;
        Ok(())
    }
}

// NOTE: The shared-handle `SampleSource` impl for `Arc<Mutex<ScriptedSource>>`
// lives in `thermolog_traits` as a generic blanket impl — the orphan rule
// forbids implementing the foreign `SampleSource` trait for `Arc<Mutex<_>>`
// here in `thermolog_core`.

/// Deterministic clock whose time only moves when a test advances it;
/// `sleep` advances instead of blocking.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, d: Duration) {
        if let Ok(mut offset) = self.offset.lock() {
            *offset = offset.saturating_add(d);
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let offset = self.offset.lock().map(|g| *g).unwrap_or(Duration::ZERO);
        self.origin + offset
    }

    fn sleep(&self, d: Duration) {
        self.advance(d);
    }
}

/// Sink that keeps every emitted line.
#[derive(Debug, Default)]
pub struct CollectSink {
    pub lines: Vec<String>,
}

impl ReportSink for CollectSink {
    fn emit(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}
