//! Acquisition session orchestration.
//!
//! Owns the source, the readiness signal, and the drain loop; enforces the
//! strict start -> drain -> stop -> teardown lifecycle on both the clean
//! and the error path.

use crate::calibrate::CalibrationPolicy;
use crate::drain::DrainLoop;
use crate::error::{Report, Result, map_source_error_dyn};
use crate::pacer::ReportPacer;
use crate::signal::ReadySignal;
use eyre::WrapErr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thermolog_traits::{Clock, ReadyCallback, ReportSink, SampleSource};

/// Pipeline parameters fixed for the lifetime of one session.
#[derive(Debug, Clone)]
pub struct SessionCfg {
    pub samples_per_read: usize,
    pub bit_width: u8,
    pub report_interval: Duration,
}

impl Default for SessionCfg {
    fn default() -> Self {
        Self {
            samples_per_read: 100,
            bit_width: 10,
            report_interval: Duration::from_millis(1000),
        }
    }
}

/// Clonable handle that stops a running session: sets the stop flag, then
/// fires the readiness notifier so a parked consumer wakes and exits. Safe
/// to call from any context, including a signal handler.
#[derive(Clone)]
pub struct ShutdownHandle {
    stop: Arc<AtomicBool>,
    wake: ReadyCallback,
}

impl ShutdownHandle {
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
        (self.wake)();
    }

    pub fn is_stop_requested(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }
}

pub struct AcquisitionSession<S: SampleSource> {
    source: S,
    signal: ReadySignal,
    drain: DrainLoop,
    stop: Arc<AtomicBool>,
}

impl<S: SampleSource> AcquisitionSession<S> {
    /// Wire the signal's notifier into the source and build the drain
    /// pipeline. The source must not be started yet.
    pub fn new(
        mut source: S,
        policy: CalibrationPolicy,
        cfg: SessionCfg,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        let signal = ReadySignal::new();
        source.on_frame_ready(signal.notifier());
        let pacer = ReportPacer::new(cfg.report_interval, clock);
        let drain = DrainLoop::new(cfg.samples_per_read, cfg.bit_width, policy, pacer);
        Self {
            source,
            signal,
            drain,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            stop: self.stop.clone(),
            wake: self.signal.notifier(),
        }
    }

    /// Run until shutdown is requested or a source error aborts the
    /// session. Stop and teardown run in strict order on both paths; on
    /// the error path they are best-effort and the original error wins.
    pub fn run(&mut self, sink: &mut dyn ReportSink) -> Result<()> {
        self.source
            .start()
            .map_err(|e| Report::new(map_source_error_dyn(&*e)))
            .wrap_err("starting acquisition source")?;
        tracing::info!("acquisition session started");

        let outcome = self.consume(sink);

        if let Err(e) = self.source.stop() {
            tracing::warn!(error = %e, "stopping acquisition source failed");
        }
        if let Err(e) = self.source.teardown() {
            tracing::warn!(error = %e, "acquisition source teardown failed");
        }

        match &outcome {
            Ok(()) => tracing::info!("acquisition session stopped"),
            Err(e) => tracing::error!(error = %e, "acquisition session aborted"),
        }
        outcome
    }

    fn consume(&mut self, sink: &mut dyn ReportSink) -> Result<()> {
        loop {
            if self.stop.load(Ordering::SeqCst) {
                return Ok(());
            }
            self.signal.wait()?;
            if self.stop.load(Ordering::SeqCst) {
                return Ok(());
            }
            let batches = self.drain.drain(&mut self.source, sink)?;
            tracing::trace!(batches, "drain pass complete");
        }
    }
}
