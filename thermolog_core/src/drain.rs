//! Consumer-side drain loop.
//!
//! The loop has exactly two states: parked on the readiness signal (`Idle`)
//! and pulling batches (`Draining`). A wake means "data exists", not "one
//! batch exists", so each wake drains until the source reports `NoData`:
//! the burst that triggered the wake, plus anything that arrived since.
//! Batches are reduced in strict arrival order by a single thread.

use crate::calibrate::CalibrationPolicy;
use crate::error::{Report, Result, map_source_error_dyn};
use crate::pacer::ReportPacer;
use crate::util;
use eyre::WrapErr;
use thermolog_traits::{RawSample, ReadOutcome, ReportSink, SampleSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainState {
    /// Parked on the readiness signal.
    Idle,
    /// Actively pulling batches from the source.
    Draining,
}

/// Outcome of one `Draining` iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainStep {
    /// One batch was reduced; the loop stays in `Draining`.
    Reduced { samples: usize, emitted: bool },
    /// The source reported no data; the loop is back in `Idle`.
    Exhausted,
}

/// Reduce-calibrate-report pipeline over a reused scratch buffer.
///
/// The scratch buffer is owned here and cleared on every read, so one
/// iteration's batch can never alias into the next.
pub struct DrainLoop {
    scratch: Vec<RawSample>,
    max_samples: usize,
    bit_width: u8,
    policy: CalibrationPolicy,
    pacer: ReportPacer,
    state: DrainState,
}

impl DrainLoop {
    pub fn new(
        max_samples: usize,
        bit_width: u8,
        policy: CalibrationPolicy,
        pacer: ReportPacer,
    ) -> Self {
        Self {
            scratch: Vec::with_capacity(max_samples),
            max_samples,
            bit_width,
            policy,
            pacer,
            state: DrainState::Idle,
        }
    }

    pub fn state(&self) -> DrainState {
        self.state
    }

    /// One `Draining` iteration: read, reduce, calibrate, offer to the
    /// pacer. Any source error other than `NoData` is fatal for the
    /// session and is not retried here.
    pub fn step<S: SampleSource>(
        &mut self,
        source: &mut S,
        sink: &mut dyn ReportSink,
    ) -> Result<DrainStep> {
        self.state = DrainState::Draining;
        self.scratch.clear();
        let outcome = source
            .try_read(&mut self.scratch, self.max_samples)
            .map_err(|e| Report::new(map_source_error_dyn(&*e)))
            .wrap_err("reading batch from acquisition source")?;

        let samples = match outcome {
            ReadOutcome::NoData => {
                self.state = DrainState::Idle;
                return Ok(DrainStep::Exhausted);
            }
            ReadOutcome::Samples(n) => n,
        };
        debug_assert_eq!(samples, self.scratch.len());

        let Some(mean) = util::batch_mean(&self.scratch) else {
            // A conforming source never reports Samples with an empty
            // buffer; treat the breach as exhaustion rather than reduce
            // nothing.
            tracing::warn!("acquisition source reported samples but delivered none");
            self.state = DrainState::Idle;
            return Ok(DrainStep::Exhausted);
        };

        let result = self.policy.calibrate(mean, self.bit_width);
        let emitted = self.pacer.should_emit();
        if emitted {
            sink.emit(&self.policy.render_report(mean, &result));
        }
        tracing::trace!(samples, mean, emitted, "batch reduced");
        Ok(DrainStep::Reduced { samples, emitted })
    }

    /// Drain until the source reports no data. Returns the number of
    /// batches reduced during this pass.
    pub fn drain<S: SampleSource>(
        &mut self,
        source: &mut S,
        sink: &mut dyn ReportSink,
    ) -> Result<u32> {
        let mut batches = 0u32;
        loop {
            match self.step(source, sink)? {
                DrainStep::Reduced { .. } => batches = batches.saturating_add(1),
                DrainStep::Exhausted => return Ok(batches),
            }
        }
    }
}
