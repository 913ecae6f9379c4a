//! Simulated continuous-mode ADC source.
//!
//! A producer thread stands in for the driver's conversion context: every
//! frame period it synthesizes `samples_per_frame` codes, appends them to a
//! bounded in-memory store, and fires the registered data-ready callback.
//! When the store fills, the oldest samples are discarded so the producer
//! never blocks.
//!
//! Safety: the producer thread is joined on `stop` and again on drop, so a
//! discarded source cannot leak a running thread.

pub mod error;
pub mod util;

use crate::error::HwError;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use thermolog_traits::{Clock, MonotonicClock, RawSample, ReadOutcome, ReadyCallback, SampleSource};

/// Deterministic code generators for the simulated channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    /// Every sample carries the same code.
    Constant(u16),
    /// Codes count up by `step` per sample, wrapping within the bit width.
    Ramp { start: u16, step: u16 },
    /// Symmetric triangle around `base`, one full cycle per `period_samples`.
    Triangle {
        base: u16,
        amplitude: u16,
        period_samples: u32,
    },
}

#[derive(Debug, Clone)]
pub struct SimAdcCfg {
    pub channel: u8,
    pub bit_width: u8,
    pub sample_rate_hz: u32,
    pub samples_per_frame: usize,
    /// Store capacity in samples; oldest data is flushed on overflow.
    pub max_store_samples: usize,
    pub waveform: Waveform,
}

impl Default for SimAdcCfg {
    fn default() -> Self {
        Self {
            channel: 6,
            bit_width: 10,
            sample_rate_hz: 20_000,
            samples_per_frame: 100,
            max_store_samples: 512,
            waveform: Waveform::Triangle {
                base: 512,
                amplitude: 64,
                period_samples: 4096,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Running,
    Stopped,
    TornDown,
}

/// Host-side stand-in for the continuous ADC driver.
pub struct SimulatedContinuousAdc {
    cfg: SimAdcCfg,
    clock: Arc<dyn Clock + Send + Sync>,
    store: Arc<Mutex<VecDeque<RawSample>>>,
    ready_cb: Option<ReadyCallback>,
    shutdown: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    lifecycle: Lifecycle,
}

impl SimulatedContinuousAdc {
    pub fn new(cfg: SimAdcCfg) -> Self {
        Self::with_clock(cfg, Arc::new(MonotonicClock::new()))
    }

    /// Build with an injected clock; frame pacing follows `clock.sleep`.
    pub fn with_clock(cfg: SimAdcCfg, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            cfg,
            clock,
            store: Arc::new(Mutex::new(VecDeque::new())),
            ready_cb: None,
            shutdown: Arc::new(AtomicBool::new(false)),
            worker: None,
            lifecycle: Lifecycle::Created,
        }
    }

    /// Samples currently buffered in the store.
    pub fn buffered(&self) -> usize {
        self.store.lock().map(|q| q.len()).unwrap_or(0)
    }
}

fn waveform_code(waveform: &Waveform, tick: u64) -> u16 {
    match *waveform {
        Waveform::Constant(code) => code,
        Waveform::Ramp { start, step } => start.wrapping_add((tick as u16).wrapping_mul(step)),
        Waveform::Triangle {
            base,
            amplitude,
            period_samples,
        } => {
            let period = u64::from(period_samples.max(2));
            let half = (period / 2).max(1);
            let phase = tick % period;
            let amp = i64::from(amplitude);
            let delta = if phase < half {
                -amp + (2 * amp * phase as i64) / half as i64
            } else {
                amp - (2 * amp * (phase - half) as i64) / half as i64
            };
            (i64::from(base) + delta).clamp(0, i64::from(u16::MAX)) as u16
        }
    }
}

impl SampleSource for SimulatedContinuousAdc {
    fn on_frame_ready(&mut self, cb: ReadyCallback) {
        self.ready_cb = Some(cb);
    }

    fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match self.lifecycle {
            Lifecycle::Created => {}
            Lifecycle::Running | Lifecycle::Stopped => {
                return Err(Box::new(HwError::AlreadyStarted));
            }
            Lifecycle::TornDown => return Err(Box::new(HwError::TornDown)),
        }

        let cfg = self.cfg.clone();
        let clock = self.clock.clone();
        let store = self.store.clone();
        let shutdown = self.shutdown.clone();
        let ready = self.ready_cb.clone();
        let period = util::frame_period(cfg.sample_rate_hz, cfg.samples_per_frame);
        let mask: u16 = ((1u32 << u32::from(cfg.bit_width.min(15))) - 1) as u16;

        let worker = std::thread::Builder::new()
            .name("sim-adc".into())
            .spawn(move || {
                let mut tick: u64 = 0;
                loop {
                    if shutdown.load(Ordering::Relaxed) {
                        tracing::debug!("simulated adc worker received shutdown");
                        break;
                    }
                    clock.sleep(period);
                    if shutdown.load(Ordering::Relaxed) {
                        break;
                    }
                    if let Ok(mut q) = store.lock() {
                        for _ in 0..cfg.samples_per_frame {
                            q.push_back(RawSample {
                                channel: cfg.channel,
                                code: waveform_code(&cfg.waveform, tick) & mask,
                            });
                            tick = tick.wrapping_add(1);
                        }
                        // Flush-on-overflow: oldest unread data goes first.
                        while q.len() > cfg.max_store_samples {
                            q.pop_front();
                        }
                    }
                    if let Some(cb) = &ready {
                        cb();
                    }
                }
                tracing::trace!("simulated adc worker exiting");
            })
            .map_err(HwError::Io)?;

        self.worker = Some(worker);
        self.lifecycle = Lifecycle::Running;
        tracing::info!(
            rate_hz = self.cfg.sample_rate_hz,
            samples_per_frame = self.cfg.samples_per_frame,
            "simulated adc started"
        );
        Ok(())
    }

    fn try_read(
        &mut self,
        out: &mut Vec<RawSample>,
        max_samples: usize,
    ) -> Result<ReadOutcome, Box<dyn std::error::Error + Send + Sync>> {
        match self.lifecycle {
            Lifecycle::Created => return Err(Box::new(HwError::Stopped)),
            Lifecycle::TornDown => return Err(Box::new(HwError::TornDown)),
            Lifecycle::Running | Lifecycle::Stopped => {}
        }
        out.clear();
        let mut q = match self.store.lock() {
            Ok(q) => q,
            Err(_) => {
                return Err(Box::new(HwError::Driver("sample store poisoned".into())));
            }
        };
        let n = q.len().min(max_samples);
        if n == 0 {
            return Ok(ReadOutcome::NoData);
        }
        out.extend(q.drain(..n));
        Ok(ReadOutcome::Samples(n))
    }

    fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.lifecycle != Lifecycle::Running {
            return Err(Box::new(HwError::Stopped));
        }
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                tracing::warn!("simulated adc worker panicked during shutdown");
            }
        }
        self.lifecycle = Lifecycle::Stopped;
        tracing::info!("simulated adc stopped");
        Ok(())
    }

    fn teardown(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match self.lifecycle {
            Lifecycle::Running => {
                return Err(Box::new(HwError::Driver("teardown while running".into())));
            }
            Lifecycle::TornDown => return Err(Box::new(HwError::TornDown)),
            Lifecycle::Created | Lifecycle::Stopped => {}
        }
        if let Ok(mut q) = self.store.lock() {
            q.clear();
        }
        self.lifecycle = Lifecycle::TornDown;
        Ok(())
    }
}

impl Drop for SimulatedContinuousAdc {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                tracing::warn!("simulated adc worker panicked during drop");
            }
        }
    }
}
