#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Acquisition pipeline core (hardware-agnostic).
//!
//! All hardware interaction goes through `thermolog_traits::SampleSource`;
//! the source's production context signals frame readiness, and a single
//! consumer task drains, reduces, calibrates, and reports.
//!
//! ## Architecture
//!
//! - **Signal**: single-slot, coalescing wake primitive bridging the
//!   producer context to the consumer task (`signal` module)
//! - **Drain**: explicit Idle/Draining state machine pulling batches until
//!   the source runs dry (`drain` module)
//! - **Calibration**: pluggable polynomial-correction / linear policies
//!   mapping an averaged code to temperature and voltage (`calibrate`)
//! - **Pacing**: fixed-interval emission gate decoupled from batch arrival
//!   rate (`pacer` module)
//! - **Session**: start/drain/stop/teardown orchestration with shutdown
//!   plumbing (`runner` module)

pub mod calibrate;
pub mod conversions;
pub mod drain;
pub mod error;
pub mod mocks;
pub mod pacer;
pub mod runner;
pub mod signal;
pub mod util;

pub use calibrate::{CalibrationPolicy, CalibrationResult, LinearCoeffs, PolynomialCoeffs};
pub use drain::{DrainLoop, DrainState, DrainStep};
pub use error::{AcquireError, Result};
pub use pacer::ReportPacer;
pub use runner::{AcquisitionSession, SessionCfg, ShutdownHandle};
pub use signal::ReadySignal;
