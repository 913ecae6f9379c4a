//! Mapping from validated configuration into core pipeline types.

use crate::calibrate::{CalibrationPolicy, LinearCoeffs, PolynomialCoeffs};
use crate::runner::SessionCfg;
use std::time::Duration;
use thermolog_config::{Config, PolicyKind};

impl From<&Config> for SessionCfg {
    fn from(cfg: &Config) -> Self {
        Self {
            samples_per_read: cfg.adc.samples_per_read,
            bit_width: cfg.adc.bit_width,
            report_interval: Duration::from_millis(cfg.report.interval_ms),
        }
    }
}

/// Build the configured calibration policy with its coefficient set.
pub fn policy_from_config(cfg: &Config) -> CalibrationPolicy {
    let vref_v = cfg.calibration.vref_v;
    match cfg.report.policy {
        PolicyKind::Polynomial => {
            let p = &cfg.calibration.polynomial;
            CalibrationPolicy::PolynomialCorrection(PolynomialCoeffs {
                corr_c0: p.corr_c0,
                corr_c1: p.corr_c1,
                corr_c2: p.corr_c2,
                corr_c3: p.corr_c3,
                temp_c0: p.temp_c0,
                temp_c1: p.temp_c1,
                temp_c2: p.temp_c2,
                vref_v,
            })
        }
        PolicyKind::Linear => {
            let l = &cfg.calibration.linear;
            CalibrationPolicy::Linear(LinearCoeffs {
                slope_c_per_code: l.slope_c_per_code,
                offset_c: l.offset_c,
                vref_v,
            })
        }
    }
}
