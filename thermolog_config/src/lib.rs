#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas and validation for the acquisition pipeline.
//!
//! All sections carry defaults matching the shipping configuration, so an
//! absent or partial TOML file yields a runnable setup. `Config::validate`
//! performs the static capability checks (most importantly the sampling-rate
//! band) so that a bad configuration is rejected before the source is ever
//! started.

use serde::Deserialize;
use thermolog_traits::{SAMPLE_RATE_HZ_MAX, SAMPLE_RATE_HZ_MIN};
use thiserror::Error;

/// A configuration the acquisition engine cannot honor. Always fatal;
/// values are rejected, never clamped.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("adc.sample_rate_hz {hz} is outside the supported range [{min}, {max}] Hz")]
    SampleRateOutOfRange { hz: u32, min: u32, max: u32 },
    #[error("adc.samples_per_read must be >= 1")]
    ZeroSamplesPerRead,
    #[error(
        "adc.samples_per_read ({samples_per_read}) exceeds adc.max_store_samples ({max_store_samples})"
    )]
    ReadLargerThanStore {
        samples_per_read: usize,
        max_store_samples: usize,
    },
    #[error("adc.bit_width {0} is unsupported (expected 9..=12)")]
    UnsupportedBitWidth(u8),
    #[error("report.interval_ms must be >= 1")]
    ZeroReportInterval,
    #[error("calibration.vref_v must be a finite, positive voltage (got {0})")]
    InvalidVref(f32),
    #[error("calibration coefficient {0} must be finite")]
    NonFiniteCoefficient(&'static str),
}

/// Acquisition channel setup. `channel`, `unit`, and `attenuation_db`
/// describe the analog frontend and are passed through to the source
/// driver; the remaining fields shape the digital pipeline.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AdcCfg {
    pub channel: u8,
    pub unit: u8,
    pub attenuation_db: u8,
    /// Conversion resolution in bits; codes span [0, 2^bit_width).
    pub bit_width: u8,
    pub sample_rate_hz: u32,
    /// Upper bound on samples pulled per drain iteration.
    pub samples_per_read: usize,
    /// Capacity of the source's internal store; oldest samples are
    /// discarded once it fills.
    pub max_store_samples: usize,
}

impl Default for AdcCfg {
    fn default() -> Self {
        Self {
            channel: 6,
            unit: 1,
            attenuation_db: 12,
            bit_width: 10,
            sample_rate_hz: 20_000,
            samples_per_read: 100,
            max_store_samples: 512,
        }
    }
}

/// Which calibration mapping converts averaged codes to engineering units.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Cubic nonlinearity correction followed by a quadratic temperature
    /// curve.
    #[default]
    Polynomial,
    /// Straight slope/offset mapping of the raw mean.
    Linear,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ReportCfg {
    /// Minimum spacing between emitted reports, in milliseconds.
    pub interval_ms: u64,
    pub policy: PolicyKind,
}

impl Default for ReportCfg {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            policy: PolicyKind::Polynomial,
        }
    }
}

/// Coefficients for the polynomial-correction policy:
/// `corrected = corr_c0 + corr_c1*x + corr_c2*x^2 + corr_c3*x^3`,
/// `temp = temp_c0 + temp_c1*corrected + temp_c2*corrected^2`.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct PolynomialCal {
    pub corr_c0: f32,
    pub corr_c1: f32,
    pub corr_c2: f32,
    pub corr_c3: f32,
    pub temp_c0: f32,
    pub temp_c1: f32,
    pub temp_c2: f32,
}

impl Default for PolynomialCal {
    fn default() -> Self {
        Self {
            corr_c0: 40.4597,
            corr_c1: 0.976323,
            corr_c2: 0.000163748,
            corr_c3: -1.76614e-7,
            temp_c0: 129.85,
            temp_c1: -0.150499,
            temp_c2: 0.0000343308,
        }
    }
}

/// Coefficients for the linear policy: `temp = x*slope + offset`.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct LinearCal {
    pub slope_c_per_code: f32,
    pub offset_c: f32,
}

impl Default for LinearCal {
    fn default() -> Self {
        Self {
            slope_c_per_code: -0.11373,
            offset_c: 121.657,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CalibrationCfg {
    /// Reference voltage used for code-to-volts conversion.
    pub vref_v: f32,
    pub polynomial: PolynomialCal,
    pub linear: LinearCal,
}

impl Default for CalibrationCfg {
    fn default() -> Self {
        Self {
            vref_v: 3.3,
            polynomial: PolynomialCal::default(),
            linear: LinearCal::default(),
        }
    }
}

impl CalibrationCfg {
    fn named_coefficients(&self) -> [(&'static str, f32); 9] {
        let p = &self.polynomial;
        let l = &self.linear;
        [
            ("polynomial.corr_c0", p.corr_c0),
            ("polynomial.corr_c1", p.corr_c1),
            ("polynomial.corr_c2", p.corr_c2),
            ("polynomial.corr_c3", p.corr_c3),
            ("polynomial.temp_c0", p.temp_c0),
            ("polynomial.temp_c1", p.temp_c1),
            ("polynomial.temp_c2", p.temp_c2),
            ("linear.slope_c_per_code", l.slope_c_per_code),
            ("linear.offset_c", l.offset_c),
        ]
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Logging {
    /// Path to a JSON-lines log file; stderr only when absent.
    pub file: Option<String>,
    /// "error" | "warn" | "info" | "debug" | "trace"
    pub level: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub adc: AdcCfg,
    pub report: ReportCfg,
    pub calibration: CalibrationCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    /// Static capability checks, performed once at configuration time.
    /// A rejected configuration must never reach `SampleSource::start`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(SAMPLE_RATE_HZ_MIN..=SAMPLE_RATE_HZ_MAX).contains(&self.adc.sample_rate_hz) {
            return Err(ConfigError::SampleRateOutOfRange {
                hz: self.adc.sample_rate_hz,
                min: SAMPLE_RATE_HZ_MIN,
                max: SAMPLE_RATE_HZ_MAX,
            });
        }
        if self.adc.samples_per_read == 0 {
            return Err(ConfigError::ZeroSamplesPerRead);
        }
        if self.adc.samples_per_read > self.adc.max_store_samples {
            return Err(ConfigError::ReadLargerThanStore {
                samples_per_read: self.adc.samples_per_read,
                max_store_samples: self.adc.max_store_samples,
            });
        }
        if !(9..=12).contains(&self.adc.bit_width) {
            return Err(ConfigError::UnsupportedBitWidth(self.adc.bit_width));
        }
        if self.report.interval_ms == 0 {
            return Err(ConfigError::ZeroReportInterval);
        }
        let vref = self.calibration.vref_v;
        if !vref.is_finite() || vref <= 0.0 {
            return Err(ConfigError::InvalidVref(vref));
        }
        for (name, value) in self.calibration.named_coefficients() {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteCoefficient(name));
            }
        }
        Ok(())
    }
}
