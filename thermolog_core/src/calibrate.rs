//! Calibration policies: pure mappings from an averaged raw code to a
//! corrected code, a temperature, and a voltage.
//!
//! Both policies share one signature so the drain loop stays agnostic to
//! which is active; the choice is made once at configuration time.

/// Coefficients for the polynomial-correction policy.
///
/// `corrected = corr_c0 + corr_c1*x + corr_c2*x^2 + corr_c3*x^3` removes the
/// converter's nonlinearity; `temp = temp_c0 + temp_c1*y + temp_c2*y^2` maps
/// the corrected code onto the probe's temperature curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolynomialCoeffs {
    pub corr_c0: f32,
    pub corr_c1: f32,
    pub corr_c2: f32,
    pub corr_c3: f32,
    pub temp_c0: f32,
    pub temp_c1: f32,
    pub temp_c2: f32,
    pub vref_v: f32,
}

impl Default for PolynomialCoeffs {
    fn default() -> Self {
        Self {
            corr_c0: 40.4597,
            corr_c1: 0.976323,
            corr_c2: 0.000163748,
            corr_c3: -1.76614e-7,
            temp_c0: 129.85,
            temp_c1: -0.150499,
            temp_c2: 0.0000343308,
            vref_v: 3.3,
        }
    }
}

/// Coefficients for the linear policy: `temp = x*slope + offset`, no
/// nonlinearity correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearCoeffs {
    pub slope_c_per_code: f32,
    pub offset_c: f32,
    pub vref_v: f32,
}

impl Default for LinearCoeffs {
    fn default() -> Self {
        Self {
            slope_c_per_code: -0.11373,
            offset_c: 121.657,
            vref_v: 3.3,
        }
    }
}

/// The calibration stage selected at configuration time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationPolicy {
    PolynomialCorrection(PolynomialCoeffs),
    Linear(LinearCoeffs),
}

/// Engineering units derived from one reduced statistic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationResult {
    pub corrected_code: f32,
    pub temperature_c: f32,
    pub voltage_v: f32,
}

impl CalibrationPolicy {
    /// Pure, deterministic conversion of an averaged code.
    pub fn calibrate(&self, mean_code: u32, bit_width: u8) -> CalibrationResult {
        let full_scale = (1u32 << u32::from(bit_width)) as f32;
        let x = mean_code as f32;
        match self {
            Self::PolynomialCorrection(c) => {
                let x2 = x * x;
                let x3 = x2 * x;
                let corrected = c.corr_c0 + c.corr_c1 * x + c.corr_c2 * x2 + c.corr_c3 * x3;
                let temperature = c.temp_c0 + c.temp_c1 * corrected + c.temp_c2 * corrected * corrected;
                CalibrationResult {
                    corrected_code: corrected,
                    temperature_c: temperature,
                    voltage_v: corrected * c.vref_v / full_scale,
                }
            }
            Self::Linear(c) => CalibrationResult {
                corrected_code: x,
                temperature_c: x * c.slope_c_per_code + c.offset_c,
                voltage_v: x * c.vref_v / full_scale,
            },
        }
    }

    /// Render the report line for one emission. The corrected code prints
    /// truncated; temperature precision follows the policy (one decimal for
    /// polynomial, integer for linear); voltage always prints four decimals.
    pub fn render_report(&self, mean_code: u32, result: &CalibrationResult) -> String {
        match self {
            Self::PolynomialCorrection(_) => format!(
                "Avg reading: {} corrected {} ({:.1}) [{:.4}V]",
                mean_code, result.corrected_code as u32, result.temperature_c, result.voltage_v
            ),
            Self::Linear(_) => format!(
                "Avg reading: {} ({}) [{:.4}V]",
                mean_code, result.temperature_c as i32, result.voltage_v
            ),
        }
    }
}
