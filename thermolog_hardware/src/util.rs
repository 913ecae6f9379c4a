//! Timing helpers for the simulated acquisition engine.

use std::time::Duration;

/// Wall-clock period of one conversion frame: `samples_per_frame` samples
/// at `sample_rate_hz`. Clamps the inputs so a degenerate configuration can
/// never yield a zero-length period.
#[inline]
pub fn frame_period(sample_rate_hz: u32, samples_per_frame: usize) -> Duration {
    let rate = u64::from(sample_rate_hz.max(1));
    let samples = samples_per_frame.max(1) as u64;
    let micros = (samples.saturating_mul(1_000_000) / rate).max(1);
    Duration::from_micros(micros)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipping_rate_gives_five_millisecond_frames() {
        assert_eq!(frame_period(20_000, 100), Duration::from_micros(5_000));
    }

    #[test]
    fn single_sample_at_one_hertz_is_one_second() {
        assert_eq!(frame_period(1, 1), Duration::from_secs(1));
    }

    #[test]
    fn degenerate_inputs_are_clamped() {
        assert_eq!(frame_period(0, 0), Duration::from_secs(1));
        assert!(frame_period(u32::MAX, 1) >= Duration::from_micros(1));
    }
}
