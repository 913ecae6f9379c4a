//! Small numeric helpers for the acquisition pipeline.

use thermolog_traits::RawSample;

/// Truncating unsigned mean of one batch of codes. Returns `None` for an
/// empty batch, so a reduced statistic can never be built from nothing and
/// the division site is structurally guarded.
#[inline]
pub fn batch_mean(samples: &[RawSample]) -> Option<u32> {
    if samples.is_empty() {
        return None;
    }
    let sum: u64 = samples.iter().map(|s| u64::from(s.code)).sum();
    Some((sum / samples.len() as u64) as u32)
}
