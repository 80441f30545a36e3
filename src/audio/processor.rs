//! Signal utilities: normalization, sample rescaling, duration conversion

use ndarray::Array2;

/// A duration expressed either in seconds or as a raw sample count.
///
/// The caller states the unit explicitly at the call boundary; there is no
/// ambiguity between a fractional second count and a whole sample count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Duration {
    Seconds(f64),
    Samples(usize),
}

/// Convert a [`Duration`] to a sample count.
///
/// Seconds are converted via `floor(secs * rate)`; a raw sample count is
/// returned unchanged.
pub fn duration_to_samples(dur: Duration, sample_rate: u32) -> usize {
    match dur {
        Duration::Seconds(secs) => (secs * sample_rate as f64) as usize,
        Duration::Samples(n) => n,
    }
}

/// Per-channel min-max normalization to [0, 1].
///
/// Each column (channel) is shifted by its minimum and divided by its
/// peak-to-peak range. A zero-range column divides by zero and produces
/// IEEE NaN; guarding against flat signals is the caller's job.
pub fn normalize(signal: &Array2<f32>) -> Array2<f32> {
    let mut out = signal.clone();
    for mut column in out.columns_mut() {
        let min = column.iter().copied().fold(f32::INFINITY, f32::min);
        let max = column.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let range = max - min;
        column.mapv_inplace(|x| (x - min) / range);
    }
    out
}

/// Single-channel variant of [`normalize`].
pub fn normalize_mono(samples: &[f32]) -> Vec<f32> {
    let min = samples.iter().copied().fold(f32::INFINITY, f32::min);
    let max = samples.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let range = max - min;
    samples.iter().map(|&x| (x - min) / range).collect()
}

/// Rescale normalized [-1, 1] samples to signed 16-bit.
///
/// Multiplies by 32767 and truncates toward zero; values outside [-1, 1]
/// saturate at the i16 limits.
pub fn f32_to_i16(samples: &[f32]) -> Vec<i16> {
    samples.iter().map(|&s| (s * 32767.0) as i16).collect()
}
