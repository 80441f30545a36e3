//! One-sided spectral analysis
//!
//! Raw forward DFT of a real-valued signal, truncated to the non-redundant
//! half (conjugate symmetry). No windowing, no zero-padding, no
//! normalization by length: the coefficients follow the un-normalized
//! forward transform convention.

use crate::error::{AudioError, Result};
use ndarray::{Array2, ArrayView2};
use rustfft::{num_complex::Complex, FftPlanner};

/// Frequency axis for an N-frame signal: `N/2 + 1` evenly spaced points
/// from 0 to `sample_rate / 2` inclusive.
pub fn frequency_axis(frame_count: usize, sample_rate: u32) -> Vec<f32> {
    let bins = frame_count / 2 + 1;
    if bins == 1 {
        return vec![0.0];
    }
    let step = sample_rate as f32 / 2.0 / (bins - 1) as f32;
    (0..bins).map(|i| i as f32 * step).collect()
}

/// One-sided spectrum of a mono signal.
///
/// Returns the frequency axis and the first `N/2 + 1` DFT coefficients.
/// An empty signal fails with [`AudioError::InvalidArgument`].
pub fn spectrum(samples: &[f32], sample_rate: u32) -> Result<(Vec<f32>, Vec<Complex<f32>>)> {
    if samples.is_empty() {
        return Err(AudioError::InvalidArgument("signal is empty".into()));
    }

    let n = samples.len();
    let bins = n / 2 + 1;

    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(n);

    let mut buffer: Vec<Complex<f32>> =
        samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
    fft.process(&mut buffer);
    buffer.truncate(bins);

    Ok((frequency_axis(n, sample_rate), buffer))
}

/// One-sided spectrum of a multi-channel signal indexed `[frame, channel]`.
///
/// Each channel is transformed independently; the coefficient array is
/// indexed `[bin, channel]`.
pub fn spectrum_channels(
    signal: ArrayView2<'_, f32>,
    sample_rate: u32,
) -> Result<(Vec<f32>, Array2<Complex<f32>>)> {
    let (frames, channels) = signal.dim();
    if frames == 0 || channels == 0 {
        return Err(AudioError::InvalidArgument("signal is empty".into()));
    }

    let bins = frames / 2 + 1;
    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(frames);

    let mut coefficients = Array2::<Complex<f32>>::zeros((bins, channels));
    let mut buffer = vec![Complex::new(0.0f32, 0.0); frames];

    for (ch, column) in signal.columns().into_iter().enumerate() {
        for (dst, &src) in buffer.iter_mut().zip(column.iter()) {
            *dst = Complex::new(src, 0.0);
        }
        fft.process(&mut buffer);
        for (bin, c) in buffer.iter().take(bins).enumerate() {
            coefficients[[bin, ch]] = *c;
        }
    }

    Ok((frequency_axis(frames, sample_rate), coefficients))
}
