//! Small audio helpers: blocking microphone capture, chunked playback with
//! coarse cancellation, one-sided spectral analysis, and pure
//! conversion/normalization utilities.
//!
//! All device I/O is synchronous from the caller's perspective; the only
//! non-blocking surface is [`audio::playback::play_buffer`], whose returned
//! handle is the sole synchronization point.

pub mod analysis;
pub mod audio;
pub mod error;
pub mod timing;
pub mod units;

pub use analysis::spectrum::{frequency_axis, spectrum, spectrum_channels};
pub use audio::capture::{capture, CaptureConfig};
pub use audio::chunker::{chunk_len_for, chunk_signal, Chunks};
pub use audio::playback::{
    play_blocking, play_buffer, CancelToken, PlaybackConfig, PlaybackHandle,
};
pub use audio::processor::{duration_to_samples, f32_to_i16, normalize, normalize_mono, Duration};
pub use error::{AudioError, Result};
pub use timing::{timed, ScopedTimer};
