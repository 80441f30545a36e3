//! Audio playback
//!
//! Two deliberately separate paths:
//!
//! 1. [`play_blocking`] writes the signal to the output device in 500 ms
//!    chunks and checks a [`CancelToken`] between writes, so a cancellation
//!    request takes effect within one chunk duration.
//! 2. [`play_buffer`] submits the whole buffer at once and returns a
//!    [`PlaybackHandle`] immediately; the handle is the only way to wait
//!    for completion.

use crate::audio::chunker::{chunk_len_for, chunk_signal};
use crate::audio::processor::f32_to_i16;
use crate::error::{AudioError, Result};
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, Sink, StreamError};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Playback parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Number of output channels in the interleaved signal
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Chunk duration for the blocking path, in milliseconds
    pub chunk_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 44100,
            chunk_ms: 500,
        }
    }
}

/// Cooperative cancellation flag for [`play_blocking`].
///
/// Clone it, hand one copy to the playing thread and keep the other;
/// `cancel()` takes effect at the next chunk boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// In-flight non-blocking playback.
///
/// Owns the output stream; dropping the handle cuts playback short.
pub struct PlaybackHandle {
    _stream: OutputStream,
    sink: Sink,
}

impl PlaybackHandle {
    /// Block until the device reports the buffer fully played.
    pub fn wait_until_done(&self) {
        self.sink.sleep_until_end();
    }

    /// Whether the submitted buffer has finished playing.
    pub fn is_done(&self) -> bool {
        self.sink.empty()
    }

    /// Abort playback immediately.
    pub fn stop(&self) {
        self.sink.stop();
    }
}

/// Play an interleaved i16 signal, blocking until done or cancelled.
///
/// The signal is segmented into `config.chunk_ms` chunks and written to the
/// device one chunk at a time; `cancel` is consulted between writes. A
/// cancelled playback stops the sink and returns `Ok(())`.
pub fn play_blocking(
    samples: &[i16],
    config: &PlaybackConfig,
    cancel: &CancelToken,
) -> Result<()> {
    validate(config)?;
    let chunk_len = chunk_len_for(config.sample_rate, config.channels, config.chunk_ms);
    if chunk_len == 0 {
        return Err(AudioError::InvalidArgument(
            "chunk duration must cover at least one frame".into(),
        ));
    }

    let (_stream, sink) = open_sink()?;
    info!(
        "Playing {} samples at {}Hz in {}ms chunks",
        samples.len(),
        config.sample_rate,
        config.chunk_ms
    );

    for chunk in chunk_signal(samples, chunk_len)? {
        if cancel.is_cancelled() {
            sink.stop();
            debug!("Playback cancelled");
            return Ok(());
        }
        sink.append(SamplesBuffer::new(
            config.channels,
            config.sample_rate,
            chunk.to_vec(),
        ));
        sink.sleep_until_end();
    }

    Ok(())
}

/// Submit a normalized f32 signal for playback and return immediately.
///
/// Samples are rescaled from [-1, 1] to i16 (x32767, truncating) before
/// submission. Use [`PlaybackHandle::wait_until_done`] to block on
/// completion.
pub fn play_buffer(samples: &[f32], config: &PlaybackConfig) -> Result<PlaybackHandle> {
    validate(config)?;

    let (stream, sink) = open_sink()?;
    info!(
        "Submitting {} samples at {}Hz for background playback",
        samples.len(),
        config.sample_rate
    );

    sink.append(SamplesBuffer::new(
        config.channels,
        config.sample_rate,
        f32_to_i16(samples),
    ));

    Ok(PlaybackHandle {
        _stream: stream,
        sink,
    })
}

fn validate(config: &PlaybackConfig) -> Result<()> {
    if config.channels == 0 {
        return Err(AudioError::InvalidArgument(
            "channel count must be at least 1".into(),
        ));
    }
    if config.sample_rate == 0 {
        return Err(AudioError::InvalidArgument(
            "sample rate must be positive".into(),
        ));
    }
    Ok(())
}

fn open_sink() -> Result<(OutputStream, Sink)> {
    let (stream, handle) = OutputStream::try_default().map_err(|e| match e {
        StreamError::NoDevice => {
            AudioError::BackendUnavailable("no audio output device".into())
        }
        other => AudioError::Device(other.to_string()),
    })?;
    let sink = Sink::try_new(&handle).map_err(|e| AudioError::Device(e.to_string()))?;
    Ok((stream, sink))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_token_starts_clear() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancel_token_is_shared_across_clones() {
        let token = CancelToken::new();
        let other = token.clone();
        other.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_default_chunk_bounds_cancellation_latency() {
        let config = PlaybackConfig::default();
        // 500ms of mono audio at 44100Hz
        assert_eq!(
            chunk_len_for(config.sample_rate, config.channels, config.chunk_ms),
            22050
        );
    }

    #[test]
    fn test_validate_rejects_degenerate_configs() {
        let bad = PlaybackConfig {
            channels: 0,
            ..Default::default()
        };
        assert!(validate(&bad).is_err());

        let bad = PlaybackConfig {
            sample_rate: 0,
            ..Default::default()
        };
        assert!(validate(&bad).is_err());
    }
}
