//! Blocking microphone capture
//!
//! One-shot capture from the default input device: the calling thread is
//! suspended for the full duration, then receives the recorded signal as
//! interleaved signed 16-bit samples. The device stream lives entirely
//! inside the call and is released on every exit path.

use crate::audio::processor::f32_to_i16;
use crate::error::{AudioError, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, SampleFormat, SampleRate, StreamConfig};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Abort when the device delivers nothing for this long.
const READ_TIMEOUT: Duration = Duration::from_secs(2);

/// Capture parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Number of input channels
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Frames per device read
    pub chunk_size: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 44100,
            chunk_size: 256,
        }
    }
}

/// Number of device reads performed for a capture of `duration_secs`.
///
/// Truncates, so the captured frame count is `read_count * chunk_size` and
/// can fall short of `sample_rate * duration_secs`. Callers that need the
/// exact count depend on this formula staying as-is.
pub fn read_count(sample_rate: u32, chunk_size: u32, duration_secs: f64) -> usize {
    (sample_rate as f64 / chunk_size as f64 * duration_secs) as usize
}

/// Record from the default input device for `duration_secs` seconds.
///
/// Returns exactly `read_count(rate, chunk, duration) * chunk_size` frames
/// of interleaved i16 samples. Fails with [`AudioError::Device`] if the
/// device cannot be opened or the stream reports an error mid-capture;
/// partially captured data is discarded.
pub fn capture(duration_secs: f64, config: &CaptureConfig) -> Result<Vec<i16>> {
    if !(duration_secs > 0.0) {
        return Err(AudioError::InvalidArgument(
            "duration must be positive".into(),
        ));
    }
    if config.channels == 0 {
        return Err(AudioError::InvalidArgument(
            "channel count must be at least 1".into(),
        ));
    }
    if config.sample_rate == 0 || config.chunk_size == 0 {
        return Err(AudioError::InvalidArgument(
            "sample rate and chunk size must be positive".into(),
        ));
    }

    let reads = read_count(config.sample_rate, config.chunk_size, duration_secs);
    let total_samples = reads * config.chunk_size as usize * config.channels as usize;

    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or_else(|| AudioError::Device("no default input device".into()))?;

    let supported = device
        .default_input_config()
        .map_err(|e| AudioError::Device(e.to_string()))?;

    let stream_config = StreamConfig {
        channels: config.channels,
        sample_rate: SampleRate(config.sample_rate),
        buffer_size: BufferSize::Fixed(config.chunk_size),
    };

    info!(
        "Capturing {} reads of {} frames at {}Hz ({} channels)",
        reads, config.chunk_size, config.sample_rate, config.channels
    );

    let (tx, rx) = mpsc::channel::<Vec<i16>>();

    // A stream error mid-capture lands here; the receive loop checks it
    // before every read.
    let error_slot: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let err_slot = Arc::clone(&error_slot);
    let err_fn = move |err: cpal::StreamError| {
        warn!("Input stream error: {}", err);
        *err_slot.lock() = Some(err.to_string());
    };

    let stream = match supported.sample_format() {
        SampleFormat::I16 => build_stream_i16(&device, &stream_config, tx, err_fn)?,
        SampleFormat::F32 => build_stream_f32(&device, &stream_config, tx, err_fn)?,
        other => {
            return Err(AudioError::Device(format!(
                "unsupported sample format {other:?}"
            )))
        }
    };

    stream
        .play()
        .map_err(|e| AudioError::Device(e.to_string()))?;

    let mut samples: Vec<i16> = Vec::with_capacity(total_samples);
    while samples.len() < total_samples {
        if let Some(msg) = error_slot.lock().take() {
            return Err(AudioError::Device(msg));
        }
        match rx.recv_timeout(READ_TIMEOUT) {
            Ok(block) => samples.extend_from_slice(&block),
            Err(RecvTimeoutError::Timeout) => {
                return Err(AudioError::Device("input stream stalled".into()));
            }
            Err(RecvTimeoutError::Disconnected) => {
                return Err(AudioError::Device(
                    "input stream closed unexpectedly".into(),
                ));
            }
        }
    }

    // Pause before dropping so the device stops delivering into a dead
    // callback.
    if let Err(e) = stream.pause() {
        warn!("Failed to pause input stream: {}", e);
    }
    drop(stream);

    // The device may deliver past the requested total; the contract is an
    // exact sample count.
    samples.truncate(total_samples);

    info!("Captured {} samples", samples.len());
    Ok(samples)
}

fn build_stream_i16<E>(
    device: &cpal::Device,
    config: &StreamConfig,
    tx: Sender<Vec<i16>>,
    err_fn: E,
) -> Result<cpal::Stream>
where
    E: FnMut(cpal::StreamError) + Send + 'static,
{
    device
        .build_input_stream(
            config,
            move |data: &[i16], _: &cpal::InputCallbackInfo| {
                let _ = tx.send(data.to_vec());
            },
            err_fn,
            None,
        )
        .map_err(|e| AudioError::Device(e.to_string()))
}

fn build_stream_f32<E>(
    device: &cpal::Device,
    config: &StreamConfig,
    tx: Sender<Vec<i16>>,
    err_fn: E,
) -> Result<cpal::Stream>
where
    E: FnMut(cpal::StreamError) + Send + 'static,
{
    device
        .build_input_stream(
            config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                let _ = tx.send(f32_to_i16(data));
            },
            err_fn,
            None,
        )
        .map_err(|e| AudioError::Device(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_count_truncates() {
        // floor(44100 / 256 * 1) = 172 reads -> 44032 frames, not 44100
        assert_eq!(read_count(44100, 256, 1.0), 172);
        assert_eq!(read_count(44100, 256, 1.0) * 256, 44032);

        // Exact division keeps the full duration
        assert_eq!(read_count(44100, 441, 1.0), 100);
        assert_eq!(read_count(16000, 256, 2.0), 125);
    }

    #[test]
    fn test_read_count_short_duration() {
        // Shorter than one chunk: zero reads
        assert_eq!(read_count(44100, 4096, 0.05), 0);
    }

    #[test]
    fn test_capture_rejects_bad_arguments() {
        let config = CaptureConfig::default();
        assert!(matches!(
            capture(0.0, &config),
            Err(AudioError::InvalidArgument(_))
        ));
        assert!(matches!(
            capture(-1.0, &config),
            Err(AudioError::InvalidArgument(_))
        ));

        let config = CaptureConfig {
            chunk_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            capture(1.0, &config),
            Err(AudioError::InvalidArgument(_))
        ));

        let config = CaptureConfig {
            channels: 0,
            ..Default::default()
        };
        assert!(matches!(
            capture(1.0, &config),
            Err(AudioError::InvalidArgument(_))
        ));
    }
}
