//! Capture a short recording, report its dominant frequency, play it back.
//!
//! Run with `RUST_LOG=tonekit=debug` for chunk-level logging.

use tonekit::{
    capture, play_blocking, spectrum, CancelToken, CaptureConfig, PlaybackConfig, ScopedTimer,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> tonekit::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("tonekit=info".parse().unwrap()))
        .init();

    let config = CaptureConfig::default();

    info!("Recording 2s from the default input device...");
    let samples = {
        let _timer = ScopedTimer::new("capture");
        capture(2.0, &config)?
    };

    let floats: Vec<f32> = samples.iter().map(|&s| s as f32 / 32768.0).collect();
    let (freqs, coefficients) = spectrum(&floats, config.sample_rate)?;

    // Skip the DC bin when looking for the dominant tone
    let peak = coefficients
        .iter()
        .enumerate()
        .skip(1)
        .max_by(|a, b| a.1.norm().total_cmp(&b.1.norm()))
        .map(|(i, _)| i)
        .unwrap_or(0);
    info!("Dominant frequency: {:.1}Hz", freqs[peak]);

    info!("Playing the recording back...");
    let playback = PlaybackConfig {
        channels: config.channels,
        sample_rate: config.sample_rate,
        ..Default::default()
    };
    play_blocking(&samples, &playback, &CancelToken::new())?;

    Ok(())
}
