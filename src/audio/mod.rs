pub mod capture;
pub mod chunker;
pub mod playback;
pub mod processor;

pub use capture::{capture, CaptureConfig};
pub use chunker::{chunk_len_for, chunk_signal, Chunks};
pub use playback::{play_blocking, play_buffer, CancelToken, PlaybackConfig, PlaybackHandle};
pub use processor::{duration_to_samples, f32_to_i16, normalize, normalize_mono, Duration};
