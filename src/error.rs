use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum AudioError {
    /// A caller-supplied parameter was out of range (zero chunk length,
    /// non-positive duration, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The audio device failed to open, read, or write
    #[error("Audio device error: {0}")]
    Device(String),

    /// No usable audio backend is present on this machine
    #[error("Audio backend unavailable: {0}")]
    BackendUnavailable(String),
}

pub type Result<T> = std::result::Result<T, AudioError>;
