pub mod spectrum;

pub use spectrum::{frequency_axis, spectrum, spectrum_channels};
