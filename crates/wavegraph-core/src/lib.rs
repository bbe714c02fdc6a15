//! Wavegraph Core - signal and sample buffer types
//!
//! This crate provides the two value types that flow between nodes of a
//! wavegraph processing graph:
//!
//! - [`Signal`] - `f32` samples at the fixed engine rate, the primary
//!   computation representation
//! - [`SampleBuffer`] - 16-bit PCM integers with an exact little-endian
//!   binary view, used for WAV export and import
//!
//! plus the [`Plot`] visualization feed and the contract [`Error`] raised when
//! a caller violates a constructor or index precondition.
//!
//! # Example
//!
//! ```rust
//! use wavegraph_core::{FULL_SCALE, SampleBuffer, Signal};
//!
//! let signal = Signal::from_values(vec![0.0, 0.5, -0.5, 1.0]).unwrap();
//! let pcm = signal.to_samples(FULL_SCALE);
//! assert_eq!(pcm.data(), &[0, 16383, -16383, 32767]);
//!
//! let bytes = pcm.to_bytes();
//! assert_eq!(SampleBuffer::from_bytes(&bytes), pcm);
//! ```
//!
//! # Sample Rate
//!
//! The engine runs at a single rate, [`SAMPLE_RATE`] (44.1 kHz mono). Every
//! length and time computation in the node library is expressed against it.

mod error;
pub mod plot;
pub mod samples;
pub mod signal;

pub use error::{Error, Result};
pub use plot::Plot;
pub use samples::{SampleBuffer, normalize};
pub use signal::Signal;

/// Engine sample rate in Hz.
pub const SAMPLE_RATE: u32 = 44_100;

/// Engine sample rate as `f32`, for time arithmetic.
pub const SAMPLE_RATE_F32: f32 = SAMPLE_RATE as f32;

/// Bit depth of exported PCM audio.
pub const BITS_PER_SAMPLE: u16 = 16;

/// Default full-scale divisor between [`Signal`] and [`SampleBuffer`] values.
pub const FULL_SCALE: i16 = i16::MAX;

/// Converts a duration in seconds to a sample count at [`SAMPLE_RATE`].
///
/// Rounds to the nearest sample. Negative, NaN, and infinite durations map
/// to zero.
pub fn seconds_to_samples(seconds: f32) -> usize {
    let samples = (f64::from(seconds) * f64::from(SAMPLE_RATE)).round();
    if samples.is_finite() && samples > 0.0 {
        samples as usize
    } else {
        0
    }
}

/// Converts a sample index to its time in seconds at [`SAMPLE_RATE`].
pub fn sample_time(index: usize) -> f32 {
    index as f32 / SAMPLE_RATE_F32
}
