//! Contract errors for signal and sample buffer operations.

use thiserror::Error;

/// Errors raised when a caller violates a [`Signal`](crate::Signal) or
/// [`SampleBuffer`](crate::SampleBuffer) precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A constructor that requires a positive length was given zero.
    #[error("length must be greater than zero")]
    InvalidLength,

    /// A constructor that requires existing samples was given none.
    #[error("input sequence must not be empty")]
    EmptyInput,

    /// Index outside `[0, len)`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the buffer at the time of access.
        len: usize,
    },
}

/// Convenience result type for contract-checked operations.
pub type Result<T> = std::result::Result<T, Error>;
