//! 16-bit PCM sample storage.
//!
//! [`SampleBuffer`] holds signed 16-bit integers and offers an exact binary
//! view: `2 × len` bytes, little-endian, no header. This is the payload
//! format of a mono 16-bit WAV `data` chunk.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Normalizes a raw 16-bit sample to `[-1.0, 1.0]`.
///
/// The divisor depends on the sign: non-negative values divide by `32767`,
/// negative values by `32768`. Both extremes therefore land exactly on the
/// unit interval boundary (`32767 → 1.0`, `-32768 → -1.0`) and no input
/// exceeds it.
///
/// ```rust
/// use wavegraph_core::normalize;
///
/// assert_eq!(normalize(i16::MAX), 1.0);
/// assert_eq!(normalize(i16::MIN), -1.0);
/// assert_eq!(normalize(0), 0.0);
/// ```
#[inline]
pub fn normalize(value: i16) -> f32 {
    if value >= 0 {
        f32::from(value) / f32::from(i16::MAX)
    } else {
        f32::from(value) / -(i16::MIN as f32)
    }
}

/// Ordered sequence of signed 16-bit PCM samples.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleBuffer {
    data: Vec<i16>,
}

impl SampleBuffer {
    /// Creates an empty buffer.
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Wraps existing samples.
    pub fn from_vec(data: Vec<i16>) -> Self {
        Self { data }
    }

    /// Decodes little-endian 16-bit samples from `bytes`.
    ///
    /// An odd trailing byte is dropped (`len = bytes.len() / 2`).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let data = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Self { data }
    }

    /// Replaces the contents with samples decoded from `bytes`.
    ///
    /// Same truncation rule as [`from_bytes`](Self::from_bytes).
    pub fn set_bytes(&mut self, bytes: &[u8]) {
        *self = Self::from_bytes(bytes);
    }

    /// Encodes the samples as `2 × len` little-endian bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 2);
        for sample in &self.data {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }
        bytes
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw samples.
    pub fn data(&self) -> &[i16] {
        &self.data
    }

    /// Raw sample at `index`.
    pub fn get(&self, index: usize) -> Result<i16> {
        self.data
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.data.len(),
            })
    }

    /// Sample at `index` normalized to `[-1.0, 1.0]` with [`normalize`].
    pub fn get_float(&self, index: usize) -> Result<f32> {
        self.get(index).map(normalize)
    }

    /// All samples normalized with [`normalize`].
    pub fn to_floats(&self) -> Vec<f32> {
        self.data.iter().copied().map(normalize).collect()
    }
}

impl From<Vec<i16>> for SampleBuffer {
    fn from(data: Vec<i16>) -> Self {
        Self::from_vec(data)
    }
}
