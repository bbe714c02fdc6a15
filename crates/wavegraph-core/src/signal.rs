//! Floating-point signal buffer.
//!
//! A [`Signal`] is the value passed between nodes: an ordered run of `f32`
//! samples at [`SAMPLE_RATE`](crate::SAMPLE_RATE). Nodes never mutate an
//! upstream signal; each produces a fresh one.

use crate::samples::SampleBuffer;
use crate::{Error, Result, SAMPLE_RATE_F32};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Ordered sequence of `f32` samples at the engine sample rate.
///
/// # Example
///
/// ```rust
/// use wavegraph_core::Signal;
///
/// let mut signal = Signal::with_len(4).unwrap();
/// signal.set(1, 0.25).unwrap();
/// assert_eq!(signal.get(1), Ok(0.25));
/// assert!(signal.get(4).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    values: Vec<f32>,
}

impl Signal {
    /// Creates an empty signal.
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Creates a zero-filled signal of `len` samples.
    ///
    /// Fails with [`Error::InvalidLength`] when `len` is zero.
    pub fn with_len(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(Error::InvalidLength);
        }
        Ok(Self {
            values: vec![0.0; len],
        })
    }

    /// Zero-filled signal of `len` samples, or an empty one when `len` is zero.
    ///
    /// Used by node operations whose computed output length may legitimately
    /// be zero.
    pub fn zeroed(len: usize) -> Self {
        Self {
            values: vec![0.0; len],
        }
    }

    /// Takes ownership of existing samples.
    ///
    /// Fails with [`Error::EmptyInput`] when `values` is empty.
    pub fn from_values(values: Vec<f32>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(Self { values })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the signal holds no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Duration in seconds at the engine sample rate.
    pub fn duration_secs(&self) -> f32 {
        self.values.len() as f32 / SAMPLE_RATE_F32
    }

    /// Sample at `index`.
    pub fn get(&self, index: usize) -> Result<f32> {
        self.values
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.values.len(),
            })
    }

    /// Overwrites the sample at `index`.
    pub fn set(&mut self, index: usize, value: f32) -> Result<()> {
        let len = self.values.len();
        let slot = self
            .values
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        *slot = value;
        Ok(())
    }

    /// First sample, if any.
    pub fn first(&self) -> Option<f32> {
        self.values.first().copied()
    }

    /// Last sample, if any.
    pub fn last(&self) -> Option<f32> {
        self.values.last().copied()
    }

    /// Borrowed samples.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Mutable samples. The length cannot change through this view.
    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }

    /// Iterator over the samples.
    pub fn iter(&self) -> std::slice::Iter<'_, f32> {
        self.values.iter()
    }

    /// Quantizes to 16-bit PCM.
    ///
    /// Each sample is multiplied by `scale`, clamped to the `i16` range and
    /// truncated toward zero. NaN maps to 0.
    pub fn to_samples(&self, scale: i16) -> SampleBuffer {
        let scale = f32::from(scale);
        let data = self
            .values
            .iter()
            .map(|&v| (v * scale).clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16)
            .collect();
        SampleBuffer::from_vec(data)
    }

    /// Converts PCM samples back to floats as `raw / scale`.
    ///
    /// An empty buffer yields an empty signal.
    pub fn from_samples(samples: &SampleBuffer, scale: i16) -> Self {
        let scale = f32::from(scale);
        let values = samples
            .data()
            .iter()
            .map(|&raw| f32::from(raw) / scale)
            .collect();
        Self { values }
    }

    /// Copies into a buffer whose length is the next power of two.
    ///
    /// A signal whose length is already a power of two is copied unchanged.
    /// New trailing samples are zero. An empty signal stays empty.
    pub fn pad_to_power_of_two(&self) -> Self {
        if self.values.is_empty() {
            return Self::new();
        }
        let mut values = self.values.clone();
        values.resize(self.values.len().next_power_of_two(), 0.0);
        Self { values }
    }

    /// Double-precision copy for numeric-library interop.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.values.iter().copied().map(f64::from).collect()
    }
}

impl Index<usize> for Signal {
    type Output = f32;

    /// Panics when `index` is out of range; use [`Signal::get`] to handle
    /// that case as an error.
    fn index(&self, index: usize) -> &f32 {
        &self.values[index]
    }
}

impl FromIterator<f32> for Signal {
    fn from_iter<I: IntoIterator<Item = f32>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Signal {
    type Item = &'a f32;
    type IntoIter = std::slice::Iter<'a, f32>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
