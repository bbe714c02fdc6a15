//! Visualization feed for chart collaborators.
//!
//! A chart receives either a [`SampleBuffer`] or a [`Signal`] and renders it
//! against the implied time axis `index / SAMPLE_RATE`.

use crate::{SampleBuffer, Signal, sample_time};

/// A node output that can be charted.
#[derive(Debug, Clone, Copy)]
pub enum Plot<'a> {
    /// Floating-point signal, plotted as-is.
    Signal(&'a Signal),
    /// PCM samples, plotted as raw integer values.
    Samples(&'a SampleBuffer),
}

impl Plot<'_> {
    /// Number of points.
    pub fn len(&self) -> usize {
        match self {
            Plot::Signal(signal) => signal.len(),
            Plot::Samples(samples) => samples.len(),
        }
    }

    /// Returns true if there is nothing to plot.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(seconds, value)` pairs along the implied time axis.
    pub fn points(&self) -> Vec<(f32, f32)> {
        match self {
            Plot::Signal(signal) => signal
                .iter()
                .enumerate()
                .map(|(i, &v)| (sample_time(i), v))
                .collect(),
            Plot::Samples(samples) => samples
                .data()
                .iter()
                .enumerate()
                .map(|(i, &v)| (sample_time(i), f32::from(v)))
                .collect(),
        }
    }
}
