//! Node library for the wavegraph engine.
//!
//! Each node is a plain function from inputs to a fresh output; nodes keep
//! no state between calls. The library is grouped the way nodes appear in an
//! editor palette:
//!
//! | Module | Nodes |
//! |--------|-------|
//! | [`generators`] | constant, Int16 extremes, linear/exponential/quadratic ramps, remap, sine/square/sawtooth/triangle tones, white noise |
//! | [`mixers`] | additive, multiply, subtractive, division, modulus, screen, overlay |
//! | [`filters`] | invert, volume, time shift, amplitude high/low pass |
//! | [`spectral`] | packed real FFT and its inverse |
//! | [`input`] | WAV file source |
//! | [`output`] | quantize, play and export sink |
//!
//! Nodes that touch the outside world ([`input::file_in`] and
//! [`output::process`]) never fail. They degrade to an empty result and
//! report through a [`Notifier`].
//!
//! # Example
//!
//! ```rust
//! use wavegraph_core::Signal;
//! use wavegraph_nodes::{filters, generators, mixers};
//! use wavegraph_nodes::generators::ToneSettings;
//!
//! let none = Signal::new();
//! let a = generators::sine_wave(&none, &none, &none, &ToneSettings::default());
//! let b = generators::square_wave(
//!     &none,
//!     &none,
//!     &none,
//!     &ToneSettings { frequency: 523.2, ..Default::default() },
//! );
//! let mixed = filters::volume(&mixers::additive(&a, &b), 0.5);
//! assert_eq!(mixed.len(), 44_100);
//! ```

pub mod filters;
pub mod generators;
pub mod input;
pub mod mixers;
pub mod notify;
pub mod output;
pub mod spectral;

pub use generators::{ToneSettings, Waveform};
pub use mixers::MixMode;
pub use notify::{Feedback, FeedbackLevel, LogNotifier, Notifier};
pub use output::ProcessSettings;
