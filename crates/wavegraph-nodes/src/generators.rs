//! Signal generators: constants, ramps, oscillators and noise.
//!
//! Every generator derives its length from a *duration*: the first sample of
//! the length signal when one is connected, otherwise the scalar `length`
//! argument, both in seconds. Lengths are rounded to the nearest sample and
//! a negative or non-finite duration yields an empty signal.
//!
//! Oscillators and noise additionally take a `delay`: the output covers
//! `duration + delay` seconds and samples before `delay` stay silent.
//! Frequency and amplitude may be driven per sample by a signal; a driver
//! shorter than the output holds its last value.

use rand::Rng;
use rand::distributions::{Distribution, Standard};
use std::f64::consts::{PI, TAU};
use wavegraph_core::{SAMPLE_RATE, Signal, seconds_to_samples};

/// Default oscillator frequency in Hz (middle C).
pub const DEFAULT_FREQUENCY: f32 = 261.6;

/// Default oscillator and noise amplitude.
pub const DEFAULT_AMPLITUDE: f32 = 0.5;

/// Default generator duration in seconds.
pub const DEFAULT_LENGTH: f32 = 1.0;

/// Scalar settings shared by the oscillators and the noise source.
///
/// # Example
///
/// ```rust
/// use wavegraph_core::Signal;
/// use wavegraph_nodes::generators::{ToneSettings, sine_wave};
///
/// let none = Signal::new();
/// let settings = ToneSettings { frequency: 440.0, length: 0.5, ..Default::default() };
/// let tone = sine_wave(&none, &none, &none, &settings);
/// assert_eq!(tone.len(), 22_050);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSettings {
    /// Frequency in Hz, used when no frequency signal is connected.
    pub frequency: f32,
    /// Peak amplitude, used when no amplitude signal is connected.
    pub amplitude: f32,
    /// Duration in seconds, used when no length signal is connected.
    pub length: f32,
    /// Leading silence in seconds.
    pub delay: f32,
}

impl Default for ToneSettings {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_FREQUENCY,
            amplitude: DEFAULT_AMPLITUDE,
            length: DEFAULT_LENGTH,
            delay: 0.0,
        }
    }
}

/// Periodic waveform shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Waveform {
    /// `amp · sin(2π f t)`.
    Sine,
    /// Sign of the sine, zero at its zero crossings.
    Square,
    /// Falling ramp built from `atan(cot(π t / period))`.
    Sawtooth,
    /// `asin(sin(..))` fold of the sine.
    Triangle,
}

impl Waveform {
    /// All waveforms, in registry order.
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Sawtooth,
        Waveform::Triangle,
    ];

    /// Lowercase name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Triangle => "triangle",
        }
    }

    /// Parses a waveform name, accepting a few common aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "sine" | "sin" => Some(Waveform::Sine),
            "square" | "sqr" => Some(Waveform::Square),
            "sawtooth" | "saw" => Some(Waveform::Sawtooth),
            "triangle" | "tri" => Some(Waveform::Triangle),
            _ => None,
        }
    }

    /// Value at sample `index` for the given frequency and amplitude.
    pub fn sample(self, index: usize, frequency: f32, amplitude: f32) -> f32 {
        let amp = f64::from(amplitude);
        let freq = f64::from(frequency);
        let x = index as f64 / f64::from(SAMPLE_RATE);
        let value = match self {
            Waveform::Sine => amp * (TAU * freq * x).sin(),
            Waveform::Square => amp * sign((TAU * freq * x).sin()),
            Waveform::Sawtooth => {
                let period = 1.0 / freq;
                (-2.0 * amp / PI) * (1.0 / (PI * x / period).tan()).atan()
            }
            Waveform::Triangle => {
                let period = 1.0 / freq;
                (2.0 * amp / PI) * (TAU / period * x).sin().asin()
            }
        };
        value as f32
    }
}

/// Three-way sign with `sign(0) = 0`; `f64::signum` maps zero to one.
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Linear map of `value` from `[in_low, in_high]` onto `[out_low, out_high]`.
///
/// Not clamped; a degenerate input range follows IEEE-754 division.
#[inline]
pub fn remap_value(value: f32, in_low: f32, in_high: f32, out_low: f32, out_high: f32) -> f32 {
    (value - in_low) / (in_high - in_low) * (out_high - out_low) + out_low
}

/// Duration in seconds: first length-signal sample, else the scalar.
fn duration(len_signal: &Signal, length: f32) -> f32 {
    len_signal.first().unwrap_or(length)
}

/// Driver value at `index`, holding the last sample past the end.
fn driven(driver: &Signal, index: usize, fallback: f32) -> f32 {
    match driver.values() {
        [] => fallback,
        values => values[index.min(values.len() - 1)],
    }
}

/// Fills a fresh signal of `duration` seconds with `f(x)`, `x = i / 44100`.
fn ramp(len_signal: &Signal, length: f32, f: impl Fn(f64) -> f64) -> Signal {
    let len = seconds_to_samples(duration(len_signal, length));
    (0..len)
        .map(|i| f(i as f64 / f64::from(SAMPLE_RATE)) as f32)
        .collect()
}

/// Constant `value` for the whole duration.
pub fn constant(value: f32, len_signal: &Signal, length: f32) -> Signal {
    let len = seconds_to_samples(duration(len_signal, length));
    std::iter::repeat_n(value, len).collect()
}

/// Constant `32767.0` for the whole duration.
pub fn int16_max(len_signal: &Signal, length: f32) -> Signal {
    constant(f32::from(i16::MAX), len_signal, length)
}

/// Constant `-32768.0` for the whole duration.
pub fn int16_min(len_signal: &Signal, length: f32) -> Signal {
    constant(f32::from(i16::MIN), len_signal, length)
}

/// `slope / 44100 · i + y_intercept`.
///
/// `slope` is per second, so the ramp reaches `y_intercept + slope` after one
/// second.
pub fn linear(slope: f32, y_intercept: f32, len_signal: &Signal, length: f32) -> Signal {
    let per_sample = slope / wavegraph_core::SAMPLE_RATE_F32;
    let len = seconds_to_samples(duration(len_signal, length));
    (0..len).map(|i| per_sample * i as f32 + y_intercept).collect()
}

/// `a · bˣ` with `x` in seconds.
pub fn exponential(a: f32, b: f32, len_signal: &Signal, length: f32) -> Signal {
    let (a, b) = (f64::from(a), f64::from(b));
    ramp(len_signal, length, |x| a * b.powf(x))
}

/// `a · x² + b · x` with `x` in seconds.
pub fn quadratic(a: f32, b: f32, len_signal: &Signal, length: f32) -> Signal {
    let (a, b) = (f64::from(a), f64::from(b));
    ramp(len_signal, length, |x| a * x * x + b * x)
}

/// Maps every sample of `signal` from one range onto another.
pub fn remap(signal: &Signal, in_low: f32, in_high: f32, out_low: f32, out_high: f32) -> Signal {
    signal
        .iter()
        .map(|&v| remap_value(v, in_low, in_high, out_low, out_high))
        .collect()
}

/// Silent buffer of `duration + delay` seconds and the first index to write.
fn delayed_buffer(len_signal: &Signal, length: f32, delay: f32) -> (Signal, usize) {
    let total = seconds_to_samples(duration(len_signal, length) + delay);
    let start = seconds_to_samples(delay);
    (Signal::zeroed(total), start)
}

/// Periodic tone of the given shape.
///
/// `freq_signal` and `amp_signal` override the scalar frequency and
/// amplitude per sample when connected.
pub fn oscillator(
    waveform: Waveform,
    freq_signal: &Signal,
    amp_signal: &Signal,
    len_signal: &Signal,
    settings: &ToneSettings,
) -> Signal {
    let (mut signal, start) = delayed_buffer(len_signal, settings.length, settings.delay);
    for (i, out) in signal.values_mut().iter_mut().enumerate().skip(start) {
        let freq = driven(freq_signal, i, settings.frequency);
        let amp = driven(amp_signal, i, settings.amplitude);
        *out = waveform.sample(i, freq, amp);
    }
    signal
}

/// Sine tone.
pub fn sine_wave(
    freq_signal: &Signal,
    amp_signal: &Signal,
    len_signal: &Signal,
    settings: &ToneSettings,
) -> Signal {
    oscillator(Waveform::Sine, freq_signal, amp_signal, len_signal, settings)
}

/// Square tone.
pub fn square_wave(
    freq_signal: &Signal,
    amp_signal: &Signal,
    len_signal: &Signal,
    settings: &ToneSettings,
) -> Signal {
    oscillator(Waveform::Square, freq_signal, amp_signal, len_signal, settings)
}

/// Sawtooth tone.
pub fn sawtooth_wave(
    freq_signal: &Signal,
    amp_signal: &Signal,
    len_signal: &Signal,
    settings: &ToneSettings,
) -> Signal {
    oscillator(Waveform::Sawtooth, freq_signal, amp_signal, len_signal, settings)
}

/// Triangle tone.
pub fn triangle_wave(
    freq_signal: &Signal,
    amp_signal: &Signal,
    len_signal: &Signal,
    settings: &ToneSettings,
) -> Signal {
    oscillator(Waveform::Triangle, freq_signal, amp_signal, len_signal, settings)
}

/// Uniform white noise in `[-amp, amp)`.
///
/// The frequency field of `settings` is ignored. Randomness comes only from
/// `rng`, so a seeded generator reproduces the same signal.
pub fn white_noise<R: Rng + ?Sized>(
    rng: &mut R,
    amp_signal: &Signal,
    len_signal: &Signal,
    settings: &ToneSettings,
) -> Signal {
    let (mut signal, start) = delayed_buffer(len_signal, settings.length, settings.delay);
    for (i, out) in signal.values_mut().iter_mut().enumerate().skip(start) {
        let amp = driven(amp_signal, i, settings.amplitude);
        let u: f32 = Standard.sample(rng);
        *out = remap_value(u, 0.0, 1.0, -amp, amp);
    }
    signal
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn none() -> Signal {
        Signal::new()
    }

    fn secs(values: &[f32]) -> Signal {
        Signal::from_values(values.to_vec()).unwrap()
    }

    #[test]
    fn constant_uses_scalar_length() {
        let s = constant(0.25, &none(), 0.01);
        assert_eq!(s.len(), 441);
        assert!(s.iter().all(|&v| v == 0.25));
    }

    #[test]
    fn length_signal_overrides_scalar() {
        let s = constant(1.0, &secs(&[0.002, 5.0]), 10.0);
        assert_eq!(s.len(), 88);
    }

    #[test]
    fn negative_or_nan_length_is_empty() {
        assert!(constant(1.0, &none(), -1.0).is_empty());
        assert!(constant(1.0, &none(), f32::NAN).is_empty());
        assert!(linear(1.0, 0.0, &none(), 0.0).is_empty());
    }

    #[test]
    fn int16_extremes() {
        let max = int16_max(&none(), 0.001);
        let min = int16_min(&none(), 0.001);
        assert_eq!(max[0], 32767.0);
        assert_eq!(min[0], -32768.0);
        assert_eq!(max.len(), 44);
    }

    #[test]
    fn linear_ramp_reaches_slope_after_one_second() {
        let s = linear(2.0, 1.0, &none(), 1.0);
        assert_eq!(s[0], 1.0);
        let half = s[22_050];
        assert!((half - 2.0).abs() < 1e-4, "half = {half}");
    }

    #[test]
    fn exponential_and_quadratic_use_seconds() {
        let e = exponential(3.0, 2.0, &none(), 1.0);
        assert!((e[0] - 3.0).abs() < 1e-6);
        assert!((e[44_099] - 3.0 * 2f32.powf(44_099.0 / 44_100.0)).abs() < 1e-3);

        let q = quadratic(1.0, 2.0, &none(), 1.0);
        assert_eq!(q[0], 0.0);
        let x = 22_050.0 / 44_100.0;
        assert!((q[22_050] - (x * x + 2.0 * x)).abs() < 1e-5);
    }

    #[test]
    fn remap_maps_endpoints() {
        let s = remap(&secs(&[0.0, 0.5, 1.0]), 0.0, 1.0, -4.0, 4.0);
        assert_eq!(s.values(), &[-4.0, 0.0, 4.0]);
        assert!(remap(&none(), 0.0, 1.0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn sine_quarter_period() {
        let settings = ToneSettings {
            frequency: 441.0,
            amplitude: 0.8,
            length: 0.01,
            delay: 0.0,
        };
        let s = sine_wave(&none(), &none(), &none(), &settings);
        assert_eq!(s.len(), 441);
        assert_eq!(s[0], 0.0);
        // 441 Hz has a period of exactly 100 samples
        assert!((s[25] - 0.8).abs() < 1e-5);
        assert!((s[75] + 0.8).abs() < 1e-5);
    }

    #[test]
    fn a440_one_second() {
        let settings = ToneSettings {
            frequency: 440.0,
            amplitude: 1.0,
            length: 1.0,
            delay: 0.0,
        };
        let s = sine_wave(&none(), &none(), &none(), &settings);
        assert_eq!(s.len(), 44_100);
        for i in [0, 1, 25, 100, 22_050, 44_099] {
            let expected = (2.0 * std::f64::consts::PI * 440.0 * i as f64 / 44_100.0).sin();
            assert!(
                (f64::from(s[i]) - expected).abs() < 1e-6,
                "sample {i}: {} vs {expected}",
                s[i]
            );
        }
    }

    #[test]
    fn square_is_zero_at_crossings() {
        let settings = ToneSettings {
            frequency: 441.0,
            amplitude: 0.5,
            length: 0.01,
            delay: 0.0,
        };
        let s = square_wave(&none(), &none(), &none(), &settings);
        assert_eq!(s[0], 0.0);
        assert_eq!(s[10], 0.5);
        assert_eq!(s[60], -0.5);
        assert!(s.iter().all(|&v| v == 0.0 || v.abs() == 0.5));
    }

    #[test]
    fn sawtooth_and_triangle_stay_within_amplitude() {
        let settings = ToneSettings {
            frequency: 300.0,
            amplitude: 0.7,
            length: 0.05,
            delay: 0.0,
        };
        let saw = sawtooth_wave(&none(), &none(), &none(), &settings);
        let tri = triangle_wave(&none(), &none(), &none(), &settings);
        for v in saw.iter().chain(tri.iter()) {
            assert!(v.abs() <= 0.7 + 1e-5, "out of range: {v}");
        }
        // atan(1 / tan(0)) = π/2
        assert!((saw[0] + 0.7).abs() < 1e-6);
        assert_eq!(tri[0], 0.0);
    }

    #[test]
    fn delay_prefixes_silence() {
        let settings = ToneSettings {
            frequency: 441.0,
            amplitude: 1.0,
            length: 0.01,
            delay: 0.01,
        };
        let s = sine_wave(&none(), &none(), &none(), &settings);
        assert_eq!(s.len(), 882);
        assert!(s.values()[..441].iter().all(|&v| v == 0.0));
        // Phase is absolute, not relative to the delay
        assert!((s[525] - 1.0).abs() < 1e-4);
    }

    #[test]
    fn drivers_hold_last_value() {
        let settings = ToneSettings {
            frequency: 441.0,
            amplitude: 1.0,
            length: 0.01,
            delay: 0.0,
        };
        let amp = secs(&[0.1, 0.2]);
        let s = square_wave(&none(), &amp, &none(), &settings);
        assert_eq!(s[1], 0.2);
        assert_eq!(s[30], 0.2);
        assert_eq!(s[70], -0.2);
    }

    #[test]
    fn frequency_driver_per_sample() {
        let settings = ToneSettings {
            length: 0.001,
            ..Default::default()
        };
        let freq = secs(&[441.0; 44]);
        let driven_tone = sine_wave(&freq, &none(), &none(), &settings);
        let fixed = sine_wave(
            &none(),
            &none(),
            &none(),
            &ToneSettings {
                frequency: 441.0,
                ..settings
            },
        );
        assert_eq!(driven_tone, fixed);
    }

    #[test]
    fn noise_is_seeded_and_bounded() {
        let settings = ToneSettings {
            amplitude: 0.3,
            length: 0.01,
            ..Default::default()
        };
        let a = white_noise(&mut StdRng::seed_from_u64(7), &none(), &none(), &settings);
        let b = white_noise(&mut StdRng::seed_from_u64(7), &none(), &none(), &settings);
        assert_eq!(a, b);
        assert_eq!(a.len(), 441);
        assert!(a.iter().all(|&v| (-0.3..0.3).contains(&v)));
        assert!(a.iter().any(|&v| v != a[0]));
    }

    #[test]
    fn noise_through_dyn_rng() {
        let mut rng = StdRng::seed_from_u64(1);
        let dyn_rng: &mut dyn rand::RngCore = &mut rng;
        let s = white_noise(dyn_rng, &none(), &none(), &ToneSettings::default());
        assert_eq!(s.len(), 44_100);
    }

    #[test]
    fn waveform_names_roundtrip() {
        for w in Waveform::ALL {
            assert_eq!(Waveform::from_name(w.name()), Some(w));
        }
        assert_eq!(Waveform::from_name("SAW"), Some(Waveform::Sawtooth));
        assert_eq!(Waveform::from_name("pulse"), None);
    }
}
