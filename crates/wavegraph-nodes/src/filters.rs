//! Single-input transforms: inversion, gain, time shift and amplitude gates.
//!
//! Every filter returns an empty signal for an empty input.

use wavegraph_core::{SAMPLE_RATE, Signal};

/// Default gain of [`volume`].
pub const DEFAULT_VOLUME: f32 = 0.5;

/// Negates every sample.
pub fn invert(signal: &Signal) -> Signal {
    signal.iter().map(|&v| -v).collect()
}

/// Multiplies every sample by `volume`.
pub fn volume(signal: &Signal, volume: f32) -> Signal {
    signal.iter().map(|&v| v * volume).collect()
}

/// Moves the signal in time by `shift` seconds.
///
/// With `offset = round(shift · 44100)` the output is `len + offset` samples
/// long and `out[i] = in[i - offset]` for every `i` in `offset..len + offset`
/// with `i + offset >= 0`; all other samples are zero. A positive shift
/// therefore prepends silence. A negative shift drops the head of the input
/// and also leaves the first `|offset|` output samples silent. When the
/// output length would be zero or negative, or does not fit in an `i64`, the
/// result is empty.
pub fn time_shift(signal: &Signal, shift: f32) -> Signal {
    if signal.is_empty() {
        return Signal::new();
    }

    let offset = (f64::from(shift) * f64::from(SAMPLE_RATE)).round();
    if !offset.is_finite() {
        return Signal::new();
    }
    let offset = offset as i64;
    let Some(len) = (signal.len() as i64).checked_add(offset) else {
        return Signal::new();
    };
    if len <= 0 {
        return Signal::new();
    }

    let mut out = Signal::zeroed(len as usize);
    let input = signal.values();
    let output = out.values_mut();
    for i in offset..len {
        if i + offset < 0 {
            continue;
        }
        output[i as usize] = input[(i - offset) as usize];
    }
    out
}

/// Passes samples `>= cutoff`, replaces the rest with `floor`.
pub fn amplitude_highpass(signal: &Signal, cutoff: f32, floor: f32) -> Signal {
    signal
        .iter()
        .map(|&v| if v >= cutoff { v } else { floor })
        .collect()
}

/// Passes samples `<= cutoff`, replaces the rest with `floor`.
pub fn amplitude_lowpass(signal: &Signal, cutoff: f32, floor: f32) -> Signal {
    signal
        .iter()
        .map(|&v| if v <= cutoff { v } else { floor })
        .collect()
}
