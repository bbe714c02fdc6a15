//! End-to-end tests chaining nodes the way an executor would.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;
use wavegraph_core::{FULL_SCALE, Signal};
use wavegraph_io::NullPlayback;
use wavegraph_nodes::generators::{self, ToneSettings};
use wavegraph_nodes::{Feedback, MixMode, ProcessSettings, filters, input, mixers, output, spectral};

fn none() -> Signal {
    Signal::new()
}

// ---------------------------------------------------------------------------
// Graph-shaped pipelines
// ---------------------------------------------------------------------------

#[test]
fn tone_plus_noise_exports_readable_wav() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mix.wav");

    let tone = generators::sine_wave(
        &none(),
        &none(),
        &none(),
        &ToneSettings {
            frequency: 440.0,
            amplitude: 0.4,
            length: 0.1,
            delay: 0.0,
        },
    );
    let noise = generators::white_noise(
        &mut StdRng::seed_from_u64(42),
        &none(),
        &none(),
        &ToneSettings {
            amplitude: 0.1,
            length: 0.1,
            ..Default::default()
        },
    );
    let mixed = mixers::additive(&tone, &noise);
    let shifted = filters::time_shift(&mixed, 0.01);

    let settings = ProcessSettings {
        play: false,
        path: path.clone(),
        ..Default::default()
    };
    let mut seen: Vec<Feedback> = Vec::new();
    let samples = output::process(Some(&shifted), &settings, &mut NullPlayback, &mut seen);
    assert!(seen.is_empty());
    assert_eq!(samples.len(), 4410 + 441);

    let mut reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.spec().sample_rate, 44_100);
    let decoded: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
    assert_eq!(decoded, samples.data());
    assert!(decoded[..441].iter().all(|&v| v == 0));
}

#[test]
fn exported_file_reloads_through_file_in() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ramp.wav");

    let ramp = generators::linear(1.0, -0.5, &none(), 0.01);
    let settings = ProcessSettings {
        play: false,
        path: path.clone(),
        ..Default::default()
    };
    let mut seen: Vec<Feedback> = Vec::new();
    output::process(Some(&ramp), &settings, &mut NullPlayback, &mut seen);

    let reloaded = input::file_in(&path, &mut seen);
    assert!(seen.is_empty());
    assert_eq!(reloaded.len(), ramp.len());
    for (a, b) in ramp.iter().zip(reloaded.iter()) {
        assert!((a - b).abs() <= 1.0 / 32767.0 + f32::EPSILON);
    }
}

#[test]
fn length_signal_drives_tone_duration() {
    let len = generators::constant(0.02, &none(), 0.001);
    let tone = generators::triangle_wave(&none(), &none(), &len, &ToneSettings::default());
    assert_eq!(tone.len(), 882);
}

#[test]
fn ramp_as_frequency_driver() {
    let sweep = generators::linear(1000.0, 100.0, &none(), 0.05);
    let tone = generators::sine_wave(
        &sweep,
        &none(),
        &none(),
        &ToneSettings {
            length: 0.1,
            ..Default::default()
        },
    );
    assert_eq!(tone.len(), 4410);
    assert!(tone.iter().all(|v| v.abs() <= 0.5 + 1e-6));
}

#[test]
fn gate_after_invert() {
    let s = Signal::from_values(vec![-0.8, -0.2, 0.2, 0.8]).unwrap();
    let gated = filters::amplitude_highpass(&filters::invert(&s), 0.0, 0.0);
    assert_eq!(gated.values(), &[0.8, 0.2, 0.0, 0.0]);
}

#[test]
fn spectral_roundtrip_of_generated_tone() {
    let tone = generators::sawtooth_wave(
        &none(),
        &none(),
        &none(),
        &ToneSettings {
            frequency: 220.0,
            length: 0.02,
            ..Default::default()
        },
    );
    let spectrum = spectral::forward_fft(&tone.pad_to_power_of_two());
    assert_eq!(spectrum.len(), 1024 + 2);
    let back = spectral::inverse_fft(&spectrum);
    for (a, b) in tone.iter().zip(back.iter()) {
        assert!((a - b).abs() < 1e-3);
    }
}

#[test]
fn quantization_at_full_scale_matches_sink() {
    let s = generators::constant(0.25, &none(), 0.001);
    let settings = ProcessSettings {
        play: false,
        export: false,
        ..Default::default()
    };
    let mut seen: Vec<Feedback> = Vec::new();
    let out = output::process(Some(&s), &settings, &mut NullPlayback, &mut seen);
    assert_eq!(out, s.to_samples(FULL_SCALE));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn signal_strategy() -> impl Strategy<Value = Signal> {
    prop::collection::vec(-2.0f32..2.0, 1..=200).prop_map(|v| Signal::from_values(v).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn mixer_length_is_max(a in signal_strategy(), b in signal_strategy()) {
        for mode in MixMode::ALL {
            prop_assert_eq!(mixers::mix(&a, &b, mode).len(), a.len().max(b.len()));
        }
    }

    #[test]
    fn additive_is_commutative(a in signal_strategy(), b in signal_strategy()) {
        prop_assert_eq!(mixers::additive(&a, &b), mixers::additive(&b, &a));
    }

    #[test]
    fn fft_roundtrip(s in signal_strategy()) {
        let back = spectral::inverse_fft(&spectral::forward_fft(&s));
        prop_assert_eq!(back.len(), s.len());
        for (a, b) in s.iter().zip(back.iter()) {
            prop_assert!((a - b).abs() < 1e-3, "{} vs {}", a, b);
        }
    }

    #[test]
    fn gates_only_emit_passed_or_floor(s in signal_strategy(), cutoff in -1.0f32..1.0, floor in -1.0f32..1.0) {
        let hp = filters::amplitude_highpass(&s, cutoff, floor);
        let lp = filters::amplitude_lowpass(&s, cutoff, floor);
        for ((&v, &h), &l) in s.iter().zip(hp.iter()).zip(lp.iter()) {
            prop_assert!(if v >= cutoff { h == v } else { h == floor }, "highpass: v={} h={}", v, h);
            prop_assert!(if v <= cutoff { l == v } else { l == floor }, "lowpass: v={} l={}", v, l);
        }
    }

    #[test]
    fn positive_time_shift_preserves_tail(s in signal_strategy(), samples in 0usize..100) {
        let shifted = filters::time_shift(&s, samples as f32 / 44_100.0);
        prop_assert_eq!(shifted.len(), s.len() + samples);
        prop_assert_eq!(&shifted.values()[samples..], s.values());
    }
}
