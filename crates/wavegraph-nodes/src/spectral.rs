//! Real-signal FFT in packed layout.
//!
//! A signal of `n` samples transforms into `n + 2` values holding the
//! non-negative frequency bins as interleaved pairs:
//!
//! ```text
//! [Re0, Im0, Re1, Im1, ..., Re(n/2), Im(n/2)]
//! ```
//!
//! For odd `n` the last pair slot is left at zero. Both directions scale by
//! `1/√n`, so [`inverse_fft`] undoes [`forward_fft`] up to rounding.

use rustfft::FftPlanner;
use rustfft::num_complex::Complex;
use wavegraph_core::Signal;

/// Forward transform of a real signal into the packed `n + 2` layout.
///
/// An empty signal yields an empty spectrum.
pub fn forward_fft(signal: &Signal) -> Signal {
    let n = signal.len();
    if n == 0 {
        return Signal::new();
    }

    let mut buffer: Vec<Complex<f32>> = signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(n).process(&mut buffer);

    let scale = 1.0 / (n as f32).sqrt();
    let mut packed = vec![0.0; n + 2];
    for (k, bin) in buffer.iter().take(n / 2 + 1).enumerate() {
        packed[2 * k] = bin.re * scale;
        packed[2 * k + 1] = bin.im * scale;
    }
    packed.into_iter().collect()
}

/// Inverse transform of a packed spectrum with `m` slots into `m - 2` samples.
///
/// The negative-frequency half is rebuilt by conjugate symmetry and only the
/// real part of the result is kept. Spectra of two slots or fewer yield an
/// empty signal.
pub fn inverse_fft(spectrum: &Signal) -> Signal {
    let m = spectrum.len();
    if m <= 2 {
        return Signal::new();
    }
    let n = m - 2;
    let packed = spectrum.values();

    let bin = |k: usize| Complex::new(packed[2 * k], packed[2 * k + 1]);
    let mut buffer = vec![Complex::new(0.0f32, 0.0); n];
    for k in 0..=n / 2 {
        buffer[k] = bin(k);
    }
    for k in n / 2 + 1..n {
        buffer[k] = bin(n - k).conj();
    }

    let mut planner = FftPlanner::new();
    planner.plan_fft_inverse(n).process(&mut buffer);

    let scale = 1.0 / (n as f32).sqrt();
    buffer.iter().map(|c| c.re * scale).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn sig(values: &[f32]) -> Signal {
        Signal::from_values(values.to_vec()).unwrap()
    }

    #[test]
    fn empty_in_empty_out() {
        assert!(forward_fft(&Signal::new()).is_empty());
        assert!(inverse_fft(&Signal::new()).is_empty());
        assert!(inverse_fft(&sig(&[1.0, 0.0])).is_empty());
    }

    #[test]
    fn forward_has_two_extra_slots() {
        assert_eq!(forward_fft(&sig(&[0.0; 8])).len(), 10);
        assert_eq!(forward_fft(&sig(&[0.0; 7])).len(), 9);
    }

    #[test]
    fn impulse_has_flat_spectrum() {
        let mut values = vec![0.0; 16];
        values[0] = 1.0;
        let spectrum = forward_fft(&sig(&values));
        let expected = 1.0 / 4.0;
        for k in 0..=8 {
            assert!((spectrum[2 * k] - expected).abs() < 1e-6, "bin {k}");
            assert!(spectrum[2 * k + 1].abs() < 1e-6);
        }
    }

    #[test]
    fn dc_lands_in_bin_zero() {
        let spectrum = forward_fft(&sig(&[1.0; 4]));
        // sum(x) / √n = 4 / 2
        assert!((spectrum[0] - 2.0).abs() < 1e-6);
        assert!(spectrum.values()[2..].iter().all(|v| v.abs() < 1e-6));
    }

    #[test]
    fn cosine_peaks_at_its_bin() {
        let n = 64;
        let values: Vec<f32> = (0..n)
            .map(|i| (2.0 * PI * 5.0 * i as f32 / n as f32).cos())
            .collect();
        let spectrum = forward_fft(&sig(&values));
        let mags: Vec<f32> = (0..=n / 2)
            .map(|k| spectrum[2 * k].hypot(spectrum[2 * k + 1]))
            .collect();
        let peak = mags
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(k, _)| k);
        assert_eq!(peak, Some(5));
    }

    #[test]
    fn roundtrip_even_and_odd() {
        for n in [1usize, 2, 7, 16, 33, 100] {
            let values: Vec<f32> = (0..n).map(|i| ((i * 7 % 11) as f32 - 5.0) / 5.0).collect();
            let original = sig(&values);
            let back = inverse_fft(&forward_fft(&original));
            assert_eq!(back.len(), n);
            for (a, b) in original.iter().zip(back.iter()) {
                assert!((a - b).abs() < 1e-4, "n={n}: {a} vs {b}");
            }
        }
    }
}
