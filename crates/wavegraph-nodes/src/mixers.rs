//! Two-input sample-wise mixers.
//!
//! A mixer combines signals `a` and `b` sample by sample. If either input is
//! empty the result is empty. Otherwise the result is as long as the longer
//! input and the shorter one reads as zero past its end. Division and modulus
//! by zero follow IEEE-754 (`inf` or `NaN`), they never fail.

use wavegraph_core::Signal;

/// Sample-wise combination rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MixMode {
    /// `a + b`
    Additive,
    /// `a * b`
    Multiply,
    /// `a - b`
    Subtractive,
    /// `a / b`
    Division,
    /// `a % b`, truncated remainder with the sign of `a`
    Modulus,
    /// `-(-a * -b)`
    Screen,
    /// `2ab` below `a = 0.5`, `1 - 2(1-a)(1-b)` from there up
    Overlay,
}

impl MixMode {
    /// All modes, in registry order.
    pub const ALL: [MixMode; 7] = [
        MixMode::Additive,
        MixMode::Multiply,
        MixMode::Subtractive,
        MixMode::Division,
        MixMode::Modulus,
        MixMode::Screen,
        MixMode::Overlay,
    ];

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            MixMode::Additive => "additive",
            MixMode::Multiply => "multiply",
            MixMode::Subtractive => "subtractive",
            MixMode::Division => "division",
            MixMode::Modulus => "modulus",
            MixMode::Screen => "screen",
            MixMode::Overlay => "overlay",
        }
    }

    /// Combines one pair of samples.
    #[inline]
    pub fn apply(self, a: f32, b: f32) -> f32 {
        match self {
            MixMode::Additive => a + b,
            MixMode::Multiply => a * b,
            MixMode::Subtractive => a - b,
            MixMode::Division => a / b,
            MixMode::Modulus => a % b,
            MixMode::Screen => -(-a * -b),
            MixMode::Overlay => {
                if a < 0.5 {
                    2.0 * a * b
                } else {
                    1.0 - 2.0 * (1.0 - a) * (1.0 - b)
                }
            }
        }
    }
}

/// Mixes `a` and `b` with `mode`.
pub fn mix(a: &Signal, b: &Signal, mode: MixMode) -> Signal {
    if a.is_empty() || b.is_empty() {
        return Signal::new();
    }
    let len = a.len().max(b.len());
    let at = |s: &Signal, i: usize| s.values().get(i).copied().unwrap_or(0.0);
    (0..len).map(|i| mode.apply(at(a, i), at(b, i))).collect()
}

/// `a + b`
pub fn additive(a: &Signal, b: &Signal) -> Signal {
    mix(a, b, MixMode::Additive)
}

/// `a * b`
pub fn multiply(a: &Signal, b: &Signal) -> Signal {
    mix(a, b, MixMode::Multiply)
}

/// `a - b`
pub fn subtractive(a: &Signal, b: &Signal) -> Signal {
    mix(a, b, MixMode::Subtractive)
}

/// `a / b`
pub fn division(a: &Signal, b: &Signal) -> Signal {
    mix(a, b, MixMode::Division)
}

/// `a % b`
pub fn modulus(a: &Signal, b: &Signal) -> Signal {
    mix(a, b, MixMode::Modulus)
}

/// Screen blend.
pub fn screen(a: &Signal, b: &Signal) -> Signal {
    mix(a, b, MixMode::Screen)
}

/// Overlay blend.
pub fn overlay(a: &Signal, b: &Signal) -> Signal {
    mix(a, b, MixMode::Overlay)
}
