//! Random sources for scene generation.
//!
//! Generators never reach for a global RNG. They take a `RandomSource` so a
//! normal run can use an unseeded `fastrand::Rng` while tests replay a fixed
//! sequence and assert exact geometry.

/// A source of uniform samples in `[0, 1)`.
pub trait RandomSource {
    /// Returns the next sample in `[0, 1)`.
    fn next_unit(&mut self) -> f32;

    /// Returns a sample in `[min, max)`, or `min` when the range is empty.
    fn range(&mut self, min: f32, max: f32) -> f32 {
        let value = min + self.next_unit() * (max - min);
        if max > min {
            clamp_below(value, max)
        } else {
            value
        }
    }
}

/// Returns `value`, or the largest `f32` below `bound` if rounding carried
/// `value` onto or past it.
#[must_use]
pub fn clamp_below(value: f32, bound: f32) -> f32 {
    if value < bound || bound.is_nan() || bound == f32::NEG_INFINITY {
        return value;
    }
    if bound == 0.0 {
        return -f32::from_bits(1);
    }
    let bits = bound.to_bits();
    if bound > 0.0 {
        f32::from_bits(bits - 1)
    } else {
        f32::from_bits(bits + 1)
    }
}

impl RandomSource for fastrand::Rng {
    fn next_unit(&mut self) -> f32 {
        self.f32()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}

/// Replays a fixed list of samples, wrapping around at the end.
///
/// Values are clamped into `[0, 1)` on construction. An empty sequence
/// always yields `0.0`.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f32>,
    cursor: usize,
}

/// Largest `f32` strictly below 1.0.
const BELOW_ONE: f32 = 1.0 - f32::EPSILON / 2.0;

impl SequenceSource {
    /// Creates a source that replays `values` in order.
    #[must_use]
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, BELOW_ONE) })
            .collect();
        Self { values, cursor: 0 }
    }

    /// Creates a source that always yields `value`.
    #[must_use]
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }

    /// Number of samples drawn so far.
    #[must_use]
    pub const fn drawn(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
