//! Injectable randomness for particle spawning
//!
//! Production runs use a seeded `Pcg32`; tests substitute `FixedSequence`
//! to pin every sampled value.

use rand::Rng;
use rand_pcg::Pcg32;

/// Source of uniformly distributed floats
pub trait RandomSource {
    /// Uniform sample in `[min, max)`. Returns `min` when the range is empty.
    fn next_f32_in(&mut self, min: f32, max: f32) -> f32;
}

impl RandomSource for Pcg32 {
    fn next_f32_in(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.random_range(min..max)
    }
}

/// Cycles through fixed unit values, each mapped onto the requested range
#[derive(Debug, Clone)]
pub struct FixedSequence {
    values: Vec<f32>,
    cursor: usize,
}

impl FixedSequence {
    /// Values are clamped into `[0, 1)`; an empty list behaves like `[0.0]`
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        let mut values: Vec<f32> = values
            .into()
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f32::EPSILON))
            .collect();
        if values.is_empty() {
            values.push(0.0);
        }
        Self { values, cursor: 0 }
    }

    /// Always returns the same unit value
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for FixedSequence {
    fn next_f32_in(&mut self, min: f32, max: f32) -> f32 {
        let unit = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        min + (max - min) * unit
    }
}
