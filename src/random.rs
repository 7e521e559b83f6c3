// src/random.rs
//! Randomness sources for stochastic collapse
//!
//! Every measurement draws from a [`RandomSource`]. The default source is the
//! thread-local generator from `rand`; seeded and replaying sources exist so
//! that runs can be reproduced.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{QuantumError, Result};

/// A provider of uniform random values
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`
    fn next_uniform(&mut self) -> f64;

    /// Next integer in the inclusive range `[min, max]`
    fn next_in_range(&mut self, min: i64, max: i64) -> Result<i64> {
        check_range(min, max)?;
        // i128 holds the span of any i64 range
        let width = max as i128 - min as i128;
        let offset = (self.next_uniform() * (width + 1) as f64).floor() as i128;
        Ok((min as i128 + offset.clamp(0, width)) as i64)
    }
}

fn check_range(min: i64, max: i64) -> Result<()> {
    if min > max {
        return Err(QuantumError::InvalidRange { min, max });
    }
    Ok(())
}

/// The process-wide default source, backed by `rand::thread_rng()`
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_uniform(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }

    fn next_in_range(&mut self, min: i64, max: i64) -> Result<i64> {
        check_range(min, max)?;
        Ok(rand::thread_rng().gen_range(min..=max))
    }
}

/// A reproducible source seeded from a `u64`
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        SeededRandom {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn next_in_range(&mut self, min: i64, max: i64) -> Result<i64> {
        check_range(min, max)?;
        Ok(self.rng.gen_range(min..=max))
    }
}

/// Replays a fixed list of uniform draws, cycling when exhausted
///
/// Values are clamped into `[0, 1)`. An empty list always yields `0.0`.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f64>,
    position: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        SequenceRandom { values, position: 0 }
    }

    /// Number of draws taken so far
    pub fn draws(&self) -> usize {
        self.position
    }
}

impl RandomSource for SequenceRandom {
    fn next_uniform(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}
