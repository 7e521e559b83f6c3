// src/quantum/qubit.rs
//! Single-qubit states with real amplitudes
//!
//! A [`Qubit`] holds the pair `α|0⟩ + β|1⟩`. Construction normalizes the pair,
//! the Hadamard rotation mixes it, and measurement collapses it to a basis
//! state using a [`RandomSource`].

use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::random::{RandomSource, ThreadRandom};

/// Tolerance used by [`Qubit::is_normalized`]
const NORM_TOLERANCE: f64 = 1e-10;

/// The four canonical single-qubit states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QubitLabel {
    Zero,
    One,
    Plus,
    Minus,
}

impl QubitLabel {
    pub const ALL: [QubitLabel; 4] = [
        QubitLabel::Zero,
        QubitLabel::One,
        QubitLabel::Plus,
        QubitLabel::Minus,
    ];

    /// The basis this state belongs to
    pub fn basis(self) -> Basis {
        match self {
            QubitLabel::Zero | QubitLabel::One => Basis::Standard,
            QubitLabel::Plus | QubitLabel::Minus => Basis::Hadamard,
        }
    }

    /// Classical bit encoded by the state: `|0⟩` and `|+⟩` carry 0
    pub fn secret_bit(self) -> u8 {
        match self {
            QubitLabel::Zero | QubitLabel::Plus => 0,
            QubitLabel::One | QubitLabel::Minus => 1,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            QubitLabel::Zero => "|0⟩",
            QubitLabel::One => "|1⟩",
            QubitLabel::Plus => "|+⟩",
            QubitLabel::Minus => "|-⟩",
        }
    }
}

impl Display for QubitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Measurement basis for a single qubit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Basis {
    /// `{|0⟩, |1⟩}`
    Standard,
    /// `{|+⟩, |-⟩}`
    Hadamard,
}

impl Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Basis::Standard => write!(f, "standard {{|0⟩,|1⟩}}"),
            Basis::Hadamard => write!(f, "Hadamard {{|+⟩,|-⟩}}"),
        }
    }
}

/// A single qubit `α|0⟩ + β|1⟩` with real amplitudes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Qubit {
    alpha: f64,
    beta: f64,
}

impl Default for Qubit {
    /// The raw `(1, 1)` pair, not normalized
    fn default() -> Self {
        Qubit { alpha: 1.0, beta: 1.0 }
    }
}

impl Qubit {
    /// Create a qubit from amplitudes, normalizing them to unit length
    ///
    /// A zero-norm pair is kept as given; the result is then not a valid state.
    pub fn new(alpha: f64, beta: f64) -> Self {
        Qubit { alpha, beta }.normalized()
    }

    pub fn from_label(label: QubitLabel) -> Self {
        match label {
            QubitLabel::Zero => Qubit::new(1.0, 0.0),
            QubitLabel::One => Qubit::new(0.0, 1.0),
            QubitLabel::Plus => Qubit::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2),
            QubitLabel::Minus => Qubit::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
        }
    }

    pub fn zero() -> Self {
        Self::from_label(QubitLabel::Zero)
    }

    pub fn one() -> Self {
        Self::from_label(QubitLabel::One)
    }

    pub fn plus() -> Self {
        Self::from_label(QubitLabel::Plus)
    }

    pub fn minus() -> Self {
        Self::from_label(QubitLabel::Minus)
    }

    /// Amplitude of `|0⟩`
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Amplitude of `|1⟩`
    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn probability_zero(&self) -> f64 {
        self.alpha * self.alpha
    }

    pub fn probability_one(&self) -> f64 {
        self.beta * self.beta
    }

    pub fn norm_squared(&self) -> f64 {
        self.probability_zero() + self.probability_one()
    }

    pub fn is_normalized(&self) -> bool {
        (self.norm_squared() - 1.0).abs() < NORM_TOLERANCE
    }

    fn normalized(self) -> Self {
        let norm = self.norm_squared().sqrt();
        if norm > 0.0 {
            Qubit {
                alpha: self.alpha / norm,
                beta: self.beta / norm,
            }
        } else {
            self
        }
    }

    fn hadamard(self) -> Self {
        Qubit {
            alpha: (self.alpha + self.beta) * FRAC_1_SQRT_2,
            beta: (self.alpha - self.beta) * FRAC_1_SQRT_2,
        }
    }

    /// Apply the Hadamard rotation in place
    ///
    /// Applying it twice restores the starting amplitudes.
    pub fn rotate(&mut self) {
        *self = self.hadamard();
    }

    /// Measure in the standard basis using the default random source
    pub fn measure_standard(&mut self) -> u8 {
        self.measure_standard_with(&mut ThreadRandom)
    }

    /// Measure in the standard basis, collapsing to `|0⟩` or `|1⟩`
    pub fn measure_standard_with(&mut self, rng: &mut dyn RandomSource) -> u8 {
        let draw = rng.next_uniform();
        let p0 = self.probability_zero();

        let (outcome, collapsed) = if draw < p0 {
            (0, Qubit { alpha: 1.0, beta: 0.0 })
        } else {
            (1, Qubit { alpha: 0.0, beta: 1.0 })
        };
        trace!(p0, p1 = self.probability_one(), draw, outcome, "qubit measured");

        *self = collapsed;
        outcome
    }

    /// Measure in the rotated basis using the default random source
    pub fn measure_rotated(&mut self) -> u8 {
        self.measure_rotated_with(&mut ThreadRandom)
    }

    /// Rotate, then measure in the standard basis
    pub fn measure_rotated_with(&mut self, rng: &mut dyn RandomSource) -> u8 {
        self.rotate();
        self.measure_standard_with(rng)
    }

    pub fn measure_in(&mut self, basis: Basis, rng: &mut dyn RandomSource) -> u8 {
        match basis {
            Basis::Standard => self.measure_standard_with(rng),
            Basis::Hadamard => self.measure_rotated_with(rng),
        }
    }
}

impl Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|0⟩ + {}|1⟩", self.alpha, self.beta)
    }
}
