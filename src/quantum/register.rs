// src/quantum/register.rs
//! Multi-qubit registers over real amplitudes
//!
//! A [`QuantumRegister`] of `n` qubits stores one amplitude per basis state in
//! a flat vector of length `2^n`. Bit `i` of a basis index is the value of
//! qubit `i`, so qubit 0 is the least significant bit and is printed last.

use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt::{self, Display};

use ndarray::{Array1, Array2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::oracle::OracleMatrix;
use super::qubit::Qubit;
use super::MAX_QUBITS;
use crate::error::{QuantumError, Result};
use crate::random::{RandomSource, ThreadRandom};

/// Amplitudes at or below this magnitude are treated as zero
pub const NEGLIGIBLE_AMPLITUDE: f64 = 1e-10;

/// A basis state paired with its amplitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateAmplitude {
    pub index: usize,
    pub amplitude: f64,
}

/// A dense register of `qubit_count` qubits
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumRegister {
    qubit_count: usize,
    amplitudes: Array1<f64>,
}

impl QuantumRegister {
    /// Create a register in the all-zero state `|00...0⟩`
    pub fn new(qubit_count: usize) -> Result<Self> {
        let state_count = state_count_for(qubit_count)?;
        let mut amplitudes = Array1::zeros(state_count);
        amplitudes[0] = 1.0;

        Ok(QuantumRegister {
            qubit_count,
            amplitudes,
        })
    }

    /// Create a register in the basis state `|index⟩`
    ///
    /// An index outside the register leaves it in `|00...0⟩`.
    pub fn with_basis_state(qubit_count: usize, index: usize) -> Result<Self> {
        let mut register = Self::new(qubit_count)?;
        register.set_state(index);
        Ok(register)
    }

    /// Create a register from a bit pattern such as `"01010000"`
    ///
    /// The leftmost character is the most significant qubit.
    pub fn from_bit_string(bits: &str) -> Result<Self> {
        if bits.is_empty() {
            return Err(QuantumError::EmptyBitString);
        }

        let mut index = 0usize;
        let mut qubit_count = 0usize;
        for (position, character) in bits.chars().enumerate() {
            let bit = match character {
                '0' => 0,
                '1' => 1,
                _ => return Err(QuantumError::InvalidBitCharacter { character, position }),
            };
            qubit_count += 1;
            if qubit_count > MAX_QUBITS {
                return Err(QuantumError::InvalidQubitCount {
                    count: bits.chars().count(),
                    max: MAX_QUBITS,
                });
            }
            index = (index << 1) | bit;
        }

        Self::with_basis_state(qubit_count, index)
    }

    /// Create the tensor product of independent single-qubit states
    ///
    /// `qubits[i]` becomes qubit `i` of the register.
    pub fn from_qubits(qubits: &[Qubit]) -> Result<Self> {
        if qubits.is_empty() {
            return Err(QuantumError::EmptyQubitList);
        }

        let qubit_count = qubits.len();
        let state_count = state_count_for(qubit_count)?;

        let amplitudes = Array1::from_shape_fn(state_count, |state| {
            qubits.iter().enumerate().fold(1.0, |amplitude, (i, qubit)| {
                if (state >> i) & 1 == 1 {
                    amplitude * qubit.beta()
                } else {
                    amplitude * qubit.alpha()
                }
            })
        });

        Ok(QuantumRegister {
            qubit_count,
            amplitudes,
        })
    }

    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// Number of basis states, `2^qubit_count`
    pub fn state_count(&self) -> usize {
        self.amplitudes.len()
    }

    /// A copy of the amplitude vector
    pub fn state_vector(&self) -> Vec<f64> {
        self.amplitudes.to_vec()
    }

    /// Amplitude of a basis state, `0.0` outside the register
    pub fn amplitude(&self, state: usize) -> f64 {
        self.amplitudes.get(state).copied().unwrap_or(0.0)
    }

    /// Probability of a basis state, `0.0` outside the register
    pub fn probability(&self, state: usize) -> f64 {
        let amplitude = self.amplitude(state);
        amplitude * amplitude
    }

    /// Force the register into the basis state `|state⟩`
    ///
    /// Does nothing when `state` is outside the register.
    pub fn set_state(&mut self, state: usize) {
        if state >= self.state_count() {
            return;
        }
        self.amplitudes.fill(0.0);
        self.amplitudes[state] = 1.0;
    }

    /// Sum of squared amplitudes; 1 for a valid state
    pub fn check_normalization(&self) -> f64 {
        self.amplitudes.iter().map(|a| a * a).sum()
    }

    /// Basis states whose amplitude is not negligible, by increasing index
    pub fn non_zero_states(&self) -> Vec<StateAmplitude> {
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(_, a)| a.abs() > NEGLIGIBLE_AMPLITUDE)
            .map(|(index, &amplitude)| StateAmplitude { index, amplitude })
            .collect()
    }

    /// Apply the Hadamard rotation to one qubit
    pub fn apply_hadamard(&mut self, qubit: usize) -> Result<()> {
        if qubit >= self.qubit_count {
            return Err(QuantumError::InvalidQubitIndex {
                index: qubit,
                qubit_count: self.qubit_count,
            });
        }
        self.amplitudes = self.hadamard_on(qubit);
        Ok(())
    }

    // Each (|..0..⟩, |..1..⟩) pair is read from the old vector before the new one is written.
    fn hadamard_on(&self, qubit: usize) -> Array1<f64> {
        let mask = 1usize << qubit;
        let mut next = Array1::zeros(self.state_count());

        for base in (0..self.state_count()).filter(|s| s & mask == 0) {
            let amp0 = self.amplitudes[base];
            let amp1 = self.amplitudes[base | mask];
            next[base] = (amp0 + amp1) * FRAC_1_SQRT_2;
            next[base | mask] = (amp0 - amp1) * FRAC_1_SQRT_2;
        }

        next
    }

    /// Apply the Hadamard rotation to the `n` leftmost qubits
    ///
    /// These are qubits `qubit_count - n .. qubit_count`. `n` is clamped to the
    /// register size.
    pub fn apply_hadamard_first_n(&mut self, n: usize) {
        let n = n.min(self.qubit_count);
        for qubit in (self.qubit_count - n)..self.qubit_count {
            self.amplitudes = self.hadamard_on(qubit);
        }
    }

    pub fn apply_hadamard_to_all(&mut self) {
        self.apply_hadamard_first_n(self.qubit_count);
    }

    /// Apply an oracle built for a register of the same size
    pub fn apply_oracle(&mut self, oracle: &OracleMatrix) -> Result<()> {
        self.apply_boolean_matrix(oracle.data())
    }

    /// Apply a boolean transition table
    ///
    /// Row `i` of the result is the sum of the amplitudes of every column `j`
    /// with `matrix[[i, j]]` set. For a permutation this moves amplitudes;
    /// any other table sums them.
    pub fn apply_boolean_matrix(&mut self, matrix: &Array2<bool>) -> Result<()> {
        self.check_shape(matrix.dim())?;

        let amplitudes = &self.amplitudes;
        let next: Vec<f64> = (0..self.state_count())
            .into_par_iter()
            .map(|i| {
                matrix
                    .row(i)
                    .iter()
                    .zip(amplitudes.iter())
                    .filter(|(set, _)| **set)
                    .map(|(_, &amplitude)| amplitude)
                    .sum::<f64>()
            })
            .collect();

        self.amplitudes = Array1::from(next);
        Ok(())
    }

    /// Multiply the amplitude vector by a real matrix
    ///
    /// No unitarity check is made; the result may not be normalized.
    pub fn apply_linear_map(&mut self, matrix: &Array2<f64>) -> Result<()> {
        self.check_shape(matrix.dim())?;

        let amplitudes = &self.amplitudes;
        let next: Vec<f64> = (0..self.state_count())
            .into_par_iter()
            .map(|i| matrix.row(i).dot(amplitudes))
            .collect();

        self.amplitudes = Array1::from(next);
        Ok(())
    }

    fn check_shape(&self, (rows, cols): (usize, usize)) -> Result<()> {
        let expected = self.state_count();
        if rows != expected || cols != expected {
            return Err(QuantumError::DimensionMismatch { expected, rows, cols });
        }
        Ok(())
    }

    /// Measure the whole register using the default random source
    pub fn measure(&mut self) -> usize {
        self.measure_with(&mut ThreadRandom)
    }

    /// Measure the whole register and collapse it to the observed basis state
    ///
    /// Falls back to state 0 if rounding keeps the cumulative probability below
    /// the draw.
    pub fn measure_with(&mut self, rng: &mut dyn RandomSource) -> usize {
        let probabilities: Vec<f64> = self.amplitudes.iter().map(|a| a * a).collect();
        let total: f64 = probabilities.iter().sum();
        let draw = rng.next_uniform() * total;

        let mut cumulative = 0.0;
        let mut outcome = None;
        for (state, p) in probabilities.iter().enumerate() {
            cumulative += p;
            if draw <= cumulative {
                outcome = Some(state);
                break;
            }
        }

        let state = outcome.unwrap_or_else(|| {
            debug!(draw, cumulative, "measurement fell through, defaulting to state 0");
            0
        });
        trace!(draw, total, state, "register measured");

        self.amplitudes.fill(0.0);
        self.amplitudes[state] = 1.0;
        state
    }

    /// Bits of a basis index, most significant qubit first
    pub fn format_basis_state(&self, state: usize) -> String {
        format!("{:0width$b}", state, width = self.qubit_count)
    }
}

impl Display for QuantumRegister {
    /// Render the state as `|ψ⟩ = a|..⟩ + b|..⟩ - c|..⟩`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("|ψ⟩ = ")?;

        let terms = self.non_zero_states();
        if terms.is_empty() {
            return f.write_str("0");
        }

        for (position, term) in terms.iter().enumerate() {
            let negative = term.amplitude < 0.0;
            if position == 0 {
                if negative {
                    f.write_str("-")?;
                }
            } else {
                f.write_str(if negative { " - " } else { " + " })?;
            }
            write!(
                f,
                "{}|{}⟩",
                term.amplitude.abs(),
                self.format_basis_state(term.index)
            )?;
        }

        Ok(())
    }
}

fn state_count_for(qubit_count: usize) -> Result<usize> {
    if qubit_count == 0 || qubit_count > MAX_QUBITS {
        return Err(QuantumError::InvalidQubitCount {
            count: qubit_count,
            max: MAX_QUBITS,
        });
    }
    Ok(1 << qubit_count)
}
