// src/protocols/deutsch_jozsa.rs
//! Oracle-based constant/balanced decision
//!
//! The register holds `input_bits` input qubits (the leftmost ones) followed by
//! a single output qubit. Starting from `|0...01⟩`, a Hadamard on every qubit
//! puts the inputs into uniform superposition and the output into `|-⟩`. The
//! oracle then writes `f` into the phase, and a second Hadamard on the inputs
//! maps a constant `f` back to `|0...0⟩` on the input qubits.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{QuantumError, Result};
use crate::quantum::oracle::OracleMatrix;
use crate::quantum::register::QuantumRegister;
use crate::quantum::MAX_ORACLE_QUBITS;
use crate::random::RandomSource;

/// Classification of a single-output boolean function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Constant,
    Balanced,
    /// Neither constant nor balanced; only produced by [`BooleanFunction::classify`]
    Neither,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Constant => write!(f, "constant"),
            Verdict::Balanced => write!(f, "balanced"),
            Verdict::Neither => write!(f, "neither constant nor balanced"),
        }
    }
}

/// A boolean function `{0,1}^n → {0,1}` given by its values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BooleanFunction {
    input_bits: usize,
    values: Vec<bool>,
}

impl BooleanFunction {
    /// `values[x]` is `f(x)`; there must be exactly `2^input_bits` of them
    pub fn new(input_bits: usize, values: Vec<bool>) -> Result<Self> {
        let expected = column_count(input_bits)?;
        if values.len() != expected {
            return Err(QuantumError::MalformedTruthTable {
                message: format!("expected {} values, got {}", expected, values.len()),
            });
        }
        Ok(BooleanFunction { input_bits, values })
    }

    pub fn from_fn<F>(input_bits: usize, f: F) -> Result<Self>
    where
        F: Fn(usize) -> bool,
    {
        let columns = column_count(input_bits)?;
        Self::new(input_bits, (0..columns).map(f).collect())
    }

    /// Take the single row of a truth table in oracle layout
    pub fn from_truth_table(input_bits: usize, table: &[Vec<bool>]) -> Result<Self> {
        match table {
            [row] => Self::new(input_bits, row.clone()),
            _ => Err(QuantumError::MalformedTruthTable {
                message: format!("expected a single output row, got {}", table.len()),
            }),
        }
    }

    pub fn input_bits(&self) -> usize {
        self.input_bits
    }

    pub fn values(&self) -> &[bool] {
        &self.values
    }

    /// Table in the `table[bit][x]` layout used by [`OracleMatrix`]
    pub fn truth_table(&self) -> Vec<Vec<bool>> {
        vec![self.values.clone()]
    }

    pub fn oracle(&self) -> Result<OracleMatrix> {
        OracleMatrix::from_truth_table(self.input_bits, 1, &self.truth_table())
    }

    /// Classical classification by counting ones
    pub fn classify(&self) -> Verdict {
        let ones = self.values.iter().filter(|&&v| v).count();
        if ones == 0 || ones == self.values.len() {
            Verdict::Constant
        } else if 2 * ones == self.values.len() {
            Verdict::Balanced
        } else {
            Verdict::Neither
        }
    }
}

// The oracle needs one extra qubit for the output.
fn column_count(input_bits: usize) -> Result<usize> {
    let total = input_bits.saturating_add(1);
    if input_bits == 0 || total > MAX_ORACLE_QUBITS {
        return Err(QuantumError::InvalidQubitCount {
            count: total,
            max: MAX_ORACLE_QUBITS,
        });
    }
    Ok(1 << input_bits)
}

/// Result of one quantum decision run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeutschJozsaOutcome {
    /// Full measured basis index
    pub measured_state: usize,
    /// The input-qubit bits of the measured index
    pub leading_bits: usize,
    pub verdict: Verdict,
}

/// Prepare `|+...+⟩|-⟩` and apply the oracle once
///
/// The returned register holds `f` evaluated on every input simultaneously.
pub fn parallel_evaluation(function: &BooleanFunction) -> Result<QuantumRegister> {
    let qubit_count = function.input_bits() + 1;
    let mut register = QuantumRegister::with_basis_state(qubit_count, 1)?;

    register.apply_hadamard_to_all();
    register.apply_oracle(&function.oracle()?)?;

    Ok(register)
}

/// Run the decision circuit once and measure
pub fn run(function: &BooleanFunction, rng: &mut dyn RandomSource) -> Result<DeutschJozsaOutcome> {
    let mut register = parallel_evaluation(function)?;
    register.apply_hadamard_first_n(function.input_bits());

    debug!(state = %register, "decision register before measurement");

    let measured_state = register.measure_with(rng);
    let leading_bits = measured_state >> 1;
    let verdict = if leading_bits == 0 {
        Verdict::Constant
    } else {
        Verdict::Balanced
    };

    Ok(DeutschJozsaOutcome {
        measured_state,
        leading_bits,
        verdict,
    })
}

/// Run the circuit `trials` times; constant only if every run says so
///
/// For a function that is neither constant nor balanced the single-run answer
/// is random, and repeating exposes the non-zero leading bits.
pub fn decide(
    function: &BooleanFunction,
    trials: usize,
    rng: &mut dyn RandomSource,
) -> Result<Verdict> {
    for _ in 0..trials.max(1) {
        if run(function, rng)?.verdict == Verdict::Balanced {
            return Ok(Verdict::Balanced);
        }
    }
    Ok(Verdict::Constant)
}
