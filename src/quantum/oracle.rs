// src/quantum/oracle.rs
//! Boolean oracle matrices
//!
//! An oracle embeds a boolean function `f` with `input_bits` inputs and
//! `output_bits` outputs into a permutation of the `2^(input_bits + output_bits)`
//! basis states: `|x, y⟩ → |x, y ⊕ f(x)⟩`. Because the output register is
//! updated by XOR the embedding is reversible for any `f`, injective or not.

use std::fmt::{self, Display};

use ndarray::Array2;
use tracing::debug;

use super::MAX_ORACLE_QUBITS;
use crate::error::{QuantumError, Result};

/// A boolean `N × N` transition table over `input_bits + output_bits` qubits
///
/// `data[[new_state, state]]` is `true` when the oracle sends `state` to
/// `new_state`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleMatrix {
    input_bits: usize,
    output_bits: usize,
    data: Array2<bool>,
}

impl OracleMatrix {
    /// Build the reversible oracle for a truth table
    ///
    /// `table[bit][x]` is output bit `bit` of `f(x)`. The table must have
    /// `output_bits` rows of `2^input_bits` entries each.
    pub fn from_truth_table(
        input_bits: usize,
        output_bits: usize,
        table: &[Vec<bool>],
    ) -> Result<Self> {
        let size = dimension_for(input_bits, output_bits)?;
        check_table(input_bits, output_bits, table)?;

        let output_mask = (1usize << output_bits) - 1;
        let mut data = Array2::from_elem((size, size), false);

        for state in 0..size {
            let input_part = state >> output_bits;
            let output_part = state & output_mask;

            let mut new_output = output_part;
            for (bit, row) in table.iter().enumerate() {
                if row[input_part] {
                    new_output ^= 1 << bit;
                }
            }

            let new_state = (input_part << output_bits) | new_output;
            data[[new_state, state]] = true;
        }

        debug!(input_bits, output_bits, size, "built oracle matrix");

        Ok(OracleMatrix {
            input_bits,
            output_bits,
            data,
        })
    }

    /// Wrap an externally supplied boolean table
    ///
    /// The table is only checked for shape; it need not be a permutation.
    pub fn from_boolean_matrix(
        input_bits: usize,
        output_bits: usize,
        data: Array2<bool>,
    ) -> Result<Self> {
        let size = dimension_for(input_bits, output_bits)?;
        let (rows, cols) = data.dim();
        if rows != size || cols != size {
            return Err(QuantumError::DimensionMismatch {
                expected: size,
                rows,
                cols,
            });
        }

        Ok(OracleMatrix {
            input_bits,
            output_bits,
            data,
        })
    }

    pub fn input_bits(&self) -> usize {
        self.input_bits
    }

    pub fn output_bits(&self) -> usize {
        self.output_bits
    }

    /// Side length `N` of the table
    pub fn dimension(&self) -> usize {
        self.data.nrows()
    }

    pub fn data(&self) -> &Array2<bool> {
        &self.data
    }

    /// Entry at `(row, col)`, `false` outside the table
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.data.get((row, col)).copied().unwrap_or(false)
    }

    /// Boolean analogue of unitarity, see [`is_permutation`]
    pub fn is_permutation(&self) -> bool {
        is_permutation(&self.data)
    }
}

impl Display for OracleMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.rows() {
            for &cell in row {
                f.write_str(if cell { "1 " } else { "0 " })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Check that a boolean matrix has pairwise disjoint, non-empty columns
///
/// For every pair of columns `(i, j)` the value `OR_k (m[k][i] AND m[k][j])`
/// must be `true` exactly when `i == j`. This is column orthonormality taken
/// over boolean algebra rather than over the reals, which is sufficient for
/// 0/1 permutation tables. Non-square input is never a permutation.
pub fn is_permutation(matrix: &Array2<bool>) -> bool {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return false;
    }

    for i in 0..cols {
        for j in 0..cols {
            let overlap = (0..rows).any(|k| matrix[[k, i]] && matrix[[k, j]]);
            if overlap != (i == j) {
                return false;
            }
        }
    }

    true
}

/// Tabulate `f` as `table[bit][x] = (f(x) >> bit) & 1`
///
/// The widths are bounded like an oracle's, so the table always fits one.
pub fn truth_table_from_fn<F>(
    input_bits: usize,
    output_bits: usize,
    f: F,
) -> Result<Vec<Vec<bool>>>
where
    F: Fn(usize) -> usize,
{
    dimension_for(input_bits, output_bits)?;

    let columns = 1usize << input_bits;
    let values: Vec<usize> = (0..columns).map(&f).collect();

    Ok((0..output_bits)
        .map(|bit| values.iter().map(|v| (v >> bit) & 1 == 1).collect())
        .collect())
}

/// Truth table of `f(x) = a^x mod m` over `bits` input and output bits
pub fn modular_exponentiation_table(bits: usize, a: u64, m: u64) -> Result<Vec<Vec<bool>>> {
    if m == 0 {
        return Err(QuantumError::MalformedTruthTable {
            message: "modulus must be non-zero".to_string(),
        });
    }
    truth_table_from_fn(bits, bits, |x| mod_pow(a, x as u64, m) as usize)
}

/// Number of bits needed to write `n` in binary, at least 1
pub fn bits_required(n: u64) -> usize {
    if n == 0 {
        1
    } else {
        (u64::BITS - n.leading_zeros()) as usize
    }
}

fn mod_pow(base: u64, mut exp: u64, m: u64) -> u64 {
    let m = m as u128;
    let mut base = base as u128 % m;
    let mut result = 1u128 % m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % m;
        }
        base = base * base % m;
        exp >>= 1;
    }
    result as u64
}

fn dimension_for(input_bits: usize, output_bits: usize) -> Result<usize> {
    let total = input_bits.saturating_add(output_bits);
    if total == 0 || total > MAX_ORACLE_QUBITS {
        return Err(QuantumError::InvalidQubitCount {
            count: total,
            max: MAX_ORACLE_QUBITS,
        });
    }
    Ok(1 << total)
}

fn check_table(input_bits: usize, output_bits: usize, table: &[Vec<bool>]) -> Result<()> {
    if table.len() != output_bits {
        return Err(QuantumError::MalformedTruthTable {
            message: format!("expected {} rows, got {}", output_bits, table.len()),
        });
    }

    let columns = 1usize << input_bits;
    for (bit, row) in table.iter().enumerate() {
        if row.len() != columns {
            return Err(QuantumError::MalformedTruthTable {
                message: format!("row {} has {} entries, expected {}", bit, row.len(), columns),
            });
        }
    }

    Ok(())
}
