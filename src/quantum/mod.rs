// src/quantum/mod.rs
//! Real-amplitude quantum states and boolean oracles
//!
//! This module implements single qubits, oracle matrices built from truth
//! tables, and dense multi-qubit registers.

pub mod oracle;
pub mod qubit;
pub mod register;

pub use oracle::{
    bits_required, is_permutation, modular_exponentiation_table, truth_table_from_fn, OracleMatrix,
};
pub use qubit::{Basis, Qubit, QubitLabel};
pub use register::{QuantumRegister, StateAmplitude, NEGLIGIBLE_AMPLITUDE};

/// Largest register (or oracle) size accepted, in qubits
pub const MAX_QUBITS: usize = 24;

/// Largest combined input and output width of an oracle, in bits
///
/// An oracle is a dense `N × N` table, so its size grows with `4^bits`.
pub const MAX_ORACLE_QUBITS: usize = 12;

/// Re-export commonly used types
pub mod prelude {
    pub use super::{Basis, OracleMatrix, QuantumRegister, Qubit, QubitLabel, StateAmplitude};
}
