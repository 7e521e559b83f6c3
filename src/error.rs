// src/error.rs
//! Error types for register, oracle and protocol operations

use thiserror::Error;

/// Errors raised when an operation's preconditions are not met
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuantumError {
    /// Register size outside the representable range
    #[error("Invalid qubit count {count}: must be between 1 and {max}")]
    InvalidQubitCount { count: usize, max: usize },

    /// Qubit index outside the register
    #[error("Invalid qubit index {index} for {qubit_count}-qubit register")]
    InvalidQubitIndex { index: usize, qubit_count: usize },

    /// Bit string with no characters
    #[error("Bit string must not be empty")]
    EmptyBitString,

    /// Bit string containing something other than '0' or '1'
    #[error("Invalid character {character:?} at position {position} in bit string")]
    InvalidBitCharacter { character: char, position: usize },

    /// Tensor product requested over zero qubits
    #[error("Qubit list must not be empty")]
    EmptyQubitList,

    /// Matrix shape does not match the register
    #[error("Matrix dimension mismatch: expected {expected}x{expected}, got {rows}x{cols}")]
    DimensionMismatch { expected: usize, rows: usize, cols: usize },

    /// Truth table with the wrong number of rows or columns
    #[error("Malformed truth table: {message}")]
    MalformedTruthTable { message: String },

    /// Random integer range with `min > max`
    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },

    /// Configuration value that could not be used
    #[error("Invalid configuration for {key}: {message}")]
    InvalidConfig { key: String, message: String },
}

/// Result type for register, oracle and protocol operations
pub type Result<T> = std::result::Result<T, QuantumError>;
