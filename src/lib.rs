//! Real-amplitude quantum register simulator
//!
//! This crate models single qubits and small multi-qubit registers with real
//! amplitudes. It supports Hadamard rotations, boolean oracles built from truth
//! tables, arbitrary real linear maps and stochastic measurement, plus two
//! small protocols built on top: prepare-and-measure key agreement and the
//! constant/balanced oracle decision.

pub mod config;
pub mod error;
pub mod protocols;
pub mod quantum;
pub mod random;

pub use config::SimulationConfig;
pub use error::{QuantumError, Result};
pub use random::{RandomSource, SeededRandom, SequenceRandom, ThreadRandom};

// Create a prelude module for convenient imports
pub mod prelude {
    pub use crate::quantum::prelude::*;
    pub use crate::protocols::{BooleanFunction, KeyAgreement, Verdict};
    pub use crate::random::{RandomSource, SeededRandom, SequenceRandom, ThreadRandom};
    pub use crate::{QuantumError, Result, SimulationConfig};
}

// Version and crate information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
