// src/protocols/mod.rs
//! Small protocols driven by the simulator
//!
//! These build on the single-qubit and register engines and return structured
//! results; narration is left to the caller.

pub mod deutsch_jozsa;
pub mod key_agreement;

pub use deutsch_jozsa::{BooleanFunction, DeutschJozsaOutcome, Verdict};
pub use key_agreement::{KeyAgreement, RoundOutcome, SharedKey};
