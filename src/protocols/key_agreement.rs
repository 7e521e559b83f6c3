// src/protocols/key_agreement.rs
//! Prepare-and-measure key agreement over single qubits
//!
//! Alice prepares one of `|0⟩, |1⟩, |+⟩, |-⟩` at random and sends it. Bob
//! measures it in a randomly chosen basis and announces the basis. When the
//! basis matches the one Alice prepared in, Bob's result equals Alice's secret
//! bit and both keep it; otherwise the round is discarded.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::quantum::qubit::{Basis, Qubit, QubitLabel};
use crate::random::RandomSource;

/// Record of one exchanged qubit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// State prepared by Alice
    pub prepared: QubitLabel,
    /// Basis Bob measured in
    pub bob_basis: Basis,
    /// Bit Bob observed
    pub measured_bit: u8,
    /// Whether the preparation and measurement bases matched
    pub agreed: bool,
    /// The shared bit, present only when `agreed`
    pub shared_bit: Option<u8>,
}

/// A key built from agreed rounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedKey {
    pub bits: Vec<u8>,
    /// Total rounds spent, including discarded ones
    pub rounds: usize,
}

impl SharedKey {
    /// Fraction of rounds that produced a key bit
    pub fn efficiency(&self) -> f64 {
        if self.rounds == 0 {
            return 0.0;
        }
        self.bits.len() as f64 / self.rounds as f64
    }
}

#[derive(Debug, Clone)]
pub struct KeyAgreement {
    max_rounds: usize,
}

impl Default for KeyAgreement {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

impl KeyAgreement {
    /// `max_rounds` bounds the rounds spent on a single key bit (at least 1)
    pub fn new(max_rounds: usize) -> Self {
        KeyAgreement {
            max_rounds: max_rounds.max(1),
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.max_protocol_rounds)
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    /// Alice's random choice among the four labelled states
    pub fn choose_label(rng: &mut dyn RandomSource) -> Result<QubitLabel> {
        let label = match rng.next_in_range(0, 3)? {
            1 => QubitLabel::One,
            2 => QubitLabel::Plus,
            3 => QubitLabel::Minus,
            _ => QubitLabel::Zero,
        };
        Ok(label)
    }

    /// Bob's random choice of measurement basis
    pub fn choose_basis(rng: &mut dyn RandomSource) -> Result<Basis> {
        let basis = if rng.next_in_range(0, 1)? == 0 {
            Basis::Standard
        } else {
            Basis::Hadamard
        };
        Ok(basis)
    }

    /// Run a single exchange
    pub fn round(&self, rng: &mut dyn RandomSource) -> Result<RoundOutcome> {
        let prepared = Self::choose_label(rng)?;
        let mut qubit = Qubit::from_label(prepared);

        let bob_basis = Self::choose_basis(rng)?;
        let measured_bit = qubit.measure_in(bob_basis, rng);

        let agreed = prepared.basis() == bob_basis;
        let shared_bit = agreed.then(|| prepared.secret_bit());

        debug!(
            prepared = %prepared,
            bob_basis = ?bob_basis,
            measured_bit,
            agreed,
            "key agreement round"
        );

        Ok(RoundOutcome {
            prepared,
            bob_basis,
            measured_bit,
            agreed,
            shared_bit,
        })
    }

    /// Repeat rounds until one is agreed
    ///
    /// Returns the agreed round and the number of rounds used, or `None` when
    /// `max_rounds` pass without agreement.
    pub fn agree_bit(&self, rng: &mut dyn RandomSource) -> Result<Option<(RoundOutcome, usize)>> {
        for attempt in 1..=self.max_rounds {
            let outcome = self.round(rng)?;
            if outcome.agreed {
                info!(bit = ?outcome.shared_bit, attempt, "bit agreed");
                return Ok(Some((outcome, attempt)));
            }
        }

        debug!(max_rounds = self.max_rounds, "no agreement within round limit");
        Ok(None)
    }

    /// Collect `length` agreed bits
    ///
    /// Stops early with a shorter key if a single bit exhausts `max_rounds`.
    pub fn establish_key(&self, length: usize, rng: &mut dyn RandomSource) -> Result<SharedKey> {
        let mut key = SharedKey {
            bits: Vec::with_capacity(length),
            rounds: 0,
        };

        while key.bits.len() < length {
            match self.agree_bit(rng)? {
                Some((outcome, used)) => {
                    key.rounds += used;
                    key.bits.extend(outcome.shared_bit);
                }
                None => {
                    key.rounds += self.max_rounds;
                    break;
                }
            }
        }

        info!(bits = key.bits.len(), rounds = key.rounds, "key established");
        Ok(key)
    }
}
