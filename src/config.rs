// src/config.rs
//! Runtime configuration for simulations and protocol runs

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{QuantumError, Result};
use crate::random::{RandomSource, SeededRandom, ThreadRandom};

pub const SEED_VAR: &str = "QREG_SEED";
pub const MAX_ROUNDS_VAR: &str = "QREG_MAX_ROUNDS";
pub const TRIALS_VAR: &str = "QREG_TRIALS";

/// Settings shared by the protocol runners and demos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for reproducible runs; `None` uses the thread-local generator
    pub seed: Option<u64>,

    /// Upper bound on key-agreement rounds spent on a single bit
    pub max_protocol_rounds: usize,

    /// Repetitions used when a decision is sampled statistically
    pub trials: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            seed: None,
            max_protocol_rounds: 64,
            trials: 16,
        }
    }
}

impl SimulationConfig {
    /// Read overrides from `QREG_SEED`, `QREG_MAX_ROUNDS` and `QREG_TRIALS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = SimulationConfig::default();

        if let Some(raw) = lookup(SEED_VAR) {
            config.seed = Some(parse_var(SEED_VAR, &raw)?);
        }
        if let Some(raw) = lookup(MAX_ROUNDS_VAR) {
            config.max_protocol_rounds = parse_var(MAX_ROUNDS_VAR, &raw)?;
        }
        if let Some(raw) = lookup(TRIALS_VAR) {
            config.trials = parse_var(TRIALS_VAR, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_protocol_rounds == 0 {
            return Err(QuantumError::InvalidConfig {
                key: "max_protocol_rounds".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.trials == 0 {
            return Err(QuantumError::InvalidConfig {
                key: "trials".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// The random source selected by `seed`
    pub fn random_source(&self) -> Box<dyn RandomSource> {
        match self.seed {
            Some(seed) => Box::new(SeededRandom::new(seed)),
            None => Box::new(ThreadRandom),
        }
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| QuantumError::InvalidConfig {
        key: key.to_string(),
        message: format!("{:?}: {}", raw, e),
    })
}
