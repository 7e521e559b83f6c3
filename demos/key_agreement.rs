//! Prepare-and-measure key agreement between two parties
//!
//! `QREG_SEED` makes the run reproducible and `QREG_MAX_ROUNDS` bounds the
//! rounds spent per key bit.

use qreg::prelude::*;
use tracing_subscriber::EnvFilter;

const KEY_LENGTH: usize = 32;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = SimulationConfig::from_env()?;
    let mut rng = config.random_source();
    let protocol = KeyAgreement::from_config(&config);

    println!("======= SAMPLE ROUNDS =======");
    for _ in 0..8 {
        let outcome = protocol.round(&mut *rng)?;
        let kept = match outcome.shared_bit {
            Some(bit) => format!("keep {}", bit),
            None => "discard".to_string(),
        };
        println!(
            "sent {:>2}  measured in {:<8}  read {}  -> {}",
            outcome.prepared.symbol(),
            outcome.bob_basis.to_string(),
            outcome.measured_bit,
            kept
        );
    }

    println!();
    println!("======= KEY =======");
    let key = protocol.establish_key(KEY_LENGTH, &mut *rng)?;
    let bits: String = key.bits.iter().map(|b| b.to_string()).collect();
    println!("key:        {}", bits);
    println!("length:     {}/{}", key.bits.len(), KEY_LENGTH);
    println!("rounds:     {}", key.rounds);
    println!("efficiency: {:.3}", key.efficiency());

    Ok(())
}
