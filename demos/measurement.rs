//! Single-qubit preparation, rotation and measurement statistics
//!
//! Run with `RUST_LOG=qreg=trace` to see every collapse.

use qreg::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = SimulationConfig::from_env()?;
    let mut rng = config.random_source();
    let shots = 1000;

    println!("======= SINGLE QUBIT MEASUREMENT =======");
    for label in QubitLabel::ALL {
        let prepared = Qubit::from_label(label);

        let mut standard_ones = 0;
        let mut rotated_ones = 0;
        for _ in 0..shots {
            let mut q = prepared;
            standard_ones += q.measure_standard_with(&mut *rng) as usize;
            let mut q = prepared;
            rotated_ones += q.measure_rotated_with(&mut *rng) as usize;
        }

        println!(
            "{:>3} = {:<28} standard: {:>4}/{} ones   rotated: {:>4}/{} ones",
            label.symbol(),
            prepared.to_string(),
            standard_ones,
            shots,
            rotated_ones,
            shots
        );
    }

    println!();
    println!("======= ROTATION =======");
    let mut q = Qubit::new(3.0, 4.0);
    println!("start:        {}", q);
    q.rotate();
    println!("after rotate: {}", q);
    q.rotate();
    println!("rotate twice: {}", q);

    Ok(())
}
