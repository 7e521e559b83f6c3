//! Constant-or-balanced decision with a single oracle query per trial

use qreg::prelude::*;
use qreg::protocols::deutsch_jozsa;
use tracing_subscriber::EnvFilter;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = SimulationConfig::from_env()?;
    let mut rng = config.random_source();

    let functions = [
        ("zero", BooleanFunction::from_fn(3, |_| false)?),
        ("one", BooleanFunction::from_fn(3, |_| true)?),
        ("parity", BooleanFunction::from_fn(3, |x| x.count_ones() % 2 == 1)?),
        ("top bit", BooleanFunction::from_fn(3, |x| x & 0b100 != 0)?),
        ("only 7", BooleanFunction::from_fn(3, |x| x == 7)?),
    ];

    println!("======= SUPERPOSITION AFTER ONE QUERY =======");
    let register = deutsch_jozsa::parallel_evaluation(&functions[2].1)?;
    println!("parity: {}", register);

    println!();
    println!("======= DECISIONS ({} trials) =======", config.trials);
    for (name, function) in &functions {
        let single = deutsch_jozsa::run(function, &mut *rng)?;
        let decided = deutsch_jozsa::decide(function, config.trials, &mut *rng)?;
        println!(
            "{:<8} classical: {:<8} single run: {:<8} (leading bits {:03b})  decided: {}",
            name,
            function.classify().to_string(),
            single.verdict.to_string(),
            single.leading_bits,
            decided
        );
    }

    Ok(())
}
