//! Oracle matrices built from truth tables, applied to registers

use qreg::prelude::*;
use qreg::quantum::{bits_required, modular_exponentiation_table};
use tracing_subscriber::EnvFilter;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("======= TWO-INPUT FUNCTION =======");
    let table = vec![vec![true, true, false, true]];
    let oracle = OracleMatrix::from_truth_table(2, 1, &table)?;
    print!("{}", oracle);
    println!("permutation: {}", oracle.is_permutation());

    println!();
    println!("======= MODULAR EXPONENTIATION 2^x mod 15 =======");
    let bits = bits_required(15);
    let table = modular_exponentiation_table(bits, 2, 15)?;
    let oracle = OracleMatrix::from_truth_table(bits, bits, &table)?;
    println!("dimension:   {}", oracle.dimension());
    println!("permutation: {}", oracle.is_permutation());

    for x in 0..6usize {
        let input = format!("{:0width$b}{:0width$b}", x, 0, width = bits);
        let mut register = QuantumRegister::from_bit_string(&input)?;
        register.apply_oracle(&oracle)?;
        println!("x = {}: {}", x, register);
    }

    println!();
    println!("======= SUPERPOSED INPUT =======");
    let mut register = QuantumRegister::new(2 * bits)?;
    register.apply_hadamard_first_n(bits);
    register.apply_oracle(&oracle)?;
    println!("{}", register);
    println!("norm: {:.6}", register.check_normalization());

    Ok(())
}
