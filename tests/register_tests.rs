use std::f64::consts::FRAC_1_SQRT_2;

use ndarray::{array, Array2};
use qreg::quantum::{
    modular_exponentiation_table, OracleMatrix, QuantumRegister, Qubit, StateAmplitude,
};
use qreg::{QuantumError, SeededRandom, SequenceRandom, ThreadRandom};

/// Helper function for comparing f64 with tolerance
fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

fn vector_approx_eq(a: &[f64], b: &[f64], epsilon: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| approx_eq(*x, *y, epsilon))
}

#[test]
fn test_zero_register() {
    let register = QuantumRegister::new(3).unwrap();
    assert_eq!(register.qubit_count(), 3);
    assert_eq!(register.state_count(), 8);
    assert_eq!(register.state_vector(), vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    assert_eq!(register.check_normalization(), 1.0);
}

#[test]
fn test_invalid_qubit_counts() {
    assert!(matches!(
        QuantumRegister::new(0),
        Err(QuantumError::InvalidQubitCount { count: 0, .. })
    ));
    assert!(matches!(QuantumRegister::new(200), Err(QuantumError::InvalidQubitCount { .. })));
}

#[test]
fn test_basis_state_construction() {
    let register = QuantumRegister::with_basis_state(3, 5).unwrap();
    assert_eq!(register.amplitude(5), 1.0);
    assert_eq!(register.amplitude(0), 0.0);

    // Out of range keeps the zero state
    let register = QuantumRegister::with_basis_state(2, 9).unwrap();
    assert_eq!(register.amplitude(0), 1.0);
}

#[test]
fn test_bit_string_construction() {
    let register = QuantumRegister::from_bit_string("001").unwrap();
    assert_eq!(register.qubit_count(), 3);
    assert_eq!(register.amplitude(1), 1.0);

    let register = QuantumRegister::from_bit_string("01010000").unwrap();
    assert_eq!(register.qubit_count(), 8);
    assert_eq!(register.amplitude(0b0101_0000), 1.0);
    assert_eq!(register.to_string(), "|ψ⟩ = 1|01010000⟩");
}

#[test]
fn test_bit_string_errors() {
    assert_eq!(QuantumRegister::from_bit_string(""), Err(QuantumError::EmptyBitString));
    assert_eq!(
        QuantumRegister::from_bit_string("01x"),
        Err(QuantumError::InvalidBitCharacter { character: 'x', position: 2 })
    );
}

#[test]
fn test_tensor_product_of_qubits() {
    assert_eq!(QuantumRegister::from_qubits(&[]), Err(QuantumError::EmptyQubitList));

    // qubit 0 = |+⟩, qubit 1 = |0⟩
    let register = QuantumRegister::from_qubits(&[Qubit::plus(), Qubit::zero()]).unwrap();
    assert!(vector_approx_eq(
        &register.state_vector(),
        &[FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0, 0.0],
        1e-12
    ));

    let qubits = [Qubit::new(0.6, 0.8), Qubit::minus(), Qubit::one()];
    let register = QuantumRegister::from_qubits(&qubits).unwrap();
    assert!(approx_eq(register.check_normalization(), 1.0, 1e-12));
    // |1⟩ on qubit 2, qubit 1 = |-⟩, qubit 0 = 0.6|0⟩ + 0.8|1⟩
    assert!(approx_eq(register.amplitude(0b100), 0.6 * FRAC_1_SQRT_2, 1e-12));
    assert!(approx_eq(register.amplitude(0b111), -0.8 * FRAC_1_SQRT_2, 1e-12));
    assert_eq!(register.amplitude(0b011), 0.0);
}

#[test]
fn test_hadamard_single_qubit() {
    let mut register = QuantumRegister::new(2).unwrap();
    register.apply_hadamard(0).unwrap();
    assert!(vector_approx_eq(
        &register.state_vector(),
        &[FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0, 0.0],
        1e-12
    ));

    register.apply_hadamard(0).unwrap();
    assert!(vector_approx_eq(&register.state_vector(), &[1.0, 0.0, 0.0, 0.0], 1e-12));

    assert_eq!(
        register.apply_hadamard(2),
        Err(QuantumError::InvalidQubitIndex { index: 2, qubit_count: 2 })
    );
}

#[test]
fn test_hadamard_matches_single_qubit_rotation() {
    let qubits = [Qubit::new(0.3, -0.4), Qubit::new(0.9, 0.1), Qubit::minus()];
    let mut register = QuantumRegister::from_qubits(&qubits).unwrap();
    register.apply_hadamard(1).unwrap();

    let mut rotated = qubits;
    rotated[1].rotate();
    let expected = QuantumRegister::from_qubits(&rotated).unwrap();

    assert!(vector_approx_eq(&register.state_vector(), &expected.state_vector(), 1e-12));
}

#[test]
fn test_hadamard_first_n_targets_leftmost_qubits() {
    let mut register = QuantumRegister::new(2).unwrap();
    register.apply_hadamard_first_n(1);
    // Only qubit 1 (the leftmost) is rotated
    assert!(vector_approx_eq(
        &register.state_vector(),
        &[FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2, 0.0],
        1e-12
    ));

    let mut clamped = QuantumRegister::new(2).unwrap();
    clamped.apply_hadamard_first_n(10);
    let mut all = QuantumRegister::new(2).unwrap();
    all.apply_hadamard_to_all();
    assert_eq!(clamped, all);
    assert!(vector_approx_eq(&all.state_vector(), &[0.5, 0.5, 0.5, 0.5], 1e-12));

    let mut untouched = QuantumRegister::new(2).unwrap();
    untouched.apply_hadamard_first_n(0);
    assert_eq!(untouched.state_vector(), vec![1.0, 0.0, 0.0, 0.0]);
}

#[test]
fn test_normalization_preserved_by_transforms() {
    let qubits = [Qubit::new(0.2, 0.7), Qubit::new(-1.0, 0.3), Qubit::plus()];
    let mut register = QuantumRegister::from_qubits(&qubits).unwrap();
    let oracle = OracleMatrix::from_truth_table(2, 1, &[vec![true, false, false, true]]).unwrap();

    for step in 0..6 {
        register.apply_hadamard(step % 3).unwrap();
        register.apply_oracle(&oracle).unwrap();
        assert!(approx_eq(register.check_normalization(), 1.0, 1e-10));
    }

    let swap: Array2<f64> =
        Array2::from_shape_fn((8, 8), |(i, j)| if i == 7 - j { 1.0 } else { 0.0 });
    register.apply_linear_map(&swap).unwrap();
    assert!(approx_eq(register.check_normalization(), 1.0, 1e-10));
}

#[test]
fn test_zero_function_oracle_is_identity() {
    let table = vec![vec![false; 4]];
    let oracle = OracleMatrix::from_truth_table(2, 1, &table).unwrap();

    let qubits = [Qubit::new(0.1, 0.9), Qubit::minus(), Qubit::new(2.0, -1.0)];
    let mut register = QuantumRegister::from_qubits(&qubits).unwrap();
    let before = register.state_vector();
    register.apply_oracle(&oracle).unwrap();
    assert_eq!(register.state_vector(), before);
}

#[test]
fn test_oracle_permutes_amplitudes() {
    // f(x) = x on one input bit: the controlled-NOT permutation
    let oracle = OracleMatrix::from_truth_table(1, 1, &[vec![false, true]]).unwrap();
    let mut register = QuantumRegister::from_bit_string("10").unwrap();
    register.apply_oracle(&oracle).unwrap();
    assert_eq!(register.to_string(), "|ψ⟩ = 1|11⟩");
}

#[test]
fn test_modular_exponentiation_oracle() {
    let table = modular_exponentiation_table(4, 2, 15).unwrap();
    let oracle = OracleMatrix::from_truth_table(4, 4, &table).unwrap();

    // Input 5 on the top four qubits, zeros below: 2^5 mod 15 = 2
    let mut register = QuantumRegister::from_bit_string("01010000").unwrap();
    register.apply_oracle(&oracle).unwrap();
    assert_eq!(register.to_string(), "|ψ⟩ = 1|01010010⟩");
}

#[test]
fn test_non_permutation_matrix_sums_amplitudes() {
    let mut register = QuantumRegister::from_qubits(&[Qubit::plus()]).unwrap();
    register.apply_boolean_matrix(&array![[true, true], [true, true]]).unwrap();
    assert!(vector_approx_eq(
        &register.state_vector(),
        &[2.0 * FRAC_1_SQRT_2, 2.0 * FRAC_1_SQRT_2],
        1e-12
    ));
    assert!(approx_eq(register.check_normalization(), 2.0, 1e-12));
}

#[test]
fn test_matrix_dimension_mismatch() {
    let mut register = QuantumRegister::new(2).unwrap();
    let small = OracleMatrix::from_truth_table(1, 1, &[vec![true, false]]).unwrap();
    let large = OracleMatrix::from_truth_table(2, 1, &[vec![true; 4]]).unwrap();

    assert!(register.apply_oracle(&small).is_ok());
    assert_eq!(
        register.apply_oracle(&large),
        Err(QuantumError::DimensionMismatch { expected: 4, rows: 8, cols: 8 })
    );
    assert_eq!(
        register.apply_linear_map(&Array2::eye(3)),
        Err(QuantumError::DimensionMismatch { expected: 4, rows: 3, cols: 3 })
    );
    assert!(register
        .apply_linear_map(&Array2::zeros((4, 5)))
        .is_err());
}

#[test]
fn test_linear_map_is_unchecked() {
    let mut register = QuantumRegister::new(1).unwrap();
    register.apply_linear_map(&array![[3.0, 0.0], [4.0, 0.0]]).unwrap();
    assert_eq!(register.state_vector(), vec![3.0, 4.0]);
    assert_eq!(register.check_normalization(), 25.0);
}

#[test]
fn test_measure_selects_by_cumulative_probability() {
    let mut register = QuantumRegister::new(2).unwrap();
    register.apply_hadamard_to_all();

    // Cumulative probabilities are 0.25, 0.5, 0.75, 1.0
    let mut rng = SequenceRandom::new(vec![0.6]);
    assert_eq!(register.measure_with(&mut rng), 2);
    assert_eq!(register.state_vector(), vec![0.0, 0.0, 1.0, 0.0]);
    assert_eq!(register.check_normalization(), 1.0);

    let mut register = QuantumRegister::new(2).unwrap();
    register.apply_hadamard_to_all();
    assert_eq!(register.measure_with(&mut SequenceRandom::new(vec![0.1])), 0);
}

#[test]
fn test_measure_scales_draw_by_total_probability() {
    // Unnormalized vector (3, 4): total 25, P(0) share is 9/25 = 0.36
    let mut register = QuantumRegister::new(1).unwrap();
    register.apply_linear_map(&array![[3.0, 0.0], [4.0, 0.0]]).unwrap();
    assert_eq!(register.measure_with(&mut SequenceRandom::new(vec![0.35])), 0);

    let mut register = QuantumRegister::new(1).unwrap();
    register.apply_linear_map(&array![[3.0, 0.0], [4.0, 0.0]]).unwrap();
    assert_eq!(register.measure_with(&mut SequenceRandom::new(vec![0.37])), 1);
}

#[test]
fn test_measure_falls_back_to_state_zero() {
    let mut register = QuantumRegister::with_basis_state(2, 3).unwrap();
    register.apply_linear_map(&Array2::from_elem((4, 4), f64::NAN)).unwrap();

    assert_eq!(register.measure_with(&mut ThreadRandom), 0);
    assert_eq!(register.state_vector(), vec![1.0, 0.0, 0.0, 0.0]);
}

#[test]
fn test_measure_never_returns_zero_probability_state() {
    let mut rng = SeededRandom::new(42);
    for _ in 0..200 {
        let mut register = QuantumRegister::from_bit_string("001").unwrap();
        register.apply_hadamard_first_n(2);
        // Amplitude only on 001, 011, 101, 111
        let outcome = register.measure_with(&mut rng);
        assert_eq!(outcome & 1, 1, "measured {}", outcome);
    }

    let mut register = QuantumRegister::new(1).unwrap();
    assert_eq!(register.measure(), 0);
}

#[test]
fn test_accessors_out_of_range() {
    let mut register = QuantumRegister::new(2).unwrap();
    assert_eq!(register.amplitude(4), 0.0);
    assert_eq!(register.probability(100), 0.0);

    register.set_state(9);
    assert_eq!(register.amplitude(0), 1.0);

    register.set_state(3);
    assert_eq!(register.probability(3), 1.0);
    assert_eq!(register.check_normalization(), 1.0);
}

#[test]
fn test_non_zero_states() {
    let mut register = QuantumRegister::from_bit_string("01").unwrap();
    register.apply_hadamard(0).unwrap();

    let states = register.non_zero_states();
    assert_eq!(states.len(), 2);
    assert_eq!(states[0].index, 0);
    assert!(approx_eq(states[0].amplitude, FRAC_1_SQRT_2, 1e-12));
    assert_eq!(states[1].index, 1);
    assert!(approx_eq(states[1].amplitude, -FRAC_1_SQRT_2, 1e-12));

    let mut tiny = QuantumRegister::new(1).unwrap();
    tiny.apply_linear_map(&array![[1e-11, 0.0], [1.0, 0.0]]).unwrap();
    assert_eq!(tiny.non_zero_states(), vec![StateAmplitude { index: 1, amplitude: 1.0 }]);
}

#[test]
fn test_notation_signs_and_order() {
    let register = QuantumRegister::from_qubits(&[Qubit::minus()]).unwrap();
    let text = register.to_string();
    assert!(text.starts_with("|ψ⟩ = 0.70710678"), "{}", text);
    assert!(text.contains("|0⟩ - 0.70710678"), "{}", text);
    assert!(text.ends_with("|1⟩"), "{}", text);

    let mut negative = QuantumRegister::new(2).unwrap();
    negative.apply_linear_map(&(-Array2::<f64>::eye(4))).unwrap();
    assert_eq!(negative.to_string(), "|ψ⟩ = -1|00⟩");

    let mut mixed = QuantumRegister::new(2).unwrap();
    mixed
        .apply_linear_map(&array![
            [0.0, 0.0, 0.0, 0.0],
            [-0.5, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0],
            [0.25, 0.0, 0.0, 0.0]
        ])
        .unwrap();
    assert_eq!(mixed.to_string(), "|ψ⟩ = -0.5|01⟩ + 0.25|11⟩");
}

#[test]
fn test_notation_of_negligible_vector() {
    let mut register = QuantumRegister::new(3).unwrap();
    register.apply_linear_map(&Array2::zeros((8, 8))).unwrap();
    assert_eq!(register.to_string(), "|ψ⟩ = 0");
    assert!(register.non_zero_states().is_empty());
}

#[test]
fn test_format_basis_state() {
    let register = QuantumRegister::new(4).unwrap();
    assert_eq!(register.format_basis_state(5), "0101");
    assert_eq!(register.format_basis_state(0), "0000");
}
