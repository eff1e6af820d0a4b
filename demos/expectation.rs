//! Example demonstrating the fused sparse expectation kernel
//!
//! Builds a small Hermitian operator in CSR form and evaluates ⟨ψ|A|ψ⟩
//! against a few states, including the raw complex accumulator view.

use num_complex::Complex64;
use qexpval::{CsrOperator, StateVector};

fn main() {
    println!("=== Sparse Expectation Values ===\n");

    example_diagonal_operator();
    example_complex_off_diagonals();
    example_raw_accumulator();
}

fn example_diagonal_operator() {
    println!("Example 1: Diagonal Operator");
    println!("----------------------------");

    // diag(1, -1) on a 2-dimensional space
    let op = CsrOperator::from_triplets(
        2,
        &[
            (0, 0, Complex64::new(1.0, 0.0)),
            (1, 1, Complex64::new(-1.0, 0.0)),
        ],
    )
    .unwrap();

    let ground = StateVector::basis(2, 0).unwrap();
    let excited = StateVector::basis(2, 1).unwrap();

    println!("  ⟨0|A|0⟩ = {:+.6}", op.expectation_value(&ground).unwrap());
    println!("  ⟨1|A|1⟩ = {:+.6}", op.expectation_value(&excited).unwrap());
    println!();
}

fn example_complex_off_diagonals() {
    println!("Example 2: Complex Off-Diagonals");
    println!("--------------------------------");

    // [[1, 1-i], [1+i, -1]]
    let op = CsrOperator::from_triplets(
        2,
        &[
            (0, 0, Complex64::new(1.0, 0.0)),
            (0, 1, Complex64::new(1.0, -1.0)),
            (1, 0, Complex64::new(1.0, 1.0)),
            (1, 1, Complex64::new(-1.0, 0.0)),
        ],
    )
    .unwrap();
    println!("  Hermitian: {}", op.is_hermitian(1e-12));

    let inv_sqrt2 = 1.0 / 2.0_f64.sqrt();
    let psi = StateVector::from_amplitudes(vec![
        Complex64::new(inv_sqrt2, 0.0),
        Complex64::new(0.0, inv_sqrt2),
    ])
    .unwrap();

    println!("  ⟨ψ|A|ψ⟩ = {:+.6}", op.expectation_value(&psi).unwrap());
    println!();
}

fn example_raw_accumulator() {
    println!("Example 3: Raw Complex Accumulator");
    println!("----------------------------------");

    let op = CsrOperator::from_triplets(
        3,
        &[
            (0, 1, Complex64::new(0.5, -0.25)),
            (1, 0, Complex64::new(0.5, 0.25)),
            (2, 2, Complex64::new(2.0, 0.0)),
        ],
    )
    .unwrap();

    let mut psi = StateVector::from_amplitudes(vec![
        Complex64::new(1.0, 0.0),
        Complex64::new(0.5, 0.5),
        Complex64::new(0.0, 1.0),
    ])
    .unwrap();
    psi.normalize();

    let accumulator = op.expectation_value_complex(&psi).unwrap();
    println!("  accumulator = {:+.12} {:+.12}i", accumulator.re, accumulator.im);
    println!("  real part   = {:+.12}", op.expectation_value(&psi).unwrap());
    println!("  (imaginary residue is rounding noise for Hermitian operators)");
}
