//! Random operator and state generation
//!
//! Seeded generators for benchmark and test inputs: unit-norm random
//! kets and sparse random Hermitian operators.

use crate::csr_operator::CsrOperator;
use crate::error::Result;
use crate::state_vector::StateVector;
use num_complex::Complex64;
use rand::Rng;

/// Generate a unit-norm random state vector
///
/// Amplitudes are drawn uniformly from the centered unit square in the
/// complex plane, then normalized.
///
/// # Errors
/// Returns an error if `dim` is zero.
pub fn rand_ket<R: Rng + ?Sized>(dim: usize, rng: &mut R) -> Result<StateVector> {
    let amplitudes: Vec<Complex64> = (0..dim)
        .map(|_| Complex64::new(rng.gen::<f64>() - 0.5, rng.gen::<f64>() - 0.5))
        .collect();

    let mut state = StateVector::from_amplitudes(amplitudes)?;
    state.normalize();
    Ok(state)
}

/// Generate a random sparse Hermitian operator
///
/// Each upper-triangle coordinate is populated with probability
/// `density`; off-diagonal entries are mirrored with their conjugates
/// and diagonal entries are kept real, so the result is Hermitian by
/// construction.
///
/// # Arguments
/// * `dim` - Operator dimension
/// * `density` - Expected fraction of non-zero entries, in [0, 1]
/// * `rng` - Random source (seed it for reproducible operators)
///
/// # Errors
/// Returns an error if `dim` is zero.
pub fn rand_hermitian<R: Rng + ?Sized>(
    dim: usize,
    density: f64,
    rng: &mut R,
) -> Result<CsrOperator> {
    let mut entries: Vec<(usize, usize, Complex64)> = Vec::new();

    for row in 0..dim {
        for col in row..dim {
            if rng.gen::<f64>() >= density {
                continue;
            }
            if row == col {
                entries.push((row, col, Complex64::new(rng.gen::<f64>() - 0.5, 0.0)));
            } else {
                let value = Complex64::new(rng.gen::<f64>() - 0.5, rng.gen::<f64>() - 0.5);
                entries.push((row, col, value));
                entries.push((col, row, value.conj()));
            }
        }
    }

    CsrOperator::from_triplets(dim, &entries)
}
