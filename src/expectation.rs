//! Expectation-value kernels
//!
//! This module provides the scalar ⟨ψ|A|ψ⟩ (or Tr(Aρ)) for a Hermitian
//! sparse operator A against either state representation:
//!
//! - **Wavefunction path**: a single fused sparse matrix-vector-then-
//!   inner-product pass. Each row's product entry (Aψ)ᵢ is folded into
//!   the accumulator conj(ψᵢ)·(Aψ)ᵢ immediately, so the intermediate
//!   vector Aψ is never materialized.
//! - **Density-matrix path**: Tr(Aρ) through the vectorized layout of
//!   [`crate::Superoperator`], working at dimension dim². Numerically
//!   consistent with the wavefunction path up to floating-point rounding
//!   in the last digits, and measurably slower.
//!
//! Hermiticity is a trusted precondition: the kernels discard the
//! imaginary part without verifying the operator. The raw complex
//! accumulator is available via
//! [`expectation_value_complex`](CsrOperator::expectation_value_complex)
//! for callers that want to inspect it before truncation.

use crate::csr_operator::CsrOperator;
use crate::density_matrix::DensityMatrix;
use crate::error::{ExpvalError, Result};
use crate::state_vector::StateVector;
use crate::superoperator::Superoperator;
use num_complex::Complex64;
use rayon::prelude::*;

impl CsrOperator {
    /// Expectation value ⟨ψ|A|ψ⟩ via the fused sparse kernel
    ///
    /// Returns the real part of the accumulated complex sum; the operator
    /// is assumed Hermitian so the imaginary part carries only rounding
    /// noise.
    ///
    /// # Errors
    /// Returns [`ExpvalError::InvalidDimension`] if the state dimension
    /// does not match the operator. No partial computation is performed.
    pub fn expectation_value(&self, state: &StateVector) -> Result<f64> {
        Ok(self.expectation_value_complex(state)?.re)
    }

    /// Raw complex accumulator of the fused kernel, before the real-part
    /// truncation
    ///
    /// For a genuinely Hermitian operator the imaginary part is rounding
    /// noise; a substantial imaginary part signals a violated
    /// precondition.
    ///
    /// # Errors
    /// Returns [`ExpvalError::InvalidDimension`] on dimension mismatch.
    pub fn expectation_value_complex(&self, state: &StateVector) -> Result<Complex64> {
        if state.dim() != self.dim() {
            return Err(ExpvalError::InvalidDimension {
                expected: self.dim(),
                actual: state.dim(),
            });
        }

        let psi = state.amplitudes();
        let mut accumulator = Complex64::new(0.0, 0.0);

        for i in 0..self.dim() {
            let mut row_sum = Complex64::new(0.0, 0.0);
            for (col, value) in self.row(i) {
                row_sum += value * psi[col];
            }
            accumulator += psi[i].conj() * row_sum;
        }

        Ok(accumulator)
    }

    /// Row-parallel variant of the fused kernel
    ///
    /// Sums the same set of terms as the serial kernel; only the
    /// reduction order differs, so results agree up to floating-point
    /// rounding. Worth it for large operators, pure overhead for small
    /// ones.
    ///
    /// # Errors
    /// Returns [`ExpvalError::InvalidDimension`] on dimension mismatch.
    pub fn expectation_value_parallel(&self, state: &StateVector) -> Result<f64> {
        if state.dim() != self.dim() {
            return Err(ExpvalError::InvalidDimension {
                expected: self.dim(),
                actual: state.dim(),
            });
        }

        let psi = state.amplitudes();
        let accumulator: Complex64 = (0..self.dim())
            .into_par_iter()
            .map(|i| {
                let mut row_sum = Complex64::new(0.0, 0.0);
                for (col, value) in self.row(i) {
                    row_sum += value * psi[col];
                }
                psi[i].conj() * row_sum
            })
            .sum();

        Ok(accumulator.re)
    }

    /// Expectation value Tr(Aρ) via the vectorized density-matrix path
    ///
    /// Routes through [`Superoperator::pre`], operating at dimension
    /// dim². Mathematically equivalent to the wavefunction kernel for
    /// ρ = |ψ⟩⟨ψ|, and slower. Use it when the state genuinely is a
    /// density operator.
    ///
    /// # Errors
    /// Returns [`ExpvalError::InvalidDimension`] on dimension mismatch.
    pub fn density_expectation_value(&self, rho: &DensityMatrix) -> Result<f64> {
        if rho.dim() != self.dim() {
            return Err(ExpvalError::InvalidDimension {
                expected: self.dim(),
                actual: rho.dim(),
            });
        }

        Superoperator::pre(self).expectation_value(rho)
    }
}

/// Quantum state in either supported representation
///
/// A closed tagged union: the kernel dispatches on the variant rather
/// than inspecting types at runtime.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuantumState {
    /// Pure state as a dense complex vector
    Ket(StateVector),
    /// General (possibly mixed) state as a density matrix
    Density(DensityMatrix),
}

impl QuantumState {
    /// Dimension of the underlying Hilbert space
    pub fn dim(&self) -> usize {
        match self {
            QuantumState::Ket(state) => state.dim(),
            QuantumState::Density(rho) => rho.dim(),
        }
    }
}

impl From<StateVector> for QuantumState {
    fn from(state: StateVector) -> Self {
        QuantumState::Ket(state)
    }
}

impl From<DensityMatrix> for QuantumState {
    fn from(rho: DensityMatrix) -> Self {
        QuantumState::Density(rho)
    }
}

/// Expectation value of a Hermitian operator against either state
/// representation
///
/// Both variants produce numerically consistent scalars for the same
/// physical state, differing only in floating-point rounding.
///
/// # Example
///
/// ```
/// use qexpval::{expectation, CsrOperator, DensityMatrix, QuantumState, StateVector};
///
/// let op = CsrOperator::identity(4).unwrap();
/// let psi = StateVector::new(4).unwrap();
/// let rho = DensityMatrix::from_pure(&psi);
///
/// let a = expectation(&op, &QuantumState::Ket(psi)).unwrap();
/// let b = expectation(&op, &QuantumState::Density(rho)).unwrap();
/// assert!((a - b).abs() < 1e-12);
/// ```
pub fn expectation(op: &CsrOperator, state: &QuantumState) -> Result<f64> {
    match state {
        QuantumState::Ket(psi) => op.expectation_value(psi),
        QuantumState::Density(rho) => op.density_expectation_value(rho),
    }
}
