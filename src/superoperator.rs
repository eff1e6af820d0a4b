//! Vectorized-layout operator for the density-matrix expectation path
//!
//! A density matrix of dimension n is flattened to a column-stacked
//! vector of length n², and left-multiplication by an operator A becomes
//! a sparse matrix acting at that larger dimension:
//!
//! vec(Aρ) = (I ⊗ A) vec(ρ)
//!
//! The (I ⊗ A) matrix is block-diagonal with n copies of A, so it stays
//! sparse whenever A is. Working at n² is what makes this path slower
//! than the wavefunction kernel; the layouts agree on the final scalar.
//!
//! Only pre-multiplication is provided. General superoperator algebra
//! (composition, rearrangement, channel representations) is out of scope.

use crate::csr_operator::CsrOperator;
use crate::density_matrix::DensityMatrix;
use crate::error::{ExpvalError, Result};
use num_complex::Complex64;

/// Pre-multiplication superoperator acting on column-stacked density
/// matrices
///
/// # Example
///
/// ```
/// use qexpval::{CsrOperator, DensityMatrix, StateVector, Superoperator};
///
/// let op = CsrOperator::identity(3).unwrap();
/// let rho = DensityMatrix::from_pure(&StateVector::new(3).unwrap());
///
/// let sop = Superoperator::pre(&op);
/// let value = sop.expectation_value(&rho).unwrap();
/// assert!((value - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Superoperator {
    /// Underlying Hilbert-space dimension n
    dim: usize,

    /// Block-diagonal n² × n² matrix
    matrix: CsrOperator,
}

impl Superoperator {
    /// Build the pre-multiplication superoperator I ⊗ A
    pub fn pre(op: &CsrOperator) -> Self {
        let n = op.dim();
        let nnz = op.nnz();

        let mut row_ptr = Vec::with_capacity(n * n + 1);
        let mut col_indices = Vec::with_capacity(nnz * n);
        let mut values = Vec::with_capacity(nnz * n);
        row_ptr.push(0);

        // Column-stacking: block b holds rows b*n..(b+1)*n, each block is
        // a copy of A with columns shifted by b*n.
        for block in 0..n {
            let shift = block * n;
            for row in 0..n {
                for (col, value) in op.row(row) {
                    col_indices.push(shift + col);
                    values.push(value);
                }
                row_ptr.push(col_indices.len());
            }
        }

        Self {
            dim: n,
            matrix: CsrOperator::from_raw_parts_unchecked(n * n, row_ptr, col_indices, values),
        }
    }

    /// Underlying Hilbert-space dimension n
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Dimension the superoperator acts at (n²)
    #[inline]
    pub fn vec_dim(&self) -> usize {
        self.dim * self.dim
    }

    /// Number of stored non-zero entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.matrix.nnz()
    }

    /// Apply to a column-stacked density matrix: vec(Aρ)
    ///
    /// # Errors
    /// Returns [`ExpvalError::InvalidDimension`] if the input does not
    /// have length n².
    pub fn apply(&self, vec_rho: &[Complex64]) -> Result<Vec<Complex64>> {
        if vec_rho.len() != self.vec_dim() {
            return Err(ExpvalError::InvalidDimension {
                expected: self.vec_dim(),
                actual: vec_rho.len(),
            });
        }

        let mut out = vec![Complex64::new(0.0, 0.0); vec_rho.len()];
        self.matrix.spmv(vec_rho, &mut out)?;
        Ok(out)
    }

    /// Expectation value Tr(Aρ) through the vectorized layout
    ///
    /// Applies the superoperator to vec(ρ), then sums the diagonal of
    /// the un-stacked product. Returns the real part; Hermiticity of the
    /// underlying operator is the caller's assertion.
    ///
    /// # Errors
    /// Returns [`ExpvalError::InvalidDimension`] on dimension mismatch.
    pub fn expectation_value(&self, rho: &DensityMatrix) -> Result<f64> {
        if rho.dim() != self.dim {
            return Err(ExpvalError::InvalidDimension {
                expected: self.dim,
                actual: rho.dim(),
            });
        }

        let product = self.apply(&rho.vectorize())?;

        // Diagonal element (i, i) of the un-stacked matrix sits at
        // index i * n + i in either stacking convention.
        let n = self.dim;
        let mut trace = Complex64::new(0.0, 0.0);
        for i in 0..n {
            trace += product[i * n + i];
        }

        Ok(trace.re)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_vector::StateVector;
    use approx::assert_relative_eq;

    fn hermitian_2x2() -> CsrOperator {
        // [[1, 1-i], [1+i, -1]]
        CsrOperator::from_triplets(
            2,
            &[
                (0, 0, Complex64::new(1.0, 0.0)),
                (0, 1, Complex64::new(1.0, -1.0)),
                (1, 0, Complex64::new(1.0, 1.0)),
                (1, 1, Complex64::new(-1.0, 0.0)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_pre_block_structure() {
        let sop = Superoperator::pre(&hermitian_2x2());
        assert_eq!(sop.dim(), 2);
        assert_eq!(sop.vec_dim(), 4);
        // One copy of A per block
        assert_eq!(sop.nnz(), 8);
    }

    #[test]
    fn test_apply_dimension_mismatch() {
        let sop = Superoperator::pre(&hermitian_2x2());
        let bad = vec![Complex64::new(1.0, 0.0); 3];
        assert_eq!(
            sop.apply(&bad),
            Err(ExpvalError::InvalidDimension {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_expectation_maximally_mixed_is_mean_trace() {
        // Tr(A · I/n) = Tr(A)/n = (1 - 1)/2 = 0
        let sop = Superoperator::pre(&hermitian_2x2());
        let rho = DensityMatrix::maximally_mixed(2).unwrap();
        assert_relative_eq!(sop.expectation_value(&rho).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_expectation_pure_state_matches_ket_kernel() {
        let op = hermitian_2x2();
        let inv_sqrt2 = 1.0 / 2.0_f64.sqrt();
        let psi = StateVector::from_amplitudes(vec![
            Complex64::new(inv_sqrt2, 0.0),
            Complex64::new(0.0, inv_sqrt2),
        ])
        .unwrap();

        let ket_value = op.expectation_value(&psi).unwrap();
        let rho = DensityMatrix::from_pure(&psi);
        let density_value = Superoperator::pre(&op).expectation_value(&rho).unwrap();

        assert_relative_eq!(ket_value, density_value, epsilon = 1e-12);
    }

    #[test]
    fn test_expectation_rho_dimension_mismatch() {
        let sop = Superoperator::pre(&hermitian_2x2());
        let rho = DensityMatrix::maximally_mixed(3).unwrap();
        assert_eq!(
            sop.expectation_value(&rho),
            Err(ExpvalError::InvalidDimension {
                expected: 2,
                actual: 3
            })
        );
    }
}
