//! Dense operator representation and baseline expectation path
//!
//! The dense path materializes the full matrix-vector product before
//! reducing. It exists as the generic comparison target for the fused
//! sparse kernel and for operators too dense to benefit from CSR storage.

use crate::csr_operator::CsrOperator;
use crate::error::{ExpvalError, Result};
use crate::state_vector::StateVector;
use num_complex::Complex64;

/// Dense row-major operator
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DenseOperator {
    /// Operator dimension (square)
    dim: usize,

    /// Matrix elements in row-major order, length dim²
    elements: Vec<Complex64>,
}

impl DenseOperator {
    /// Create an operator from raw row-major elements
    ///
    /// # Errors
    /// Returns an error if `dim` is zero or `elements` does not have
    /// length `dim * dim`.
    pub fn from_elements(dim: usize, elements: Vec<Complex64>) -> Result<Self> {
        if dim == 0 {
            return Err(ExpvalError::InvalidLayout {
                reason: "operator dimension must be nonzero".to_string(),
            });
        }
        if elements.len() != dim * dim {
            return Err(ExpvalError::InvalidDimension {
                expected: dim * dim,
                actual: elements.len(),
            });
        }
        Ok(Self { dim, elements })
    }

    /// Internal constructor for element arrays of known-correct length.
    pub(crate) fn from_raw_elements(dim: usize, elements: Vec<Complex64>) -> Self {
        debug_assert_eq!(elements.len(), dim * dim);
        Self { dim, elements }
    }

    /// Create the identity operator
    pub fn identity(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(ExpvalError::InvalidLayout {
                reason: "operator dimension must be nonzero".to_string(),
            });
        }
        let mut elements = vec![Complex64::new(0.0, 0.0); dim * dim];
        for i in 0..dim {
            elements[i * dim + i] = Complex64::new(1.0, 0.0);
        }
        Ok(Self { dim, elements })
    }

    /// Get the operator dimension
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Get the element at (row, col)
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.elements[row * self.dim + col]
    }

    /// Set the element at (row, col)
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Complex64) {
        self.elements[row * self.dim + col] = value;
    }

    /// Get reference to the full element array (row-major)
    pub fn elements(&self) -> &[Complex64] {
        &self.elements
    }

    /// Extract the sparse form, keeping entries with squared magnitude
    /// above `tolerance`
    pub fn to_csr(&self, tolerance: f64) -> CsrOperator {
        let mut row_ptr = Vec::with_capacity(self.dim + 1);
        let mut col_indices = Vec::new();
        let mut values = Vec::new();
        row_ptr.push(0);

        for row in 0..self.dim {
            for col in 0..self.dim {
                let value = self.elements[row * self.dim + col];
                if value.norm_sqr() > tolerance {
                    col_indices.push(col);
                    values.push(value);
                }
            }
            row_ptr.push(col_indices.len());
        }

        CsrOperator::from_raw_parts_unchecked(self.dim, row_ptr, col_indices, values)
    }

    /// Expectation value ⟨ψ|A|ψ⟩ via the dense two-pass path
    ///
    /// Materializes the full product Aψ, then reduces against ψ. This is
    /// the baseline the fused sparse kernel is measured against.
    ///
    /// # Errors
    /// Returns [`ExpvalError::InvalidDimension`] on dimension mismatch.
    pub fn expectation_value(&self, state: &StateVector) -> Result<f64> {
        if state.dim() != self.dim {
            return Err(ExpvalError::InvalidDimension {
                expected: self.dim,
                actual: state.dim(),
            });
        }

        let psi = state.amplitudes();
        let mut product = vec![Complex64::new(0.0, 0.0); self.dim];
        for row in 0..self.dim {
            let mut sum = Complex64::new(0.0, 0.0);
            for col in 0..self.dim {
                sum += self.elements[row * self.dim + col] * psi[col];
            }
            product[row] = sum;
        }

        let accumulator: Complex64 = psi
            .iter()
            .zip(product.iter())
            .map(|(a, b)| a.conj() * b)
            .sum();

        Ok(accumulator.re)
    }
}
