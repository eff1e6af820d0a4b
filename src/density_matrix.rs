//! Density matrix representation for mixed quantum states
//!
//! A density matrix ρ is a positive semi-definite, Hermitian matrix with
//! Tr(ρ) = 1. For pure states ρ = |ψ⟩⟨ψ|; mixed states are convex
//! combinations of pure projectors.
//!
//! Expectation values against a density operator are evaluated through
//! the vectorized layout produced by [`vectorize`](DensityMatrix::vectorize)
//! together with [`crate::Superoperator`].

use crate::error::{ExpvalError, Result};
use crate::state_vector::StateVector;
use num_complex::Complex64;
use std::fmt;

/// Density matrix representation of a quantum state
///
/// Stores the full dim × dim matrix in row-major order.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DensityMatrix {
    /// Matrix dimension
    dim: usize,

    /// Matrix elements in row-major order, length dim²
    matrix: Vec<Complex64>,
}

impl DensityMatrix {
    /// Create a new density matrix for the first basis state projector
    ///
    /// # Errors
    /// Returns an error if `dim` is zero.
    pub fn new(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(ExpvalError::InvalidLayout {
                reason: "density matrix dimension must be nonzero".to_string(),
            });
        }

        let mut matrix = vec![Complex64::new(0.0, 0.0); dim * dim];
        matrix[0] = Complex64::new(1.0, 0.0);
        Ok(Self { dim, matrix })
    }

    /// Create a density matrix from a pure state: ρ = |ψ⟩⟨ψ|
    pub fn from_pure(state: &StateVector) -> Self {
        let dim = state.dim();
        let amplitudes = state.amplitudes();
        let mut matrix = vec![Complex64::new(0.0, 0.0); dim * dim];

        // Outer product: ρᵢⱼ = ψᵢ ψⱼ*
        for i in 0..dim {
            for j in 0..dim {
                matrix[i * dim + j] = amplitudes[i] * amplitudes[j].conj();
            }
        }

        Self { dim, matrix }
    }

    /// Create the maximally mixed state: ρ = I/dim
    ///
    /// # Errors
    /// Returns an error if `dim` is zero.
    pub fn maximally_mixed(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(ExpvalError::InvalidLayout {
                reason: "density matrix dimension must be nonzero".to_string(),
            });
        }

        let mut matrix = vec![Complex64::new(0.0, 0.0); dim * dim];
        let value = Complex64::new(1.0 / dim as f64, 0.0);
        for i in 0..dim {
            matrix[i * dim + i] = value;
        }

        Ok(Self { dim, matrix })
    }

    /// Create a density matrix from raw row-major elements
    ///
    /// No physical-validity check is performed; use
    /// [`is_valid`](DensityMatrix::is_valid) when one is wanted.
    ///
    /// # Errors
    /// Returns an error if `elements` does not have length `dim * dim`.
    pub fn from_elements(dim: usize, elements: Vec<Complex64>) -> Result<Self> {
        if dim == 0 {
            return Err(ExpvalError::InvalidLayout {
                reason: "density matrix dimension must be nonzero".to_string(),
            });
        }
        if elements.len() != dim * dim {
            return Err(ExpvalError::InvalidDimension {
                expected: dim * dim,
                actual: elements.len(),
            });
        }
        Ok(Self {
            dim,
            matrix: elements,
        })
    }

    /// Get the matrix dimension
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Get a matrix element ρᵢⱼ
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.matrix[row * self.dim + col]
    }

    /// Set a matrix element ρᵢⱼ
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Complex64) {
        self.matrix[row * self.dim + col] = value;
    }

    /// Get reference to the full matrix data (row-major)
    pub fn matrix(&self) -> &[Complex64] {
        &self.matrix
    }

    /// Calculate the trace Tr(ρ)
    ///
    /// Should always be 1 for valid density matrices.
    pub fn trace(&self) -> f64 {
        let mut tr = Complex64::new(0.0, 0.0);
        for i in 0..self.dim {
            tr += self.get(i, i);
        }
        tr.re
    }

    /// Calculate the purity Tr(ρ²)
    ///
    /// Returns 1 for pure states, down to 1/dim for the maximally mixed
    /// state.
    pub fn purity(&self) -> f64 {
        let mut trace = Complex64::new(0.0, 0.0);
        for i in 0..self.dim {
            for j in 0..self.dim {
                trace += self.get(i, j) * self.get(j, i);
            }
        }
        trace.re
    }

    /// Check if the density matrix is valid (Hermitian, unit trace,
    /// non-negative diagonal)
    pub fn is_valid(&self, tolerance: f64) -> bool {
        if (self.trace() - 1.0).abs() > tolerance {
            return false;
        }

        // Hermitian: ρᵢⱼ = ρⱼᵢ*
        for i in 0..self.dim {
            for j in (i + 1)..self.dim {
                let diff = (self.get(i, j) - self.get(j, i).conj()).norm();
                if diff > tolerance {
                    return false;
                }
            }
        }

        for i in 0..self.dim {
            if self.get(i, i).re < -tolerance {
                return false;
            }
        }

        true
    }

    /// Column-stacked vectorization of the matrix
    ///
    /// Element ρᵢⱼ lands at index `j * dim + i`. This is the data layout
    /// consumed by [`crate::Superoperator`].
    pub fn vectorize(&self) -> Vec<Complex64> {
        let n = self.dim;
        let mut out = vec![Complex64::new(0.0, 0.0); n * n];
        for i in 0..n {
            for j in 0..n {
                out[j * n + i] = self.matrix[i * n + j];
            }
        }
        out
    }
}

impl fmt::Debug for DensityMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DensityMatrix {{ dim: {}, trace: {:.6}, purity: {:.4} }}",
            self.dim,
            self.trace(),
            self.purity()
        )
    }
}
