//! Sparse expectation-value kernels for quantum observables
//!
//! This crate computes the scalar ⟨ψ|A|ψ⟩ (or Tr(Aρ)) for a Hermitian
//! operator A stored in compressed-sparse-row form, against either state
//! representation:
//!
//! - **Wavefunction**: a fused sparse matrix-vector-then-inner-product
//!   pass over the non-zero entries, never materializing Aψ
//! - **Density matrix**: the vectorized path through a block-diagonal
//!   pre-multiplication superoperator at dimension dim²
//!
//! Both paths produce numerically consistent results for the same
//! physical state; the fused wavefunction kernel is the fast path, an
//! order of magnitude ahead of the dense baseline for moderately sparse
//! operators.
//!
//! # Example
//!
//! ```
//! use qexpval::{CsrOperator, StateVector};
//! use num_complex::Complex64;
//!
//! let op = CsrOperator::from_triplets(
//!     2,
//!     &[
//!         (0, 0, Complex64::new(1.0, 0.0)),
//!         (1, 1, Complex64::new(-1.0, 0.0)),
//!     ],
//! )
//! .unwrap();
//!
//! let psi = StateVector::new(2).unwrap();
//! let value = op.expectation_value(&psi).unwrap();
//! assert!((value - 1.0).abs() < 1e-12);
//! ```

pub mod csr_operator;
pub mod dense_operator;
pub mod density_matrix;
pub mod error;
pub mod expectation;
pub mod random;
pub mod state_vector;
pub mod superoperator;
pub mod validation;

pub use csr_operator::CsrOperator;
pub use dense_operator::DenseOperator;
pub use density_matrix::DensityMatrix;
pub use error::{ExpvalError, Result};
pub use expectation::{expectation, QuantumState};
pub use state_vector::StateVector;
pub use superoperator::Superoperator;
pub use validation::{validate_normalization, ValidationResult, DEFAULT_NORM_TOLERANCE};
