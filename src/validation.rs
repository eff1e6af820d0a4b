//! Structural and normalization checks
//!
//! This module provides validation utilities that run once at API
//! boundaries. The expectation kernels themselves never validate: they
//! trust the invariants established here at construction time.

use crate::error::{ExpvalError, Result};
use num_complex::Complex64;

/// Default tolerance for normalization checks
pub const DEFAULT_NORM_TOLERANCE: f64 = 1e-10;

/// Validate a compressed-sparse-row structure.
///
/// Checks that:
/// - the dimension is nonzero
/// - `row_ptr` has length `dim + 1`, starts at 0, and is non-decreasing
/// - `col_indices` and the value array have matching lengths equal to
///   `row_ptr[dim]`
/// - column indices within each row are strictly increasing and `< dim`
///
/// # Errors
/// Returns [`ExpvalError::InvalidLayout`] describing the first violation.
pub fn validate_csr(
    dim: usize,
    row_ptr: &[usize],
    col_indices: &[usize],
    values_len: usize,
) -> Result<()> {
    if dim == 0 {
        return Err(ExpvalError::InvalidLayout {
            reason: "operator dimension must be nonzero".to_string(),
        });
    }

    if row_ptr.len() != dim + 1 {
        return Err(ExpvalError::InvalidLayout {
            reason: format!(
                "row pointer array has length {}, expected {}",
                row_ptr.len(),
                dim + 1
            ),
        });
    }

    if row_ptr[0] != 0 {
        return Err(ExpvalError::InvalidLayout {
            reason: format!("row pointers must start at 0, found {}", row_ptr[0]),
        });
    }

    for i in 0..dim {
        if row_ptr[i + 1] < row_ptr[i] {
            return Err(ExpvalError::InvalidLayout {
                reason: format!("row pointers must be non-decreasing, violated at row {}", i),
            });
        }
    }

    let nnz = row_ptr[dim];
    if col_indices.len() != nnz || values_len != nnz {
        return Err(ExpvalError::InvalidLayout {
            reason: format!(
                "row pointers imply {} non-zeros, found {} column indices and {} values",
                nnz,
                col_indices.len(),
                values_len
            ),
        });
    }

    for row in 0..dim {
        let cols = &col_indices[row_ptr[row]..row_ptr[row + 1]];
        for (k, &col) in cols.iter().enumerate() {
            if col >= dim {
                return Err(ExpvalError::InvalidLayout {
                    reason: format!("column index {} out of bounds in row {}", col, row),
                });
            }
            if k > 0 && cols[k - 1] >= col {
                return Err(ExpvalError::InvalidLayout {
                    reason: format!(
                        "column indices must be strictly increasing within row {}",
                        row
                    ),
                });
            }
        }
    }

    Ok(())
}

/// Validation result with diagnostics
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the state passed validation
    pub valid: bool,
    /// Current norm of the state
    pub norm: f64,
    /// Deviation from ideal norm (1.0)
    pub norm_error: f64,
    /// Human-readable diagnostic message
    pub message: String,
}

impl ValidationResult {
    /// Check if the state is valid within tolerance
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Check if normalization needs correction
    pub fn needs_normalization(&self) -> bool {
        self.norm_error > DEFAULT_NORM_TOLERANCE
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ValidationResult(valid={}, norm={:.6}, error={:.2e})",
            self.valid, self.norm, self.norm_error
        )
    }
}

/// Validate state normalization.
///
/// Advisory only: the expectation kernels accept non-unit vectors and the
/// caller decides whether a probabilistic interpretation requires
/// renormalization first.
///
/// # Example
/// ```
/// use qexpval::validation::{validate_normalization, DEFAULT_NORM_TOLERANCE};
/// use num_complex::Complex64;
///
/// let amplitudes = vec![
///     Complex64::new(1.0 / 2.0_f64.sqrt(), 0.0),
///     Complex64::new(1.0 / 2.0_f64.sqrt(), 0.0),
/// ];
///
/// let result = validate_normalization(&amplitudes, DEFAULT_NORM_TOLERANCE);
/// assert!(result.is_valid());
/// ```
pub fn validate_normalization(amplitudes: &[Complex64], tolerance: f64) -> ValidationResult {
    let norm_squared: f64 = amplitudes.iter().map(|a| a.norm_sqr()).sum();
    let norm = norm_squared.sqrt();
    let norm_error = (norm - 1.0).abs();

    let valid = norm_error < tolerance;
    let message = if valid {
        format!("State is normalized (norm = {:.10})", norm)
    } else {
        format!(
            "State normalization error: norm = {:.10}, error = {:.2e}",
            norm, norm_error
        )
    };

    ValidationResult {
        valid,
        norm,
        norm_error,
        message,
    }
}
