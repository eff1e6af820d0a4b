//! Error types for operator and state operations

use thiserror::Error;

/// Errors that can occur during operator and state operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpvalError {
    /// Operator and operand dimensions do not match
    #[error("Dimension mismatch: operator dimension {expected}, operand dimension {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    /// Malformed compressed-sparse-row structure
    #[error("Invalid CSR layout: {reason}")]
    InvalidLayout { reason: String },
}

/// Result type for operator and state operations
pub type Result<T> = std::result::Result<T, ExpvalError>;
