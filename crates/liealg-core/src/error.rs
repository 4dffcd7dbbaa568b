//! Error types for Lie-group manifold operations.
//!
//! Statically typed manifold code cannot mix manifolds, so most operations
//! are infallible. Errors come from checked constructors (matrices, slices,
//! coordinate vectors) and from the runtime-tagged values used for
//! heterogeneous collections.

use thiserror::Error;

/// Errors that can occur during manifold operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifoldError {
    /// Operands belong to different manifolds.
    ///
    /// Raised by runtime-tagged values when `compose`, `minus` or `plus` is
    /// called with an operand of another manifold.
    #[error("[{operation}] type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Operation that was attempted
        operation: String,
        /// Manifold the operation expected
        expected: String,
        /// Manifold that was supplied
        actual: String,
    },

    /// An operand is not usable for the requested operation.
    ///
    /// This covers non-finite scale factors and coordinates as well as
    /// invalid configuration values.
    #[error("[{operation}] invalid operand: {reason}")]
    InvalidOperand {
        /// Operation that was attempted
        operation: String,
        /// Description of why the operand is invalid
        reason: String,
    },

    /// Value is not on the manifold.
    ///
    /// This error occurs when a value fails to satisfy the manifold constraints
    /// (unit norm, orthogonality, homogeneous row) within tolerance.
    #[error("Point is not on the manifold: {reason}")]
    InvalidPoint {
        /// Description of why the point is invalid
        reason: String,
    },

    /// Dimension mismatch between a slice and the expected coordinates.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions
        expected: String,
        /// Actual dimensions
        actual: String,
    },

    /// Numerical instability detected.
    #[error("Numerical instability detected: {reason}")]
    NumericalError {
        /// Description of the numerical issue
        reason: String,
    },
}

impl ManifoldError {
    /// Create a TypeMismatch error.
    pub fn type_mismatch<S1, S2, S3>(operation: S1, expected: S2, actual: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self::TypeMismatch {
            operation: operation.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an InvalidOperand error.
    pub fn invalid_operand<S1: Into<String>, S2: Into<String>>(operation: S1, reason: S2) -> Self {
        Self::InvalidOperand {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidPoint error with a custom reason.
    pub fn invalid_point<S: Into<String>>(reason: S) -> Self {
        Self::InvalidPoint {
            reason: reason.into(),
        }
    }

    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch<S1, S2>(expected: S1, actual: S2) -> Self
    where
        S1: std::fmt::Display,
        S2: std::fmt::Display,
    {
        Self::DimensionMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a NumericalError with a custom reason.
    pub fn numerical_error<S: Into<String>>(reason: S) -> Self {
        Self::NumericalError {
            reason: reason.into(),
        }
    }
}

/// Result type alias for operations that can produce ManifoldError.
pub type Result<T> = std::result::Result<T, ManifoldError>;
