//! Core traits and types for Lie-group manifold algebra.
//!
//! This crate provides the foundations shared by every manifold in the
//! workspace: the scalar abstraction the formulas are written against, the
//! group/tangent traits, the single angle-wrapping rule, error types and a
//! generic checker for the group laws.
//!
//! # Key Concepts
//!
//! - **Group elements**: points on a manifold with identity, inverse,
//!   composition and a logarithm map
//! - **Tangent elements**: Lie-algebra vectors with an exponential map,
//!   addition onto group elements and scaling
//! - **Scalars**: plain floats or any value providing the small operation
//!   set in [`types::Scalar`]
//!
//! # Modules
//!
//! - [`angle`]: Wrapping of periodic coordinates
//! - [`config`]: Validation tolerances
//! - [`error`]: Error types for manifold operations
//! - [`group`]: The `LieGroup` and `Tangent` traits and operator macro
//! - [`types`]: Scalar trait and type aliases
//! - [`validation`]: Numerical checking of the group laws

pub mod angle;
pub mod config;
pub mod error;
pub mod group;
pub mod types;
pub mod validation;

// Re-export commonly used items at the crate root
pub use error::{ManifoldError, Result};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use liealg_core::prelude::*;
///
/// assert_eq!(wrap_to_pi(std::f64::consts::PI), std::f64::consts::PI);
/// ```
pub mod prelude {
    pub use crate::angle::{angle_difference, wrap_to_pi, wrap_to_two_pi};
    pub use crate::config::{ValidationConfig, ValidationConfigBuilder};
    pub use crate::error::{ManifoldError, Result};
    pub use crate::group::{LieGroup, Tangent};
    pub use crate::types::{
        Matrix2, Matrix3, Matrix4, Scalar, Vector2, Vector3, Vector4, Vector6, Vector8,
    };
    pub use crate::validation::{GroupLaw, GroupLawChecker, LawReport};
}
