//! liealg - Lie-group manifold algebra.
//!
//! This crate re-exports the workspace crates under one name:
//!
//! - [`core`]: scalar abstraction, the `LieGroup`/`Tangent` traits, angle
//!   wrapping, errors, configuration and the group-law checker
//! - [`manifolds`]: S1, SO3, SE3, Quaternion and DualQuaternion
//! - `autodiff` (feature `autodiff`): dual-number scalars
//!
//! # Example
//!
//! ```
//! use liealg::prelude::*;
//! use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
//!
//! let a = S1::new(FRAC_PI_4);
//! let b = a * a;
//! assert!((b.as_angle() - FRAC_PI_2).abs() < 1e-12);
//! assert!(((b - a) + a).is_approx(&b, 1e-12));
//! ```

pub use liealg_core as core;
pub use liealg_manifolds as manifolds;

#[cfg(feature = "autodiff")]
pub use liealg_autodiff as autodiff;

pub use liealg_core::{ManifoldError, Result};
pub use nalgebra;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use liealg_core::prelude::*;
    pub use liealg_manifolds::{
        DualQuaternion, DualQuaternionTangent, GroupValue, ManifoldKind, Quaternion,
        QuaternionTangent, S1Tangent, SE3Tangent, SO3Tangent, TangentValue, S1, SE3, SO3,
    };

    #[cfg(feature = "autodiff")]
    pub use liealg_autodiff::{derivative, jacobian, Dual};
}
