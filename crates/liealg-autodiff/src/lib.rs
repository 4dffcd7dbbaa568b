//! Forward-mode automatic differentiation for liealg manifolds.
//!
//! The manifold formulas are written against [`liealg_core::types::Scalar`]
//! and never branch on a value directly, so evaluating them on dual numbers
//! gives exact first derivatives of exp, log, compose and friends.
//!
//! # Example
//!
//! ```
//! use liealg_autodiff::derivative;
//! use liealg_core::types::Scalar;
//!
//! let (value, slope) = derivative(|x| x.sin() * x, 0.0_f64);
//! assert_eq!((value, slope), (0.0, 0.0));
//! ```

pub mod dual;

// Re-export key types
pub use dual::{derivative, jacobian, Dual};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::dual::{derivative, jacobian, Dual};
}
