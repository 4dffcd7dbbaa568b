//! liealg Manifolds - Concrete Lie-group manifolds.
//!
//! This crate provides the manifolds commonly used for robot state
//! estimation and kinematics: planar rotations, 3D rotations, rigid
//! transforms, and their quaternion parameterizations. Every pair of
//! group/tangent types implements the traits of `liealg-core`.

#![warn(missing_docs)]

pub mod dual_quaternion;
pub mod erased;
pub mod quaternion;
pub mod s1;
pub mod se3;
pub mod so3;
pub mod utils;

// Re-export main manifolds for convenience
pub use dual_quaternion::{DualQuaternion, DualQuaternionTangent};
pub use erased::{GroupValue, ManifoldKind, TangentValue};
pub use quaternion::{Quaternion, QuaternionTangent};
pub use s1::{S1Tangent, S1};
pub use se3::{SE3Tangent, SE3};
pub use so3::{left_jacobian, left_jacobian_inverse, right_jacobian, SO3Tangent, SO3};
pub use utils::{hat, vee};
