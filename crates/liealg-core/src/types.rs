//! Scalar abstraction and type aliases for Lie-group manifolds.
//!
//! Every manifold formula in this workspace is written against [`Scalar`],
//! a small operation set (ring arithmetic, a handful of trigonometric
//! functions, a modulo and a branch-free select). Plain floats implement it
//! with immediate evaluation; other crates can implement it for deferred or
//! differentiable values without touching the manifold code.

use nalgebra::{Const, OMatrix, OVector, Scalar as NalgebraScalar};
use num_traits::{One, Zero};
use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

pub use nalgebra::{Matrix2, Matrix3, Matrix4, Vector2, Vector3, Vector4, Vector6};

/// Trait for the scalar values manifold coordinates are built from.
///
/// The bounds deliberately stop at ring arithmetic: nothing here requires an
/// ordered field, so a symbolic expression type can implement it as long as
/// it provides the operations below. Branching on a value must go through
/// [`Scalar::select_lt`].
pub trait Scalar:
    NalgebraScalar
    + Copy
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Display
    + Debug
    + Send
    + Sync
    + 'static
{
    /// Squared-angle threshold below which exp/log switch to Taylor expansions.
    ///
    /// The expansions are kept to fourth order in the angle, so the threshold
    /// is chosen where the closed forms start losing digits to cancellation.
    const SMALL_ANGLE: f64;

    /// Default tolerance for checking that a value lies on its manifold.
    const MANIFOLD_TOLERANCE: f64;

    /// Convert from f64 (for constants).
    fn from_f64(v: f64) -> Self;

    /// Convert to f64 (for logging, display and tolerance checks).
    ///
    /// Values that carry more than a real number (dual numbers, symbolic
    /// expressions) return their real part.
    fn to_f64(self) -> f64;

    /// Sine.
    fn sin(self) -> Self;

    /// Cosine.
    fn cos(self) -> Self;

    /// Square root.
    fn sqrt(self) -> Self;

    /// Four-quadrant arctangent of `self / x`.
    fn atan2(self, x: Self) -> Self;

    /// Euclidean remainder, always in `[0, modulus)` for a positive modulus.
    fn rem_euclid(self, modulus: Self) -> Self;

    /// Returns `if_true` when `self < threshold`, `if_false` otherwise.
    ///
    /// Both branches are evaluated by the caller; the selection itself is the
    /// only data-dependent step.
    fn select_lt(self, threshold: Self, if_true: Self, if_false: Self) -> Self;

    /// The constant π.
    fn pi() -> Self {
        Self::from_f64(std::f64::consts::PI)
    }

    /// The period of the circle, 2π.
    fn two_pi() -> Self {
        Self::from_f64(std::f64::consts::TAU)
    }

    /// One half.
    fn half() -> Self {
        Self::from_f64(0.5)
    }

    /// Absolute value expressed through [`Scalar::select_lt`].
    fn abs(self) -> Self {
        self.select_lt(Self::zero(), -self, self)
    }

    /// Square of the value.
    fn squared(self) -> Self {
        self * self
    }
}

impl Scalar for f32 {
    const SMALL_ANGLE: f64 = 1e-2;
    const MANIFOLD_TOLERANCE: f64 = 1e-5;

    fn from_f64(v: f64) -> Self {
        v as f32
    }

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn sin(self) -> Self {
        f32::sin(self)
    }

    fn cos(self) -> Self {
        f32::cos(self)
    }

    fn sqrt(self) -> Self {
        f32::sqrt(self)
    }

    fn atan2(self, x: Self) -> Self {
        f32::atan2(self, x)
    }

    fn rem_euclid(self, modulus: Self) -> Self {
        let r = f32::rem_euclid(self, modulus);
        // A tiny negative input can round up to exactly the modulus.
        if r >= modulus {
            0.0
        } else {
            r
        }
    }

    fn select_lt(self, threshold: Self, if_true: Self, if_false: Self) -> Self {
        if self < threshold {
            if_true
        } else {
            if_false
        }
    }
}

impl Scalar for f64 {
    const SMALL_ANGLE: f64 = 1e-6;
    const MANIFOLD_TOLERANCE: f64 = 1e-9;

    fn from_f64(v: f64) -> Self {
        v
    }

    fn to_f64(self) -> f64 {
        self
    }

    fn sin(self) -> Self {
        f64::sin(self)
    }

    fn cos(self) -> Self {
        f64::cos(self)
    }

    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    fn atan2(self, x: Self) -> Self {
        f64::atan2(self, x)
    }

    fn rem_euclid(self, modulus: Self) -> Self {
        let r = f64::rem_euclid(self, modulus);
        if r >= modulus {
            0.0
        } else {
            r
        }
    }

    fn select_lt(self, threshold: Self, if_true: Self, if_false: Self) -> Self {
        if self < threshold {
            if_true
        } else {
            if_false
        }
    }
}

/// Type alias for a statically-sized vector.
pub type SVector<T, const N: usize> = OVector<T, Const<N>>;

/// Type alias for a statically-sized matrix.
pub type SMatrix<T, const R: usize, const C: usize> = OMatrix<T, Const<R>, Const<C>>;

/// Eight coefficients of a dual quaternion.
pub type Vector8<T> = SVector<T, 8>;
