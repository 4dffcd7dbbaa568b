//! Circle group S¹ = {θ mod 2π}.
//!
//! The circle is the only one-dimensional manifold of the family and its
//! group law is plain addition of angles. The canonical representative of
//! an element is its angle wrapped into `(−π, π]`; every operation goes
//! through [`wrap_to_pi`] so that representation is maintained.
//!
//! # Mathematical Properties
//!
//! - **Dimension**: 1
//! - **Group law**: `θ₁ ∘ θ₂ = wrap(θ₁ + θ₂)`, commutative
//! - **Exponential/logarithm**: identity on the coordinate, followed by wrap
//! - **Difference**: `θ₁ − θ₂ = wrap(θ₁ − θ₂)`

use liealg_core::{
    angle::wrap_to_pi,
    error::Result,
    group::{check_coords_len, LieGroup, Tangent},
    impl_lie_operators,
    types::{Matrix2, Scalar, Vector2},
};
use rand::Rng;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An element of the circle group, stored as an angle in `(−π, π]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct S1<T> {
    angle: T,
}

/// Tangent element of S¹: an unconstrained angular displacement.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct S1Tangent<T> {
    value: T,
}

impl<T: Scalar> S1<T> {
    /// Creates a circle element from any angle (radians); the angle is wrapped.
    pub fn new(angle: T) -> Self {
        Self {
            angle: wrap_to_pi(angle),
        }
    }

    /// Alias of [`S1::new`].
    pub fn from_angle(angle: T) -> Self {
        Self::new(angle)
    }

    /// The identity element (0 radians).
    #[allow(non_snake_case)]
    pub fn Identity() -> Self {
        <Self as LieGroup<T>>::identity()
    }

    /// The angle in `(−π, π]`.
    pub fn as_angle(&self) -> T {
        self.angle
    }

    /// The equivalent 2×2 rotation matrix.
    pub fn as_matrix(&self) -> Matrix2<T> {
        let (s, c) = (self.angle.sin(), self.angle.cos());
        Matrix2::new(c, -s, s, c)
    }

    /// Rotates a planar vector by this angle.
    pub fn act(&self, v: &Vector2<T>) -> Vector2<T> {
        self.as_matrix() * v
    }

    /// Uniformly distributed element.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let pi = std::f64::consts::PI;
        Self::new(T::from_f64(rng.gen_range(-pi..=pi)))
    }
}

impl<T: Scalar> LieGroup<T> for S1<T> {
    type Tangent = S1Tangent<T>;

    const NAME: &'static str = "S1";
    const DOF: usize = 1;

    fn identity() -> Self {
        Self { angle: T::zero() }
    }

    fn inverse(&self) -> Self {
        Self::new(-self.angle)
    }

    fn compose(&self, other: &Self) -> Self {
        Self::new(self.angle + other.angle)
    }

    fn log(&self) -> S1Tangent<T> {
        S1Tangent::new(wrap_to_pi(self.angle))
    }

    fn minus(&self, other: &Self) -> S1Tangent<T> {
        S1Tangent::new(wrap_to_pi(self.angle - other.angle))
    }
}

impl<T: Scalar> S1Tangent<T> {
    /// Creates a tangent element; the value is not wrapped.
    pub fn new(value: T) -> Self {
        Self { value }
    }

    /// The raw tangent coordinate.
    pub fn value(&self) -> T {
        self.value
    }
}

impl<T: Scalar> Tangent<T> for S1Tangent<T> {
    type Group = S1<T>;

    fn zero() -> Self {
        Self::new(T::zero())
    }

    fn exp(&self) -> S1<T> {
        S1::new(self.value)
    }

    fn add_to(&self, group: &S1<T>) -> S1<T> {
        S1::new(group.angle + self.value)
    }

    fn scale(&self, factor: T) -> Self {
        Self::new(self.value * factor)
    }

    fn coords(&self) -> Vec<T> {
        vec![self.value]
    }

    fn from_coords(coords: &[T]) -> Result<Self> {
        check_coords_len(coords, 1)?;
        Ok(Self::new(coords[0]))
    }

    fn norm_squared(&self) -> T {
        self.value * self.value
    }

    fn norm(&self) -> T {
        self.value.abs()
    }
}

impl_lie_operators!(S1, S1Tangent);

impl<T: Scalar> fmt::Display for S1<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S1 angle: {}", self.angle)
    }
}

impl<T: Scalar> fmt::Display for S1Tangent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S1Tangent: {}", self.value)
    }
}
