//! Group and tangent-space traits shared by every manifold.
//!
//! A manifold is a pair of types: a group element implementing [`LieGroup`]
//! and a Lie-algebra element implementing [`Tangent`]. The two are tied
//! together through associated types, so composing or differencing elements
//! of different manifolds is rejected by the compiler.
//!
//! # Conventions
//!
//! All manifolds use the left convention:
//!
//! - `a.minus(b) = log(a ∘ b⁻¹)`
//! - `g.plus(t) = exp(t) ∘ g`
//!
//! so that `(a − b) + b == a` holds for every pair of elements.

use crate::error::Result;
use crate::types::Scalar;
use std::fmt::Debug;

/// A point on a Lie-group manifold.
pub trait LieGroup<T: Scalar>: Clone + Debug + PartialEq + Sized {
    /// Lie-algebra element paired with this group.
    type Tangent: Tangent<T, Group = Self>;

    /// Human-readable manifold name.
    const NAME: &'static str;

    /// Degrees of freedom (dimension of the tangent space).
    const DOF: usize;

    /// The identity element.
    fn identity() -> Self;

    /// The unique element `g⁻¹` with `g ∘ g⁻¹ = identity`.
    fn inverse(&self) -> Self;

    /// Group operation `self ∘ other`, returned in canonical form.
    fn compose(&self, other: &Self) -> Self;

    /// Logarithm map to the tangent space.
    fn log(&self) -> Self::Tangent;

    /// Relative displacement from `other` to `self`.
    fn minus(&self, other: &Self) -> Self::Tangent {
        self.compose(&other.inverse()).log()
    }

    /// Move `self` along a tangent displacement.
    fn plus(&self, tangent: &Self::Tangent) -> Self {
        tangent.exp().compose(self)
    }

    /// Geodesic interpolation; `t = 0` gives `self`, `t = 1` gives `other`.
    fn interpolate(&self, other: &Self, t: T) -> Self {
        self.plus(&other.minus(self).scale(t))
    }

    /// Norm of the relative displacement between two elements.
    fn distance(&self, other: &Self) -> T {
        self.minus(other).norm()
    }

    /// Whether two elements agree within `tolerance` (measured by [`LieGroup::distance`]).
    fn is_approx(&self, other: &Self, tolerance: f64) -> bool {
        self.distance(other).to_f64() <= tolerance
    }
}

/// An element of the tangent space (Lie algebra) of a manifold.
pub trait Tangent<T: Scalar>: Clone + Debug + PartialEq + Sized {
    /// Group element this tangent maps to.
    type Group: LieGroup<T, Tangent = Self>;

    /// The zero displacement.
    fn zero() -> Self;

    /// Exponential map to the group.
    fn exp(&self) -> Self::Group;

    /// `group ⊕ self`.
    fn add_to(&self, group: &Self::Group) -> Self::Group {
        group.plus(self)
    }

    /// Linear scaling of the coordinates.
    fn scale(&self, factor: T) -> Self;

    /// Flat Lie-algebra coordinates.
    fn coords(&self) -> Vec<T>;

    /// Build a tangent from flat coordinates; the length must equal the
    /// manifold's degrees of freedom.
    fn from_coords(coords: &[T]) -> Result<Self>;

    /// Squared Euclidean norm of the coordinates.
    fn norm_squared(&self) -> T {
        self.coords()
            .into_iter()
            .fold(T::zero(), |acc, c| acc + c * c)
    }

    /// Euclidean norm of the coordinates.
    fn norm(&self) -> T {
        self.norm_squared().sqrt()
    }
}

/// Check a coordinate slice against the expected length.
pub fn check_coords_len<T>(coords: &[T], expected: usize) -> Result<()> {
    if coords.len() == expected {
        Ok(())
    } else {
        Err(crate::error::ManifoldError::dimension_mismatch(
            expected,
            coords.len(),
        ))
    }
}

/// Implements the arithmetic operators of a manifold pair in terms of
/// [`LieGroup`] and [`Tangent`].
///
/// Generated impls:
///
/// - `G * G -> G` (compose)
/// - `G - G -> Tangent` (minus)
/// - `Tangent + G -> G` and `G + Tangent -> G` (plus)
/// - `Tangent * T -> Tangent`, `f64 * Tangent<f64>`, `f32 * Tangent<f32>` (scale)
/// - `-Tangent`
#[macro_export]
macro_rules! impl_lie_operators {
    ($group:ident, $tangent:ident) => {
        impl<T: $crate::types::Scalar> ::core::ops::Mul for $group<T> {
            type Output = $group<T>;

            fn mul(self, rhs: Self) -> Self::Output {
                $crate::group::LieGroup::compose(&self, &rhs)
            }
        }

        impl<'a, T: $crate::types::Scalar> ::core::ops::Mul<&'a $group<T>> for &'a $group<T> {
            type Output = $group<T>;

            fn mul(self, rhs: &'a $group<T>) -> Self::Output {
                $crate::group::LieGroup::compose(self, rhs)
            }
        }

        impl<T: $crate::types::Scalar> ::core::ops::Sub for $group<T> {
            type Output = $tangent<T>;

            fn sub(self, rhs: Self) -> Self::Output {
                $crate::group::LieGroup::minus(&self, &rhs)
            }
        }

        impl<'a, T: $crate::types::Scalar> ::core::ops::Sub<&'a $group<T>> for &'a $group<T> {
            type Output = $tangent<T>;

            fn sub(self, rhs: &'a $group<T>) -> Self::Output {
                $crate::group::LieGroup::minus(self, rhs)
            }
        }

        impl<T: $crate::types::Scalar> ::core::ops::Add<$group<T>> for $tangent<T> {
            type Output = $group<T>;

            fn add(self, rhs: $group<T>) -> Self::Output {
                $crate::group::Tangent::add_to(&self, &rhs)
            }
        }

        impl<T: $crate::types::Scalar> ::core::ops::Add<$tangent<T>> for $group<T> {
            type Output = $group<T>;

            fn add(self, rhs: $tangent<T>) -> Self::Output {
                $crate::group::Tangent::add_to(&rhs, &self)
            }
        }

        impl<T: $crate::types::Scalar> ::core::ops::Mul<T> for $tangent<T> {
            type Output = $tangent<T>;

            fn mul(self, rhs: T) -> Self::Output {
                $crate::group::Tangent::scale(&self, rhs)
            }
        }

        impl<T: $crate::types::Scalar> ::core::ops::Neg for $tangent<T> {
            type Output = $tangent<T>;

            fn neg(self) -> Self::Output {
                $crate::group::Tangent::scale(&self, -T::one())
            }
        }

        impl ::core::ops::Mul<$tangent<f64>> for f64 {
            type Output = $tangent<f64>;

            fn mul(self, rhs: $tangent<f64>) -> Self::Output {
                $crate::group::Tangent::scale(&rhs, self)
            }
        }

        impl ::core::ops::Mul<$tangent<f32>> for f32 {
            type Output = $tangent<f32>;

            fn mul(self, rhs: $tangent<f32>) -> Self::Output {
                $crate::group::Tangent::scale(&rhs, self)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::wrap_to_pi;
    use approx::assert_relative_eq;

    // Minimal planar rotation used to exercise the default methods.
    #[derive(Debug, Clone, PartialEq)]
    struct Turn<T>(T);

    #[derive(Debug, Clone, PartialEq)]
    struct TurnRate<T>(T);

    impl<T: Scalar> LieGroup<T> for Turn<T> {
        type Tangent = TurnRate<T>;
        const NAME: &'static str = "Turn";
        const DOF: usize = 1;

        fn identity() -> Self {
            Self(T::zero())
        }

        fn inverse(&self) -> Self {
            Self(-self.0)
        }

        fn compose(&self, other: &Self) -> Self {
            Self(wrap_to_pi(self.0 + other.0))
        }

        fn log(&self) -> TurnRate<T> {
            TurnRate(wrap_to_pi(self.0))
        }
    }

    impl<T: Scalar> Tangent<T> for TurnRate<T> {
        type Group = Turn<T>;

        fn zero() -> Self {
            Self(T::zero())
        }

        fn exp(&self) -> Turn<T> {
            Turn(wrap_to_pi(self.0))
        }

        fn scale(&self, factor: T) -> Self {
            Self(self.0 * factor)
        }

        fn coords(&self) -> Vec<T> {
            vec![self.0]
        }

        fn from_coords(coords: &[T]) -> Result<Self> {
            check_coords_len(coords, 1)?;
            Ok(Self(coords[0]))
        }
    }

    impl_lie_operators!(Turn, TurnRate);

    #[test]
    fn test_default_minus_and_plus() {
        let a = Turn(1.0_f64);
        let b = Turn(0.25_f64);
        let d = a.minus(&b);
        assert_relative_eq!(d.0, 0.75, epsilon = 1e-15);
        assert_relative_eq!(b.plus(&d).0, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_interpolate_and_distance() {
        let a = Turn(0.0_f64);
        let b = Turn(1.0_f64);
        assert_relative_eq!(a.interpolate(&b, 0.5).0, 0.5, epsilon = 1e-15);
        assert_relative_eq!(a.distance(&b), 1.0, epsilon = 1e-15);
        assert!(a.is_approx(&Turn(1e-12), 1e-9));
        assert!(!a.is_approx(&b, 1e-9));
    }

    #[test]
    fn test_generated_operators() {
        let a = Turn(0.5_f64);
        let b = Turn(0.25_f64);
        assert_relative_eq!((a.clone() * b.clone()).0, 0.75);
        assert_relative_eq!((&a * &b).0, 0.75);
        assert_relative_eq!((a.clone() - b.clone()).0, 0.25);

        let t = TurnRate(0.1_f64);
        assert_relative_eq!((t.clone() + b.clone()).0, 0.35, epsilon = 1e-15);
        assert_relative_eq!((b + t.clone()).0, 0.35, epsilon = 1e-15);
        assert_relative_eq!((2.0 * t.clone()).0, 0.2);
        assert_relative_eq!((t.clone() * 3.0).0, 0.3, epsilon = 1e-15);
        assert_relative_eq!((-t).0, -0.1);
    }

    #[test]
    fn test_from_coords_checks_length() {
        assert!(TurnRate::<f64>::from_coords(&[1.0, 2.0]).is_err());
        assert_eq!(TurnRate::from_coords(&[0.3_f64]).unwrap(), TurnRate(0.3));
        assert_relative_eq!(TurnRate(3.0_f64).norm(), 3.0);
    }
}
