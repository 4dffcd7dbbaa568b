//! Unit quaternions S³ under the Hamilton product.
//!
//! Quaternions are stored as `[x, y, z, w]` (vector part first). As a Lie
//! group the unit quaternions form the 3-sphere; the tangent at the identity
//! is the space of pure-imaginary quaternions, identified with R³.
//!
//! # Mathematical Properties
//!
//! - **Dimension**: 3
//! - **Exponential map**: `exp(v) = [v̂ sin|v|, cos|v|]`
//! - **Logarithmic map**: `log(q) = v̂ atan2(|v|, w)`
//!
//! Unlike [`SO3`](crate::so3::SO3), no sign canonicalization is applied:
//! `q` and `−q` are different elements of S³.

use crate::utils::{atan_ratio, check_finite, full_angle_coefficients, select_vector};
use liealg_core::{
    config::ValidationConfig,
    error::{ManifoldError, Result},
    group::{check_coords_len, LieGroup, Tangent},
    impl_lie_operators,
    types::{Scalar, Vector3, Vector4},
};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A quaternion `x i + y j + z k + w`, stored as `[x, y, z, w]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quaternion<T> {
    coeffs: Vector4<T>,
}

/// Tangent element of S³: the imaginary part of a pure quaternion.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuaternionTangent<T> {
    vec: Vector3<T>,
}

impl<T: Scalar> Quaternion<T> {
    /// Creates a quaternion from its components without normalizing.
    pub fn from_xyzw(x: T, y: T, z: T, w: T) -> Self {
        Self {
            coeffs: Vector4::new(x, y, z, w),
        }
    }

    /// Creates a quaternion from `[x, y, z, w]` coefficients.
    pub fn from_coeffs(coeffs: Vector4<T>) -> Self {
        Self { coeffs }
    }

    /// Creates a quaternion from a scalar part and a vector part.
    pub fn from_parts(w: T, vec: Vector3<T>) -> Self {
        Self::from_xyzw(vec.x, vec.y, vec.z, w)
    }

    /// Creates a quaternion from a `[x, y, z, w]` slice.
    pub fn from_slice(coeffs: &[T]) -> Result<Self> {
        check_coords_len(coeffs, 4)?;
        Ok(Self::from_xyzw(coeffs[0], coeffs[1], coeffs[2], coeffs[3]))
    }

    /// Creates a unit quaternion, rejecting inputs whose norm is not within
    /// `config.point_tolerance` of one.
    pub fn try_from_xyzw(x: T, y: T, z: T, w: T, config: &ValidationConfig) -> Result<Self> {
        check_finite([x, y, z, w], "quaternion")?;
        let q = Self::from_xyzw(x, y, z, w);
        let norm = q.norm().to_f64();
        if !((norm - 1.0).abs() <= config.point_tolerance) {
            tracing::debug!(norm, tolerance = config.point_tolerance, "rejected non-unit quaternion");
            return Err(ManifoldError::invalid_point(format!(
                "quaternion norm is {norm}, expected 1"
            )));
        }
        Ok(if config.normalize_on_construction {
            q.normalize()
        } else {
            q
        })
    }

    /// The `[x, y, z, w]` coefficients.
    pub fn coeffs(&self) -> &Vector4<T> {
        &self.coeffs
    }

    /// First imaginary component.
    pub fn x(&self) -> T {
        self.coeffs[0]
    }

    /// Second imaginary component.
    pub fn y(&self) -> T {
        self.coeffs[1]
    }

    /// Third imaginary component.
    pub fn z(&self) -> T {
        self.coeffs[2]
    }

    /// Real component.
    pub fn w(&self) -> T {
        self.coeffs[3]
    }

    /// Imaginary part as a 3-vector.
    pub fn vec(&self) -> Vector3<T> {
        Vector3::new(self.x(), self.y(), self.z())
    }

    /// Hamilton product `self · other`.
    pub fn product(&self, other: &Self) -> Self {
        let (w1, v1) = (self.w(), self.vec());
        let (w2, v2) = (other.w(), other.vec());
        let w = w1 * w2 - v1.dot(&v2);
        let v = v2 * w1 + v1 * w2 + v1.cross(&v2);
        Self::from_parts(w, v)
    }

    /// Quaternion conjugate `[−v, w]`.
    pub fn conjugate(&self) -> Self {
        Self::from_parts(self.w(), -self.vec())
    }

    /// Four-dimensional dot product of the coefficients.
    pub fn dot(&self, other: &Self) -> T {
        self.coeffs.dot(&other.coeffs)
    }

    /// Squared norm.
    pub fn norm_squared(&self) -> T {
        self.dot(self)
    }

    /// Norm.
    pub fn norm(&self) -> T {
        self.norm_squared().sqrt()
    }

    /// Scales the coefficients to unit norm.
    pub fn normalize(&self) -> Self {
        Self::from_coeffs(self.coeffs / self.norm())
    }

    /// Rotates a 3-vector by this (unit) quaternion: `q v q*`.
    pub fn rotate(&self, v: &Vector3<T>) -> Vector3<T> {
        let two = T::from_f64(2.0);
        let u = self.vec();
        let t = u.cross(v) * two;
        v + t * self.w() + u.cross(&t)
    }

    /// Spherical linear interpolation along the shorter arc.
    pub fn slerp(&self, other: &Self, t: T) -> Self {
        let d = self.dot(other);
        let target = Self::from_coeffs(select_vector(d, T::zero(), &(-other.coeffs), &other.coeffs));
        self.interpolate(&target, t)
    }
}

impl<T: Scalar> LieGroup<T> for Quaternion<T> {
    type Tangent = QuaternionTangent<T>;

    const NAME: &'static str = "Quaternion";
    const DOF: usize = 3;

    fn identity() -> Self {
        Self::from_xyzw(T::zero(), T::zero(), T::zero(), T::one())
    }

    fn inverse(&self) -> Self {
        Self::from_coeffs(self.conjugate().coeffs / self.norm_squared())
    }

    fn compose(&self, other: &Self) -> Self {
        self.product(other)
    }

    fn log(&self) -> QuaternionTangent<T> {
        let v = self.vec();
        let norm_sq = v.dot(&v);
        let regular = v * atan_ratio(norm_sq, self.w());
        // At exactly −1 every axis is a logarithm; the x axis is returned.
        let antipode = Vector3::new(T::pi(), T::zero(), T::zero());
        let degenerate = select_vector(self.w(), T::zero(), &antipode, &regular);
        QuaternionTangent::new(select_vector(-norm_sq, T::zero(), &regular, &degenerate))
    }
}

impl<T: Scalar> QuaternionTangent<T> {
    /// Creates a tangent element from the imaginary part.
    pub fn new(vec: Vector3<T>) -> Self {
        Self { vec }
    }

    /// The raw tangent coordinates.
    pub fn vec(&self) -> &Vector3<T> {
        &self.vec
    }
}

impl<T: Scalar> Tangent<T> for QuaternionTangent<T> {
    type Group = Quaternion<T>;

    fn zero() -> Self {
        Self::new(Vector3::zeros())
    }

    fn exp(&self) -> Quaternion<T> {
        let (k, w) = full_angle_coefficients(self.vec.dot(&self.vec));
        Quaternion::from_parts(w, self.vec * k)
    }

    fn scale(&self, factor: T) -> Self {
        Self::new(self.vec * factor)
    }

    fn coords(&self) -> Vec<T> {
        self.vec.iter().copied().collect()
    }

    fn from_coords(coords: &[T]) -> Result<Self> {
        check_coords_len(coords, 3)?;
        Ok(Self::new(Vector3::new(coords[0], coords[1], coords[2])))
    }
}

impl_lie_operators!(Quaternion, QuaternionTangent);

impl<T: Scalar> fmt::Display for Quaternion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quaternion: [{}, {}, {}, {}]",
            self.x(),
            self.y(),
            self.z(),
            self.w()
        )
    }
}

impl<T: Scalar> fmt::Display for QuaternionTangent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuaternionTangent: [{}, {}, {}]", self.vec.x, self.vec.y, self.vec.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn sample() -> Quaternion<f64> {
        Quaternion::from_xyzw(0.1, -0.4, 0.3, 0.8).normalize()
    }

    #[test]
    fn test_identity_and_inverse() {
        let q = sample();
        let e = Quaternion::identity();
        assert_relative_eq!((q * e).coeffs(), q.coeffs(), epsilon = 1e-15);
        assert_relative_eq!((q * q.inverse()).coeffs(), e.coeffs(), epsilon = 1e-15);
        assert_relative_eq!((q.inverse() * q).coeffs(), e.coeffs(), epsilon = 1e-15);
    }

    #[test]
    fn test_hamilton_product_basis() {
        let i = Quaternion::from_xyzw(1.0, 0.0, 0.0, 0.0);
        let j = Quaternion::from_xyzw(0.0, 1.0, 0.0, 0.0);
        let k = Quaternion::from_xyzw(0.0, 0.0, 1.0, 0.0);
        assert_eq!(i.product(&j), k);
        assert_eq!(j.product(&i), Quaternion::from_xyzw(0.0, 0.0, -1.0, 0.0));
        assert_eq!(i.product(&i), Quaternion::from_xyzw(0.0, 0.0, 0.0, -1.0));
    }

    #[test]
    fn test_exp_log_round_trip() {
        let q = sample();
        assert_relative_eq!(q.log().exp().coeffs(), q.coeffs(), epsilon = 1e-14);

        let t = QuaternionTangent::new(Vector3::new(0.3, 0.2, -0.5));
        assert_relative_eq!(t.exp().log().vec(), t.vec(), epsilon = 1e-14);

        let small = QuaternionTangent::new(Vector3::new(1e-5, -2e-5, 3e-6));
        assert_relative_eq!(small.exp().log().vec(), small.vec(), epsilon = 1e-18);
    }

    #[test]
    fn test_log_near_minus_one() {
        let t = QuaternionTangent::new(Vector3::new(0.0, 0.0, PI - 1e-4));
        let q = t.exp();
        assert!(q.w() < 0.0);
        assert_relative_eq!(q.log().vec(), t.vec(), epsilon = 1e-12);
        assert_relative_eq!(q.log().exp().coeffs(), q.coeffs(), epsilon = 1e-15);
    }

    #[test]
    fn test_log_of_minus_one() {
        let minus_one = Quaternion::from_xyzw(0.0, 0.0, 0.0, -1.0_f64);
        let t = minus_one.log();
        assert_relative_eq!(t.norm(), PI, epsilon = 1e-15);
        assert_relative_eq!(t.exp().coeffs(), minus_one.coeffs(), epsilon = 1e-15);

        // q and −q are distinct points of S³.
        let e = Quaternion::<f64>::identity();
        assert_relative_eq!(e.distance(&minus_one), PI, epsilon = 1e-15);
        assert!(!e.is_approx(&minus_one, 1e-3));
    }

    #[test]
    fn test_exp_is_unit() {
        let q = QuaternionTangent::new(Vector3::new(1.0, 2.0, -0.5)).exp();
        assert_relative_eq!(q.norm(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_rotate_matches_sandwich() {
        let q = sample();
        let v = Vector3::new(0.5, -1.0, 2.0);
        let pure = Quaternion::from_parts(0.0, v);
        let sandwich = q.product(&pure).product(&q.conjugate());
        assert_relative_eq!(q.rotate(&v), sandwich.vec(), epsilon = 1e-14);
    }

    #[test]
    fn test_minus_plus() {
        let a = sample();
        let b = QuaternionTangent::new(Vector3::new(0.2, 0.1, 0.0)).exp();
        let rebuilt = (a - b) + b;
        assert_relative_eq!(rebuilt.coeffs(), a.coeffs(), epsilon = 1e-14);
    }

    #[test]
    fn test_slerp_endpoints_and_short_arc() {
        let a = Quaternion::<f64>::identity();
        let b = QuaternionTangent::new(Vector3::new(0.0, 0.0, FRAC_PI_2 / 2.0)).exp();
        assert_relative_eq!(a.slerp(&b, 0.0).coeffs(), a.coeffs(), epsilon = 1e-15);
        assert_relative_eq!(a.slerp(&b, 1.0).coeffs(), b.coeffs(), epsilon = 1e-15);

        let neg_b = Quaternion::from_coeffs(-b.coeffs());
        let mid = a.slerp(&neg_b, 0.5);
        let expected = a.slerp(&b, 0.5);
        assert_relative_eq!(mid.coeffs(), expected.coeffs(), epsilon = 1e-15);
    }

    #[test]
    fn test_checked_construction() {
        let config = ValidationConfig::default();
        assert!(Quaternion::try_from_xyzw(0.0, 0.0, 0.0, 1.0, &config).is_ok());
        let err = Quaternion::try_from_xyzw(0.0, 0.0, 0.0, 2.0_f64, &config).unwrap_err();
        assert!(matches!(err, ManifoldError::InvalidPoint { .. }));
        let err = Quaternion::try_from_xyzw(f64::NAN, 0.0, 0.0, 1.0, &config).unwrap_err();
        assert!(matches!(err, ManifoldError::NumericalError { .. }));

        // 1 + 1e-6 is off by too much for f64 but within f32 tolerance.
        let single = ValidationConfig::for_scalar::<f32>();
        assert!(Quaternion::try_from_xyzw(0.0, 0.0, 0.0, 1.000_001_f32, &single).is_ok());
        assert!(Quaternion::try_from_xyzw(0.0, 0.0, 0.0, 1.000_001_f64, &config).is_err());

        assert!(Quaternion::<f64>::from_slice(&[0.0, 0.0, 1.0]).is_err());
        let q = Quaternion::from_slice(&[0.0, 0.0, 0.0, 1.0_f64]).unwrap();
        assert_eq!(q, Quaternion::identity());
    }

    #[test]
    fn test_display() {
        let q = Quaternion::<f64>::identity();
        assert_eq!(q.to_string(), "Quaternion: [0, 0, 0, 1]");
    }
}
