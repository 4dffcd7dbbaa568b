//! Special Euclidean group SE(3) of rigid transforms.
//!
//! A transform is a rotation followed by a translation, `x ↦ R x + p`. The
//! tangent is a twist `[ρ; ω]` with the linear part first.
//!
//! # Mathematical Properties
//!
//! - **Dimension**: 6
//! - **Group law**: `(p₁, R₁) ∘ (p₂, R₂) = (p₁ + R₁ p₂, R₁ R₂)`
//! - **Exponential map**: `R = exp(ω)`, `p = J(ω) ρ`
//! - **Logarithmic map**: `ω = log(R)`, `ρ = J(ω)⁻¹ p`
//!
//! where `J` is the left Jacobian of SO(3).

use crate::quaternion::Quaternion;
use crate::so3::{left_jacobian, left_jacobian_inverse, SO3Tangent, SO3};
use crate::utils::check_finite;
use liealg_core::{
    config::ValidationConfig,
    error::{ManifoldError, Result},
    group::{check_coords_len, LieGroup, Tangent},
    impl_lie_operators,
    types::{Matrix3, Matrix4, Scalar, Vector3, Vector4, Vector6},
};
use rand::Rng;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rigid transform: rotation plus translation.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SE3<T> {
    position: Vector3<T>,
    rotation: SO3<T>,
}

impl<T: Scalar> PartialEq for SE3<T> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.rotation == other.rotation
    }
}

/// Tangent element of SE(3): a twist `[ρ; ω]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SE3Tangent<T> {
    vec: Vector6<T>,
}

impl<T: Scalar> SE3<T> {
    /// Creates a transform from a translation and a rotation.
    pub fn new(position: Vector3<T>, rotation: SO3<T>) -> Self {
        Self { position, rotation }
    }

    /// Creates a transform from a translation and `[x, y, z, w]` quaternion coefficients.
    pub fn from_position_quaternion(position: Vector3<T>, xyzw: Vector4<T>) -> Self {
        Self::new(position, SO3::from_quaternion(Quaternion::from_coeffs(xyzw)))
    }

    /// Pure translation.
    pub fn from_translation(position: Vector3<T>) -> Self {
        Self::new(position, SO3::identity())
    }

    /// Pure rotation.
    pub fn from_rotation(rotation: SO3<T>) -> Self {
        Self::new(Vector3::zeros(), rotation)
    }

    /// The identity transform.
    #[allow(non_snake_case)]
    pub fn Identity() -> Self {
        <Self as LieGroup<T>>::identity()
    }

    /// Creates a transform from a 4×4 homogeneous matrix.
    ///
    /// The bottom row must be `[0, 0, 0, 1]` and the upper-left block a
    /// rotation, both within `config.point_tolerance`. Matrices with NaN or
    /// infinite entries are rejected as numerical errors.
    pub fn from_matrix(m: &Matrix4<T>, config: &ValidationConfig) -> Result<Self> {
        check_finite(m.iter().copied(), "homogeneous matrix")?;
        let expected = [0.0, 0.0, 0.0, 1.0];
        let row_error = (0..4)
            .map(|j| (m[(3, j)].to_f64() - expected[j]).abs())
            .fold(0.0_f64, f64::max);
        if !(row_error <= config.point_tolerance) {
            tracing::debug!(row_error, "rejected matrix with invalid homogeneous row");
            return Err(ManifoldError::invalid_point(format!(
                "homogeneous row deviates from [0, 0, 0, 1] by {row_error}"
            )));
        }
        let block: Matrix3<T> = m.fixed_view::<3, 3>(0, 0).into_owned();
        let rotation = SO3::try_from_matrix(&block, config)?;
        let position = Vector3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)]);
        Ok(Self::new(position, rotation))
    }

    /// The 4×4 homogeneous matrix.
    pub fn as_matrix(&self) -> Matrix4<T> {
        let r = self.rotation.as_matrix();
        let p = &self.position;
        let (zero, one) = (T::zero(), T::one());
        Matrix4::new(
            r[(0, 0)], r[(0, 1)], r[(0, 2)], p.x, //
            r[(1, 0)], r[(1, 1)], r[(1, 2)], p.y, //
            r[(2, 0)], r[(2, 1)], r[(2, 2)], p.z, //
            zero, zero, zero, one,
        )
    }

    /// The translation part.
    pub fn translation(&self) -> &Vector3<T> {
        &self.position
    }

    /// The rotation part.
    pub fn rotation(&self) -> &SO3<T> {
        &self.rotation
    }

    /// Applies the transform to a point: `R x + p`.
    pub fn transform(&self, point: &Vector3<T>) -> Vector3<T> {
        self.rotation.act(point) + self.position
    }

    /// Random transform with a uniform rotation and each translation
    /// component uniform in `[-extent, extent]`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, extent: f64) -> Self {
        let mut component = || T::from_f64(rng.gen_range(-extent..=extent));
        let position = Vector3::new(component(), component(), component());
        Self::new(position, SO3::random(rng))
    }
}

impl<T: Scalar> LieGroup<T> for SE3<T> {
    type Tangent = SE3Tangent<T>;

    const NAME: &'static str = "SE3";
    const DOF: usize = 6;

    fn identity() -> Self {
        Self::new(Vector3::zeros(), SO3::identity())
    }

    fn inverse(&self) -> Self {
        let rotation = self.rotation.inverse();
        let position = -rotation.act(&self.position);
        Self::new(position, rotation)
    }

    fn compose(&self, other: &Self) -> Self {
        Self::new(
            self.position + self.rotation.act(&other.position),
            self.rotation.compose(&other.rotation),
        )
    }

    fn log(&self) -> SE3Tangent<T> {
        let omega = *self.rotation.log().vec();
        let rho = left_jacobian_inverse(&omega) * self.position;
        SE3Tangent::new(rho, omega)
    }
}

impl<T: Scalar> SE3Tangent<T> {
    /// Creates a twist from its linear and angular parts.
    pub fn new(linear: Vector3<T>, angular: Vector3<T>) -> Self {
        Self {
            vec: Vector6::new(linear.x, linear.y, linear.z, angular.x, angular.y, angular.z),
        }
    }

    /// Creates a twist from `[ρ; ω]`.
    pub fn from_vector(vec: Vector6<T>) -> Self {
        Self { vec }
    }

    /// The raw `[ρ; ω]` coordinates.
    pub fn vec(&self) -> &Vector6<T> {
        &self.vec
    }

    /// Linear part ρ.
    pub fn linear(&self) -> Vector3<T> {
        Vector3::new(self.vec[0], self.vec[1], self.vec[2])
    }

    /// Angular part ω.
    pub fn angular(&self) -> Vector3<T> {
        Vector3::new(self.vec[3], self.vec[4], self.vec[5])
    }
}

impl<T: Scalar> Tangent<T> for SE3Tangent<T> {
    type Group = SE3<T>;

    fn zero() -> Self {
        Self::from_vector(Vector6::zeros())
    }

    fn exp(&self) -> SE3<T> {
        let omega = self.angular();
        let rotation = SO3Tangent::new(omega).exp();
        let position = left_jacobian(&omega) * self.linear();
        SE3::new(position, rotation)
    }

    fn scale(&self, factor: T) -> Self {
        Self::from_vector(self.vec * factor)
    }

    fn coords(&self) -> Vec<T> {
        self.vec.iter().copied().collect()
    }

    fn from_coords(coords: &[T]) -> Result<Self> {
        check_coords_len(coords, 6)?;
        Ok(Self::from_vector(Vector6::from_column_slice(coords)))
    }

    fn norm_squared(&self) -> T {
        self.vec.dot(&self.vec)
    }
}

impl_lie_operators!(SE3, SE3Tangent);

impl<T: Scalar> std::ops::Mul<Vector3<T>> for SE3<T> {
    type Output = Vector3<T>;

    fn mul(self, rhs: Vector3<T>) -> Self::Output {
        self.transform(&rhs)
    }
}

impl<T: Scalar> fmt::Display for SE3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SE3 position: [{}, {}, {}], {}",
            self.position.x, self.position.y, self.position.z, self.rotation
        )
    }
}

impl<T: Scalar> fmt::Display for SE3Tangent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = &self.vec;
        write!(
            f,
            "SE3Tangent: [{}, {}, {}, {}, {}, {}]",
            v[0], v[1], v[2], v[3], v[4], v[5]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> SE3<f64> {
        SE3::new(Vector3::new(1.0, -2.0, 0.5), SO3::from_euler(0.3, -0.7, 1.9))
    }

    #[test]
    fn test_identity_and_inverse() {
        let g = sample();
        let e = SE3::Identity();
        assert_eq!(e.as_matrix(), Matrix4::identity());
        assert!((g * e).is_approx(&g, 1e-15));
        assert!((g * g.inverse()).is_approx(&e, 1e-14));
        assert!((g.inverse() * g).is_approx(&e, 1e-14));
    }

    #[test]
    fn test_compose_matches_matrix_product() {
        let a = sample();
        let b = SE3::new(Vector3::new(-0.3, 0.0, 2.0), SO3::from_euler(-1.0, 0.2, 0.4));
        assert_relative_eq!((a * b).as_matrix(), a.as_matrix() * b.as_matrix(), epsilon = 1e-14);
        assert_relative_eq!(
            a.inverse().as_matrix(),
            a.as_matrix().try_inverse().unwrap(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_pure_translation_exp() {
        let t = SE3Tangent::new(Vector3::new(1.0, 2.0, 3.0), Vector3::zeros());
        let g = t.exp();
        assert_relative_eq!(g.translation(), &Vector3::new(1.0, 2.0, 3.0), epsilon = 1e-15);
        assert!(g.rotation().is_approx(&SO3::identity(), 1e-15));
    }

    #[test]
    fn test_log_exp_round_trip() {
        let g = sample();
        assert!(g.log().exp().is_approx(&g, 1e-12));

        let t = SE3Tangent::new(Vector3::new(0.4, -1.0, 0.2), Vector3::new(0.1, 0.9, -0.3));
        assert_relative_eq!(t.exp().log().vec(), t.vec(), epsilon = 1e-13);
    }

    #[test]
    fn test_log_keeps_precision_just_above_small_angle() {
        // θ² = 1.01e-6 with a long translation.
        let rho = Vector3::new(100.0, -60.0, 40.0);
        let t = SE3Tangent::new(rho, Vector3::new(6e-4, -7e-4, 4e-4));
        let back = t.exp().log();
        assert_relative_eq!(back.linear(), rho, epsilon = 1e-11);
        assert_relative_eq!(back.angular(), t.angular(), epsilon = 1e-17);
    }

    #[test]
    fn test_minus_plus() {
        let a = sample();
        let b = SE3::new(Vector3::new(-0.3, 0.0, 2.0), SO3::from_euler(-1.0, 0.2, 0.4));
        assert!(((a - b) + b).is_approx(&a, 1e-12));
    }

    #[test]
    fn test_transform() {
        let g = sample();
        let p = Vector3::new(0.2, 0.4, -1.0);
        let h = g.as_matrix() * Vector4::new(p.x, p.y, p.z, 1.0);
        assert_relative_eq!(g * p, Vector3::new(h.x, h.y, h.z), epsilon = 1e-14);
    }

    #[test]
    fn test_from_matrix() {
        let config = ValidationConfig::default();
        let g = sample();
        let back = SE3::from_matrix(&g.as_matrix(), &config).unwrap();
        assert!(back.is_approx(&g, 1e-12));

        let mut bad = g.as_matrix();
        bad[(3, 0)] = 0.5;
        assert!(matches!(
            SE3::from_matrix(&bad, &config),
            Err(ManifoldError::InvalidPoint { .. })
        ));

        let mut nan = g.as_matrix();
        nan[(0, 3)] = f64::NAN;
        assert!(matches!(
            SE3::from_matrix(&nan, &config),
            Err(ManifoldError::NumericalError { .. })
        ));
    }

    #[test]
    fn test_from_position_quaternion() {
        let g = SE3::from_position_quaternion(
            Vector3::new(1.0, 0.0, 0.0),
            Vector4::new(0.0, 0.0, 0.0, 1.0),
        );
        assert_eq!(g, SE3::from_translation(Vector3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_interpolate_midpoint() {
        let a = SE3::<f64>::identity();
        let b = SE3Tangent::new(Vector3::new(2.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0)).exp();
        let mid = a.interpolate(&b, 0.5);
        let half = SE3Tangent::new(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.5)).exp();
        assert!(mid.is_approx(&half, 1e-12));
    }

    #[test]
    fn test_from_coords() {
        let t = SE3Tangent::from_coords(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0_f64]).unwrap();
        assert_eq!(t.linear(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(t.angular(), Vector3::new(4.0, 5.0, 6.0));
        assert!(SE3Tangent::<f64>::from_coords(&[1.0]).is_err());
    }
}
