//! Special orthogonal group SO(3) of 3D rotations.
//!
//! Rotations are stored as unit quaternions `[x, y, z, w]`. Since `q` and
//! `−q` encode the same rotation, the logarithm always picks the
//! representative with `w ≥ 0`, which maps every rotation to a rotation
//! vector of norm at most π.
//!
//! # Mathematical Properties
//!
//! - **Dimension**: 3
//! - **Tangent space**: rotation vectors ω ∈ R³ (axis × angle)
//! - **Exponential map**: `exp(ω) = [ω sin(θ/2)/θ, cos(θ/2)]`, θ = |ω|
//! - **Logarithmic map**: `log(q) = 2 atan2(|v|, w) v/|v|`
//! - **Left Jacobian**: `J(ω) = I + B [ω]× + C [ω]×²`

use crate::quaternion::Quaternion;
use crate::utils::{
    atan_ratio, check_finite, half_angle_coefficients, hat, orthogonality_residual,
    rotation_coefficients, select_vector,
};
use liealg_core::{
    config::ValidationConfig,
    error::{ManifoldError, Result},
    group::{check_coords_len, LieGroup, Tangent},
    impl_lie_operators,
    types::{Matrix3, Scalar, Vector3, Vector4},
};
use rand::Rng;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 3D rotation stored as a unit quaternion.
///
/// Equality compares rotations, so `q` and `−q` are equal.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SO3<T> {
    quat: Quaternion<T>,
}

/// Tangent element of SO(3): a rotation vector.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SO3Tangent<T> {
    vec: Vector3<T>,
}

impl<T: Scalar> SO3<T> {
    /// Creates a rotation from a unit quaternion (not renormalized).
    pub fn from_quaternion(quat: Quaternion<T>) -> Self {
        Self { quat }
    }

    /// Creates a rotation from quaternion components (not renormalized).
    pub fn from_xyzw(x: T, y: T, z: T, w: T) -> Self {
        Self::from_quaternion(Quaternion::from_xyzw(x, y, z, w))
    }

    /// The identity rotation.
    #[allow(non_snake_case)]
    pub fn Identity() -> Self {
        <Self as LieGroup<T>>::identity()
    }

    /// Rotation about a unit axis by an angle.
    pub fn from_axis_angle(axis: &Vector3<T>, angle: T) -> Self {
        SO3Tangent::new(axis * angle).exp()
    }

    /// Creates a rotation from roll, pitch and yaw (intrinsic Z-Y-X).
    pub fn from_euler(roll: T, pitch: T, yaw: T) -> Self {
        let zero = T::zero();
        let one = T::one();
        let rx = Self::from_axis_angle(&Vector3::new(one, zero, zero), roll);
        let ry = Self::from_axis_angle(&Vector3::new(zero, one, zero), pitch);
        let rz = Self::from_axis_angle(&Vector3::new(zero, zero, one), yaw);
        rz.compose(&ry).compose(&rx)
    }

    /// Creates a rotation from a rotation matrix.
    ///
    /// The matrix is assumed orthonormal; use [`SO3::try_from_matrix`] to
    /// validate it first. The quaternion is extracted from whichever of the
    /// trace and diagonal entries is largest, chosen branch-free.
    pub fn from_matrix(m: &Matrix3<T>) -> Self {
        let one = T::one();
        let quarter = T::from_f64(0.25);
        let two = T::from_f64(2.0);
        let (m00, m11, m22) = (m[(0, 0)], m[(1, 1)], m[(2, 2)]);
        let trace = m00 + m11 + m22;

        let s = (one + trace).sqrt() * two;
        let from_w = Vector4::new(
            (m[(2, 1)] - m[(1, 2)]) / s,
            (m[(0, 2)] - m[(2, 0)]) / s,
            (m[(1, 0)] - m[(0, 1)]) / s,
            s * quarter,
        );
        let s = (one + m00 - m11 - m22).sqrt() * two;
        let from_x = Vector4::new(
            s * quarter,
            (m[(0, 1)] + m[(1, 0)]) / s,
            (m[(0, 2)] + m[(2, 0)]) / s,
            (m[(2, 1)] - m[(1, 2)]) / s,
        );
        let s = (one + m11 - m00 - m22).sqrt() * two;
        let from_y = Vector4::new(
            (m[(0, 1)] + m[(1, 0)]) / s,
            s * quarter,
            (m[(1, 2)] + m[(2, 1)]) / s,
            (m[(0, 2)] - m[(2, 0)]) / s,
        );
        let s = (one + m22 - m00 - m11).sqrt() * two;
        let from_z = Vector4::new(
            (m[(0, 2)] + m[(2, 0)]) / s,
            (m[(1, 2)] + m[(2, 1)]) / s,
            s * quarter,
            (m[(1, 0)] - m[(0, 1)]) / s,
        );

        let xy = select_vector(m00, m11, &from_y, &from_x);
        let max_xy = m00.select_lt(m11, m11, m00);
        let xyz = select_vector(max_xy, m22, &from_z, &xy);
        let coeffs = select_vector(trace, T::zero(), &xyz, &from_w);
        Self::from_quaternion(Quaternion::from_coeffs(coeffs))
    }

    /// Creates a rotation from a matrix after checking `RᵀR = I` and
    /// `det R = 1` within `config.point_tolerance`.
    pub fn try_from_matrix(m: &Matrix3<T>, config: &ValidationConfig) -> Result<Self> {
        check_finite(m.iter().copied(), "rotation matrix")?;
        let (residual, det) = orthogonality_residual(m);
        if !(residual <= config.point_tolerance) {
            tracing::debug!(residual, tolerance = config.point_tolerance, "rejected non-orthogonal matrix");
            return Err(ManifoldError::invalid_point(format!(
                "matrix is not orthogonal: ||RᵀR − I|| = {residual}"
            )));
        }
        if !((det - 1.0).abs() <= config.point_tolerance) {
            tracing::debug!(det, "rejected reflection matrix");
            return Err(ManifoldError::invalid_point(format!(
                "matrix determinant is {det}, expected 1"
            )));
        }
        let rotation = Self::from_matrix(m);
        Ok(if config.normalize_on_construction {
            rotation.normalize()
        } else {
            rotation
        })
    }

    /// Rescales the stored quaternion to unit norm.
    pub fn normalize(&self) -> Self {
        Self::from_quaternion(self.quat.normalize())
    }

    /// The underlying unit quaternion.
    pub fn as_quaternion(&self) -> &Quaternion<T> {
        &self.quat
    }

    /// The `[x, y, z, w]` quaternion coefficients.
    pub fn as_quat(&self) -> &Vector4<T> {
        self.quat.coeffs()
    }

    /// Quaternion `x` component.
    pub fn qx(&self) -> T {
        self.quat.x()
    }

    /// Quaternion `y` component.
    pub fn qy(&self) -> T {
        self.quat.y()
    }

    /// Quaternion `z` component.
    pub fn qz(&self) -> T {
        self.quat.z()
    }

    /// Quaternion `w` component.
    pub fn qw(&self) -> T {
        self.quat.w()
    }

    /// The 3×3 rotation matrix.
    pub fn as_matrix(&self) -> Matrix3<T> {
        let (x, y, z, w) = (self.qx(), self.qy(), self.qz(), self.qw());
        let one = T::one();
        let two = T::from_f64(2.0);
        Matrix3::new(
            one - two * (y * y + z * z),
            two * (x * y - z * w),
            two * (x * z + y * w),
            two * (x * y + z * w),
            one - two * (x * x + z * z),
            two * (y * z - x * w),
            two * (x * z - y * w),
            two * (y * z + x * w),
            one - two * (x * x + y * y),
        )
    }

    /// Roll, pitch and yaw (inverse of [`SO3::from_euler`]).
    pub fn as_euler(&self) -> Vector3<T> {
        let (x, y, z, w) = (self.qx(), self.qy(), self.qz(), self.qw());
        let one = T::one();
        let two = T::from_f64(2.0);
        let roll = (two * (w * x + y * z)).atan2(one - two * (x * x + y * y));
        let sin_pitch = two * (w * y - z * x);
        let pitch = sin_pitch.atan2((one - sin_pitch * sin_pitch).sqrt());
        let yaw = (two * (w * z + x * y)).atan2(one - two * (y * y + z * z));
        Vector3::new(roll, pitch, yaw)
    }

    /// Rotates a vector.
    pub fn act(&self, v: &Vector3<T>) -> Vector3<T> {
        self.quat.rotate(v)
    }

    /// Transpose of the rotation matrix, i.e. the inverse rotation.
    pub fn transpose(&self) -> Self {
        self.inverse()
    }

    /// Uniformly distributed rotation.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let tau = std::f64::consts::TAU;
        let (r1, r2, r3): (f64, f64, f64) = (rng.gen(), rng.gen(), rng.gen());
        let (a, b) = ((1.0 - r1).sqrt(), r1.sqrt());
        Self::from_xyzw(
            T::from_f64(a * (tau * r2).sin()),
            T::from_f64(b * (tau * r3).cos()),
            T::from_f64(b * (tau * r3).sin()),
            T::from_f64(a * (tau * r2).cos()),
        )
    }
}

impl<T: Scalar> LieGroup<T> for SO3<T> {
    type Tangent = SO3Tangent<T>;

    const NAME: &'static str = "SO3";
    const DOF: usize = 3;

    fn identity() -> Self {
        Self::from_quaternion(Quaternion::identity())
    }

    fn inverse(&self) -> Self {
        Self::from_quaternion(self.quat.conjugate())
    }

    fn compose(&self, other: &Self) -> Self {
        Self::from_quaternion(self.quat.product(&other.quat))
    }

    fn log(&self) -> SO3Tangent<T> {
        let sign = self.qw().select_lt(T::zero(), -T::one(), T::one());
        let w = self.qw() * sign;
        let v = self.quat.vec() * sign;
        let scale = atan_ratio(v.dot(&v), w) * T::from_f64(2.0);
        SO3Tangent::new(v * scale)
    }
}

impl<T: Scalar> SO3Tangent<T> {
    /// Creates a rotation vector.
    pub fn new(vec: Vector3<T>) -> Self {
        Self { vec }
    }

    /// The raw rotation vector.
    pub fn vec(&self) -> &Vector3<T> {
        &self.vec
    }

    /// Rotation angle |ω|.
    pub fn angle(&self) -> T {
        self.norm()
    }
}

impl<T: Scalar> Tangent<T> for SO3Tangent<T> {
    type Group = SO3<T>;

    fn zero() -> Self {
        Self::new(Vector3::zeros())
    }

    fn exp(&self) -> SO3<T> {
        let (k, w) = half_angle_coefficients(self.vec.dot(&self.vec));
        SO3::from_quaternion(Quaternion::from_parts(w, self.vec * k))
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

    fn norm_squared(&self) -> T {
        self.vec.dot(&self.vec)
    }
}

impl_lie_operators!(SO3, SO3Tangent);

impl<T: Scalar> PartialEq for SO3<T> {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.quat.coeffs(), other.quat.coeffs());
        a == b || *a == -b
    }
}

impl<T: Scalar> std::ops::Mul<Vector3<T>> for SO3<T> {
    type Output = Vector3<T>;

    fn mul(self, rhs: Vector3<T>) -> Self::Output {
        self.act(&rhs)
    }
}

impl<T: Scalar> fmt::Display for SO3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SO3 quaternion: [{}, {}, {}, {}]",
            self.qx(),
            self.qy(),
            self.qz(),
            self.qw()
        )
    }
}

impl<T: Scalar> fmt::Display for SO3Tangent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SO3Tangent: [{}, {}, {}]", self.vec.x, self.vec.y, self.vec.z)
    }
}

/// Left Jacobian of SO(3): `J(ω) = I + B [ω]× + C [ω]×²`.
///
/// Maps a rotation vector to the translation factor of the SE(3) exponential.
pub fn left_jacobian<T: Scalar>(omega: &Vector3<T>) -> Matrix3<T> {
    let k = rotation_coefficients(omega.dot(omega));
    let w = hat(omega);
    Matrix3::identity() + w * k.b + w * w * k.c
}

/// Inverse of [`left_jacobian`]: `J⁻¹(ω) = I − ½ [ω]× + D [ω]×²`.
pub fn left_jacobian_inverse<T: Scalar>(omega: &Vector3<T>) -> Matrix3<T> {
    let k = rotation_coefficients(omega.dot(omega));
    let w = hat(omega);
    Matrix3::identity() - w * T::half() + w * w * k.d
}

/// Right Jacobian of SO(3), `J_r(ω) = J_l(−ω)`.
pub fn right_jacobian<T: Scalar>(omega: &Vector3<T>) -> Matrix3<T> {
    left_jacobian(&(-omega))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn sample() -> SO3<f64> {
        SO3::from_euler(0.3, -0.7, 1.9)
    }

    #[test]
    fn test_identity() {
        let e = SO3::<f64>::Identity();
        assert_eq!(e.as_matrix(), Matrix3::identity());
        assert_eq!(e.log().vec(), &Vector3::zeros());
    }

    #[test]
    fn test_exp_matches_rodrigues() {
        let omega = Vector3::<f64>::new(0.4, -0.2, 0.9);
        let theta = omega.norm();
        let w = hat(&omega);
        let expected = Matrix3::identity()
            + w * (theta.sin() / theta)
            + w * w * ((1.0 - theta.cos()) / (theta * theta));
        let r = SO3Tangent::new(omega).exp();
        assert_relative_eq!(r.as_matrix(), expected, epsilon = 1e-14);
    }

    #[test]
    fn test_log_exp_round_trip() {
        let r = sample();
        assert!(r.log().exp().is_approx(&r, 1e-12));

        let t = SO3Tangent::new(Vector3::new(-1.1, 0.5, 2.0));
        assert_relative_eq!(t.exp().log().vec(), t.vec(), epsilon = 1e-13);

        let tiny = SO3Tangent::new(Vector3::new(1e-7, -3e-8, 2e-7));
        assert_relative_eq!(tiny.exp().log().vec(), tiny.vec(), epsilon = 1e-20);
    }

    #[test]
    fn test_log_picks_shortest_rotation() {
        let r = sample();
        let flipped = SO3::from_quaternion(Quaternion::from_coeffs(-r.as_quat()));
        assert_relative_eq!(flipped.log().vec(), r.log().vec(), epsilon = 1e-14);
        assert!(r.log().angle() <= PI);
    }

    #[test]
    fn test_compose_matches_matrix_product() {
        let a = sample();
        let b = SO3::from_euler(-1.0, 0.2, 0.4);
        assert_relative_eq!((a * b).as_matrix(), a.as_matrix() * b.as_matrix(), epsilon = 1e-14);
        assert_relative_eq!(a.inverse().as_matrix(), a.as_matrix().transpose(), epsilon = 1e-15);
        assert_eq!(a.transpose(), a.inverse());
    }

    #[test]
    fn test_from_matrix_round_trip() {
        // Covers every branch of the quaternion extraction.
        let rotations = [
            sample(),
            SO3::from_euler(PI, 0.0, 0.0),
            SO3::from_euler(0.0, PI - 0.01, 0.0),
            SO3::from_euler(0.0, 0.0, PI),
            SO3::from_euler(0.1, 0.1, 0.1),
        ];
        for r in rotations {
            let back = SO3::from_matrix(&r.as_matrix());
            assert!(back.is_approx(&r, 1e-12), "{r} vs {back}");
        }
    }

    #[test]
    fn test_try_from_matrix() {
        let config = ValidationConfig::default();
        let r = sample();
        assert!(SO3::try_from_matrix(&r.as_matrix(), &config).is_ok());

        let scaled = r.as_matrix() * 1.1;
        assert!(matches!(
            SO3::try_from_matrix(&scaled, &config),
            Err(ManifoldError::InvalidPoint { .. })
        ));

        let reflection = Matrix3::from_diagonal(&Vector3::new(1.0, 1.0, -1.0));
        assert!(SO3::try_from_matrix(&reflection, &config).is_err());

        let mut nan = r.as_matrix();
        nan[(1, 2)] = f64::NAN;
        assert!(matches!(
            SO3::try_from_matrix(&nan, &config),
            Err(ManifoldError::NumericalError { .. })
        ));
    }

    #[test]
    fn test_try_from_matrix_single_precision() {
        let config = ValidationConfig::for_scalar::<f32>();
        let r = SO3::<f32>::from_euler(0.3, -0.7, 1.9);
        let back = SO3::try_from_matrix(&r.as_matrix(), &config).unwrap();
        assert!(back.is_approx(&r, 1e-5));
    }

    #[test]
    fn test_equality_ignores_quaternion_sign() {
        let e = SO3::from_xyzw(0.0, 0.0, 0.0, 1.0_f64);
        assert_eq!(e, SO3::from_xyzw(0.0, 0.0, 0.0, -1.0));

        let r = sample();
        let flipped = SO3::from_quaternion(Quaternion::from_coeffs(-r.as_quaternion().coeffs()));
        assert_eq!(r, flipped);
        assert_eq!(r.as_matrix(), flipped.as_matrix());
        assert_ne!(r, e);
    }

    #[test]
    fn test_euler_round_trip() {
        let rpy = Vector3::new(0.3, -0.7, 1.9);
        let r = SO3::from_euler(rpy.x, rpy.y, rpy.z);
        assert_relative_eq!(r.as_euler(), rpy, epsilon = 1e-14);
    }

    #[test]
    fn test_act() {
        let r = SO3::from_axis_angle(&Vector3::new(0.0, 0.0, 1.0), FRAC_PI_2);
        let v = r * Vector3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(v, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-15);
        let p = Vector3::new(0.3, -2.0, 1.0);
        assert_relative_eq!(sample().act(&p), sample().as_matrix() * p, epsilon = 1e-14);
    }

    #[test]
    fn test_minus_plus_and_operators() {
        let a = sample();
        let b = SO3::from_euler(-1.0, 0.2, 0.4);
        let d = a - b;
        assert!((d + b).is_approx(&a, 1e-12));
        assert!((b + d).is_approx(&a, 1e-12));
        assert!((0.0 * d).exp().is_approx(&SO3::identity(), 1e-15));
    }

    #[test]
    fn test_jacobians() {
        let omega = Vector3::new(0.5, -0.3, 0.8);
        let j = left_jacobian(&omega);
        let j_inv = left_jacobian_inverse(&omega);
        assert_relative_eq!(j * j_inv, Matrix3::identity(), epsilon = 1e-14);
        assert_relative_eq!(j * omega, omega, epsilon = 1e-14);
        assert_relative_eq!(right_jacobian(&omega), j.transpose(), epsilon = 1e-14);

        let tiny = Vector3::new(1e-5, 0.0, -2e-5);
        assert_relative_eq!(
            left_jacobian(&tiny) * left_jacobian_inverse(&tiny),
            Matrix3::identity(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_random_is_unit() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let r = SO3::<f64>::random(&mut rng);
            assert_relative_eq!(r.as_quaternion().norm(), 1.0, epsilon = 1e-12);
        }
    }
}
