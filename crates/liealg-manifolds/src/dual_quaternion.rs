//! Unit dual quaternions, an alternative parameterization of SE(3).
//!
//! A rigid transform with rotation `q` and translation `t` is stored as
//! `q_r + ε q_d` with `q_r = q` and `q_d = ½ t q`, where `t` is read as the
//! pure quaternion `[t, 0]`. Composition is the dual-quaternion product, and
//! the tangent space is the same twist space `[ρ; ω]` as [`SE3`].

use crate::quaternion::Quaternion;
use crate::se3::{SE3Tangent, SE3};
use crate::so3::SO3;
use liealg_core::{
    config::ValidationConfig,
    error::Result,
    group::{check_coords_len, LieGroup, Tangent},
    impl_lie_operators,
    types::{Matrix4, Scalar, Vector3, Vector6, Vector8},
};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unit dual quaternion `real + ε dual`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DualQuaternion<T> {
    real: Quaternion<T>,
    dual: Quaternion<T>,
}

/// Tangent element of the dual quaternions: a twist `[ρ; ω]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DualQuaternionTangent<T> {
    vec: Vector6<T>,
}

impl<T: Scalar> DualQuaternion<T> {
    /// Creates a dual quaternion from its real and dual parts, unchecked.
    pub fn from_parts(real: Quaternion<T>, dual: Quaternion<T>) -> Self {
        Self { real, dual }
    }

    /// Creates the dual quaternion of a rotation `rotation` followed by a
    /// translation `translation`.
    pub fn from_quaternion_and_translation(rotation: Quaternion<T>, translation: Vector3<T>) -> Self {
        let t = Quaternion::from_parts(T::zero(), translation * T::half());
        Self::from_parts(rotation, t.product(&rotation))
    }

    /// Creates a dual quaternion from an [`SE3`] transform.
    pub fn from_se3(transform: &SE3<T>) -> Self {
        Self::from_quaternion_and_translation(
            *transform.rotation().as_quaternion(),
            *transform.translation(),
        )
    }

    /// Creates a dual quaternion from a 4×4 homogeneous matrix.
    pub fn from_matrix(m: &Matrix4<T>, config: &ValidationConfig) -> Result<Self> {
        SE3::from_matrix(m, config).map(|g| Self::from_se3(&g))
    }

    /// The identity transform.
    #[allow(non_snake_case)]
    pub fn Identity() -> Self {
        <Self as LieGroup<T>>::identity()
    }

    /// Converts to an [`SE3`] transform.
    pub fn to_se3(&self) -> SE3<T> {
        SE3::new(self.translation(), self.rotation())
    }

    /// The 4×4 homogeneous matrix.
    pub fn as_matrix(&self) -> Matrix4<T> {
        self.to_se3().as_matrix()
    }

    /// The real (rotation) part.
    pub fn real(&self) -> &Quaternion<T> {
        &self.real
    }

    /// The dual part.
    pub fn dual(&self) -> &Quaternion<T> {
        &self.dual
    }

    /// The rotation as an [`SO3`] element.
    pub fn rotation(&self) -> SO3<T> {
        SO3::from_quaternion(self.real)
    }

    /// The translation `2 (q_d q_r*)`.
    pub fn translation(&self) -> Vector3<T> {
        self.dual.product(&self.real.conjugate()).vec() * T::from_f64(2.0)
    }

    /// Applies the transform to a point.
    pub fn transform(&self, point: &Vector3<T>) -> Vector3<T> {
        self.real.rotate(point) + self.translation()
    }

    /// Conjugate of both parts. For unit elements this is the inverse.
    pub fn conjugate(&self) -> Self {
        Self::from_parts(self.real.conjugate(), self.dual.conjugate())
    }

    /// The eight coefficients `[real xyzw, dual xyzw]`.
    pub fn coeffs(&self) -> Vector8<T> {
        let (r, d) = (self.real.coeffs(), self.dual.coeffs());
        Vector8::from_fn(|i, _| if i < 4 { r[i] } else { d[i - 4] })
    }
}

impl<T: Scalar> LieGroup<T> for DualQuaternion<T> {
    type Tangent = DualQuaternionTangent<T>;

    const NAME: &'static str = "DualQuaternion";
    const DOF: usize = 6;

    fn identity() -> Self {
        let zero = T::zero();
        Self::from_parts(
            Quaternion::identity(),
            Quaternion::from_xyzw(zero, zero, zero, zero),
        )
    }

    fn inverse(&self) -> Self {
        self.conjugate()
    }

    fn compose(&self, other: &Self) -> Self {
        let real = self.real.product(&other.real);
        let dual = Quaternion::from_coeffs(
            self.real.product(&other.dual).coeffs() + self.dual.product(&other.real).coeffs(),
        );
        Self::from_parts(real, dual)
    }

    fn log(&self) -> DualQuaternionTangent<T> {
        DualQuaternionTangent::from_vector(*self.to_se3().log().vec())
    }
}

impl<T: Scalar> DualQuaternionTangent<T> {
    /// Creates a twist from its linear and angular parts.
    pub fn new(linear: Vector3<T>, angular: Vector3<T>) -> Self {
        Self::from_vector(*SE3Tangent::new(linear, angular).vec())
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

impl<T: Scalar> Tangent<T> for DualQuaternionTangent<T> {
    type Group = DualQuaternion<T>;

    fn zero() -> Self {
        Self::from_vector(Vector6::zeros())
    }

    fn exp(&self) -> DualQuaternion<T> {
        DualQuaternion::from_se3(&SE3Tangent::from_vector(self.vec).exp())
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

impl_lie_operators!(DualQuaternion, DualQuaternionTangent);

impl<T: Scalar> std::ops::Mul<Vector3<T>> for DualQuaternion<T> {
    type Output = Vector3<T>;

    fn mul(self, rhs: Vector3<T>) -> Self::Output {
        self.transform(&rhs)
    }
}

impl<T: Scalar> From<SE3<T>> for DualQuaternion<T> {
    fn from(transform: SE3<T>) -> Self {
        Self::from_se3(&transform)
    }
}

impl<T: Scalar> From<DualQuaternion<T>> for SE3<T> {
    fn from(dq: DualQuaternion<T>) -> Self {
        dq.to_se3()
    }
}

impl<T: Scalar> fmt::Display for DualQuaternion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, d) = (&self.real, &self.dual);
        write!(
            f,
            "DualQuaternion real: [{}, {}, {}, {}], dual: [{}, {}, {}, {}]",
            r.x(),
            r.y(),
            r.z(),
            r.w(),
            d.x(),
            d.y(),
            d.z(),
            d.w()
        )
    }
}

impl<T: Scalar> fmt::Display for DualQuaternionTangent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = &self.vec;
        write!(
            f,
            "DualQuaternionTangent: [{}, {}, {}, {}, {}, {}]",
            v[0], v[1], v[2], v[3], v[4], v[5]
        )
    }
}
