//! Closed-form coefficients and branch-free helpers shared by the manifolds.
//!
//! The exp/log formulas of SO(3), SE(3), the unit quaternions and the dual
//! quaternions are all built from a few trigonometric ratios of the rotation
//! angle. Each ratio is evaluated both exactly and as a Taylor series in θ²,
//! and the two are merged with [`Scalar::select_lt`], so no formula branches
//! on a value directly.

use liealg_core::{
    error::{ManifoldError, Result},
    types::{Matrix3, SVector, Scalar, Vector3},
};

/// Threshold on θ² below which the Taylor series are used.
#[inline]
pub(crate) fn small_angle<T: Scalar>() -> T {
    T::from_f64(T::SMALL_ANGLE)
}

/// Component-wise `if cond < threshold { if_true } else { if_false }`.
#[inline]
pub(crate) fn select_vector<T: Scalar, const N: usize>(
    cond: T,
    threshold: T,
    if_true: &SVector<T, N>,
    if_false: &SVector<T, N>,
) -> SVector<T, N> {
    SVector::<T, N>::from_fn(|i, _| cond.select_lt(threshold, if_true[i], if_false[i]))
}

/// Skew-symmetric matrix `[v]×` such that `[v]× u = v × u`.
pub fn hat<T: Scalar>(v: &Vector3<T>) -> Matrix3<T> {
    let zero = T::zero();
    Matrix3::new(
        zero, -v.z, v.y, //
        v.z, zero, -v.x, //
        -v.y, v.x, zero,
    )
}

/// Inverse of [`hat`]: extracts `v` from a skew-symmetric matrix.
pub fn vee<T: Scalar>(m: &Matrix3<T>) -> Vector3<T> {
    Vector3::new(m[(2, 1)], m[(0, 2)], m[(1, 0)])
}

/// Threshold on θ² below which the ratios that cancel catastrophically
/// (θ − sin θ and the inverse-Jacobian term) use their series.
const CANCELLATION_CUTOFF: f64 = 0.1;

/// Ratios of the rotation angle θ used by the SO(3) Jacobians.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RotationCoefficients<T> {
    /// (1 − cos θ) / θ²
    pub b: T,
    /// (θ − sin θ) / θ³
    pub c: T,
    /// 1/θ² − (1 + cos θ) / (2θ sin θ)
    pub d: T,
}

pub(crate) fn rotation_coefficients<T: Scalar>(theta_sq: T) -> RotationCoefficients<T> {
    let one = T::one();
    let two = T::from_f64(2.0);
    let theta = theta_sq.sqrt();
    let (s, c) = (theta.sin(), theta.cos());
    let half_sin = (theta * T::half()).sin();
    let t2 = theta_sq;
    let t4 = t2 * t2;
    let t6 = t4 * t2;
    let t8 = t4 * t4;
    let f = T::from_f64;

    // 1 − cos θ = 2 sin²(θ/2)
    let b_exact = half_sin * half_sin * two / t2;
    let c_exact = (theta - s) / (t2 * theta);
    let d_exact = one / t2 - (one + c) / (two * theta * s);

    let b_series = f(0.5) - t2 / f(24.0) + t4 / f(720.0);
    let c_series = one / f(6.0) - t2 / f(120.0) + t4 / f(5040.0) - t6 / f(362_880.0)
        + t8 / f(39_916_800.0);
    let d_series = one / f(12.0)
        + t2 / f(720.0)
        + t4 / f(30_240.0)
        + t6 / f(1_209_600.0)
        + t8 / f(47_900_160.0);

    let eps = small_angle::<T>();
    let cutoff = f(CANCELLATION_CUTOFF);
    RotationCoefficients {
        b: t2.select_lt(eps, b_series, b_exact),
        c: t2.select_lt(cutoff, c_series, c_exact),
        d: t2.select_lt(cutoff, d_series, d_exact),
    }
}

/// `(sin(θ/2)/θ, cos(θ/2))`, the coefficients of the rotation quaternion
/// `[ω sin(θ/2)/θ, cos(θ/2)]` with `θ = |ω|`.
pub(crate) fn half_angle_coefficients<T: Scalar>(theta_sq: T) -> (T, T) {
    let theta = theta_sq.sqrt();
    let half = theta * T::half();
    let t4 = theta_sq * theta_sq;
    let f = T::from_f64;

    let k_series = f(0.5) - theta_sq / f(48.0) + t4 / f(3840.0);
    let w_series = T::one() - theta_sq / f(8.0) + t4 / f(384.0);

    let eps = small_angle::<T>();
    (
        theta_sq.select_lt(eps, k_series, half.sin() / theta),
        theta_sq.select_lt(eps, w_series, half.cos()),
    )
}

/// `(sin θ/θ, cos θ)` for the unit-quaternion exponential.
pub(crate) fn full_angle_coefficients<T: Scalar>(theta_sq: T) -> (T, T) {
    let theta = theta_sq.sqrt();
    let t4 = theta_sq * theta_sq;
    let f = T::from_f64;

    let k_series = T::one() - theta_sq / f(6.0) + t4 / f(120.0);
    let w_series = T::one() - theta_sq / f(2.0) + t4 / f(24.0);

    let eps = small_angle::<T>();
    (
        theta_sq.select_lt(eps, k_series, theta.sin() / theta),
        theta_sq.select_lt(eps, w_series, theta.cos()),
    )
}

/// `atan2(n, w) / n` with `n² = norm_sq`, the scale of a quaternion logarithm.
///
/// The series is only taken for `w > 0`. Near `−1` the exact ratio is kept,
/// which tends to `π / n` and stays finite for any `n > 0`.
pub(crate) fn atan_ratio<T: Scalar>(norm_sq: T, w: T) -> T {
    let n = norm_sq.sqrt();
    let r = norm_sq / (w * w);
    let f = T::from_f64;
    let exact = n.atan2(w) / n;
    let series = (T::one() - r / f(3.0) + r * r / f(5.0)) / w;
    let near_identity = norm_sq.select_lt(small_angle::<T>(), series, exact);
    w.select_lt(T::zero(), exact, near_identity)
}

/// Rejects inputs containing NaN or infinite entries.
pub(crate) fn check_finite<T: Scalar>(values: impl IntoIterator<Item = T>, what: &str) -> Result<()> {
    if values.into_iter().all(|v| v.to_f64().is_finite()) {
        Ok(())
    } else {
        tracing::debug!(what, "rejected non-finite input");
        Err(ManifoldError::numerical_error(format!("{what} has non-finite entries")))
    }
}

/// Frobenius-norm residual of `RᵀR − I` and the determinant, as f64.
pub(crate) fn orthogonality_residual<T: Scalar>(m: &Matrix3<T>) -> (f64, f64) {
    let gram = m.transpose() * m;
    let mut residual = 0.0_f64;
    for i in 0..3 {
        for j in 0..3 {
            let target = if i == j { 1.0 } else { 0.0 };
            let e = gram[(i, j)].to_f64() - target;
            residual += e * e;
        }
    }
    let det = m[(0, 0)] * (m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)])
        - m[(0, 1)] * (m[(1, 0)] * m[(2, 2)] - m[(1, 2)] * m[(2, 0)])
        + m[(0, 2)] * (m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)]);
    (residual.sqrt(), det.to_f64())
}
