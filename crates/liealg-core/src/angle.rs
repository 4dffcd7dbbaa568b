//! Periodic angle normalization.
//!
//! Every operation of the circle group goes through [`wrap_to_pi`], so the
//! canonical domain `(−π, π]` is enforced here and nowhere else.

use crate::types::Scalar;

/// Wrap an angle into `(−π, π]`.
///
/// Angles already inside the range are returned bit for bit. Others are
/// computed as `π − ((π − θ) mod 2π)` with a modulo in `[0, 2π)`, so an
/// input of exactly `−π` maps to `π`.
pub fn wrap_to_pi<T: Scalar>(angle: T) -> T {
    let pi = T::pi();
    let wrapped = pi - (pi - angle).rem_euclid(T::two_pi());
    let below_top = pi.select_lt(angle, wrapped, angle);
    (-pi).select_lt(angle, below_top, wrapped)
}

/// Wrap an angle into `[0, 2π)`.
pub fn wrap_to_two_pi<T: Scalar>(angle: T) -> T {
    angle.rem_euclid(T::two_pi())
}

/// Signed shortest difference `a − b`, wrapped into `(−π, π]`.
pub fn angle_difference<T: Scalar>(a: T, b: T) -> T {
    wrap_to_pi(a - b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_boundary_is_closed_on_top() {
        assert_eq!(wrap_to_pi(PI), PI);
        assert_eq!(wrap_to_pi(-PI), PI);
        assert_eq!(wrap_to_pi(0.0_f64), 0.0);
    }

    #[test]
    fn test_wrap_examples() {
        assert_relative_eq!(wrap_to_pi(3.0 * FRAC_PI_2), -FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(wrap_to_pi(-3.0 * FRAC_PI_2), FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(wrap_to_pi(5.0 * PI), PI, epsilon = 1e-12);
        assert_relative_eq!(wrap_to_pi(0.25_f64), 0.25, epsilon = 1e-15);
    }

    #[test]
    fn test_in_range_angles_are_unchanged() {
        for &theta in &[0.1_f64, -0.1, 1e-17, -1e-300, 3.0, -3.0, PI - 1e-15] {
            assert_eq!(wrap_to_pi(theta), theta);
        }
        assert_eq!(wrap_to_pi(0.1_f32), 0.1_f32);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(wrap_to_pi(f64::NAN).is_nan());
    }

    #[test]
    fn test_wrap_two_pi() {
        assert_relative_eq!(wrap_to_two_pi(-FRAC_PI_2), 3.0 * FRAC_PI_2, epsilon = 1e-12);
        assert_eq!(wrap_to_two_pi(0.0_f64), 0.0);
        assert!(wrap_to_two_pi(2.0 * PI) < 2.0 * PI);
    }

    #[test]
    fn test_angle_difference_takes_short_way() {
        let d = angle_difference(PI - 0.1, -PI + 0.1);
        assert_relative_eq!(d, -0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_f32() {
        assert_relative_eq!(
            wrap_to_pi(3.0 * std::f32::consts::FRAC_PI_2),
            -std::f32::consts::FRAC_PI_2,
            epsilon = 1e-5
        );
    }
}
