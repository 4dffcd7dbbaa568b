//! Property tests for the angle-wrapping rule.

use liealg_core::angle::{angle_difference, wrap_to_pi, wrap_to_two_pi};
use proptest::prelude::*;
use std::f64::consts::PI;

// Rounding can land within a few ulps of −π for inputs just above an odd multiple of π.
const RANGE_SLACK: f64 = 1e-9;

proptest! {
    #[test]
    fn wrap_lands_in_canonical_range(theta in -1.0e3_f64..1.0e3) {
        let w = wrap_to_pi(theta);
        prop_assert!(w > -PI - RANGE_SLACK, "wrap({theta}) = {w}");
        prop_assert!(w <= PI, "wrap({theta}) = {w}");
    }

    #[test]
    fn wrap_is_idempotent(theta in -1.0e3_f64..1.0e3) {
        let once = wrap_to_pi(theta);
        let twice = wrap_to_pi(once);
        // Points within rounding of the seam may flip from −π to π.
        let diff = angle_difference(once, twice).abs();
        prop_assert!(diff < 1e-9, "wrap({theta}) = {once}, wrapped again = {twice}");
    }

    #[test]
    fn wrap_is_periodic(theta in -100.0_f64..100.0, k in -20_i32..20) {
        let shifted = theta + 2.0 * PI * f64::from(k);
        let diff = angle_difference(wrap_to_pi(shifted), wrap_to_pi(theta)).abs();
        prop_assert!(diff < 1e-9);
    }

    #[test]
    fn wrap_fixes_canonical_angles(theta in -3.14_f64..3.14) {
        prop_assert_eq!(wrap_to_pi(theta), theta);
    }

    #[test]
    fn wrap_two_pi_range(theta in -1.0e3_f64..1.0e3) {
        let w = wrap_to_two_pi(theta);
        prop_assert!((0.0..2.0 * PI).contains(&w));
    }
}

#[test]
fn pi_maps_to_pi() {
    assert_eq!(wrap_to_pi(PI), PI);
    assert_eq!(wrap_to_pi(-PI), PI);
    assert_eq!(wrap_to_pi(3.0 * PI), PI);
}
