//! Dual numbers `re + ε·eps` with `ε² = 0`.

use liealg_core::types::{SMatrix, SVector, Scalar};
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A first-order dual number.
///
/// Evaluating a function on `Dual::variable(x)` yields `f(x)` in the real
/// part and `f'(x)` in the infinitesimal part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dual<T> {
    /// Real part.
    pub re: T,
    /// Infinitesimal part.
    pub eps: T,
}

impl<T: Scalar> Dual<T> {
    pub fn new(re: T, eps: T) -> Self {
        Self { re, eps }
    }

    /// A constant: derivative zero.
    pub fn constant(re: T) -> Self {
        Self::new(re, T::zero())
    }

    /// The independent variable: derivative one.
    pub fn variable(re: T) -> Self {
        Self::new(re, T::one())
    }
}

impl<T: Scalar> Add for Dual<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.eps + rhs.eps)
    }
}

impl<T: Scalar> Sub for Dual<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.eps - rhs.eps)
    }
}

impl<T: Scalar> Mul for Dual<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.re * rhs.re, self.re * rhs.eps + self.eps * rhs.re)
    }
}

impl<T: Scalar> Div for Dual<T> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::new(
            self.re / rhs.re,
            (self.eps * rhs.re - self.re * rhs.eps) / (rhs.re * rhs.re),
        )
    }
}

impl<T: Scalar> Neg for Dual<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.re, -self.eps)
    }
}

macro_rules! forward_assign {
    ($($trait:ident :: $method:ident => $op:tt),*) => {
        $(
            impl<T: Scalar> $trait for Dual<T> {
                fn $method(&mut self, rhs: Self) {
                    *self = *self $op rhs;
                }
            }
        )*
    };
}

forward_assign!(AddAssign::add_assign => +, SubAssign::sub_assign => -, MulAssign::mul_assign => *, DivAssign::div_assign => /);

impl<T: Scalar> Zero for Dual<T> {
    fn zero() -> Self {
        Self::constant(T::zero())
    }

    fn is_zero(&self) -> bool {
        self.re.is_zero() && self.eps.is_zero()
    }
}

impl<T: Scalar> One for Dual<T> {
    fn one() -> Self {
        Self::constant(T::one())
    }
}

impl<T: Scalar> fmt::Display for Dual<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}ε", self.re, self.eps)
    }
}

impl<T: Scalar> Scalar for Dual<T> {
    const SMALL_ANGLE: f64 = T::SMALL_ANGLE;
    const MANIFOLD_TOLERANCE: f64 = T::MANIFOLD_TOLERANCE;

    fn from_f64(v: f64) -> Self {
        Self::constant(T::from_f64(v))
    }

    fn to_f64(self) -> f64 {
        self.re.to_f64()
    }

    fn sin(self) -> Self {
        Self::new(self.re.sin(), self.eps * self.re.cos())
    }

    fn cos(self) -> Self {
        Self::new(self.re.cos(), -(self.eps * self.re.sin()))
    }

    fn sqrt(self) -> Self {
        let root = self.re.sqrt();
        Self::new(root, self.eps / (root + root))
    }

    fn atan2(self, x: Self) -> Self {
        let denom = x.re * x.re + self.re * self.re;
        Self::new(
            self.re.atan2(x.re),
            (x.re * self.eps - self.re * x.eps) / denom,
        )
    }

    fn rem_euclid(self, modulus: Self) -> Self {
        let r = self.re.rem_euclid(modulus.re);
        let turns = (self.re - r) / modulus.re;
        Self::new(r, self.eps - modulus.eps * turns)
    }

    fn select_lt(self, threshold: Self, if_true: Self, if_false: Self) -> Self {
        let pick = self.re.select_lt(threshold.re, T::one(), T::zero());
        if pick.is_one() {
            if_true
        } else {
            if_false
        }
    }
}

/// Value and derivative of a scalar function at `x`.
pub fn derivative<T, F>(f: F, x: T) -> (T, T)
where
    T: Scalar,
    F: Fn(Dual<T>) -> Dual<T>,
{
    let y = f(Dual::variable(x));
    (y.re, y.eps)
}

/// Jacobian of `f` at `x`, one forward pass per input dimension.
pub fn jacobian<T, F, const N: usize, const M: usize>(f: F, x: &SVector<T, N>) -> SMatrix<T, M, N>
where
    T: Scalar,
    F: Fn(&SVector<Dual<T>, N>) -> SVector<Dual<T>, M>,
{
    let mut jac = SMatrix::<T, M, N>::zeros();
    for j in 0..N {
        let seeded = SVector::<Dual<T>, N>::from_fn(|i, _| {
            if i == j {
                Dual::variable(x[i])
            } else {
                Dual::constant(x[i])
            }
        });
        let y = f(&seeded);
        for i in 0..M {
            jac[(i, j)] = y[i].eps;
        }
    }
    jac
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_arithmetic_rules() {
        let (v, d) = derivative(|x| x * x * x - x / (x + Dual::one()), 2.0_f64);
        assert_relative_eq!(v, 8.0 - 2.0 / 3.0);
        assert_relative_eq!(d, 12.0 - 1.0 / 9.0, epsilon = 1e-15);
    }

    #[test]
    fn test_elementary_functions() {
        let x = 0.7_f64;
        assert_relative_eq!(derivative(|x| x.sin(), x).1, x.cos());
        assert_relative_eq!(derivative(|x| x.cos(), x).1, -x.sin());
        assert_relative_eq!(derivative(|x| x.sqrt(), x).1, 0.5 / x.sqrt());
        // d/dx atan2(x, 2) = 2 / (x² + 4)
        let two = Dual::constant(2.0);
        assert_relative_eq!(derivative(|x| x.atan2(two), x).1, 2.0 / (x * x + 4.0), epsilon = 1e-15);
    }

    #[test]
    fn test_rem_euclid_keeps_slope() {
        let m = Dual::constant(1.5);
        let (v, d) = derivative(|x| (x * Dual::from_f64(3.0)).rem_euclid(m), 2.0_f64);
        assert_relative_eq!(v, 0.0);
        assert_relative_eq!(d, 3.0);
        let (v, d) = derivative(|x| x.rem_euclid(m), -0.5_f64);
        assert_relative_eq!(v, 1.0);
        assert_relative_eq!(d, 1.0);
    }

    #[test]
    fn test_select_compares_real_parts() {
        let a = Dual::new(1.0_f64, 100.0);
        let b = Dual::new(2.0, -100.0);
        assert_eq!(a.select_lt(b, a, b), a);
        assert_eq!(b.select_lt(a, a, b), b);
        assert_eq!(Dual::new(-2.0_f64, 1.0).abs(), Dual::new(2.0, -1.0));
    }

    #[test]
    fn test_jacobian_of_linear_map() {
        let x = SVector::<f64, 2>::new(1.0, 2.0);
        let j = jacobian(
            |v: &SVector<Dual<f64>, 2>| {
                SVector::<Dual<f64>, 3>::new(v[0] + v[1], v[0] * v[1], v[0] - v[1] * Dual::from_f64(4.0))
            },
            &x,
        );
        let expected = SMatrix::<f64, 3, 2>::new(1.0, 1.0, 2.0, 1.0, 1.0, -4.0);
        assert_eq!(j, expected);
    }

    #[test]
    fn test_display() {
        assert_eq!(Dual::new(1.5_f64, -2.0).to_string(), "1.5 + -2ε");
    }
}
