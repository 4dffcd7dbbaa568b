//! Runtime-tagged manifold values.
//!
//! The concrete types reject mixed-manifold operations at compile time. When
//! elements of different manifolds have to live in one collection, wrap them
//! in [`GroupValue`] / [`TangentValue`]; binary operations then check the
//! manifold kinds and report [`ManifoldError::TypeMismatch`] on a mismatch.
//!
//! ```
//! use liealg_manifolds::{GroupValue, ManifoldKind, S1, SO3};
//!
//! let a = GroupValue::from(S1::new(0.5_f64));
//! let b = GroupValue::from(SO3::<f64>::Identity());
//! assert_eq!(a.kind(), ManifoldKind::S1);
//! assert!(a.compose(&b).is_err());
//! assert!(a.compose(&a.inverse()).is_ok());
//! ```

use crate::dual_quaternion::{DualQuaternion, DualQuaternionTangent};
use crate::quaternion::{Quaternion, QuaternionTangent};
use crate::s1::{S1Tangent, S1};
use crate::se3::{SE3Tangent, SE3};
use crate::so3::{SO3Tangent, SO3};
use liealg_core::{
    error::{ManifoldError, Result},
    group::{LieGroup, Tangent},
    types::Scalar,
};
use std::fmt;

/// The manifolds a [`GroupValue`] can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifoldKind {
    /// The circle group.
    S1,
    /// 3D rotations.
    SO3,
    /// Rigid transforms.
    SE3,
    /// Unit quaternions.
    Quaternion,
    /// Unit dual quaternions.
    DualQuaternion,
}

impl ManifoldKind {
    /// All kinds, in declaration order.
    pub const ALL: [ManifoldKind; 5] = [
        ManifoldKind::S1,
        ManifoldKind::SO3,
        ManifoldKind::SE3,
        ManifoldKind::Quaternion,
        ManifoldKind::DualQuaternion,
    ];

    /// Manifold name, matching [`LieGroup::NAME`].
    pub fn name(&self) -> &'static str {
        match self {
            ManifoldKind::S1 => <S1<f64> as LieGroup<f64>>::NAME,
            ManifoldKind::SO3 => <SO3<f64> as LieGroup<f64>>::NAME,
            ManifoldKind::SE3 => <SE3<f64> as LieGroup<f64>>::NAME,
            ManifoldKind::Quaternion => <Quaternion<f64> as LieGroup<f64>>::NAME,
            ManifoldKind::DualQuaternion => <DualQuaternion<f64> as LieGroup<f64>>::NAME,
        }
    }

    /// Degrees of freedom of the manifold.
    pub fn dof(&self) -> usize {
        match self {
            ManifoldKind::S1 => 1,
            ManifoldKind::SO3 | ManifoldKind::Quaternion => 3,
            ManifoldKind::SE3 | ManifoldKind::DualQuaternion => 6,
        }
    }
}

impl fmt::Display for ManifoldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A group element of any manifold.
#[derive(Debug, Clone, Copy)]
pub enum GroupValue<T> {
    /// An [`S1`] element.
    S1(S1<T>),
    /// An [`SO3`] element.
    SO3(SO3<T>),
    /// An [`SE3`] element.
    SE3(SE3<T>),
    /// A [`Quaternion`] element.
    Quaternion(Quaternion<T>),
    /// A [`DualQuaternion`] element.
    DualQuaternion(DualQuaternion<T>),
}

/// A tangent element of any manifold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TangentValue<T> {
    /// An [`S1Tangent`].
    S1(S1Tangent<T>),
    /// An [`SO3Tangent`].
    SO3(SO3Tangent<T>),
    /// An [`SE3Tangent`].
    SE3(SE3Tangent<T>),
    /// A [`QuaternionTangent`].
    Quaternion(QuaternionTangent<T>),
    /// A [`DualQuaternionTangent`].
    DualQuaternion(DualQuaternionTangent<T>),
}

fn mismatch(operation: &str, expected: ManifoldKind, actual: ManifoldKind) -> ManifoldError {
    tracing::debug!(operation, %expected, %actual, "manifold kind mismatch");
    ManifoldError::type_mismatch(operation, expected.name(), actual.name())
}

impl<T: Scalar> PartialEq for GroupValue<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::S1(a), Self::S1(b)) => a == b,
            (Self::SO3(a), Self::SO3(b)) => a == b,
            (Self::SE3(a), Self::SE3(b)) => a == b,
            (Self::Quaternion(a), Self::Quaternion(b)) => a == b,
            (Self::DualQuaternion(a), Self::DualQuaternion(b)) => a == b,
            _ => false,
        }
    }
}

impl<T: Scalar> GroupValue<T> {
    /// The manifold this value belongs to.
    pub fn kind(&self) -> ManifoldKind {
        match self {
            GroupValue::S1(_) => ManifoldKind::S1,
            GroupValue::SO3(_) => ManifoldKind::SO3,
            GroupValue::SE3(_) => ManifoldKind::SE3,
            GroupValue::Quaternion(_) => ManifoldKind::Quaternion,
            GroupValue::DualQuaternion(_) => ManifoldKind::DualQuaternion,
        }
    }

    /// Identity element of the given manifold.
    pub fn identity(kind: ManifoldKind) -> Self {
        match kind {
            ManifoldKind::S1 => GroupValue::S1(S1::identity()),
            ManifoldKind::SO3 => GroupValue::SO3(SO3::identity()),
            ManifoldKind::SE3 => GroupValue::SE3(SE3::identity()),
            ManifoldKind::Quaternion => GroupValue::Quaternion(Quaternion::identity()),
            ManifoldKind::DualQuaternion => GroupValue::DualQuaternion(DualQuaternion::identity()),
        }
    }

    /// Group inverse; the kind is preserved.
    pub fn inverse(&self) -> Self {
        match self {
            GroupValue::S1(g) => GroupValue::S1(g.inverse()),
            GroupValue::SO3(g) => GroupValue::SO3(g.inverse()),
            GroupValue::SE3(g) => GroupValue::SE3(g.inverse()),
            GroupValue::Quaternion(g) => GroupValue::Quaternion(g.inverse()),
            GroupValue::DualQuaternion(g) => GroupValue::DualQuaternion(g.inverse()),
        }
    }

    /// Logarithm into the tangent of the same kind.
    pub fn log(&self) -> TangentValue<T> {
        match self {
            GroupValue::S1(g) => TangentValue::S1(g.log()),
            GroupValue::SO3(g) => TangentValue::SO3(g.log()),
            GroupValue::SE3(g) => TangentValue::SE3(g.log()),
            GroupValue::Quaternion(g) => TangentValue::Quaternion(g.log()),
            GroupValue::DualQuaternion(g) => TangentValue::DualQuaternion(g.log()),
        }
    }

    /// `self ∘ other`; both values must belong to the same manifold.
    pub fn compose(&self, other: &Self) -> Result<Self> {
        match (self, other) {
            (GroupValue::S1(a), GroupValue::S1(b)) => Ok(GroupValue::S1(a.compose(b))),
            (GroupValue::SO3(a), GroupValue::SO3(b)) => Ok(GroupValue::SO3(a.compose(b))),
            (GroupValue::SE3(a), GroupValue::SE3(b)) => Ok(GroupValue::SE3(a.compose(b))),
            (GroupValue::Quaternion(a), GroupValue::Quaternion(b)) => {
                Ok(GroupValue::Quaternion(a.compose(b)))
            }
            (GroupValue::DualQuaternion(a), GroupValue::DualQuaternion(b)) => {
                Ok(GroupValue::DualQuaternion(a.compose(b)))
            }
            _ => Err(mismatch("compose", self.kind(), other.kind())),
        }
    }

    /// `self − other`; both values must belong to the same manifold.
    pub fn minus(&self, other: &Self) -> Result<TangentValue<T>> {
        match (self, other) {
            (GroupValue::S1(a), GroupValue::S1(b)) => Ok(TangentValue::S1(a.minus(b))),
            (GroupValue::SO3(a), GroupValue::SO3(b)) => Ok(TangentValue::SO3(a.minus(b))),
            (GroupValue::SE3(a), GroupValue::SE3(b)) => Ok(TangentValue::SE3(a.minus(b))),
            (GroupValue::Quaternion(a), GroupValue::Quaternion(b)) => {
                Ok(TangentValue::Quaternion(a.minus(b)))
            }
            (GroupValue::DualQuaternion(a), GroupValue::DualQuaternion(b)) => {
                Ok(TangentValue::DualQuaternion(a.minus(b)))
            }
            _ => Err(mismatch("minus", self.kind(), other.kind())),
        }
    }

    /// `tangent + self`; the tangent must belong to the same manifold.
    pub fn plus(&self, tangent: &TangentValue<T>) -> Result<Self> {
        match (self, tangent) {
            (GroupValue::S1(g), TangentValue::S1(t)) => Ok(GroupValue::S1(g.plus(t))),
            (GroupValue::SO3(g), TangentValue::SO3(t)) => Ok(GroupValue::SO3(g.plus(t))),
            (GroupValue::SE3(g), TangentValue::SE3(t)) => Ok(GroupValue::SE3(g.plus(t))),
            (GroupValue::Quaternion(g), TangentValue::Quaternion(t)) => {
                Ok(GroupValue::Quaternion(g.plus(t)))
            }
            (GroupValue::DualQuaternion(g), TangentValue::DualQuaternion(t)) => {
                Ok(GroupValue::DualQuaternion(g.plus(t)))
            }
            _ => Err(mismatch("plus", self.kind(), tangent.kind())),
        }
    }

    /// Distance between two values of the same manifold.
    pub fn distance(&self, other: &Self) -> Result<T> {
        self.minus(other).map(|t| t.norm())
    }
}

impl<T: Scalar> TangentValue<T> {
    /// The manifold this value belongs to.
    pub fn kind(&self) -> ManifoldKind {
        match self {
            TangentValue::S1(_) => ManifoldKind::S1,
            TangentValue::SO3(_) => ManifoldKind::SO3,
            TangentValue::SE3(_) => ManifoldKind::SE3,
            TangentValue::Quaternion(_) => ManifoldKind::Quaternion,
            TangentValue::DualQuaternion(_) => ManifoldKind::DualQuaternion,
        }
    }

    /// Zero tangent of the given manifold.
    pub fn zero(kind: ManifoldKind) -> Self {
        match kind {
            ManifoldKind::S1 => TangentValue::S1(S1Tangent::zero()),
            ManifoldKind::SO3 => TangentValue::SO3(SO3Tangent::zero()),
            ManifoldKind::SE3 => TangentValue::SE3(SE3Tangent::zero()),
            ManifoldKind::Quaternion => TangentValue::Quaternion(QuaternionTangent::zero()),
            ManifoldKind::DualQuaternion => {
                TangentValue::DualQuaternion(DualQuaternionTangent::zero())
            }
        }
    }

    /// Builds a tangent of `kind` from flat coordinates.
    ///
    /// Fails with [`ManifoldError::DimensionMismatch`] on a wrong length and
    /// [`ManifoldError::InvalidOperand`] on a non-finite coordinate.
    pub fn from_coords(kind: ManifoldKind, coords: &[T]) -> Result<Self> {
        if let Some(c) = coords.iter().find(|c| !c.to_f64().is_finite()) {
            return Err(ManifoldError::invalid_operand(
                "from_coords",
                format!("non-finite coordinate {c}"),
            ));
        }
        Ok(match kind {
            ManifoldKind::S1 => TangentValue::S1(S1Tangent::from_coords(coords)?),
            ManifoldKind::SO3 => TangentValue::SO3(SO3Tangent::from_coords(coords)?),
            ManifoldKind::SE3 => TangentValue::SE3(SE3Tangent::from_coords(coords)?),
            ManifoldKind::Quaternion => {
                TangentValue::Quaternion(QuaternionTangent::from_coords(coords)?)
            }
            ManifoldKind::DualQuaternion => {
                TangentValue::DualQuaternion(DualQuaternionTangent::from_coords(coords)?)
            }
        })
    }

    /// Exponential into the group of the same kind.
    pub fn exp(&self) -> GroupValue<T> {
        match self {
            TangentValue::S1(t) => GroupValue::S1(t.exp()),
            TangentValue::SO3(t) => GroupValue::SO3(t.exp()),
            TangentValue::SE3(t) => GroupValue::SE3(t.exp()),
            TangentValue::Quaternion(t) => GroupValue::Quaternion(t.exp()),
            TangentValue::DualQuaternion(t) => GroupValue::DualQuaternion(t.exp()),
        }
    }

    /// Scales the tangent by `factor`, rejecting non-finite factors.
    pub fn scale(&self, factor: T) -> Result<Self> {
        if !factor.to_f64().is_finite() {
            return Err(ManifoldError::invalid_operand(
                "scale",
                format!("non-finite factor {factor}"),
            ));
        }
        Ok(match self {
            TangentValue::S1(t) => TangentValue::S1(t.scale(factor)),
            TangentValue::SO3(t) => TangentValue::SO3(t.scale(factor)),
            TangentValue::SE3(t) => TangentValue::SE3(t.scale(factor)),
            TangentValue::Quaternion(t) => TangentValue::Quaternion(t.scale(factor)),
            TangentValue::DualQuaternion(t) => TangentValue::DualQuaternion(t.scale(factor)),
        })
    }

    /// Flat coordinates, [`ManifoldKind::dof`] of them.
    pub fn coords(&self) -> Vec<T> {
        match self {
            TangentValue::S1(t) => t.coords(),
            TangentValue::SO3(t) => t.coords(),
            TangentValue::SE3(t) => t.coords(),
            TangentValue::Quaternion(t) => t.coords(),
            TangentValue::DualQuaternion(t) => t.coords(),
        }
    }

    /// Euclidean norm of the coordinates.
    pub fn norm(&self) -> T {
        match self {
            TangentValue::S1(t) => t.norm(),
            TangentValue::SO3(t) => t.norm(),
            TangentValue::SE3(t) => t.norm(),
            TangentValue::Quaternion(t) => t.norm(),
            TangentValue::DualQuaternion(t) => t.norm(),
        }
    }
}

macro_rules! impl_conversions {
    ($($variant:ident => $group:ident, $tangent:ident;)*) => {
        $(
            impl<T> From<$group<T>> for GroupValue<T> {
                fn from(value: $group<T>) -> Self {
                    GroupValue::$variant(value)
                }
            }

            impl<T> From<$tangent<T>> for TangentValue<T> {
                fn from(value: $tangent<T>) -> Self {
                    TangentValue::$variant(value)
                }
            }

            impl<T: Scalar> TryFrom<GroupValue<T>> for $group<T> {
                type Error = ManifoldError;

                fn try_from(value: GroupValue<T>) -> Result<Self> {
                    match value {
                        GroupValue::$variant(g) => Ok(g),
                        other => Err(ManifoldError::type_mismatch(
                            "try_from",
                            ManifoldKind::$variant.name(),
                            other.kind().name(),
                        )),
                    }
                }
            }

            impl<T: Scalar> TryFrom<TangentValue<T>> for $tangent<T> {
                type Error = ManifoldError;

                fn try_from(value: TangentValue<T>) -> Result<Self> {
                    match value {
                        TangentValue::$variant(t) => Ok(t),
                        other => Err(ManifoldError::type_mismatch(
                            "try_from",
                            ManifoldKind::$variant.name(),
                            other.kind().name(),
                        )),
                    }
                }
            }
        )*
    };
}

impl_conversions! {
    S1 => S1, S1Tangent;
    SO3 => SO3, SO3Tangent;
    SE3 => SE3, SE3Tangent;
    Quaternion => Quaternion, QuaternionTangent;
    DualQuaternion => DualQuaternion, DualQuaternionTangent;
}

impl<T: Scalar> fmt::Display for GroupValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupValue::S1(g) => g.fmt(f),
            GroupValue::SO3(g) => g.fmt(f),
            GroupValue::SE3(g) => g.fmt(f),
            GroupValue::Quaternion(g) => g.fmt(f),
            GroupValue::DualQuaternion(g) => g.fmt(f),
        }
    }
}

impl<T: Scalar> fmt::Display for TangentValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TangentValue::S1(t) => t.fmt(f),
            TangentValue::SO3(t) => t.fmt(f),
            TangentValue::SE3(t) => t.fmt(f),
            TangentValue::Quaternion(t) => t.fmt(f),
            TangentValue::DualQuaternion(t) => t.fmt(f),
        }
    }
}
