//! Numerical checking of the group laws.
//!
//! [`GroupLawChecker`] evaluates the identity, inverse, associativity,
//! log/exp and minus/plus laws on a set of sample elements of any manifold,
//! so the same checks run unchanged over the whole manifold family.

use crate::{
    config::ValidationConfig,
    error::{ManifoldError, Result},
    group::{LieGroup, Tangent},
    types::Scalar,
};
use std::fmt;

/// A group law evaluated by [`GroupLawChecker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupLaw {
    /// `g ∘ e == g`
    RightIdentity,
    /// `e ∘ g == g`
    LeftIdentity,
    /// `g ∘ g⁻¹ == e`
    RightInverse,
    /// `g⁻¹ ∘ g == e`
    LeftInverse,
    /// `(a ∘ b) ∘ c == a ∘ (b ∘ c)`
    Associativity,
    /// `exp(log(g)) == g`
    LogExpRoundTrip,
    /// `(a − b) + b == a`
    MinusPlus,
}

impl GroupLaw {
    /// Every law, in evaluation order.
    pub const ALL: [GroupLaw; 7] = [
        GroupLaw::RightIdentity,
        GroupLaw::LeftIdentity,
        GroupLaw::RightInverse,
        GroupLaw::LeftInverse,
        GroupLaw::Associativity,
        GroupLaw::LogExpRoundTrip,
        GroupLaw::MinusPlus,
    ];
}

impl fmt::Display for GroupLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RightIdentity => "right identity",
            Self::LeftIdentity => "left identity",
            Self::RightInverse => "right inverse",
            Self::LeftInverse => "left inverse",
            Self::Associativity => "associativity",
            Self::LogExpRoundTrip => "log/exp round trip",
            Self::MinusPlus => "minus/plus consistency",
        };
        f.write_str(name)
    }
}

/// Largest residual observed for one law.
#[derive(Debug, Clone, PartialEq)]
pub struct LawResidual {
    /// The law
    pub law: GroupLaw,
    /// Maximum distance between the two sides over all samples (NaN if any side was NaN)
    pub max_residual: f64,
    /// Whether the residual is within the configured tolerance
    pub passed: bool,
}

/// Outcome of checking all laws on a sample set.
#[derive(Debug, Clone, PartialEq)]
pub struct LawReport {
    /// Manifold name
    pub manifold: &'static str,
    /// Number of samples checked
    pub samples: usize,
    /// One entry per law, in [`GroupLaw::ALL`] order
    pub residuals: Vec<LawResidual>,
    /// Whether every law passed
    pub passed: bool,
}

impl LawReport {
    /// Residual recorded for a law.
    pub fn residual(&self, law: GroupLaw) -> Option<f64> {
        self.residuals
            .iter()
            .find(|r| r.law == law)
            .map(|r| r.max_residual)
    }

    /// Laws whose residual exceeded the tolerance.
    pub fn failed_laws(&self) -> Vec<GroupLaw> {
        self.residuals
            .iter()
            .filter(|r| !r.passed)
            .map(|r| r.law)
            .collect()
    }
}

impl fmt::Display for LawReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} samples)", self.manifold, self.samples)?;
        for r in &self.residuals {
            let status = if r.passed { "ok" } else { "FAILED" };
            writeln!(f, "  {:<24} {:>12.3e}  {}", r.law.to_string(), r.max_residual, status)?;
        }
        Ok(())
    }
}

/// Group-law checker for any [`LieGroup`].
pub struct GroupLawChecker;

impl GroupLawChecker {
    /// [`GroupLawChecker::check`] with tolerances matched to `T`.
    pub fn check_with_defaults<T, G>(samples: &[G]) -> Result<LawReport>
    where
        T: Scalar,
        G: LieGroup<T>,
    {
        Self::check(samples, &ValidationConfig::for_scalar::<T>())
    }

    /// Check every law on `samples`.
    ///
    /// Single-element laws run on every sample; associativity runs on
    /// consecutive triples and minus/plus on consecutive pairs (wrapping
    /// around), so the cost stays linear in the sample count.
    pub fn check<T, G>(samples: &[G], config: &ValidationConfig) -> Result<LawReport>
    where
        T: Scalar,
        G: LieGroup<T>,
    {
        config.validate()?;
        if samples.is_empty() {
            return Err(ManifoldError::invalid_operand(
                "GroupLawChecker::check",
                "at least one sample is required",
            ));
        }

        let n = samples.len();
        let identity = G::identity();
        let residuals = GroupLaw::ALL
            .iter()
            .map(|&law| {
                let max_residual = (0..n)
                    .map(|i| {
                        let a = &samples[i];
                        let b = &samples[(i + 1) % n];
                        let c = &samples[(i + 2) % n];
                        let (lhs, rhs) = match law {
                            GroupLaw::RightIdentity => (a.compose(&identity), a.clone()),
                            GroupLaw::LeftIdentity => (identity.compose(a), a.clone()),
                            GroupLaw::RightInverse => (a.compose(&a.inverse()), identity.clone()),
                            GroupLaw::LeftInverse => (a.inverse().compose(a), identity.clone()),
                            GroupLaw::Associativity => {
                                (a.compose(b).compose(c), a.compose(&b.compose(c)))
                            }
                            GroupLaw::LogExpRoundTrip => (a.log().exp(), a.clone()),
                            GroupLaw::MinusPlus => (a.minus(b).add_to(b), a.clone()),
                        };
                        lhs.distance(&rhs).to_f64()
                    })
                    .fold(0.0_f64, nan_aware_max);
                let passed = max_residual <= config.law_tolerance;
                tracing::trace!(
                    manifold = G::NAME,
                    law = %law,
                    max_residual,
                    "checked group law"
                );
                if !passed {
                    tracing::warn!(
                        manifold = G::NAME,
                        law = %law,
                        max_residual,
                        tolerance = config.law_tolerance,
                        "group law violated"
                    );
                }
                LawResidual {
                    law,
                    max_residual,
                    passed,
                }
            })
            .collect::<Vec<_>>();

        let passed = residuals.iter().all(|r| r.passed);
        Ok(LawReport {
            manifold: G::NAME,
            samples: n,
            residuals,
            passed,
        })
    }
}

fn nan_aware_max(acc: f64, value: f64) -> f64 {
    if acc.is_nan() || value.is_nan() {
        f64::NAN
    } else {
        acc.max(value)
    }
}
