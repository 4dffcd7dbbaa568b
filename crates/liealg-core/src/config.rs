//! Tolerance configuration for checked constructors and law checking.

use crate::error::{ManifoldError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerances used when validating manifold values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ValidationConfig {
    /// Maximum constraint violation accepted by checked constructors
    /// (quaternion norm, orthogonality, homogeneous row).
    pub point_tolerance: f64,
    /// Maximum residual accepted by the group-law checker.
    pub law_tolerance: f64,
    /// Whether checked constructors renormalize accepted inputs.
    pub normalize_on_construction: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::for_scalar::<f64>()
    }
}

impl ValidationConfig {
    /// Start building a custom configuration.
    pub fn builder() -> ValidationConfigBuilder {
        ValidationConfigBuilder::new()
    }

    /// Defaults matched to a scalar type's precision: both tolerances are
    /// [`Scalar::MANIFOLD_TOLERANCE`](crate::types::Scalar::MANIFOLD_TOLERANCE).
    pub fn for_scalar<T: crate::types::Scalar>() -> Self {
        Self {
            point_tolerance: T::MANIFOLD_TOLERANCE,
            law_tolerance: T::MANIFOLD_TOLERANCE,
            normalize_on_construction: true,
        }
    }

    /// Reject non-positive or non-finite tolerances.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("point_tolerance", self.point_tolerance),
            ("law_tolerance", self.law_tolerance),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ManifoldError::invalid_operand(
                    "ValidationConfig",
                    format!("{name} must be positive and finite, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

/// Builder for creating a custom validation configuration.
#[derive(Debug, Clone, Default)]
pub struct ValidationConfigBuilder {
    config: ValidationConfig,
}

impl ValidationConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tolerance used by checked constructors.
    pub fn point_tolerance(mut self, tolerance: f64) -> Self {
        self.config.point_tolerance = tolerance;
        self
    }

    /// Set the tolerance used by the group-law checker.
    pub fn law_tolerance(mut self, tolerance: f64) -> Self {
        self.config.law_tolerance = tolerance;
        self
    }

    /// Set whether accepted inputs are renormalized.
    pub fn normalize_on_construction(mut self, normalize: bool) -> Self {
        self.config.normalize_on_construction = normalize;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<ValidationConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
