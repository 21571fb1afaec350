use thiserror::Error;

use crate::ErrorPolicy;

/// Stopping configuration shared by every iterative solver.
///
/// A run stops as soon as the computed error is strictly below `tolerance`,
/// or when `max_iters` iterations have been performed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    tolerance: f64,
    max_iters: usize,
    policy: ErrorPolicy,
}

/// Errors that can occur when validating a solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("tolerance must be finite and positive, got {0}")]
    Tolerance(f64),
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(1e-7, 100, ErrorPolicy::Absolute).unwrap()
    }
}

impl Config {
    /// Creates a new config with a validated tolerance.
    ///
    /// A `max_iters` of zero is allowed; such a run performs no iterations and
    /// reports its initial estimate.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is not finite or not strictly positive.
    pub fn new(tolerance: f64, max_iters: usize, policy: ErrorPolicy) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::Tolerance(tolerance));
        }

        Ok(Self {
            tolerance,
            max_iters,
            policy,
        })
    }

    /// Returns a copy of this config using a different error policy.
    #[must_use]
    pub fn with_policy(self, policy: ErrorPolicy) -> Self {
        Self { policy, ..self }
    }

    /// Returns the convergence tolerance.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the maximum number of iterations.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the error policy.
    #[must_use]
    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Returns true if `error` is strictly below the tolerance.
    ///
    /// `NaN` never converges.
    #[must_use]
    pub fn is_converged(&self, error: f64) -> bool {
        error < self.tolerance
    }

    /// Re-checks the invariants of a config that may have been deserialized.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is not finite or not strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::new(self.tolerance, self.max_iters, self.policy).map(|_| ())
    }
}
