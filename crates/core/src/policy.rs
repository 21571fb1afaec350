/// How the error of an iteration is measured.
///
/// The policy is chosen once per run and applied to every iteration's
/// stopping test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorPolicy {
    /// Distance between successive iterates.
    #[default]
    Absolute,

    /// Distance between successive iterates, scaled by the new iterate.
    ///
    /// When the new iterate is exactly zero the absolute distance is used
    /// instead. This changes the meaning of the error for roots at the
    /// origin, but never fails.
    Relative,

    /// Magnitude of the defining equation at the new iterate, for example
    /// `|f(x)|` for a root finder or `‖b − A·x‖` for a linear system.
    Residual,
}

impl ErrorPolicy {
    /// All policies, in declaration order.
    pub const ALL: [ErrorPolicy; 3] = [
        ErrorPolicy::Absolute,
        ErrorPolicy::Relative,
        ErrorPolicy::Residual,
    ];

    /// Computes the error between two scalar iterates.
    ///
    /// `residual` is only consulted by [`ErrorPolicy::Residual`].
    #[must_use]
    pub fn scalar_error(self, previous: f64, current: f64, residual: f64) -> f64 {
        let absolute = (current - previous).abs();
        match self {
            ErrorPolicy::Absolute => absolute,
            ErrorPolicy::Relative => scaled(absolute, current.abs()),
            ErrorPolicy::Residual => residual.abs(),
        }
    }

    /// Computes the error of a vector iteration from precomputed norms.
    ///
    /// `step_norm` is `‖x_new − x_old‖`, `current_norm` is `‖x_new‖`, and
    /// `residual_norm` is only consulted by [`ErrorPolicy::Residual`].
    #[must_use]
    pub fn vector_error(self, step_norm: f64, current_norm: f64, residual_norm: f64) -> f64 {
        match self {
            ErrorPolicy::Absolute => step_norm,
            ErrorPolicy::Relative => scaled(step_norm, current_norm),
            ErrorPolicy::Residual => residual_norm,
        }
    }

    /// Returns true if this policy needs a residual to be computed.
    #[must_use]
    pub fn needs_residual(self) -> bool {
        self == ErrorPolicy::Residual
    }

    /// Short lowercase label, used in logs and tables.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ErrorPolicy::Absolute => "absolute",
            ErrorPolicy::Relative => "relative",
            ErrorPolicy::Residual => "residual",
        }
    }
}

impl std::fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[allow(clippy::float_cmp)]
fn scaled(absolute: f64, magnitude: f64) -> f64 {
    if magnitude == 0.0 {
        absolute
    } else {
        absolute / magnitude
    }
}
