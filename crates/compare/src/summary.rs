use std::fmt;

use pivot_core::{ErrorPolicy, Estimate, Status};

use crate::Method;

/// The outcome of one solver run, reduced to what a comparison ranks on.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    pub method: Method,

    /// Final root or solution vector.
    pub estimate: Estimate,

    pub iters: usize,

    /// Error of the last iteration under `policy`.
    pub error: f64,

    pub policy: ErrorPolicy,

    pub status: Status,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<15} ", self.method.name())?;
        match &self.estimate {
            Estimate::Scalar(x) => write!(f, "x = {x:<22}")?,
            Estimate::Vector(x) => write!(f, "x = {x:?} ")?,
        }
        write!(
            f,
            " iters = {:<4} {} error = {:e} ({:?})",
            self.iters, self.policy, self.error, self.status
        )
    }
}
