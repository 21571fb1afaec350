/// Indicates how an iterative solver run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// The computed error dropped strictly below the tolerance.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

impl Status {
    /// Returns true if the run met its tolerance.
    #[must_use]
    pub fn is_converged(self) -> bool {
        self == Status::Converged
    }
}
