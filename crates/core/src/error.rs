use std::error::Error as StdError;

/// Broad classification of solver failures.
///
/// Running out of iterations is not a failure and has no kind here; it is
/// reported as [`Status::MaxIters`](crate::Status::MaxIters).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The inputs were rejected before any iteration ran.
    InvalidInput,

    /// A quantity the method divides by became exactly zero (or an iterate
    /// stopped being finite) mid-run. Partial history is preserved.
    Degenerate,
}

/// An error returned by a pivot solver.
pub trait SolverError: StdError + Send + Sync + 'static {
    /// Returns the failure class of this error.
    fn kind(&self) -> ErrorKind;
}
