use pivot_core::{ConfigError, ErrorKind, SolverError};
use thiserror::Error;

use super::{Record, SystemError};

/// Errors that can occur during an iterative linear solve.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("invalid system: {0}")]
    InvalidSystem(#[from] SystemError),

    #[error("relaxation factor must lie in (0, 2), got {0}")]
    InvalidRelaxation(f64),

    /// The iterate overflowed, typically because the method diverges.
    #[error("iterate became non-finite at iteration {iter}")]
    NonFinite { iter: usize, history: Vec<Record> },
}

impl Error {
    /// Returns the history recorded before the run was abandoned.
    #[must_use]
    pub fn history(&self) -> &[Record] {
        match self {
            Error::NonFinite { history, .. } => history,
            Error::InvalidConfig(_) | Error::InvalidSystem(_) | Error::InvalidRelaxation(_) => &[],
        }
    }
}

impl SolverError for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidConfig(_) => ErrorKind::InvalidInput,
            Error::InvalidSystem(error) => error.kind(),
            Error::InvalidRelaxation(_) | Error::NonFinite { .. } => ErrorKind::Degenerate,
        }
    }
}
