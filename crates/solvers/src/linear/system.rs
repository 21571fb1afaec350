use ndarray::{Array1, Array2};
use pivot_core::{ErrorKind, SolverError};
use thiserror::Error;

/// Reasons a linear system is rejected before iterating.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SystemError {
    #[error("coefficient matrix is empty")]
    Empty,

    #[error("coefficient matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("{name} has length {found}, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{name} contains a non-finite entry")]
    NonFinite { name: &'static str },

    /// The iteration divides by every diagonal entry.
    #[error("diagonal entry {row} is zero")]
    ZeroPivot { row: usize },
}

impl SolverError for SystemError {
    fn kind(&self) -> ErrorKind {
        match self {
            SystemError::ZeroPivot { .. } => ErrorKind::Degenerate,
            _ => ErrorKind::InvalidInput,
        }
    }
}

/// A validated system `A·x = b` with a starting vector.
///
/// Construction copies the inputs, so solvers work on their own arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct System {
    a: Array2<f64>,
    b: Array1<f64>,
    x0: Array1<f64>,
}

impl System {
    /// Validates and copies a system.
    ///
    /// # Errors
    ///
    /// Returns an error if `a` is empty or not square, if `b` or `x0` do not
    /// match its size, if any entry is not finite, or if a diagonal entry of
    /// `a` is zero.
    pub fn new(a: &Array2<f64>, b: &Array1<f64>, x0: &Array1<f64>) -> Result<Self, SystemError> {
        let (rows, cols) = a.dim();
        if rows == 0 || cols == 0 {
            return Err(SystemError::Empty);
        }
        if rows != cols {
            return Err(SystemError::NotSquare { rows, cols });
        }
        for (name, len) in [("b", b.len()), ("x0", x0.len())] {
            if len != rows {
                return Err(SystemError::LengthMismatch {
                    name,
                    expected: rows,
                    found: len,
                });
            }
        }

        if !a.iter().all(|v| v.is_finite()) {
            return Err(SystemError::NonFinite { name: "A" });
        }
        if !b.iter().all(|v| v.is_finite()) {
            return Err(SystemError::NonFinite { name: "b" });
        }
        if !x0.iter().all(|v| v.is_finite()) {
            return Err(SystemError::NonFinite { name: "x0" });
        }

        #[allow(clippy::float_cmp)]
        if let Some(row) = a.diag().iter().position(|&d| d == 0.0) {
            return Err(SystemError::ZeroPivot { row });
        }

        Ok(Self {
            a: a.clone(),
            b: b.clone(),
            x0: x0.clone(),
        })
    }

    /// Number of unknowns.
    #[must_use]
    pub fn size(&self) -> usize {
        self.b.len()
    }

    #[must_use]
    pub fn a(&self) -> &Array2<f64> {
        &self.a
    }

    #[must_use]
    pub fn b(&self) -> &Array1<f64> {
        &self.b
    }

    #[must_use]
    pub fn x0(&self) -> &Array1<f64> {
        &self.x0
    }

    /// Returns `‖b − A·x‖₂`.
    #[must_use]
    pub fn residual_norm(&self, x: &Array1<f64>) -> f64 {
        norm(&(&self.b - &self.a.dot(x)))
    }
}

/// Euclidean norm of a vector.
pub(crate) fn norm(v: &Array1<f64>) -> f64 {
    v.dot(v).sqrt()
}
