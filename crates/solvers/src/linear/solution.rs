use ndarray::Array1;
use pivot_core::{Record as _, Status};

use super::{Record, SpectralEstimate};

/// The result of an iterative linear solve.
#[derive(Debug, Clone)]
pub struct Solution {
    /// How the run terminated.
    pub status: Status,

    /// Final iterate.
    pub x: Array1<f64>,

    /// Number of sweeps performed.
    pub iters: usize,

    /// One record per sweep, in order.
    pub history: Vec<Record>,

    /// Spectral radius of the method's iteration matrix.
    ///
    /// Its [`Display`](std::fmt::Display) form is the run's summary line.
    pub convergence: SpectralEstimate,
}

impl Solution {
    /// Returns the error of the last recorded sweep.
    ///
    /// Returns `None` when no sweep ran.
    #[must_use]
    pub fn final_error(&self) -> Option<f64> {
        self.history.last().map(Record::error)
    }
}
