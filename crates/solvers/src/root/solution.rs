use pivot_core::{Record, Status};

/// The result of a scalar root-finding run.
#[derive(Debug, Clone)]
pub struct Solution<R> {
    /// How the run terminated.
    pub status: Status,

    /// Final root estimate.
    pub root: f64,

    /// Function value at the root estimate.
    pub value: f64,

    /// Number of iterations performed.
    pub iters: usize,

    /// One record per iteration, in order.
    pub history: Vec<R>,
}

impl<R: Record> Solution<R> {
    /// Returns the error of the last recorded iteration.
    ///
    /// Returns `None` when no iteration ran.
    #[must_use]
    pub fn final_error(&self) -> Option<f64> {
        self.history.last().map(Record::error)
    }
}

impl<R> Solution<R> {
    /// Builds a solution and logs how the run ended.
    pub(super) fn finish(
        method: &str,
        status: Status,
        root: f64,
        value: f64,
        iters: usize,
        history: Vec<R>,
    ) -> Self {
        log::debug!("{method} finished: {status:?} after {iters} iterations, x = {root}");
        Self {
            status,
            root,
            value,
            iters,
            history,
        }
    }
}
