use pivot_core::{Observer, Record};

/// Control actions supported by the iterative solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver and return the latest estimate.
    StopEarly,
}

/// Event emitted once per recorded iteration.
///
/// The record has already been appended to the run's history when the
/// observer sees it.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a, R> {
    /// The row just recorded.
    pub record: &'a R,
}

impl<R: Record> Event<'_, R> {
    /// Returns the iteration that produced the record.
    #[must_use]
    pub fn iter(&self) -> usize {
        self.record.iter()
    }

    /// Returns the error of the record.
    #[must_use]
    pub fn error(&self) -> f64 {
        self.record.error()
    }
}

/// Emits a record to the observer and reports whether it asked to stop.
pub(crate) fn stop_requested<R, Obs>(observer: &mut Obs, record: &R) -> bool
where
    Obs: for<'a> Observer<Event<'a, R>, Action>,
{
    matches!(
        observer.observe(&Event { record }),
        Some(Action::StopEarly)
    )
}
