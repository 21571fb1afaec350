use pivot_core::Observer;

use crate::traits::{CanStopEarly, HasError};

/// Stops a run whose error has not improved for `patience` iterations.
///
/// An iteration counts as an improvement when its error is below the best
/// error seen so far by more than `min_improvement` (relative). Runs that
/// oscillate or creep along forever are cut short instead of exhausting
/// the iteration cap.
#[derive(Debug, Clone, PartialEq)]
pub struct StallObserver {
    patience: usize,
    min_improvement: f64,
    best: f64,
    since_best: usize,
}

impl StallObserver {
    /// Creates an observer that tolerates `patience` non-improving iterations.
    ///
    /// A `patience` of zero is treated as one.
    #[must_use]
    pub fn new(patience: usize) -> Self {
        Self {
            patience: patience.max(1),
            min_improvement: 0.0,
            best: f64::INFINITY,
            since_best: 0,
        }
    }

    /// Requires each improvement to shrink the best error by this fraction.
    #[must_use]
    pub fn with_min_improvement(mut self, fraction: f64) -> Self {
        self.min_improvement = fraction.clamp(0.0, 1.0);
        self
    }

    /// Returns the smallest error observed so far.
    #[must_use]
    pub fn best(&self) -> f64 {
        self.best
    }
}

impl<E, A> Observer<E, A> for StallObserver
where
    E: HasError,
    A: CanStopEarly,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        let error = event.error();
        if error < self.best * (1.0 - self.min_improvement) || self.best.is_infinite() {
            if error < self.best {
                self.best = error;
            }
            self.since_best = 0;
            return None;
        }

        self.since_best += 1;
        if self.since_best >= self.patience {
            log::debug!(
                "stall: no improvement on {} for {} iterations",
                self.best,
                self.since_best
            );
            return Some(A::stop_early());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pivot_core::{Config, ErrorPolicy, Status};
    use pivot_solvers::root::fixed_point;

    #[test]
    fn stops_an_oscillating_iteration() {
        // g(x) = -x bounces between 1 and -1 with a constant step of 2.
        let g = |x: f64| -x;
        let config = Config::new(1e-8, 100, ErrorPolicy::Absolute).unwrap();

        let solution = fixed_point::solve(&g, 1.0, &config, StallObserver::new(3))
            .expect("should stop cleanly");

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.iters, 4);
    }

    #[test]
    fn lets_a_converging_run_finish() {
        let g = |x: f64| x - (x * x - 2.0) / 2.0;
        let config = Config::new(1e-10, 100, ErrorPolicy::Absolute).unwrap();

        let solution = fixed_point::solve(&g, 1.0, &config, StallObserver::new(2))
            .expect("should converge");

        assert_eq!(solution.status, Status::Converged);
    }
}
