//! Secant method.
//!
//! Newton's method with the slope replaced by the chord through the last
//! two iterates, so only `f` itself is evaluated.

use pivot_core::{
    Cell, Config, ConfigError, ErrorKind, Estimate, Evaluable, Observer, SolverError, Status,
};
use thiserror::Error;

use crate::{Action, Event, event::stop_requested};

use super::Solution;

/// One secant step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub iter: usize,
    pub previous: f64,
    pub current: f64,
    pub next: f64,
    /// `f(next)`.
    pub value: f64,
    pub error: f64,
}

impl pivot_core::Record for Record {
    const COLUMNS: &'static [&'static str] = &[
        "iter",
        "x(k-1)",
        "x(k)",
        "x(k+1)",
        "f(x(k+1))",
        "error",
    ];

    fn iter(&self) -> usize {
        self.iter
    }

    fn estimate(&self) -> Estimate {
        Estimate::Scalar(self.next)
    }

    fn error(&self) -> f64 {
        self.error
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Index(self.iter),
            Cell::Scalar(self.previous),
            Cell::Scalar(self.current),
            Cell::Scalar(self.next),
            Cell::Scalar(self.value),
            Cell::Scalar(self.error),
        ]
    }
}

/// Errors that can occur during a secant solve.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("starting points must be finite with finite values, got f({x}) = {value}")]
    InvalidStart { x: f64, value: f64 },

    #[error("starting points {x0} and {x1} have the same value {value}")]
    EqualValues { x0: f64, x1: f64, value: f64 },

    #[error("chord through {previous} and {current} is flat")]
    ZeroDenominator {
        previous: f64,
        current: f64,
        history: Vec<Record>,
    },

    #[error("step from x = {x} produced a non-finite value")]
    NonFiniteValue { x: f64, history: Vec<Record> },
}

impl Error {
    /// Returns the history recorded before the run was abandoned.
    #[must_use]
    pub fn history(&self) -> &[Record] {
        match self {
            Error::ZeroDenominator { history, .. } | Error::NonFiniteValue { history, .. } => {
                history
            }
            Error::InvalidConfig(_) | Error::InvalidStart { .. } | Error::EqualValues { .. } => {
                &[]
            }
        }
    }
}

impl SolverError for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidConfig(_) | Error::InvalidStart { .. } | Error::EqualValues { .. } => {
                ErrorKind::InvalidInput
            }
            Error::ZeroDenominator { .. } | Error::NonFiniteValue { .. } => ErrorKind::Degenerate,
        }
    }
}

/// Finds a root of `f` from the starting pair `[x0, x1]`.
///
/// A run with `max_iters == 0` returns `x1`.
///
/// # Errors
///
/// Returns an error if the config is invalid, if a starting point or its
/// value is not finite, if both starting points share a value, or if the
/// chord becomes flat or a step is not finite during the run.
pub fn solve<F, Obs>(
    f: &F,
    start: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<Record>, Error>
where
    F: Evaluable + ?Sized,
    Obs: for<'a> Observer<Event<'a, Record>, Action>,
{
    config.validate()?;

    let [mut previous, mut current] = start;
    let mut f_previous = f.eval(previous);
    let mut f_current = f.eval(current);
    for (x, value) in [(previous, f_previous), (current, f_current)] {
        if !x.is_finite() || !value.is_finite() {
            return Err(Error::InvalidStart { x, value });
        }
    }

    #[allow(clippy::float_cmp)]
    if f_previous == f_current {
        return Err(Error::EqualValues {
            x0: previous,
            x1: current,
            value: f_current,
        });
    }

    let mut history = Vec::new();
    for iter in 1..=config.max_iters() {
        let denominator = f_current - f_previous;

        #[allow(clippy::float_cmp)]
        if denominator == 0.0 {
            history.push(Record {
                iter,
                previous,
                current,
                next: current,
                value: f_current,
                error: f64::INFINITY,
            });
            log::warn!("secant: flat chord at iteration {iter}");
            return Err(Error::ZeroDenominator {
                previous,
                current,
                history,
            });
        }

        let next = current - f_current * (current - previous) / denominator;
        let value = f.eval(next);
        if !next.is_finite() || !value.is_finite() {
            history.push(Record {
                iter,
                previous,
                current,
                next,
                value,
                error: f64::INFINITY,
            });
            log::warn!("secant: step from {current} is not finite at iteration {iter}");
            return Err(Error::NonFiniteValue { x: current, history });
        }

        let error = config.policy().scalar_error(current, next, value);
        let record = Record {
            iter,
            previous,
            current,
            next,
            value,
            error,
        };
        log::trace!("secant iter {iter}: x = {next}, f(x) = {value}, error = {error}");
        history.push(record);

        (previous, f_previous) = (current, f_current);
        (current, f_current) = (next, value);

        if stop_requested(&mut observer, &record) {
            let status = Status::StoppedByObserver;
            return Ok(Solution::finish("secant", status, current, f_current, iter, history));
        }

        if config.is_converged(error) {
            let status = Status::Converged;
            return Ok(Solution::finish("secant", status, current, f_current, iter, history));
        }
    }

    let iters = config.max_iters();
    Ok(Solution::finish("secant", Status::MaxIters, current, f_current, iters, history))
}

/// Runs the secant method without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<F>(
    f: &F,
    start: [f64; 2],
    config: &Config,
) -> Result<Solution<Record>, Error>
where
    F: Evaluable + ?Sized,
{
    solve(f, start, config, ())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use pivot_core::{ErrorPolicy, Record as _};

    fn square_minus_two(x: f64) -> f64 {
        x * x - 2.0
    }

    #[test]
    fn square_root_of_two() {
        let config = Config::new(1e-6, 50, ErrorPolicy::Absolute).unwrap();
        let solution =
            solve_unobserved(&square_minus_two, [0.0, 2.0], &config).expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_eq!(solution.iters, 7);
        assert_relative_eq!(solution.history[0].next, 1.0);
        assert_relative_eq!(solution.root, 2.0_f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn iterates_shift_by_one_each_step() {
        let config = Config::new(1e-12, 50, ErrorPolicy::Absolute).unwrap();
        let solution =
            solve_unobserved(&square_minus_two, [0.0, 2.0], &config).expect("should solve");

        for pair in solution.history.windows(2) {
            assert_eq!(pair[1].previous, pair[0].current);
            assert_eq!(pair[1].current, pair[0].next);
        }
    }

    #[test]
    fn equal_starting_values_are_invalid() {
        let f = |x: f64| x * x;
        let error = solve_unobserved(&f, [-1.0, 1.0], &Config::default())
            .expect_err("values are equal");

        assert!(matches!(error, Error::EqualValues { .. }));
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn flat_chord_mid_run_is_degenerate() {
        // First step lands on 0.5, where f matches f(2) and the chord is flat.
        let f = |x: f64| if x < 0.0 { x } else { 1.0 };
        let error =
            solve_unobserved(&f, [-1.0, 2.0], &Config::default()).expect_err("chord goes flat");

        assert!(matches!(error, Error::ZeroDenominator { .. }));
        assert_eq!(error.kind(), ErrorKind::Degenerate);

        let history = error.history();
        assert_eq!(history.len(), 2);
        assert_relative_eq!(history[0].next, 0.5);
        assert!(history[1].error().is_infinite());
    }

    #[test]
    fn zero_iterations_returns_second_point() {
        let config = Config::new(1e-6, 0, ErrorPolicy::Absolute).unwrap();
        let solution =
            solve_unobserved(&square_minus_two, [0.0, 2.0], &config).expect("should run");

        assert_eq!(solution.status, Status::MaxIters);
        assert!(solution.history.is_empty());
        assert_relative_eq!(solution.root, 2.0);
        assert_relative_eq!(solution.value, 2.0);
    }
}
