//! Modified Newton's method for roots of higher multiplicity.
//!
//! Applies Newton's method to `μ(x) = f(x) / f'(x)`, whose roots are all
//! simple, giving the step
//!
//! ```text
//! x ← x − f·f′ / (f′² − f·f″)
//! ```
//!
//! which keeps quadratic convergence at roots where `f'` also vanishes.

use pivot_core::{
    Cell, Config, ConfigError, Derivatives, ErrorKind, Estimate, Evaluable, Observer, SolverError,
    Status,
};
use thiserror::Error;

use crate::{Action, Event, event::stop_requested};

use super::Solution;

/// One modified Newton step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub iter: usize,
    pub x: f64,
    pub value: f64,
    pub first: f64,
    pub second: f64,
    pub next: f64,
    pub error: f64,
}

impl pivot_core::Record for Record {
    const COLUMNS: &'static [&'static str] =
        &["iter", "x", "f(x)", "f'(x)", "f''(x)", "next", "error"];

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
            Cell::Scalar(self.x),
            Cell::Scalar(self.value),
            Cell::Scalar(self.first),
            Cell::Scalar(self.second),
            Cell::Scalar(self.next),
            Cell::Scalar(self.error),
        ]
    }
}

/// Errors that can occur during a multiple-root solve.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("initial guess {x} gives f = {value}")]
    InvalidStart { x: f64, value: f64 },

    #[error("f'² − f·f'' vanished at x = {x}")]
    ZeroDenominator { x: f64, history: Vec<Record> },

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
            Error::InvalidConfig(_) | Error::InvalidStart { .. } => &[],
        }
    }
}

impl SolverError for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidConfig(_) | Error::InvalidStart { .. } => ErrorKind::InvalidInput,
            Error::ZeroDenominator { .. } | Error::NonFiniteValue { .. } => ErrorKind::Degenerate,
        }
    }
}

/// Finds a (possibly repeated) root of `f` starting from `x0`.
///
/// # Errors
///
/// Returns an error if the config is invalid, if `x0` or `f(x0)` is not
/// finite, if the step denominator is exactly zero, or if a step produces a
/// non-finite value.
pub fn solve<F, D, Obs>(
    f: &F,
    derivatives: &D,
    x0: f64,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<Record>, Error>
where
    F: Evaluable + ?Sized,
    D: Derivatives,
    Obs: for<'a> Observer<Event<'a, Record>, Action>,
{
    config.validate()?;

    let mut x = x0;
    let mut value = f.eval(x);
    if !x.is_finite() || !value.is_finite() {
        return Err(Error::InvalidStart { x, value });
    }

    let mut history = Vec::new();
    for iter in 1..=config.max_iters() {
        let first = derivatives.first(f, x);
        let second = derivatives.second(f, x);
        let denominator = first * first - value * second;

        let row = move |next, error| Record {
            iter,
            x,
            value,
            first,
            second,
            next,
            error,
        };

        #[allow(clippy::float_cmp)]
        if denominator == 0.0 {
            history.push(row(x, f64::INFINITY));
            log::warn!("multiple roots: zero denominator at x = {x}, iteration {iter}");
            return Err(Error::ZeroDenominator { x, history });
        }

        let next = x - value * first / denominator;
        let next_value = f.eval(next);
        if !next.is_finite() || !next_value.is_finite() {
            history.push(row(next, f64::INFINITY));
            log::warn!("multiple roots: step from {x} is not finite at iteration {iter}");
            return Err(Error::NonFiniteValue { x, history });
        }

        let error = config.policy().scalar_error(x, next, next_value);
        let record = row(next, error);
        log::trace!("multiple roots iter {iter}: x = {next}, f(x) = {next_value}, error = {error}");
        history.push(record);

        x = next;
        value = next_value;

        if stop_requested(&mut observer, &record) {
            let status = Status::StoppedByObserver;
            return Ok(Solution::finish("multiple roots", status, x, value, iter, history));
        }

        if config.is_converged(error) {
            let status = Status::Converged;
            return Ok(Solution::finish("multiple roots", status, x, value, iter, history));
        }
    }

    let iters = config.max_iters();
    Ok(Solution::finish("multiple roots", Status::MaxIters, x, value, iters, history))
}

/// Runs the modified Newton method without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<F, D>(
    f: &F,
    derivatives: &D,
    x0: f64,
    config: &Config,
) -> Result<Solution<Record>, Error>
where
    F: Evaluable + ?Sized,
    D: Derivatives,
{
    solve(f, derivatives, x0, config, ())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use pivot_core::{AnalyticPair, CentralDifference, ErrorPolicy, Record as _};

    use crate::root::newton;

    /// Double root at 1, simple root at -2.
    fn double_root(x: f64) -> f64 {
        (x - 1.0).powi(2) * (x + 2.0)
    }

    fn exact() -> AnalyticPair<impl Fn(f64) -> f64, impl Fn(f64) -> f64> {
        AnalyticPair::new(
            |x: f64| 2.0 * (x - 1.0) * (x + 2.0) + (x - 1.0).powi(2),
            |x: f64| 2.0 * (x + 2.0) + 4.0 * (x - 1.0),
        )
    }

    #[test]
    fn converges_quadratically_at_double_root() {
        let config = Config::new(1e-10, 50, ErrorPolicy::Absolute).unwrap();
        let solution =
            solve_unobserved(&double_root, &exact(), 2.0, &config).expect("should converge");

        assert_eq!(solution.status, Status::Converged);
        assert_eq!(solution.iters, 5);
        assert_abs_diff_eq!(solution.root, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn needs_fewer_steps_than_newton() {
        let config = Config::new(1e-10, 100, ErrorPolicy::Absolute).unwrap();
        let modified =
            solve_unobserved(&double_root, &exact(), 2.0, &config).expect("should converge");
        let plain =
            newton::solve_unobserved(&double_root, &exact(), 2.0, &config).expect("should converge");

        assert!(modified.iters * 4 < plain.iters);
    }

    #[test]
    fn works_with_finite_differences() {
        let config = Config::new(1e-6, 50, ErrorPolicy::Absolute).unwrap();
        let solution =
            solve_unobserved(&double_root, &CentralDifference::default(), 2.0, &config)
                .expect("should converge");

        assert_abs_diff_eq!(solution.root, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn zero_iteration_cap_returns_the_guess() {
        let config = Config::new(1e-10, 0, ErrorPolicy::Absolute).unwrap();
        let solution = solve_unobserved(&double_root, &exact(), 2.0, &config).expect("should run");

        assert_eq!(solution.status, Status::MaxIters);
        assert_eq!(solution.root, 2.0);
        assert_eq!(solution.value, double_root(2.0));
        assert_eq!(solution.iters, 0);
        assert!(solution.history.is_empty());
        assert_eq!(solution.final_error(), None);
    }

    #[test]
    fn zero_denominator_is_degenerate() {
        // f' and f'' both vanish at the origin.
        let f = |x: f64| x.powi(3) + 1.0;
        let d = AnalyticPair::new(|x: f64| 3.0 * x * x, |x: f64| 6.0 * x);
        let error = solve_unobserved(&f, &d, 0.0, &Config::default()).expect_err("flat start");

        assert!(matches!(error, Error::ZeroDenominator { .. }));
        assert_eq!(error.kind(), ErrorKind::Degenerate);
        assert_eq!(error.history().len(), 1);
        assert!(error.history()[0].error().is_infinite());
    }
}
