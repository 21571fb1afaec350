//! Newton's method.
//!
//! Steps from `x` to `x - f(x) / f'(x)`. Slopes come from a
//! [`Derivatives`] source, so callers can pass an exact derivative with
//! [`Analytic`](pivot_core::Analytic) or fall back to
//! [`CentralDifference`](pivot_core::CentralDifference).

use pivot_core::{
    Cell, Config, ConfigError, Derivatives, ErrorKind, Estimate, Evaluable, Observer, SolverError,
    Status,
};
use thiserror::Error;

use crate::{Action, Event, event::stop_requested};

use super::Solution;

/// One Newton step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub iter: usize,
    /// Point the step started from.
    pub x: f64,
    /// `f(x)`.
    pub value: f64,
    /// `f'(x)`.
    pub slope: f64,
    /// Point the step landed on.
    pub next: f64,
    pub error: f64,
}

impl pivot_core::Record for Record {
    const COLUMNS: &'static [&'static str] = &["iter", "x", "f(x)", "f'(x)", "next", "error"];

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
            Cell::Scalar(self.slope),
            Cell::Scalar(self.next),
            Cell::Scalar(self.error),
        ]
    }
}

/// Errors that can occur during a Newton solve.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("initial guess {x} gives f = {value}")]
    InvalidStart { x: f64, value: f64 },

    #[error("derivative vanished at x = {x}")]
    ZeroDerivative { x: f64, history: Vec<Record> },

    #[error("step from x = {x} produced a non-finite value")]
    NonFiniteValue { x: f64, history: Vec<Record> },
}

impl Error {
    /// Returns the history recorded before the run was abandoned.
    #[must_use]
    pub fn history(&self) -> &[Record] {
        match self {
            Error::ZeroDerivative { history, .. } | Error::NonFiniteValue { history, .. } => {
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
            Error::ZeroDerivative { .. } | Error::NonFiniteValue { .. } => ErrorKind::Degenerate,
        }
    }
}

/// Finds a root of `f` starting from `x0`.
///
/// # Errors
///
/// Returns an error if the config is invalid, if `x0` or `f(x0)` is not
/// finite, if the derivative is exactly zero at an iterate, or if a step
/// produces a non-finite value. Degenerate errors keep the history, whose
/// last row has an infinite error.
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
        let slope = derivatives.first(f, x);

        #[allow(clippy::float_cmp)]
        if slope == 0.0 {
            history.push(Record {
                iter,
                x,
                value,
                slope,
                next: x,
                error: f64::INFINITY,
            });
            log::warn!("newton: f'({x}) = 0 at iteration {iter}");
            return Err(Error::ZeroDerivative { x, history });
        }

        let next = x - value / slope;
        let next_value = f.eval(next);
        if !next.is_finite() || !next_value.is_finite() {
            history.push(Record {
                iter,
                x,
                value,
                slope,
                next,
                error: f64::INFINITY,
            });
            log::warn!("newton: step from {x} is not finite at iteration {iter}");
            return Err(Error::NonFiniteValue { x, history });
        }

        let error = config.policy().scalar_error(x, next, next_value);
        let record = Record {
            iter,
            x,
            value,
            slope,
            next,
            error,
        };
        log::trace!("newton iter {iter}: x = {next}, f(x) = {next_value}, error = {error}");
        history.push(record);

        x = next;
        value = next_value;

        if stop_requested(&mut observer, &record) {
            let status = Status::StoppedByObserver;
            return Ok(Solution::finish("newton", status, x, value, iter, history));
        }

        if config.is_converged(error) {
            return Ok(Solution::finish("newton", Status::Converged, x, value, iter, history));
        }
    }

    let iters = config.max_iters();
    Ok(Solution::finish("newton", Status::MaxIters, x, value, iters, history))
}

/// Runs Newton's method without observation.
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
