//! Fixed-point iteration `x = g(x)`.
//!
//! The caller supplies the map `g` rather than `f`; a root of `f` is usually
//! turned into a fixed point with a rearrangement such as
//! `g(x) = x - f(x) / c`. The iteration converges when `|g'| < 1` near the
//! fixed point.
//!
//! Under the residual policy the error is `|g(x) - x|` at the new iterate.
//! The reported [`Solution::value`] is `g(root)`.

use pivot_core::{
    Cell, Config, ConfigError, ErrorKind, Estimate, Evaluable, Observer, SolverError, Status,
};
use thiserror::Error;

use crate::{Action, Event, event::stop_requested};

use super::Solution;

/// One application of the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub iter: usize,
    pub x: f64,
    /// `g(x)`, the new iterate.
    pub next: f64,
    pub error: f64,
}

impl pivot_core::Record for Record {
    const COLUMNS: &'static [&'static str] = &["iter", "x", "g(x)", "error"];

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
            Cell::Scalar(self.next),
            Cell::Scalar(self.error),
        ]
    }
}

/// Errors that can occur during a fixed-point solve.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("initial guess {x} maps to {value}")]
    InvalidStart { x: f64, value: f64 },

    /// The iteration diverged past the range of `f64`.
    #[error("g({x}) = {value} is not finite")]
    NonFinite {
        x: f64,
        value: f64,
        history: Vec<Record>,
    },
}

impl Error {
    /// Returns the history recorded before the run was abandoned.
    #[must_use]
    pub fn history(&self) -> &[Record] {
        match self {
            Error::NonFinite { history, .. } => history,
            Error::InvalidConfig(_) | Error::InvalidStart { .. } => &[],
        }
    }
}

impl SolverError for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidConfig(_) | Error::InvalidStart { .. } => ErrorKind::InvalidInput,
            Error::NonFinite { .. } => ErrorKind::Degenerate,
        }
    }
}

/// Iterates `g` from `x0` until successive iterates agree.
///
/// # Errors
///
/// Returns an error if the config is invalid, if `x0` or `g(x0)` is not
/// finite, or if the iteration produces a non-finite value. In the last case
/// the history ends with a row holding that value and an infinite error.
pub fn solve<G, Obs>(
    g: &G,
    x0: f64,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<Record>, Error>
where
    G: Evaluable + ?Sized,
    Obs: for<'a> Observer<Event<'a, Record>, Action>,
{
    config.validate()?;

    let mut x = x0;
    let mut gx = g.eval(x);
    if !x.is_finite() || !gx.is_finite() {
        return Err(Error::InvalidStart { x, value: gx });
    }

    let mut history = Vec::new();
    for iter in 1..=config.max_iters() {
        let next = gx;
        if !next.is_finite() {
            history.push(Record {
                iter,
                x,
                next,
                error: f64::INFINITY,
            });
            log::warn!("fixed point: g({x}) = {next} at iteration {iter}");
            return Err(Error::NonFinite {
                x,
                value: next,
                history,
            });
        }

        // g(next) is the next iterate and, under the residual policy, this
        // step's error. A non-finite value fails on the following iteration.
        let g_next = g.eval(next);
        let error = config.policy().scalar_error(x, next, g_next - next);
        let record = Record {
            iter,
            x,
            next,
            error,
        };
        log::trace!("fixed point iter {iter}: x = {next}, error = {error}");
        history.push(record);

        x = next;
        gx = g_next;

        if stop_requested(&mut observer, &record) {
            let status = Status::StoppedByObserver;
            return Ok(Solution::finish("fixed point", status, x, gx, iter, history));
        }

        if config.is_converged(error) {
            return Ok(Solution::finish("fixed point", Status::Converged, x, gx, iter, history));
        }
    }

    let iters = config.max_iters();
    Ok(Solution::finish("fixed point", Status::MaxIters, x, gx, iters, history))
}

/// Runs fixed-point iteration without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<G>(g: &G, x0: f64, config: &Config) -> Result<Solution<Record>, Error>
where
    G: Evaluable + ?Sized,
{
    solve(g, x0, config, ())
}
