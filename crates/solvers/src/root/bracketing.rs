//! Shared iteration for the bracketing methods.
//!
//! Bisection and false position differ only in how the next estimate is
//! picked from the current bracket, so both drive the same loop with a
//! different [`Rule`].

use pivot_core::{
    Cell, Config, ConfigError, ErrorKind, Estimate, Evaluable, Observer, SolverError, Status,
};
use thiserror::Error;

use crate::{Action, Event, event::stop_requested};

use super::{
    Solution,
    bracket::{Bounds, Bracket, BracketError},
};

/// One iteration of a bracketing method.
///
/// The bracket fields describe the interval after it was narrowed by the
/// previous estimate; `estimate` is the new point picked inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub iter: usize,
    pub lower: f64,
    pub f_lower: f64,
    pub estimate: f64,
    pub value: f64,
    pub upper: f64,
    pub f_upper: f64,
    pub error: f64,
}

impl pivot_core::Record for Record {
    const COLUMNS: &'static [&'static str] = &[
        "iter",
        "lower",
        "f(lower)",
        "estimate",
        "f(estimate)",
        "upper",
        "f(upper)",
        "error",
    ];

    fn iter(&self) -> usize {
        self.iter
    }

    fn estimate(&self) -> Estimate {
        Estimate::Scalar(self.estimate)
    }

    fn error(&self) -> f64 {
        self.error
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Index(self.iter),
            Cell::Scalar(self.lower),
            Cell::Scalar(self.f_lower),
            Cell::Scalar(self.estimate),
            Cell::Scalar(self.value),
            Cell::Scalar(self.upper),
            Cell::Scalar(self.f_upper),
            Cell::Scalar(self.error),
        ]
    }
}

/// Errors that can occur during a bracketing solve.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("invalid bracket: {0}")]
    InvalidBracket(#[from] BracketError),

    #[error("f({x}) = {value} is not finite")]
    NonFiniteValue {
        x: f64,
        value: f64,
        history: Vec<Record>,
    },

    #[error("endpoint values are equal, chord has no intercept")]
    ZeroDenominator { history: Vec<Record> },
}

impl Error {
    /// Returns the history recorded before the run was abandoned.
    #[must_use]
    pub fn history(&self) -> &[Record] {
        match self {
            Error::NonFiniteValue { history, .. } | Error::ZeroDenominator { history } => history,
            Error::InvalidConfig(_) | Error::InvalidBracket(_) => &[],
        }
    }
}

impl SolverError for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidConfig(_) | Error::InvalidBracket(_) => ErrorKind::InvalidInput,
            Error::NonFiniteValue { .. } | Error::ZeroDenominator { .. } => ErrorKind::Degenerate,
        }
    }
}

/// How the next estimate is chosen inside the bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Rule {
    Midpoint,
    Intercept,
}

impl Rule {
    fn name(self) -> &'static str {
        match self {
            Rule::Midpoint => "bisection",
            Rule::Intercept => "false position",
        }
    }

    fn next(self, bracket: &Bracket) -> Option<f64> {
        match self {
            Rule::Midpoint => Some(bracket.midpoint()),
            Rule::Intercept => bracket.intercept(),
        }
    }
}

/// Core bracketing loop.
pub(super) fn search<F, Obs>(
    f: &F,
    bracket: [f64; 2],
    config: &Config,
    rule: Rule,
    mut observer: Obs,
) -> Result<Solution<Record>, Error>
where
    F: Evaluable + ?Sized,
    Obs: for<'a> Observer<Event<'a, Record>, Action>,
{
    config.validate()?;

    let bounds = Bounds::new(bracket)?;
    let f_lower = f.eval(bounds.lower());
    let f_upper = f.eval(bounds.upper());
    let mut bracket = Bracket::new(bounds, f_lower, f_upper)?;

    let mut history = Vec::new();
    let mut estimate = rule
        .next(&bracket)
        .ok_or(Error::ZeroDenominator { history: Vec::new() })?;
    let mut value = f.eval(estimate);
    if !value.is_finite() {
        return Err(Error::NonFiniteValue {
            x: estimate,
            value,
            history,
        });
    }

    #[allow(clippy::float_cmp)]
    if value == 0.0 {
        return Ok(finish(rule, Status::Converged, estimate, value, 0, history));
    }

    for iter in 1..=config.max_iters() {
        bracket.shrink(estimate, value);

        let previous = estimate;
        let Some(next) = rule.next(&bracket) else {
            history.push(degenerate_row(iter, &bracket, previous, value));
            log::warn!("{}: chord has no intercept at iteration {iter}", rule.name());
            return Err(Error::ZeroDenominator { history });
        };
        estimate = next;
        value = f.eval(estimate);
        if !value.is_finite() {
            history.push(degenerate_row(iter, &bracket, estimate, value));
            log::warn!("{}: f({estimate}) = {value} at iteration {iter}", rule.name());
            return Err(Error::NonFiniteValue {
                x: estimate,
                value,
                history,
            });
        }

        let error = config.policy().scalar_error(previous, estimate, value);
        let record = Record {
            iter,
            lower: bracket.lower,
            f_lower: bracket.f_lower,
            estimate,
            value,
            upper: bracket.upper,
            f_upper: bracket.f_upper,
            error,
        };
        log::trace!(
            "{} iter {iter}: [{}, {}] x = {estimate}, f(x) = {value}, error = {error}",
            rule.name(),
            record.lower,
            record.upper,
        );
        history.push(record);

        if stop_requested(&mut observer, &record) {
            return Ok(finish(rule, Status::StoppedByObserver, estimate, value, iter, history));
        }

        #[allow(clippy::float_cmp)]
        if config.is_converged(error) || value == 0.0 {
            return Ok(finish(rule, Status::Converged, estimate, value, iter, history));
        }
    }

    let iters = config.max_iters();
    Ok(finish(rule, Status::MaxIters, estimate, value, iters, history))
}

fn degenerate_row(iter: usize, bracket: &Bracket, estimate: f64, value: f64) -> Record {
    Record {
        iter,
        lower: bracket.lower,
        f_lower: bracket.f_lower,
        estimate,
        value,
        upper: bracket.upper,
        f_upper: bracket.f_upper,
        error: f64::INFINITY,
    }
}

fn finish(
    rule: Rule,
    status: Status,
    root: f64,
    value: f64,
    iters: usize,
    history: Vec<Record>,
) -> Solution<Record> {
    Solution::finish(rule.name(), status, root, value, iters, history)
}
