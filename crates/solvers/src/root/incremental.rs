//! Incremental search for a sign-changing bracket.
//!
//! Starting from `x0`, marches in fixed steps of `step` (which may be
//! negative) until `f` changes sign between two consecutive points. The
//! result is a bracket suitable for [`bisection`](super::bisection) or
//! [`false_position`](super::false_position).

use pivot_core::{Cell, ErrorKind, Estimate, Evaluable, Observer, SolverError, Status};
use thiserror::Error;

use crate::{Action, Event, event::stop_requested};

/// One step of the search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub iter: usize,
    pub a: f64,
    pub b: f64,
    pub f_a: f64,
    pub f_b: f64,
}

impl pivot_core::Record for Record {
    const COLUMNS: &'static [&'static str] = &["iter", "a", "b", "f(a)", "f(b)", "error"];

    fn iter(&self) -> usize {
        self.iter
    }

    fn estimate(&self) -> Estimate {
        Estimate::Scalar(self.b)
    }

    /// Change in `f` across the step.
    fn error(&self) -> f64 {
        (self.f_b - self.f_a).abs()
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Index(self.iter),
            Cell::Scalar(self.a),
            Cell::Scalar(self.b),
            Cell::Scalar(self.f_a),
            Cell::Scalar(self.f_b),
            Cell::Scalar(pivot_core::Record::error(self)),
        ]
    }
}

/// The outcome of an incremental search.
#[derive(Debug, Clone)]
pub struct Scan {
    /// [`Status::Converged`] when a sign change was found.
    pub status: Status,

    /// The last interval examined.
    pub interval: [f64; 2],

    /// Number of steps taken.
    pub steps: usize,

    /// One record per step, in order.
    pub history: Vec<Record>,
}

impl Scan {
    /// Returns the sign-changing bracket, if one was found.
    #[must_use]
    pub fn bracket(&self) -> Option<[f64; 2]> {
        self.status.is_converged().then_some(self.interval)
    }
}

/// Errors that can occur during an incremental search.
#[derive(Debug, Error)]
pub enum Error {
    #[error("step must be finite and non-zero, got {0}")]
    InvalidStep(f64),

    #[error("starting point {x} gives f = {value}")]
    InvalidStart { x: f64, value: f64 },

    #[error("f({x}) = {value} is not finite")]
    NonFiniteValue {
        x: f64,
        value: f64,
        history: Vec<Record>,
    },
}

impl Error {
    /// Returns the history recorded before the search was abandoned.
    #[must_use]
    pub fn history(&self) -> &[Record] {
        match self {
            Error::NonFiniteValue { history, .. } => history,
            Error::InvalidStep(_) | Error::InvalidStart { .. } => &[],
        }
    }
}

impl SolverError for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidStep(_) | Error::InvalidStart { .. } => ErrorKind::InvalidInput,
            Error::NonFiniteValue { .. } => ErrorKind::Degenerate,
        }
    }
}

/// Marches from `x0` by `step` for at most `max_steps` steps.
///
/// Running out of steps without a sign change is reported as
/// [`Status::MaxIters`], with [`Scan::bracket`] returning `None`.
///
/// # Errors
///
/// Returns an error if `step` is zero or not finite, if `f(x0)` is not
/// finite, or if `f` returns a non-finite value during the search.
pub fn solve<F, Obs>(
    f: &F,
    x0: f64,
    step: f64,
    max_steps: usize,
    mut observer: Obs,
) -> Result<Scan, Error>
where
    F: Evaluable + ?Sized,
    Obs: for<'a> Observer<Event<'a, Record>, Action>,
{
    #[allow(clippy::float_cmp)]
    if !step.is_finite() || step == 0.0 {
        return Err(Error::InvalidStep(step));
    }

    let mut a = x0;
    let mut f_a = f.eval(a);
    if !a.is_finite() || !f_a.is_finite() {
        return Err(Error::InvalidStart { x: a, value: f_a });
    }

    let mut history = Vec::new();
    let mut interval = [a, a];
    for iter in 1..=max_steps {
        let b = a + step;
        let f_b = f.eval(b);
        if !f_b.is_finite() {
            log::warn!("incremental search: f({b}) = {f_b} at step {iter}");
            return Err(Error::NonFiniteValue {
                x: b,
                value: f_b,
                history,
            });
        }

        let record = Record { iter, a, b, f_a, f_b };
        log::trace!("incremental search step {iter}: [{a}, {b}], f = [{f_a}, {f_b}]");
        history.push(record);
        interval = if step > 0.0 { [a, b] } else { [b, a] };

        if f_a * f_b < 0.0 {
            log::debug!("incremental search found a sign change in {interval:?} after {iter} steps");
            return Ok(Scan {
                status: Status::Converged,
                interval,
                steps: iter,
                history,
            });
        }

        if stop_requested(&mut observer, &record) {
            return Ok(Scan {
                status: Status::StoppedByObserver,
                interval,
                steps: iter,
                history,
            });
        }

        (a, f_a) = (b, f_b);
    }

    log::debug!("incremental search found no sign change in {max_steps} steps");
    Ok(Scan {
        status: Status::MaxIters,
        interval,
        steps: max_steps,
        history,
    })
}

/// Runs an incremental search without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<F>(f: &F, x0: f64, step: f64, max_steps: usize) -> Result<Scan, Error>
where
    F: Evaluable + ?Sized,
{
    solve(f, x0, step, max_steps, ())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn cubic(x: f64) -> f64 {
        x.powi(3) - 2.0 * x.powi(2) + 0.25 * x + 0.75
    }

    #[test]
    fn finds_first_sign_change() {
        let scan = solve_unobserved(&cubic, -1.0, 0.4, 20).expect("should search");

        assert_eq!(scan.status, Status::Converged);
        assert_eq!(scan.steps, 2);
        let [lower, upper] = scan.bracket().expect("sign change exists");
        assert_relative_eq!(lower, -0.6, epsilon = 1e-12);
        assert_relative_eq!(upper, -0.2, epsilon = 1e-12);
        assert!(cubic(lower) < 0.0 && cubic(upper) > 0.0);
    }

    #[test]
    fn walks_until_sign_changes() {
        let f = |x: f64| x - 2.25;
        let scan = solve_unobserved(&f, 0.0, 0.5, 20).expect("should search");

        assert_eq!(scan.steps, 5);
        assert_eq!(scan.history.len(), 5);
        let [lower, upper] = scan.bracket().expect("sign change exists");
        assert_relative_eq!(lower, 2.0);
        assert_relative_eq!(upper, 2.5);
    }

    #[test]
    fn negative_step_yields_ordered_bracket() {
        let f = |x: f64| x + 1.2;
        let scan = solve_unobserved(&f, 0.0, -0.5, 20).expect("should search");

        let [lower, upper] = scan.bracket().expect("sign change exists");
        assert!(lower < upper);
        assert_relative_eq!(lower, -1.5);
        assert_relative_eq!(upper, -1.0);
    }

    #[test]
    fn exhausting_steps_is_not_an_error() {
        let f = |x: f64| x * x + 1.0;
        let scan = solve_unobserved(&f, 0.0, 0.1, 10).expect("should search");

        assert_eq!(scan.status, Status::MaxIters);
        assert_eq!(scan.steps, 10);
        assert!(scan.bracket().is_none());
    }

    #[test]
    fn zero_step_is_invalid() {
        let error = solve_unobserved(&cubic, 0.0, 0.0, 10).expect_err("zero step");
        assert!(matches!(error, Error::InvalidStep(_)));
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
    }
}
