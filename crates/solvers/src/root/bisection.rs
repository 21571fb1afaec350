//! Bisection over a sign-changing bracket.
//!
//! Each iteration replaces the endpoint that shares the sign of `f` at the
//! current midpoint, then takes the midpoint of the narrowed bracket. The
//! sign change across the bracket is preserved at every step, so the method
//! cannot lose the root; it only gains one bit of accuracy per iteration.

use pivot_core::{Config, Evaluable, Observer};

use crate::{Action, Event};

use super::{
    Solution,
    bracketing::{Rule, search},
};

pub use super::bracketing::{Error, Record};

/// Finds a root of `f` inside `bracket` by repeated halving.
///
/// The bracket may be given in either order. The initial estimate is the
/// bracket midpoint; a run with `max_iters == 0` returns it unchanged.
///
/// # Errors
///
/// Returns an error if the config or bracket is invalid, if `f` has no sign
/// change across the bracket, or if `f` returns a non-finite value.
pub fn solve<F, Obs>(
    f: &F,
    bracket: [f64; 2],
    config: &Config,
    observer: Obs,
) -> Result<Solution<Record>, Error>
where
    F: Evaluable + ?Sized,
    Obs: for<'a> Observer<Event<'a, Record>, Action>,
{
    search(f, bracket, config, Rule::Midpoint, observer)
}

/// Runs bisection without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<F>(
    f: &F,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<Record>, Error>
where
    F: Evaluable + ?Sized,
{
    solve(f, bracket, config, ())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use pivot_core::{ErrorKind, ErrorPolicy, SolverError, Status};

    use crate::root::BracketError;

    fn cubic(x: f64) -> f64 {
        x.powi(3) - x - 1.0
    }

    #[test]
    fn finds_cubic_root_quickly() {
        let config = Config::new(0.01, 100, ErrorPolicy::Absolute).unwrap();
        let solution = solve_unobserved(&cubic, [1.0, 2.0], &config).expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert!(solution.iters < 10);
        assert_abs_diff_eq!(solution.root, 1.3247, epsilon = 0.01);
        assert_relative_eq!(solution.value, cubic(solution.root));
        assert_eq!(solution.history.len(), solution.iters);
    }

    #[test]
    fn bracket_always_changes_sign() {
        let config = Config::new(1e-12, 60, ErrorPolicy::Absolute).unwrap();
        let solution = solve_unobserved(&cubic, [1.0, 2.0], &config).expect("should solve");

        for record in &solution.history {
            assert!(record.f_lower * record.f_upper < 0.0, "{record:?}");
            assert!(record.lower <= record.estimate && record.estimate <= record.upper);
        }
    }

    #[test]
    fn normalizes_reversed_bracket() {
        let f = |x: f64| x * x - 36.0;
        let config = Config::new(1e-10, 100, ErrorPolicy::Absolute).unwrap();
        let solution = solve_unobserved(&f, [10.0, 0.0], &config).expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.root, 6.0, epsilon = 1e-9);
    }

    #[test]
    fn tolerance_equal_to_error_does_not_stop() {
        // f(x) = x - 0.3 on [0, 2]: estimates are 1, 0.5, 0.25, ...
        let f = |x: f64| x - 0.3;
        let config = Config::new(0.5, 100, ErrorPolicy::Absolute).unwrap();
        let solution = solve_unobserved(&f, [0.0, 2.0], &config).expect("should solve");

        assert_relative_eq!(solution.history[0].error, 0.5);
        assert_eq!(solution.iters, 2);
        assert_relative_eq!(solution.root, 0.25);
    }

    #[test]
    fn zero_iters_returns_midpoint() {
        let config = Config::new(1e-6, 0, ErrorPolicy::Absolute).unwrap();
        let solution = solve_unobserved(&cubic, [1.0, 2.0], &config).expect("should run");

        assert_eq!(solution.status, Status::MaxIters);
        assert_eq!(solution.iters, 0);
        assert!(solution.history.is_empty());
        assert_relative_eq!(solution.root, 1.5);
    }

    #[test]
    fn exact_midpoint_root_converges_immediately() {
        let f = |x: f64| x - 1.0;
        let solution = solve_unobserved(&f, [0.0, 2.0], &Config::default()).expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_eq!(solution.iters, 0);
        assert_relative_eq!(solution.root, 1.0);
    }

    #[test]
    fn errors_on_no_sign_change() {
        let f = |x: f64| x * x + 1.0;
        let err = solve_unobserved(&f, [-1.0, 1.0], &Config::default()).unwrap_err();

        assert!(matches!(
            err,
            Error::InvalidBracket(BracketError::NoSignChange { .. })
        ));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn errors_on_non_finite_value() {
        // The midpoint of [0, 2] is 1.0, where f is NaN.
        let f = |x: f64| if x > 1.5 { 1.0 } else if x < 0.5 { -1.0 } else { f64::NAN };
        let err = solve_unobserved(&f, [0.0, 2.0], &Config::default()).unwrap_err();
        assert!(matches!(err, Error::NonFiniteValue { .. }));
        assert_eq!(err.kind(), ErrorKind::Degenerate);
    }

    #[test]
    fn observer_can_stop_iteration() {
        let mut calls = 0usize;
        let observer = |event: &Event<'_, Record>| {
            calls += 1;
            (event.iter() >= 3).then_some(Action::StopEarly)
        };

        let solution =
            solve(&cubic, [1.0, 2.0], &Config::default(), observer).expect("should stop cleanly");

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.iters, 3);
        assert_eq!(calls, 3);
    }

    #[test]
    fn reruns_are_identical() {
        let config = Config::new(1e-9, 100, ErrorPolicy::Relative).unwrap();
        let first = solve_unobserved(&cubic, [1.0, 2.0], &config).expect("should solve");
        let second = solve_unobserved(&cubic, [1.0, 2.0], &config).expect("should solve");

        assert_eq!(first.history, second.history);
        assert_eq!(first.root.to_bits(), second.root.to_bits());
    }
}
