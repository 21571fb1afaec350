//! False position (regula falsi) over a sign-changing bracket.
//!
//! Like bisection, but the next estimate is the x-intercept of the chord
//! through both endpoints. Convergence is usually faster than bisection for
//! smooth functions, though one endpoint may stay fixed for many iterations.

use pivot_core::{Config, Evaluable, Observer};

use crate::{Action, Event};

use super::{
    Solution,
    bracketing::{Rule, search},
};

pub use super::bracketing::{Error, Record};

/// Finds a root of `f` inside `bracket` using chord intercepts.
///
/// The initial estimate is the chord intercept of the original bracket.
///
/// # Errors
///
/// Returns an error if the config or bracket is invalid, if `f` has no sign
/// change across the bracket, if `f` returns a non-finite value, or if the
/// endpoint values become equal.
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
    search(f, bracket, config, Rule::Intercept, observer)
}

/// Runs false position without observation.
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

    use approx::assert_relative_eq;
    use pivot_core::{ErrorPolicy, Status};

    #[test]
    fn finds_square_root_of_two() {
        let f = |x: f64| x * x - 2.0;
        let config = Config::new(1e-10, 100, ErrorPolicy::Absolute).unwrap();
        let solution = solve_unobserved(&f, [0.0, 2.0], &config).expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.root, 2.0_f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn beats_bisection_on_smooth_function() {
        let f = |x: f64| x.powi(3) - 7.51 * x.powi(2) + 18.4239 * x - 14.8331;
        let config = Config::new(1e-4, 100, ErrorPolicy::Absolute).unwrap();

        let regula = solve_unobserved(&f, [3.0, 3.5], &config).expect("should solve");
        let halving = crate::root::bisection::solve_unobserved(&f, [3.0, 3.5], &config)
            .expect("should solve");

        assert_eq!(regula.status, Status::Converged);
        assert!(regula.iters < halving.iters);
    }

    #[test]
    fn linear_function_is_exact_at_start() {
        let f = |x: f64| 2.0 * x - 1.0;
        let solution = solve_unobserved(&f, [-3.0, 4.0], &Config::default()).expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_eq!(solution.iters, 0);
        assert_relative_eq!(solution.root, 0.5);
    }

    #[test]
    fn bracket_always_changes_sign() {
        let f = |x: f64| x.exp() - 3.0;
        let config = Config::new(1e-12, 50, ErrorPolicy::Residual).unwrap();
        let solution = solve_unobserved(&f, [0.0, 2.0], &config).expect("should solve");

        assert!(!solution.history.is_empty());
        for record in &solution.history {
            assert!(record.f_lower * record.f_upper < 0.0, "{record:?}");
        }
    }
}
