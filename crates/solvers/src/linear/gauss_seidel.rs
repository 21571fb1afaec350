//! Gauss-Seidel iteration.
//!
//! Like Jacobi, but each component is updated in place, so later rows of a
//! sweep already see the new values of earlier rows.

use ndarray::{Array1, Array2};
use pivot_core::{Config, Observer};

use crate::{Action, Event};

use super::{
    Error, Record, Solution, System,
    iteration::{Scheme, iterate},
};

/// Solves `a·x = b` by Gauss-Seidel iteration from `x0`.
///
/// # Errors
///
/// Returns an error if the config or system is invalid, if a diagonal entry
/// of `a` is zero, or if the iterate overflows.
pub fn solve<Obs>(
    a: &Array2<f64>,
    b: &Array1<f64>,
    x0: &Array1<f64>,
    config: &Config,
    observer: Obs,
) -> Result<Solution, Error>
where
    Obs: for<'a> Observer<Event<'a, Record>, Action>,
{
    config.validate()?;
    let system = System::new(a, b, x0)?;
    iterate(&system, Scheme::GaussSeidel, config, observer)
}

/// Runs Gauss-Seidel iteration without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved(
    a: &Array2<f64>,
    b: &Array1<f64>,
    x0: &Array1<f64>,
    config: &Config,
) -> Result<Solution, Error> {
    solve(a, b, x0, config, ())
}
