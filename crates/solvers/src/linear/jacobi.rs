//! Jacobi iteration.
//!
//! Every component of the new iterate is computed from the previous iterate
//! only:
//!
//! ```text
//! x_new[i] = (b[i] − Σ_{j≠i} a[i][j]·x_old[j]) / a[i][i]
//! ```

use ndarray::{Array1, Array2};
use pivot_core::{Config, Observer};

use crate::{Action, Event};

use super::{
    Error, Record, Solution, System,
    iteration::{Scheme, iterate},
};

/// Solves `a·x = b` by Jacobi iteration from `x0`.
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
    iterate(&system, Scheme::Jacobi, config, observer)
}

/// Runs Jacobi iteration without observation.
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
