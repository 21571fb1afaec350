//! Successive over-relaxation.
//!
//! Each Gauss-Seidel update is blended with the previous component value:
//!
//! ```text
//! x[i] ← (1 − ω)·x[i] + ω·x_gs[i]
//! ```
//!
//! `ω = 1` reduces to Gauss-Seidel. The factor must lie in the open
//! interval `(0, 2)`, outside of which the method cannot converge.

use ndarray::{Array1, Array2};
use pivot_core::{Config, Observer};

use crate::{Action, Event};

use super::{
    Error, Record, Solution, System,
    iteration::{Scheme, iterate},
};

/// Solves `a·x = b` by SOR with relaxation factor `omega`, starting at `x0`.
///
/// # Errors
///
/// Returns an error if the config or system is invalid, if `omega` is not in
/// `(0, 2)`, if a diagonal entry of `a` is zero, or if the iterate overflows.
pub fn solve<Obs>(
    a: &Array2<f64>,
    b: &Array1<f64>,
    x0: &Array1<f64>,
    omega: f64,
    config: &Config,
    observer: Obs,
) -> Result<Solution, Error>
where
    Obs: for<'a> Observer<Event<'a, Record>, Action>,
{
    config.validate()?;
    if !(omega > 0.0 && omega < 2.0) {
        return Err(Error::InvalidRelaxation(omega));
    }
    let system = System::new(a, b, x0)?;
    iterate(&system, Scheme::Sor { omega }, config, observer)
}

/// Runs SOR without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved(
    a: &Array2<f64>,
    b: &Array1<f64>,
    x0: &Array1<f64>,
    omega: f64,
    config: &Config,
) -> Result<Solution, Error> {
    solve(a, b, x0, omega, config, ())
}
