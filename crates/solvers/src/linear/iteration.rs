//! The sweep loop shared by the iterative linear methods.

use ndarray::Array1;
use pivot_core::{Config, Observer, Status};

use crate::{Action, Event, event::stop_requested};

use super::{
    Error, Method, Record, Solution, SpectralEstimate, System, estimate_convergence, system::norm,
};

/// A stationary iteration and its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Scheme {
    Jacobi,
    GaussSeidel,
    Sor { omega: f64 },
}

impl Scheme {
    fn method(self) -> Method {
        match self {
            Scheme::Jacobi => Method::Jacobi,
            Scheme::GaussSeidel => Method::GaussSeidel,
            Scheme::Sor { .. } => Method::Sor,
        }
    }

    fn omega(self) -> Option<f64> {
        match self {
            Scheme::Sor { omega } => Some(omega),
            Scheme::Jacobi | Scheme::GaussSeidel => None,
        }
    }

    /// Performs one sweep from `x`, returning the new iterate.
    fn sweep(self, system: &System, x: &Array1<f64>) -> Array1<f64> {
        let a = system.a();
        let b = system.b();
        let n = system.size();

        match self {
            Scheme::Jacobi => Array1::from_shape_fn(n, |i| {
                let off_diagonal: f64 = (0..n).filter(|&j| j != i).map(|j| a[[i, j]] * x[j]).sum();
                (b[i] - off_diagonal) / a[[i, i]]
            }),
            Scheme::GaussSeidel | Scheme::Sor { .. } => {
                let omega = self.omega().unwrap_or(1.0);
                let mut next = x.clone();
                for i in 0..n {
                    let off_diagonal: f64 =
                        (0..n).filter(|&j| j != i).map(|j| a[[i, j]] * next[j]).sum();
                    let seidel = (b[i] - off_diagonal) / a[[i, i]];
                    next[i] = (1.0 - omega) * next[i] + omega * seidel;
                }
                next
            }
        }
    }
}

/// Runs `scheme` on `system` until the error drops below tolerance.
pub(super) fn iterate<Obs>(
    system: &System,
    scheme: Scheme,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    Obs: for<'a> Observer<Event<'a, Record>, Action>,
{
    let method = scheme.method();
    let convergence = estimate_convergence(system.a(), method, scheme.omega());
    log::debug!("{}: spectral radius {:?}", method.name(), convergence.rho);

    let policy = config.policy();
    let mut x = system.x0().clone();
    let mut history = Vec::new();

    for iter in 1..=config.max_iters() {
        let next = scheme.sweep(system, &x);
        if !next.iter().all(|v| v.is_finite()) {
            history.push(Record {
                iter,
                x: next,
                absolute: f64::INFINITY,
                relative: f64::INFINITY,
                error: f64::INFINITY,
            });
            log::warn!("{}: iterate is not finite at iteration {iter}", method.name());
            return Err(Error::NonFinite { iter, history });
        }

        let absolute = norm(&(&next - &x));
        let current_norm = norm(&next);
        let relative = if current_norm > 0.0 {
            absolute / current_norm
        } else {
            f64::INFINITY
        };
        let residual = if policy.needs_residual() {
            system.residual_norm(&next)
        } else {
            f64::NAN
        };
        let error = policy.vector_error(absolute, current_norm, residual);

        log::trace!("{} iter {iter}: x = {next}, error = {error}", method.name());
        history.push(Record {
            iter,
            x: next.clone(),
            absolute,
            relative,
            error,
        });
        x = next;

        let record = &history[history.len() - 1];
        if stop_requested(&mut observer, record) {
            return Ok(finish(method, Status::StoppedByObserver, x, iter, history, convergence));
        }

        if config.is_converged(error) {
            return Ok(finish(method, Status::Converged, x, iter, history, convergence));
        }
    }

    let iters = config.max_iters();
    Ok(finish(method, Status::MaxIters, x, iters, history, convergence))
}

fn finish(
    method: Method,
    status: Status,
    x: Array1<f64>,
    iters: usize,
    history: Vec<Record>,
    convergence: SpectralEstimate,
) -> Solution {
    log::debug!("{} finished: {status:?} after {iters} iterations", method.name());
    Solution {
        status,
        x,
        iters,
        history,
        convergence,
    }
}
