//! Spectral radius of the iteration matrices.
//!
//! Each stationary method can be written as `M·x_new = N·x_old + b` with `M`
//! lower triangular:
//!
//! | method       | `M`     | `N`              |
//! |--------------|---------|------------------|
//! | Jacobi       | `D`     | `−(L + U)`       |
//! | Gauss-Seidel | `D + L` | `−U`             |
//! | SOR          | `D + ωL`| `(1 − ω)D − ωU`  |
//!
//! The iteration matrix `T = M⁻¹N` is built column by column with forward
//! substitution, and its eigenvalues come from a real Schur decomposition.
//! The method converges from every starting vector iff `ρ(T) < 1`.

use std::{cmp::Ordering, fmt};

use nalgebra::{DMatrix, Schur};
use ndarray::Array2;

use super::Method;

/// Iteration cap handed to the Schur decomposition.
const SCHUR_MAX_ITERS: usize = 10_000;

/// The spectral radius of an iteration matrix, when it could be computed.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralEstimate {
    /// `ρ(T)`, or `None` when it could not be determined.
    pub rho: Option<f64>,

    /// The iteration matrix `T`, when it could be built.
    pub operator: Option<Array2<f64>>,
}

impl SpectralEstimate {
    /// An estimate carrying no information.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            rho: None,
            operator: None,
        }
    }

    /// Returns whether the method is predicted to converge.
    ///
    /// Returns `None` when the spectral radius is unknown.
    #[must_use]
    pub fn predicts_convergence(&self) -> Option<bool> {
        self.rho.map(|rho| rho < 1.0)
    }
}

impl fmt::Display for SpectralEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rho {
            Some(rho) => {
                writeln!(f, "spectral radius: {rho}")?;
                write!(f, "converges (rho < 1): {}", rho < 1.0)
            }
            None => {
                writeln!(f, "spectral radius: unknown")?;
                write!(f, "converges (rho < 1): unknown")
            }
        }
    }
}

/// Computes the spectral radius of `method`'s iteration matrix for `a`.
///
/// SOR requires `omega`; the other methods ignore it. Any failure (a
/// non-square or empty matrix, a zero diagonal entry, missing `omega`, a
/// Schur decomposition that does not converge) yields an estimate with
/// `rho == None`. This function never panics and never errors.
#[must_use]
pub fn estimate_convergence(
    a: &Array2<f64>,
    method: Method,
    omega: Option<f64>,
) -> SpectralEstimate {
    let Some(operator) = iteration_matrix(a, method, omega) else {
        log::debug!("{}: iteration matrix is undefined", method.name());
        return SpectralEstimate::unknown();
    };

    let rho = spectral_radius(&operator);
    if rho.is_none() {
        log::debug!("{}: spectral radius could not be computed", method.name());
    }

    SpectralEstimate {
        rho,
        operator: Some(operator),
    }
}

/// Builds `T = M⁻¹N` for the given method.
fn iteration_matrix(
    a: &Array2<f64>,
    method: Method,
    omega: Option<f64>,
) -> Option<Array2<f64>> {
    let (rows, cols) = a.dim();
    if rows == 0 || rows != cols || !a.iter().all(|v| v.is_finite()) {
        return None;
    }

    let omega = match method {
        Method::Jacobi | Method::GaussSeidel => 1.0,
        Method::Sor => omega.filter(|w| w.is_finite())?,
    };

    #[allow(clippy::float_cmp)]
    if a.diag().iter().any(|&d| d == 0.0) {
        return None;
    }

    let n = rows;
    let (m, rhs) = match method {
        Method::Jacobi => (
            Array2::from_shape_fn((n, n), |(i, j)| if i == j { a[[i, i]] } else { 0.0 }),
            Array2::from_shape_fn((n, n), |(i, j)| if i == j { 0.0 } else { -a[[i, j]] }),
        ),
        Method::GaussSeidel | Method::Sor => (
            Array2::from_shape_fn((n, n), |(i, j)| match i.cmp(&j) {
                Ordering::Equal => a[[i, i]],
                Ordering::Greater => omega * a[[i, j]],
                Ordering::Less => 0.0,
            }),
            Array2::from_shape_fn((n, n), |(i, j)| match i.cmp(&j) {
                Ordering::Equal => (1.0 - omega) * a[[i, i]],
                Ordering::Less => -omega * a[[i, j]],
                Ordering::Greater => 0.0,
            }),
        ),
    };

    Some(forward_substitute(&m, &rhs))
}

/// Solves `M·T = N` for lower-triangular `M` with a zero-free diagonal.
fn forward_substitute(m: &Array2<f64>, rhs: &Array2<f64>) -> Array2<f64> {
    let n = m.nrows();
    let mut t = Array2::zeros(rhs.dim());
    for col in 0..rhs.ncols() {
        for i in 0..n {
            let known: f64 = (0..i).map(|k| m[[i, k]] * t[[k, col]]).sum();
            t[[i, col]] = (rhs[[i, col]] - known) / m[[i, i]];
        }
    }
    t
}

/// Returns `max |λ|` over the eigenvalues of `t`.
fn spectral_radius(t: &Array2<f64>) -> Option<f64> {
    let n = t.nrows();
    let matrix = DMatrix::from_fn(n, n, |i, j| t[[i, j]]);
    let schur = Schur::try_new(matrix, f64::EPSILON, SCHUR_MAX_ITERS)?;

    let rho = schur
        .complex_eigenvalues()
        .iter()
        .map(|lambda| lambda.norm())
        .fold(0.0, f64::max);

    rho.is_finite().then_some(rho)
}
