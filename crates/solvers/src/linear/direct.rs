//! Direct solvers for `A·x = b`.
//!
//! These finish in a fixed number of steps and have no iteration history.
//! They serve as reference solutions for the iterative methods.
//!
//! - [`gaussian_elimination`] — forward elimination then back substitution,
//!   with or without partial pivoting
//! - [`doolittle`] — `A = L·U` with a unit diagonal on `L`
//! - [`crout`] — `A = L·U` with a unit diagonal on `U`
//! - [`cholesky`] — `A = L·Lᵀ` for symmetric positive definite `A`

use ndarray::{Array1, Array2, s};
use pivot_core::{ErrorKind, SolverError};
use thiserror::Error;

/// Largest asymmetry `|a[i][j] − a[j][i]|`, relative to the entries, that
/// [`cholesky`] accepts.
const SYMMETRY_TOLERANCE: f64 = 1e-12;

/// Errors returned by the direct solvers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DirectError {
    #[error("coefficient matrix must be square and non-empty, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("right-hand side has length {found}, expected {expected}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("input contains a non-finite entry")]
    NonFinite,

    /// A pivot was exactly zero at the given elimination step.
    #[error("zero pivot at step {step}")]
    ZeroPivot { step: usize },

    #[error("matrix is not symmetric")]
    NotSymmetric,

    #[error("matrix is not positive definite (failed at row {row})")]
    NotPositiveDefinite { row: usize },
}

impl SolverError for DirectError {
    fn kind(&self) -> ErrorKind {
        match self {
            DirectError::ZeroPivot { .. } => ErrorKind::Degenerate,
            DirectError::NotSquare { .. }
            | DirectError::LengthMismatch { .. }
            | DirectError::NonFinite
            | DirectError::NotSymmetric
            | DirectError::NotPositiveDefinite { .. } => ErrorKind::InvalidInput,
        }
    }
}

/// Row exchange strategy for [`gaussian_elimination`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pivoting {
    /// Eliminate in the given row order.
    #[default]
    None,

    /// Swap the row with the largest magnitude in the pivot column into
    /// place before each step.
    Partial,
}

/// A triangular factorization `A = L·U`.
#[derive(Debug, Clone, PartialEq)]
pub struct Factors {
    pub lower: Array2<f64>,
    pub upper: Array2<f64>,
}

impl Factors {
    /// Solves `L·U·x = b` by forward then back substitution.
    ///
    /// # Errors
    ///
    /// Returns an error if `b` has the wrong length or a non-finite entry, or
    /// if a diagonal entry of either factor is zero.
    pub fn solve(&self, b: &Array1<f64>) -> Result<Array1<f64>, DirectError> {
        check_rhs(self.lower.nrows(), b)?;
        let z = forward_substitution(&self.lower, b)?;
        back_substitution(&self.upper, &z)
    }
}

/// Solves `a·x = b` by Gaussian elimination.
///
/// # Errors
///
/// Returns an error if the inputs are malformed or if a pivot is exactly
/// zero. Partial pivoting only hits a zero pivot when `a` is singular.
pub fn gaussian_elimination(
    a: &Array2<f64>,
    b: &Array1<f64>,
    pivoting: Pivoting,
) -> Result<Array1<f64>, DirectError> {
    let n = check_matrix(a)?;
    check_rhs(n, b)?;

    let mut m = a.clone();
    let mut rhs = b.clone();

    for step in 0..n {
        if pivoting == Pivoting::Partial {
            let best = (step..n)
                .max_by(|&i, &j| m[[i, step]].abs().total_cmp(&m[[j, step]].abs()))
                .unwrap_or(step);
            if best != step {
                for col in 0..n {
                    m.swap([step, col], [best, col]);
                }
                rhs.swap(step, best);
                log::trace!("gaussian elimination: swapped rows {step} and {best}");
            }
        }

        let pivot = m[[step, step]];

        #[allow(clippy::float_cmp)]
        if pivot == 0.0 {
            return Err(DirectError::ZeroPivot { step });
        }

        for row in step + 1..n {
            let factor = m[[row, step]] / pivot;

            #[allow(clippy::float_cmp)]
            if factor == 0.0 {
                continue;
            }

            let pivot_row = m.slice(s![step, step..]).to_owned();
            m.slice_mut(s![row, step..])
                .zip_mut_with(&pivot_row, |target, &source| *target -= factor * source);
            rhs[row] -= factor * rhs[step];
        }
    }

    back_substitution(&m, &rhs)
}

/// Factors `a` with a unit-diagonal lower factor.
///
/// # Errors
///
/// Returns an error if `a` is malformed or a diagonal entry of `U` is zero.
pub fn doolittle(a: &Array2<f64>) -> Result<Factors, DirectError> {
    let n = check_matrix(a)?;
    let mut lower = Array2::<f64>::eye(n);
    let mut upper = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        for k in i..n {
            let known: f64 = (0..i).map(|j| lower[[i, j]] * upper[[j, k]]).sum();
            upper[[i, k]] = a[[i, k]] - known;
        }

        let pivot = upper[[i, i]];

        #[allow(clippy::float_cmp)]
        if pivot == 0.0 {
            return Err(DirectError::ZeroPivot { step: i });
        }

        for k in i + 1..n {
            let known: f64 = (0..i).map(|j| lower[[k, j]] * upper[[j, i]]).sum();
            lower[[k, i]] = (a[[k, i]] - known) / pivot;
        }
    }

    Ok(Factors { lower, upper })
}

/// Factors `a` with a unit-diagonal upper factor.
///
/// # Errors
///
/// Returns an error if `a` is malformed or a diagonal entry of `L` is zero.
pub fn crout(a: &Array2<f64>) -> Result<Factors, DirectError> {
    let n = check_matrix(a)?;
    let mut lower = Array2::<f64>::zeros((n, n));
    let mut upper = Array2::<f64>::eye(n);

    for j in 0..n {
        for i in j..n {
            let known: f64 = (0..j).map(|k| lower[[i, k]] * upper[[k, j]]).sum();
            lower[[i, j]] = a[[i, j]] - known;
        }

        let pivot = lower[[j, j]];

        #[allow(clippy::float_cmp)]
        if pivot == 0.0 {
            return Err(DirectError::ZeroPivot { step: j });
        }

        for i in j + 1..n {
            let known: f64 = (0..j).map(|k| lower[[j, k]] * upper[[k, i]]).sum();
            upper[[j, i]] = (a[[j, i]] - known) / pivot;
        }
    }

    Ok(Factors { lower, upper })
}

/// Factors a symmetric positive definite `a` as `L·Lᵀ`.
///
/// The returned [`Factors::upper`] is the transpose of [`Factors::lower`].
///
/// # Errors
///
/// Returns an error if `a` is malformed, not symmetric, or not positive
/// definite.
pub fn cholesky(a: &Array2<f64>) -> Result<Factors, DirectError> {
    let n = check_matrix(a)?;

    for i in 0..n {
        for j in 0..i {
            let scale = a[[i, j]].abs().max(a[[j, i]].abs()).max(1.0);
            if (a[[i, j]] - a[[j, i]]).abs() > SYMMETRY_TOLERANCE * scale {
                return Err(DirectError::NotSymmetric);
            }
        }
    }

    let mut lower = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..=i {
            let known: f64 = (0..j).map(|k| lower[[i, k]] * lower[[j, k]]).sum();
            if i == j {
                let d = a[[i, i]] - known;
                if d <= 0.0 {
                    return Err(DirectError::NotPositiveDefinite { row: i });
                }
                lower[[i, i]] = d.sqrt();
            } else {
                lower[[i, j]] = (a[[i, j]] - known) / lower[[j, j]];
            }
        }
    }

    let upper = lower.t().to_owned();
    Ok(Factors { lower, upper })
}

fn check_matrix(a: &Array2<f64>) -> Result<usize, DirectError> {
    let (rows, cols) = a.dim();
    if rows == 0 || rows != cols {
        return Err(DirectError::NotSquare { rows, cols });
    }
    if !a.iter().all(|v| v.is_finite()) {
        return Err(DirectError::NonFinite);
    }
    Ok(rows)
}

fn check_rhs(n: usize, b: &Array1<f64>) -> Result<(), DirectError> {
    if b.len() != n {
        return Err(DirectError::LengthMismatch {
            expected: n,
            found: b.len(),
        });
    }
    if !b.iter().all(|v| v.is_finite()) {
        return Err(DirectError::NonFinite);
    }
    Ok(())
}

/// Solves `L·z = b` for lower-triangular `L`.
fn forward_substitution(
    lower: &Array2<f64>,
    b: &Array1<f64>,
) -> Result<Array1<f64>, DirectError> {
    let n = b.len();
    let mut z = Array1::zeros(n);
    for i in 0..n {
        let known: f64 = (0..i).map(|j| lower[[i, j]] * z[j]).sum();
        let diagonal = lower[[i, i]];

        #[allow(clippy::float_cmp)]
        if diagonal == 0.0 {
            return Err(DirectError::ZeroPivot { step: i });
        }
        z[i] = (b[i] - known) / diagonal;
    }
    Ok(z)
}

/// Solves `U·x = z` for upper-triangular `U`.
fn back_substitution(
    upper: &Array2<f64>,
    z: &Array1<f64>,
) -> Result<Array1<f64>, DirectError> {
    let n = z.len();
    let mut x = Array1::zeros(n);
    for i in (0..n).rev() {
        let known: f64 = (i + 1..n).map(|j| upper[[i, j]] * x[j]).sum();
        let diagonal = upper[[i, i]];

        #[allow(clippy::float_cmp)]
        if diagonal == 0.0 {
            return Err(DirectError::ZeroPivot { step: i });
        }
        x[i] = (z[i] - known) / diagonal;
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::array;

    fn system() -> (Array2<f64>, Array1<f64>) {
        (
            array![[4.0, 2.0, 3.0], [3.0, 4.0, 2.0], [2.0, -1.0, 5.0]],
            array![8.0, -1.0, 3.0],
        )
    }

    fn assert_solves(x: &Array1<f64>) {
        let expected = array![5.0, -3.0, -2.0];
        for (got, want) in x.iter().zip(&expected) {
            assert_relative_eq!(*got, *want, epsilon = 1e-12);
        }
    }

    #[test]
    fn elimination_with_and_without_pivoting() {
        let (a, b) = system();
        assert_solves(&gaussian_elimination(&a, &b, Pivoting::None).expect("should solve"));
        assert_solves(&gaussian_elimination(&a, &b, Pivoting::Partial).expect("should solve"));
    }

    #[test]
    fn partial_pivoting_avoids_leading_zero() {
        let a = array![[0.0, 1.0], [1.0, 1.0]];
        let b = array![1.0, 2.0];

        let error = gaussian_elimination(&a, &b, Pivoting::None).expect_err("zero pivot");
        assert_eq!(error, DirectError::ZeroPivot { step: 0 });
        assert_eq!(error.kind(), ErrorKind::Degenerate);

        let x = gaussian_elimination(&a, &b, Pivoting::Partial).expect("should solve");
        assert_relative_eq!(x[0], 1.0);
        assert_relative_eq!(x[1], 1.0);
    }

    #[test]
    fn doolittle_has_unit_lower_diagonal() {
        let (a, b) = system();
        let factors = doolittle(&a).expect("should factor");

        for i in 0..3 {
            assert_relative_eq!(factors.lower[[i, i]], 1.0);
        }
        let product = factors.lower.dot(&factors.upper);
        for (got, want) in product.iter().zip(&a) {
            assert_relative_eq!(*got, *want, epsilon = 1e-12);
        }
        assert_solves(&factors.solve(&b).expect("should solve"));
    }

    #[test]
    fn crout_has_unit_upper_diagonal() {
        let (a, b) = system();
        let factors = crout(&a).expect("should factor");

        for i in 0..3 {
            assert_relative_eq!(factors.upper[[i, i]], 1.0);
        }
        assert_solves(&factors.solve(&b).expect("should solve"));
    }

    #[test]
    fn cholesky_of_known_matrix() {
        let a = array![[4.0, 12.0, -16.0], [12.0, 37.0, -43.0], [-16.0, -43.0, 98.0]];
        let factors = cholesky(&a).expect("should factor");

        let expected = array![[2.0, 0.0, 0.0], [6.0, 1.0, 0.0], [-8.0, 5.0, 3.0]];
        for (got, want) in factors.lower.iter().zip(&expected) {
            assert_relative_eq!(*got, *want, epsilon = 1e-12);
        }
        assert_eq!(factors.upper, factors.lower.t());
    }

    #[test]
    fn cholesky_rejects_unsuitable_matrices() {
        let (a, _) = system();
        assert_eq!(cholesky(&a).unwrap_err(), DirectError::NotSymmetric);

        let indefinite = array![[1.0, 2.0], [2.0, 1.0]];
        assert_eq!(
            cholesky(&indefinite).unwrap_err(),
            DirectError::NotPositiveDefinite { row: 1 }
        );
    }

    #[test]
    fn rejects_malformed_inputs() {
        let a = array![[1.0, 2.0]];
        assert_eq!(
            doolittle(&a).unwrap_err(),
            DirectError::NotSquare { rows: 1, cols: 2 }
        );

        let (a, _) = system();
        let err = gaussian_elimination(&a, &array![1.0], Pivoting::Partial).unwrap_err();
        assert_eq!(err, DirectError::LengthMismatch { expected: 3, found: 1 });
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
