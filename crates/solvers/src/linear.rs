//! Solvers for square linear systems `A·x = b`.
//!
//! The iterative methods split `A = D + L + U` (diagonal, strictly lower,
//! strictly upper) and repeatedly apply a fixed-point map `x ← T·x + c`.
//! They converge from any starting vector exactly when the spectral radius
//! of `T` is below one, which [`estimate_convergence`] reports before a run
//! and every [`Solution`] carries afterwards.
//!
//! # Solvers
//!
//! - [`jacobi`] — every component updated from the previous sweep
//! - [`gauss_seidel`] — components updated in place during a sweep
//! - [`sor`] — Gauss-Seidel blended with the previous iterate by a factor ω
//! - [`direct`] — elimination and factorization methods, used as references
//!
//! Inputs are borrowed and never modified.

mod error;
mod iteration;
mod record;
mod solution;
mod system;

pub mod direct;
pub mod gauss_seidel;
pub mod jacobi;
pub mod sor;
pub mod spectral;

pub use error::Error;
pub use record::Record;
pub use solution::Solution;
pub use spectral::{SpectralEstimate, estimate_convergence};
pub use system::{System, SystemError};

/// The iterative linear methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    Jacobi,
    GaussSeidel,
    Sor,
}

impl Method {
    /// All iterative methods, in declaration order.
    pub const ALL: [Method; 3] = [Method::Jacobi, Method::GaussSeidel, Method::Sor];

    /// Human-readable name, used in logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Method::Jacobi => "jacobi",
            Method::GaussSeidel => "gauss-seidel",
            Method::Sor => "sor",
        }
    }
}
