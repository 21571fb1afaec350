//! Root finders for scalar equations `f(x) = 0`.
//!
//! Every solver shares the same life cycle: inputs are validated up front,
//! then the method iterates until the error drops strictly below the
//! tolerance, the iteration cap is reached, or a division-defining quantity
//! becomes exactly zero.
//!
//! # Solvers
//!
//! - [`bisection`] — halves a sign-changing bracket
//! - [`false_position`] — narrows a bracket with the secant intercept
//! - [`newton`] — tangent steps using exact or finite-difference slopes
//! - [`secant`] — tangent steps with slopes from the last two iterates
//! - [`fixed_point`] — iterates `x = g(x)`
//! - [`multiple_roots`] — modified Newton step for roots of multiplicity > 1
//! - [`incremental`] — marches from a point until a sign change is found
//!
//! Running out of iterations is reported as
//! [`Status::MaxIters`](pivot_core::Status::MaxIters), never as an error.
//! Degenerate runs return an error that still carries the partial history,
//! whose final row has an infinite error.

mod bracket;
mod bracketing;
mod solution;

pub mod bisection;
pub mod false_position;
pub mod fixed_point;
pub mod incremental;
pub mod multiple_roots;
pub mod newton;
pub mod secant;

pub use bracket::BracketError;
pub use solution::Solution;
