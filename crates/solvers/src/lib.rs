//! Iterative solvers for the pivot toolkit.
//!
//! # Modules
//!
//! - [`root`] — scalar root finders (bracketing and open methods)
//! - [`linear`] — iterative and direct solvers for `A·x = b`, plus the
//!   spectral radius oracle that predicts iterative convergence
//!
//! Every iterative solver takes a [`Config`](pivot_core::Config), an observer
//! receiving one [`Event`] per recorded iteration, and returns a solution
//! holding the full iteration history.

mod event;

pub mod linear;
pub mod root;

pub use event::{Action, Event};
