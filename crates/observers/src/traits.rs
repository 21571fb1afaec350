//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types, enabling
//! observers to work generically across different solvers.
//!
//! # Event traits
//!
//! - [`HasIteration`] — events that know which iteration produced them
//! - [`HasError`] — events that carry the iteration's error
//!
//! # Action traits
//!
//! - [`CanStopEarly`] — actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use pivot_core::Observer;
//! use pivot_observers::traits::{CanStopEarly, HasError, HasIteration};
//!
//! struct GoodEnough {
//!     tolerance: f64,
//!     min_iters: usize,
//! }
//!
//! impl<E: HasIteration + HasError, A: CanStopEarly> Observer<E, A> for GoodEnough {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         if event.iteration() >= self.min_iters && event.error() < self.tolerance {
//!             return Some(A::stop_early());
//!         }
//!         None
//!     }
//! }
//! ```

use pivot_core::Record;
use pivot_solvers::{Action, Event};

/// An event that knows which iteration produced it.
pub trait HasIteration {
    /// Returns the one-based iteration number.
    fn iteration(&self) -> usize;
}

/// An event that carries an error value.
pub trait HasError {
    /// Returns the error under the run's policy.
    ///
    /// Degenerate final rows report `f64::INFINITY`.
    fn error(&self) -> f64;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

impl<R: Record> HasIteration for Event<'_, R> {
    fn iteration(&self) -> usize {
        self.iter()
    }
}

impl<R: Record> HasError for Event<'_, R> {
    fn error(&self) -> f64 {
        self.record.error()
    }
}

impl CanStopEarly for Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
