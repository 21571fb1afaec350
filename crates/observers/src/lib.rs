//! Reusable observers for the pivot solvers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across every solver in `pivot-solvers`.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-solver observers
//!   ([`HasIteration`], [`HasError`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`LogObserver`] — forwards every iteration to the `log` facade
//! - [`StallObserver`] — stops a run whose error has stopped improving
//!
//! [`Observer`]: pivot_core::Observer
//! [`HasIteration`]: traits::HasIteration
//! [`HasError`]: traits::HasError
//! [`CanStopEarly`]: traits::CanStopEarly

mod log_observer;
mod stall;

pub mod traits;

pub use log_observer::LogObserver;
pub use stall::StallObserver;
