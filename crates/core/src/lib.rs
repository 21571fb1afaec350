//! Core traits and types for the pivot numerical toolkit.
//!
//! This crate defines the shared abstractions that solvers, observers, and the
//! comparison harness build on:
//!
//! - [`Evaluable`] — a scalar function `f64 -> f64` supplied by the caller
//! - [`Derivatives`] — a source of first and second derivative values
//! - [`ErrorPolicy`] — how an iteration's error is measured
//! - [`Config`] — validated tolerance, iteration cap, and error policy
//! - [`Observer`] — receives solver events and optionally returns control actions
//! - [`Record`] — the contract every per-iteration history row satisfies
//! - [`Status`] and [`ErrorKind`] — how a run ended, and how it failed

mod config;
mod derivative;
mod error;
mod evaluable;
mod observer;
mod policy;
mod record;
mod status;

pub use config::{Config, ConfigError};
pub use derivative::{Analytic, AnalyticPair, CentralDifference, Derivatives};
pub use error::{ErrorKind, SolverError};
pub use evaluable::Evaluable;
pub use observer::Observer;
pub use policy::ErrorPolicy;
pub use record::{Cell, Estimate, Record};
pub use status::Status;
