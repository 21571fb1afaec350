//! Runs interchangeable pivot solvers on one problem and ranks them.
//!
//! A comparison takes a shared problem ([`ScalarProblem`] or
//! [`LinearProblem`]), runs one method or its whole family, reduces every
//! run to a [`RunSummary`], and ranks the summaries by final error.
//!
//! - [`Method`] — the solver catalogue, each with a [`Parameter`] schema
//! - [`summarize`] and [`extract_rows`] — typed and tabular history readers
//! - [`Session`] — an explicit accumulator of every summary produced
//! - [`compare_roots`], [`compare_linear`], [`compare_linear_policies`] — the
//!   comparison entry points
//!
//! # Example
//!
//! ```
//! use pivot_compare::{Method, ScalarProblem, Scope, Session, compare_roots};
//! use pivot_core::{Config, ErrorPolicy};
//!
//! let config = Config::new(1e-8, 100, ErrorPolicy::Absolute).unwrap();
//! let problem = ScalarProblem::new(|x| x * x - 2.0, config)
//!     .with_bracket([0.0, 2.0])
//!     .with_derivative(|x| 2.0 * x);
//!
//! let mut session = Session::new();
//! let comparison = compare_roots(&mut session, &problem, Method::Newton, Scope::Family).unwrap();
//!
//! let best = comparison.best().unwrap();
//! assert!((best.estimate.as_scalar().unwrap() - 2.0_f64.sqrt()).abs() < 1e-8);
//! assert_eq!(session.len(), comparison.ranked.len());
//! ```

mod compare;
mod extract;
mod method;
mod problem;
mod session;
mod summary;

pub use compare::{
    CompareError, Comparison, PolicyReport, Scope, Skipped, compare_linear,
    compare_linear_policies, compare_roots,
};
pub use extract::{
    COLUMN_LAYOUTS, ColumnLayout, Extracted, Outcome, extract_rows, layout_for, summarize,
    tabulate,
};
pub use method::{Family, Method, ParamKind, ParamRole, Parameter};
pub use problem::{LinearProblem, ScalarFn, ScalarProblem};
pub use session::Session;
pub use summary::RunSummary;
