//! Reduces a run's history to a [`RunSummary`].
//!
//! The typed path, [`summarize`], reads the estimate and error through the
//! [`Record`] trait, so every solver's history is understood without knowing
//! its layout. The tabular path, [`extract_rows`], works on plain rows of
//! [`Cell`]s (for example a history exported to a table) and locates the
//! estimate and error with [`COLUMN_LAYOUTS`].

use pivot_core::{Cell, ErrorPolicy, Estimate, Record, Status};
use pivot_solvers::{linear, root};

use crate::{Method, RunSummary};

/// A finished run whose history can be summarized.
pub trait Outcome {
    type Record: Record;

    fn status(&self) -> Status;

    fn iters(&self) -> usize;

    fn history(&self) -> &[Self::Record];

    /// The final estimate, which is also available when no iteration ran.
    fn estimate(&self) -> Estimate;
}

impl<R: Record> Outcome for root::Solution<R> {
    type Record = R;

    fn status(&self) -> Status {
        self.status
    }

    fn iters(&self) -> usize {
        self.iters
    }

    fn history(&self) -> &[R] {
        &self.history
    }

    fn estimate(&self) -> Estimate {
        Estimate::Scalar(self.root)
    }
}

impl Outcome for linear::Solution {
    type Record = linear::Record;

    fn status(&self) -> Status {
        self.status
    }

    fn iters(&self) -> usize {
        self.iters
    }

    fn history(&self) -> &[linear::Record] {
        &self.history
    }

    fn estimate(&self) -> Estimate {
        Estimate::Vector(self.x.to_vec())
    }
}

/// Summarizes a finished run.
///
/// The error is the last record's error. A run with no records reports an
/// error of zero if it converged (an exact root found before iterating) and
/// infinity otherwise.
#[must_use]
pub fn summarize<O: Outcome>(method: Method, outcome: &O, policy: ErrorPolicy) -> RunSummary {
    let status = outcome.status();
    let error = match outcome.history().last() {
        Some(record) => record.error(),
        None if status.is_converged() => 0.0,
        None => f64::INFINITY,
    };

    RunSummary {
        method,
        estimate: outcome.estimate(),
        iters: outcome.iters(),
        error,
        policy,
        status,
    }
}

/// Where the estimate and error sit in a method's history rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub estimate: usize,
    pub error: usize,
}

const fn layout(estimate: usize, error: usize) -> ColumnLayout {
    ColumnLayout { estimate, error }
}

/// Column positions for each known method name.
///
/// Methods missing here are read with the fallback layout: column 1 holds
/// the estimate and the last column holds the error.
pub static COLUMN_LAYOUTS: &[(&str, ColumnLayout)] = &[
    ("bisection", layout(3, 7)),
    ("false position", layout(3, 7)),
    ("newton", layout(4, 5)),
    ("secant", layout(3, 5)),
    ("fixed point", layout(2, 3)),
    ("multiple roots", layout(5, 6)),
    ("incremental search", layout(2, 5)),
    ("jacobi", layout(1, 4)),
    ("gauss-seidel", layout(1, 4)),
    ("sor", layout(1, 4)),
];

/// Returns the registered layout for `method_name`.
#[must_use]
pub fn layout_for(method_name: &str) -> Option<ColumnLayout> {
    COLUMN_LAYOUTS
        .iter()
        .find(|(name, _)| *name == method_name)
        .map(|&(_, layout)| layout)
}

/// Converts a typed history into rows of cells.
#[must_use]
pub fn tabulate<R: Record>(history: &[R]) -> Vec<Vec<Cell>> {
    history.iter().map(Record::cells).collect()
}

/// What [`extract_rows`] reads from a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    pub estimate: Estimate,
    pub error: f64,
    pub iters: usize,
    pub policy: ErrorPolicy,
}

/// Reads the final estimate and error from tabulated history rows.
///
/// The iteration count is the index in the last row's first column, or the
/// number of rows when that column is not an index. Returns `None` when
/// there are no rows or the last row has fewer than two cells.
#[must_use]
pub fn extract_rows(
    method_name: &str,
    rows: &[Vec<Cell>],
    policy: ErrorPolicy,
) -> Option<Extracted> {
    let last = rows.last()?;
    if last.len() < 2 {
        return None;
    }

    let fallback = layout(1, last.len() - 1);
    let columns = match layout_for(method_name) {
        Some(known) if known.estimate < last.len() && known.error < last.len() => known,
        Some(_) => {
            log::debug!("{method_name}: row is narrower than its layout, using fallback columns");
            fallback
        }
        None => fallback,
    };

    let iters = match last[0] {
        Cell::Index(iter) => iter,
        _ => rows.len(),
    };

    Some(Extracted {
        estimate: last[columns.estimate].to_estimate(),
        error: last[columns.error].to_error(),
        iters,
        policy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use pivot_solvers::root::{
        bisection, false_position, fixed_point, incremental, multiple_roots, newton, secant,
    };

    fn check<R: Record>(method_name: &str, estimate_column: &str) {
        let layout = layout_for(method_name).expect("layout is registered");
        assert_eq!(R::COLUMNS[layout.estimate], estimate_column, "{method_name}");
        assert_eq!(R::COLUMNS[layout.error], "error", "{method_name}");
    }

    #[test]
    fn layouts_match_record_columns() {
        check::<bisection::Record>("bisection", "estimate");
        check::<false_position::Record>("false position", "estimate");
        check::<newton::Record>("newton", "next");
        check::<secant::Record>("secant", "x(k+1)");
        check::<fixed_point::Record>("fixed point", "g(x)");
        check::<multiple_roots::Record>("multiple roots", "next");
        check::<incremental::Record>("incremental search", "b");
        for method in ["jacobi", "gauss-seidel", "sor"] {
            check::<linear::Record>(method, "x");
        }
    }

    #[test]
    fn unknown_method_uses_fallback_columns() {
        let rows = vec![
            vec![Cell::Index(1), Cell::Scalar(0.7), Cell::Scalar(3.0), Cell::Scalar(0.1)],
            vec![Cell::Index(2), Cell::Scalar(0.5), Cell::Scalar(9.0), Cell::Scalar(1e-3)],
        ];
        let extracted =
            extract_rows("steffensen", &rows, ErrorPolicy::Absolute).expect("rows are readable");

        assert_eq!(extracted.estimate, Estimate::Scalar(0.5));
        assert_relative_eq!(extracted.error, 1e-3);
        assert_eq!(extracted.iters, 2);
    }

    #[test]
    fn narrow_rows_fall_back() {
        let rows = vec![vec![
            Cell::Index(4),
            Cell::Scalar(1.25),
            Cell::Scalar(2.0),
            Cell::Scalar(0.5),
        ]];
        let extracted = extract_rows("newton", &rows, ErrorPolicy::Residual).expect("readable");

        assert_eq!(extracted.estimate, Estimate::Scalar(1.25));
        assert_relative_eq!(extracted.error, 0.5);
        assert_eq!(extracted.iters, 4);
    }

    #[test]
    fn empty_tables_yield_nothing() {
        assert_eq!(extract_rows("bisection", &[], ErrorPolicy::Absolute), None);
        let short = [vec![Cell::Index(1)]];
        assert_eq!(extract_rows("bisection", &short, ErrorPolicy::Absolute), None);
    }

    #[test]
    fn summary_of_a_run_without_iterations() {
        let f = |x: f64| x - 1.0;
        let config = pivot_core::Config::default();
        let exact = bisection::solve_unobserved(&f, [0.0, 2.0], &config).expect("exact root");

        let summary = summarize(Method::Bisection, &exact, config.policy());

        assert_eq!(summary.status, Status::Converged);
        assert_eq!(summary.iters, 0);
        assert_eq!(summary.error, 0.0);
        assert_eq!(summary.estimate, Estimate::Scalar(1.0));
    }
}
