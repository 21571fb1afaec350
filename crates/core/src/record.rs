/// The quantity a solver is converging toward.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Estimate {
    /// A scalar root estimate.
    Scalar(f64),

    /// A solution vector of a linear system.
    Vector(Vec<f64>),
}

impl Estimate {
    /// Returns the scalar value, if this is a scalar estimate.
    #[must_use]
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Estimate::Scalar(x) => Some(*x),
            Estimate::Vector(_) => None,
        }
    }

    /// Returns the vector, if this is a vector estimate.
    #[must_use]
    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            Estimate::Scalar(_) => None,
            Estimate::Vector(v) => Some(v),
        }
    }
}

/// One cell of a tabular history row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// An iteration counter.
    Index(usize),

    /// A scalar value.
    Scalar(f64),

    /// A vector value.
    Vector(Vec<f64>),
}

impl Cell {
    /// Interprets the cell as an estimate.
    #[must_use]
    pub fn to_estimate(&self) -> Estimate {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Cell::Index(i) => Estimate::Scalar(*i as f64),
            Cell::Scalar(x) => Estimate::Scalar(*x),
            Cell::Vector(v) => Estimate::Vector(v.clone()),
        }
    }

    /// Interprets the cell as an error magnitude.
    ///
    /// Vector cells have no single magnitude and yield `NaN`.
    #[must_use]
    pub fn to_error(&self) -> f64 {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Cell::Index(i) => *i as f64,
            Cell::Scalar(x) => *x,
            Cell::Vector(_) => f64::NAN,
        }
    }
}

/// A single row of a solver's iteration history.
///
/// Each method has its own record type with its own fields. This trait is the
/// uniform view the comparison harness relies on: the estimate and error are
/// read through typed accessors, and the tabular view (`COLUMNS` and
/// [`cells`](Record::cells)) is what presentation layers render.
pub trait Record {
    /// Column headers, one per entry of [`cells`](Record::cells).
    const COLUMNS: &'static [&'static str];

    /// The 1-based iteration that produced this row.
    fn iter(&self) -> usize;

    /// The estimate after this iteration.
    fn estimate(&self) -> Estimate;

    /// The error computed for this iteration under the run's error policy.
    ///
    /// A degenerate final row reports `f64::INFINITY`.
    fn error(&self) -> f64;

    /// The row as table cells, in `COLUMNS` order.
    fn cells(&self) -> Vec<Cell>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_convert_to_estimates() {
        assert_eq!(Cell::Index(3).to_estimate(), Estimate::Scalar(3.0));
        assert_eq!(Cell::Scalar(1.5).to_estimate(), Estimate::Scalar(1.5));
        assert_eq!(
            Cell::Vector(vec![1.0, 2.0]).to_estimate(),
            Estimate::Vector(vec![1.0, 2.0])
        );
    }

    #[test]
    fn vector_cells_have_no_error() {
        assert!(Cell::Vector(vec![1.0]).to_error().is_nan());
        assert_eq!(Cell::Scalar(0.25).to_error(), 0.25);
    }

    #[test]
    fn estimate_accessors() {
        assert_eq!(Estimate::Scalar(2.0).as_scalar(), Some(2.0));
        assert_eq!(Estimate::Scalar(2.0).as_vector(), None);
        assert_eq!(
            Estimate::Vector(vec![1.0]).as_vector(),
            Some([1.0].as_slice())
        );
    }
}
