use ndarray::Array1;
use pivot_core::{Cell, Estimate};

/// One sweep of an iterative linear method.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub iter: usize,

    /// The iterate after the sweep.
    pub x: Array1<f64>,

    /// `‖x_new − x_old‖₂`.
    pub absolute: f64,

    /// `absolute / ‖x_new‖₂`, or infinity when the new iterate is zero.
    pub relative: f64,

    /// The error under the run's policy, used for the stopping test.
    pub error: f64,
}

impl pivot_core::Record for Record {
    const COLUMNS: &'static [&'static str] = &["iter", "x", "absolute", "relative", "error"];

    fn iter(&self) -> usize {
        self.iter
    }

    fn estimate(&self) -> Estimate {
        Estimate::Vector(self.x.to_vec())
    }

    fn error(&self) -> f64 {
        self.error
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Index(self.iter),
            Cell::Vector(self.x.to_vec()),
            Cell::Scalar(self.absolute),
            Cell::Scalar(self.relative),
            Cell::Scalar(self.error),
        ]
    }
}
