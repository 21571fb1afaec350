use log::Level;
use pivot_core::Observer;

use crate::traits::{HasError, HasIteration};

/// An observer that logs every iteration and never intervenes.
///
/// # Example
///
/// ```rust
/// use pivot_core::{Config, ErrorPolicy};
/// use pivot_observers::LogObserver;
/// use pivot_solvers::root::bisection;
///
/// let f = |x: f64| x * x - 2.0;
/// let config = Config::new(1e-8, 100, ErrorPolicy::Absolute).unwrap();
/// let observer = LogObserver::new("sqrt2");
/// let solution = bisection::solve(&f, [0.0, 2.0], &config, observer).unwrap();
/// assert!((solution.root - 2.0_f64.sqrt()).abs() < 1e-7);
/// ```
#[derive(Debug, Clone)]
pub struct LogObserver {
    label: String,
    level: Level,
}

impl LogObserver {
    /// Creates an observer that logs at [`Level::Debug`] under `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            level: Level::Debug,
        }
    }

    /// Sets the level records are logged at.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<E, A> Observer<E, A> for LogObserver
where
    E: HasIteration + HasError,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        log::log!(
            self.level,
            "{}: iter {} error = {:e}",
            self.label,
            event.iteration(),
            event.error()
        );
        None
    }
}
