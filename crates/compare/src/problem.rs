use std::fmt;

use ndarray::{Array1, Array2};
use pivot_core::Config;

/// A boxed scalar function.
pub type ScalarFn = Box<dyn Fn(f64) -> f64>;

/// Step used to search for a bracket when a problem has none.
const DEFAULT_SEARCH_STEP: f64 = 0.1;

/// A scalar equation `f(x) = 0` shared by every root finder in a comparison.
///
/// Only `f` and the config are required. Each method takes what it needs
/// from the optional inputs, and the harness derives the rest.
pub struct ScalarProblem {
    pub(crate) f: ScalarFn,
    pub(crate) derivative: Option<ScalarFn>,
    pub(crate) map: Option<ScalarFn>,
    pub(crate) bracket: Option<[f64; 2]>,
    pub(crate) x0: Option<f64>,
    pub(crate) x1: Option<f64>,
    pub(crate) search_step: f64,
    pub(crate) config: Config,
}

impl ScalarProblem {
    /// Creates a problem for `f` with no initial conditions.
    pub fn new(f: impl Fn(f64) -> f64 + 'static, config: Config) -> Self {
        Self {
            f: Box::new(f),
            derivative: None,
            map: None,
            bracket: None,
            x0: None,
            x1: None,
            search_step: DEFAULT_SEARCH_STEP,
            config,
        }
    }

    /// Sets a bracket for the bracketing methods.
    #[must_use]
    pub fn with_bracket(mut self, bracket: [f64; 2]) -> Self {
        self.bracket = Some(bracket);
        self
    }

    /// Sets the initial guess for the open methods.
    #[must_use]
    pub fn with_guess(mut self, x0: f64) -> Self {
        self.x0 = Some(x0);
        self
    }

    /// Sets the second starting point for the secant method.
    #[must_use]
    pub fn with_second_guess(mut self, x1: f64) -> Self {
        self.x1 = Some(x1);
        self
    }

    /// Supplies the exact derivative `f'`.
    #[must_use]
    pub fn with_derivative(mut self, derivative: impl Fn(f64) -> f64 + 'static) -> Self {
        self.derivative = Some(Box::new(derivative));
        self
    }

    /// Supplies the fixed-point map `g`.
    #[must_use]
    pub fn with_map(mut self, map: impl Fn(f64) -> f64 + 'static) -> Self {
        self.map = Some(Box::new(map));
        self
    }

    /// Sets the step of the incremental search used to find a bracket.
    #[must_use]
    pub fn with_search_step(mut self, step: f64) -> Self {
        self.search_step = step;
        self
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn bracket(&self) -> Option<[f64; 2]> {
        self.bracket
    }

    #[must_use]
    pub fn guess(&self) -> Option<f64> {
        self.x0
    }

    /// Evaluates `f` at `x`.
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        (self.f)(x)
    }
}

impl fmt::Debug for ScalarProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarProblem")
            .field("bracket", &self.bracket)
            .field("x0", &self.x0)
            .field("x1", &self.x1)
            .field("has_derivative", &self.derivative.is_some())
            .field("has_map", &self.map.is_some())
            .field("search_step", &self.search_step)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// A linear system `A·x = b` shared by every iterative linear solver.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProblem {
    pub(crate) a: Array2<f64>,
    pub(crate) b: Array1<f64>,
    pub(crate) x0: Array1<f64>,
    pub(crate) omega: Option<f64>,
    pub(crate) config: Config,
}

impl LinearProblem {
    /// Creates a problem from its matrix, right-hand side and starting vector.
    ///
    /// Shapes are checked when a solver runs, so an ill-formed problem shows
    /// up as a skipped method rather than a construction error.
    #[must_use]
    pub fn new(a: Array2<f64>, b: Array1<f64>, x0: Array1<f64>, config: Config) -> Self {
        Self {
            a,
            b,
            x0,
            omega: None,
            config,
        }
    }

    /// Sets the SOR relaxation factor. Without it SOR runs with `ω = 1`.
    #[must_use]
    pub fn with_relaxation(mut self, omega: f64) -> Self {
        self.omega = Some(omega);
        self
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a copy of this problem with a different config.
    #[must_use]
    pub fn with_config(&self, config: Config) -> Self {
        Self {
            config,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn a(&self) -> &Array2<f64> {
        &self.a
    }
}
