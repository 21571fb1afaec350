use crate::Evaluable;

/// A source of derivative values for derivative-based root finders.
///
/// Solvers ask for `f'(x)` (and `f''(x)` when they need it) through this
/// trait, so a caller can supply exact derivatives or fall back to finite
/// differences without the solver caring which.
pub trait Derivatives {
    /// Returns the first derivative of `f` at `x`.
    fn first<F: Evaluable + ?Sized>(&self, f: &F, x: f64) -> f64;

    /// Returns the second derivative of `f` at `x`.
    fn second<F: Evaluable + ?Sized>(&self, f: &F, x: f64) -> f64;
}

/// Central finite differences with fixed steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentralDifference {
    /// Step used for the first derivative.
    pub first_step: f64,

    /// Step used for the second derivative.
    pub second_step: f64,
}

impl Default for CentralDifference {
    fn default() -> Self {
        Self {
            first_step: 1e-6,
            second_step: 1e-4,
        }
    }
}

impl Derivatives for CentralDifference {
    fn first<F: Evaluable + ?Sized>(&self, f: &F, x: f64) -> f64 {
        let h = self.first_step;
        (f.eval(x + h) - f.eval(x - h)) / (2.0 * h)
    }

    fn second<F: Evaluable + ?Sized>(&self, f: &F, x: f64) -> f64 {
        let h = self.second_step;
        (f.eval(x + h) - 2.0 * f.eval(x) + f.eval(x - h)) / (h * h)
    }
}

/// An exact first derivative.
///
/// The second derivative is a central difference of the supplied first
/// derivative.
#[derive(Debug, Clone, Copy)]
pub struct Analytic<D> {
    first: D,
    step: f64,
}

impl<D: Evaluable> Analytic<D> {
    /// Wraps an exact first derivative.
    pub fn new(first: D) -> Self {
        Self {
            first,
            step: CentralDifference::default().first_step,
        }
    }
}

impl<D: Evaluable> Derivatives for Analytic<D> {
    fn first<F: Evaluable + ?Sized>(&self, _f: &F, x: f64) -> f64 {
        self.first.eval(x)
    }

    fn second<F: Evaluable + ?Sized>(&self, _f: &F, x: f64) -> f64 {
        let h = self.step;
        (self.first.eval(x + h) - self.first.eval(x - h)) / (2.0 * h)
    }
}

/// Exact first and second derivatives.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticPair<D1, D2> {
    first: D1,
    second: D2,
}

impl<D1: Evaluable, D2: Evaluable> AnalyticPair<D1, D2> {
    /// Wraps exact first and second derivatives.
    pub fn new(first: D1, second: D2) -> Self {
        Self { first, second }
    }
}

impl<D1: Evaluable, D2: Evaluable> Derivatives for AnalyticPair<D1, D2> {
    fn first<F: Evaluable + ?Sized>(&self, _f: &F, x: f64) -> f64 {
        self.first.eval(x)
    }

    fn second<F: Evaluable + ?Sized>(&self, _f: &F, x: f64) -> f64 {
        self.second.eval(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn cubic(x: f64) -> f64 {
        x.powi(3) - 2.0 * x
    }

    #[test]
    fn central_difference_matches_cubic() {
        let d = CentralDifference::default();
        assert_relative_eq!(d.first(&cubic, 2.0), 10.0, epsilon = 1e-6);
        assert_relative_eq!(d.second(&cubic, 2.0), 12.0, epsilon = 1e-4);
    }

    #[test]
    fn central_difference_is_exactly_zero_at_even_extremum() {
        let d = CentralDifference::default();
        let square = |x: f64| x * x;
        assert_eq!(d.first(&square, 0.0), 0.0);
    }

    #[test]
    fn analytic_uses_supplied_derivative() {
        let d = Analytic::new(|x: f64| 3.0 * x * x - 2.0);
        assert_relative_eq!(d.first(&cubic, 2.0), 10.0);
        assert_relative_eq!(d.second(&cubic, 2.0), 12.0, epsilon = 1e-6);
    }

    #[test]
    fn analytic_pair_uses_both() {
        let d = AnalyticPair::new(|x: f64| 3.0 * x * x - 2.0, |x: f64| 6.0 * x);
        assert_relative_eq!(d.first(&cubic, 1.0), 1.0);
        assert_relative_eq!(d.second(&cubic, 1.0), 6.0);
    }
}
