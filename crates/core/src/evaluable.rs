/// A scalar function of one real variable.
///
/// Solvers never parse expression text; callers hand them something that can
/// be evaluated. Closures implement this trait automatically.
pub trait Evaluable {
    /// Evaluates the function at `x`.
    fn eval(&self, x: f64) -> f64;
}

impl<F> Evaluable for F
where
    F: Fn(f64) -> f64 + ?Sized,
{
    fn eval(&self, x: f64) -> f64 {
        self(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn eval_at<E: Evaluable>(f: &E, x: f64) -> f64 {
        f.eval(x)
    }

    #[test]
    fn closures_are_evaluable() {
        let offset = 2.0;
        let f = |x: f64| x * x - offset;
        assert_relative_eq!(eval_at(&f, 3.0), 7.0);
    }

    #[test]
    fn boxed_functions_are_evaluable() {
        let f: Box<dyn Fn(f64) -> f64> = Box::new(f64::cos);
        assert_relative_eq!(eval_at(&f, 0.0), 1.0);
    }
}
