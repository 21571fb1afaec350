use thiserror::Error;

/// Errors that can occur when creating a bracket.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BracketError {
    /// One or both endpoints are non-finite.
    #[error("non-finite endpoint(s)")]
    NonFinite,

    /// Endpoints are equal, giving zero width.
    #[error("zero width")]
    ZeroWidth,

    /// The function is not finite at an endpoint.
    #[error("f({x}) = {value} is not finite")]
    NonFiniteValue { x: f64, value: f64 },

    /// Function values at the endpoints do not change sign.
    #[error("bracket does not change sign: f({lower})={f_lower}, f({upper})={f_upper}")]
    NoSignChange {
        lower: f64,
        upper: f64,
        f_lower: f64,
        f_upper: f64,
    },
}

/// Ordered finite bounds for a bracket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Bounds {
    lower: f64,
    upper: f64,
}

impl Bounds {
    /// Validates and orders the bracket endpoints.
    ///
    /// # Errors
    ///
    /// Returns `BracketError` if endpoints are non-finite or zero width.
    pub(super) fn new(bracket: [f64; 2]) -> Result<Self, BracketError> {
        let [a, b] = bracket;

        if !a.is_finite() || !b.is_finite() {
            return Err(BracketError::NonFinite);
        }

        #[allow(clippy::float_cmp)]
        if a == b {
            return Err(BracketError::ZeroWidth);
        }

        if a < b {
            Ok(Self { lower: a, upper: b })
        } else {
            Ok(Self { lower: b, upper: a })
        }
    }

    pub(super) fn lower(&self) -> f64 {
        self.lower
    }

    pub(super) fn upper(&self) -> f64 {
        self.upper
    }
}

/// A bracket whose endpoint values have strictly opposite signs.
///
/// [`Bracket::shrink`] only accepts non-zero values, so the product
/// `f(lower) · f(upper)` stays negative for the bracket's whole life.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Bracket {
    pub(super) lower: f64,
    pub(super) upper: f64,
    pub(super) f_lower: f64,
    pub(super) f_upper: f64,
}

impl Bracket {
    /// Creates a bracket from bounds and the function values at them.
    ///
    /// # Errors
    ///
    /// Returns `BracketError` if a value is non-finite or the signs agree.
    pub(super) fn new(bounds: Bounds, f_lower: f64, f_upper: f64) -> Result<Self, BracketError> {
        for (x, value) in [(bounds.lower, f_lower), (bounds.upper, f_upper)] {
            if !value.is_finite() {
                return Err(BracketError::NonFiniteValue { x, value });
            }
        }

        if f_lower * f_upper >= 0.0 {
            return Err(BracketError::NoSignChange {
                lower: bounds.lower,
                upper: bounds.upper,
                f_lower,
                f_upper,
            });
        }

        Ok(Self {
            lower: bounds.lower,
            upper: bounds.upper,
            f_lower,
            f_upper,
        })
    }

    /// Returns the midpoint of the bracket.
    pub(super) fn midpoint(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }

    /// Returns the x-intercept of the chord through both endpoints.
    ///
    /// Returns `None` if the endpoint values are equal.
    pub(super) fn intercept(&self) -> Option<f64> {
        let denom = self.f_upper - self.f_lower;
        #[allow(clippy::float_cmp)]
        if denom == 0.0 {
            return None;
        }
        Some((self.f_upper * self.lower - self.f_lower * self.upper) / denom)
    }

    /// Replaces the endpoint whose value shares the sign of `value`.
    ///
    /// `value` must be non-zero and finite.
    pub(super) fn shrink(&mut self, x: f64, value: f64) {
        debug_assert!(value != 0.0 && value.is_finite());
        if Sign::of(value) == Sign::of(self.f_lower) {
            self.lower = x;
            self.f_lower = value;
        } else {
            self.upper = x;
            self.f_upper = value;
        }
    }
}

/// The sign of a function value for bracket logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    Positive,
    Negative,
}

impl Sign {
    fn of(value: f64) -> Self {
        if value >= 0.0 {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}
