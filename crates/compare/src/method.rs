//! The solver catalogue and its parameter schema.
//!
//! Each [`Method`] describes the inputs it needs as a static list of
//! [`Parameter`]s. The harness walks this list to decide which initial
//! conditions to derive from a shared problem, so adding a method means
//! adding a variant and its schema, not teaching the harness a new case.

use std::fmt;

use pivot_solvers::linear;

/// The family a method belongs to; only methods of one family are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Family {
    /// Root finders for `f(x) = 0`.
    Scalar,

    /// Iterative solvers for `A·x = b`.
    Linear,
}

/// Every solver the harness can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    Bisection,
    FalsePosition,
    Newton,
    Secant,
    FixedPoint,
    MultipleRoots,
    Jacobi,
    GaussSeidel,
    Sor,
}

/// The kind of value a parameter holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Function,
    Scalar,
    Vector,
    Matrix,
    Count,
    Policy,
}

/// What a parameter means to the method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamRole {
    /// The function whose root is sought.
    Function,
    /// The fixed-point map `g`.
    Map,
    /// Derivatives of the function, exact or estimated.
    Derivatives,
    BracketLower,
    BracketUpper,
    InitialGuess,
    SecondGuess,
    Matrix,
    RightHandSide,
    InitialVector,
    Relaxation,
    Tolerance,
    MaxIterations,
    ErrorPolicy,
}

/// One named input of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter {
    pub name: &'static str,
    pub kind: ParamKind,
    pub role: ParamRole,
}

const fn param(name: &'static str, kind: ParamKind, role: ParamRole) -> Parameter {
    Parameter { name, kind, role }
}

const FUNCTION: Parameter = param("f", ParamKind::Function, ParamRole::Function);
const DERIVATIVES: Parameter = param("derivatives", ParamKind::Function, ParamRole::Derivatives);
const LOWER: Parameter = param("a", ParamKind::Scalar, ParamRole::BracketLower);
const UPPER: Parameter = param("b", ParamKind::Scalar, ParamRole::BracketUpper);
const X0: Parameter = param("x0", ParamKind::Scalar, ParamRole::InitialGuess);
const X1: Parameter = param("x1", ParamKind::Scalar, ParamRole::SecondGuess);
const MAP: Parameter = param("g", ParamKind::Function, ParamRole::Map);
const MATRIX: Parameter = param("A", ParamKind::Matrix, ParamRole::Matrix);
const RHS: Parameter = param("b", ParamKind::Vector, ParamRole::RightHandSide);
const X0_VECTOR: Parameter = param("x0", ParamKind::Vector, ParamRole::InitialVector);
const OMEGA: Parameter = param("w", ParamKind::Scalar, ParamRole::Relaxation);
const TOLERANCE: Parameter = param("tol", ParamKind::Scalar, ParamRole::Tolerance);
const MAX_ITERS: Parameter = param("niter", ParamKind::Count, ParamRole::MaxIterations);
const POLICY: Parameter = param("error_type", ParamKind::Policy, ParamRole::ErrorPolicy);

const BRACKETING: &[Parameter] = &[FUNCTION, LOWER, UPPER, TOLERANCE, MAX_ITERS, POLICY];
const NEWTON: &[Parameter] = &[FUNCTION, DERIVATIVES, X0, TOLERANCE, MAX_ITERS, POLICY];
const SECANT: &[Parameter] = &[FUNCTION, X0, X1, TOLERANCE, MAX_ITERS, POLICY];
const FIXED_POINT: &[Parameter] = &[MAP, X0, TOLERANCE, MAX_ITERS, POLICY];
const STATIONARY: &[Parameter] = &[MATRIX, RHS, X0_VECTOR, TOLERANCE, MAX_ITERS, POLICY];
const RELAXED: &[Parameter] = &[MATRIX, RHS, X0_VECTOR, OMEGA, TOLERANCE, MAX_ITERS, POLICY];

impl Method {
    /// All methods, in the order used to break ranking ties.
    pub const ALL: [Method; 9] = [
        Method::Bisection,
        Method::FalsePosition,
        Method::Newton,
        Method::Secant,
        Method::FixedPoint,
        Method::MultipleRoots,
        Method::Jacobi,
        Method::GaussSeidel,
        Method::Sor,
    ];

    /// Returns the methods of `family`, in [`Method::ALL`] order.
    pub fn in_family(family: Family) -> impl Iterator<Item = Method> {
        Self::ALL.into_iter().filter(move |m| m.family() == family)
    }

    #[must_use]
    pub fn family(self) -> Family {
        match self {
            Method::Bisection
            | Method::FalsePosition
            | Method::Newton
            | Method::Secant
            | Method::FixedPoint
            | Method::MultipleRoots => Family::Scalar,
            Method::Jacobi | Method::GaussSeidel | Method::Sor => Family::Linear,
        }
    }

    /// The name the method is logged and tabulated under.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Method::Bisection => "bisection",
            Method::FalsePosition => "false position",
            Method::Newton => "newton",
            Method::Secant => "secant",
            Method::FixedPoint => "fixed point",
            Method::MultipleRoots => "multiple roots",
            Method::Jacobi => linear::Method::Jacobi.name(),
            Method::GaussSeidel => linear::Method::GaussSeidel.name(),
            Method::Sor => linear::Method::Sor.name(),
        }
    }

    /// Looks a method up by its [`name`](Method::name).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Method> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    /// The inputs this method takes, in call order.
    #[must_use]
    pub fn parameters(self) -> &'static [Parameter] {
        match self {
            Method::Bisection | Method::FalsePosition => BRACKETING,
            Method::Newton | Method::MultipleRoots => NEWTON,
            Method::Secant => SECANT,
            Method::FixedPoint => FIXED_POINT,
            Method::Jacobi | Method::GaussSeidel => STATIONARY,
            Method::Sor => RELAXED,
        }
    }

    /// Returns true if the schema contains a parameter with `role`.
    #[must_use]
    pub fn takes(self, role: ParamRole) -> bool {
        self.parameters().iter().any(|p| p.role == role)
    }

    /// The corresponding linear method, for linear-family methods.
    #[must_use]
    pub fn as_linear(self) -> Option<linear::Method> {
        match self {
            Method::Jacobi => Some(linear::Method::Jacobi),
            Method::GaussSeidel => Some(linear::Method::GaussSeidel),
            Method::Sor => Some(linear::Method::Sor),
            _ => None,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_method_round_trips_through_its_name() {
        for method in Method::ALL {
            assert_eq!(Method::from_name(method.name()), Some(method));
        }
        assert_eq!(Method::from_name("steepest descent"), None);
    }

    #[test]
    fn families_partition_the_catalogue() {
        let scalar: Vec<_> = Method::in_family(Family::Scalar).collect();
        let linear: Vec<_> = Method::in_family(Family::Linear).collect();

        assert_eq!(scalar.len(), 6);
        assert_eq!(linear, [Method::Jacobi, Method::GaussSeidel, Method::Sor]);
    }

    #[test]
    fn schema_describes_initial_conditions() {
        assert!(Method::Bisection.takes(ParamRole::BracketLower));
        assert!(!Method::Bisection.takes(ParamRole::InitialGuess));
        assert!(Method::Secant.takes(ParamRole::SecondGuess));
        assert!(Method::FixedPoint.takes(ParamRole::Map));
        assert!(!Method::FixedPoint.takes(ParamRole::Function));
        assert!(Method::Sor.takes(ParamRole::Relaxation));
        assert!(!Method::Jacobi.takes(ParamRole::Relaxation));

        for method in Method::ALL {
            assert!(method.takes(ParamRole::Tolerance), "{method}");
            assert!(method.takes(ParamRole::ErrorPolicy), "{method}");
        }
    }
}
