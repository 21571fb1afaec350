//! Runs interchangeable solvers on one problem and ranks them.
//!
//! A comparison runs either the selected method alone or every method of its
//! family. Initial conditions a method needs but the problem does not supply
//! are derived by walking the method's [parameter schema](Method::parameters):
//!
//! - single-guess methods start at the bracket midpoint
//! - the secant pair defaults to the bracket endpoints
//! - fixed-point iteration without a map uses the chord map
//!   `g(x) = x − f(x) / f'(x0)`
//! - bracketing methods without a bracket search for one from the guess
//! - SOR without a relaxation factor runs with `ω = 1`
//!
//! Methods whose inputs are rejected or whose run degenerates are reported
//! as skipped; they never abort the comparison.

use std::cmp::Ordering;

use pivot_core::{
    Analytic, CentralDifference, Derivatives, ErrorKind, ErrorPolicy, Evaluable, SolverError,
};
use pivot_solvers::{
    linear::{self, SpectralEstimate, gauss_seidel, jacobi, sor},
    root::{bisection, false_position, fixed_point, incremental, multiple_roots, newton, secant},
};
use thiserror::Error;

use crate::{
    Family, LinearProblem, Method, ParamRole, RunSummary, ScalarProblem, Session,
    extract::summarize,
};

/// Which methods a comparison runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scope {
    /// Only the selected method.
    #[default]
    Selected,

    /// The selected method and every other method of its family.
    Family,
}

/// A method that produced no summary, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct Skipped {
    pub method: Method,
    pub kind: ErrorKind,
    pub reason: String,
}

impl Skipped {
    fn new(method: Method, kind: ErrorKind, reason: impl Into<String>) -> Self {
        Self {
            method,
            kind,
            reason: reason.into(),
        }
    }

    fn from_error<E: SolverError>(method: Method) -> impl FnOnce(E) -> Self {
        move |error| Self::new(method, error.kind(), error.to_string())
    }
}

/// The ranked result of a comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison {
    /// Summaries ordered best first.
    pub ranked: Vec<RunSummary>,

    /// Methods that could not be run or degenerated.
    pub skipped: Vec<Skipped>,

    /// Spectral radius per linear method, in run order.
    pub spectral: Vec<(Method, SpectralEstimate)>,
}

impl Comparison {
    /// Returns the top-ranked summary.
    #[must_use]
    pub fn best(&self) -> Option<&RunSummary> {
        self.ranked.first()
    }
}

/// The best method under one error policy.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyReport {
    pub policy: ErrorPolicy,
    pub comparison: Comparison,
}

impl PolicyReport {
    #[must_use]
    pub fn best(&self) -> Option<&RunSummary> {
        self.comparison.best()
    }
}

/// Errors that prevent a comparison from running at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CompareError {
    #[error("{method} is not a {expected:?} method")]
    WrongFamily { method: Method, expected: Family },
}

/// Compares root finders on `problem`.
///
/// Every successful run is appended to `session`.
///
/// # Errors
///
/// Returns an error only if `selected` is not a root finder. Failures of
/// individual methods are reported in [`Comparison::skipped`].
pub fn compare_roots(
    session: &mut Session,
    problem: &ScalarProblem,
    selected: Method,
    scope: Scope,
) -> Result<Comparison, CompareError> {
    let methods = scoped(selected, scope, Family::Scalar)?;
    let runs = methods.into_iter().map(|method| (method, run_scalar(problem, method)));
    Ok(collect(session, runs, Vec::new()))
}

/// Compares iterative linear solvers on `problem`.
///
/// Every successful run is appended to `session`.
///
/// # Errors
///
/// Returns an error only if `selected` is not a linear method. Failures of
/// individual methods are reported in [`Comparison::skipped`].
pub fn compare_linear(
    session: &mut Session,
    problem: &LinearProblem,
    selected: Method,
    scope: Scope,
) -> Result<Comparison, CompareError> {
    let methods = scoped(selected, scope, Family::Linear)?;

    let mut spectral = Vec::new();
    let mut runs = Vec::new();
    for method in methods {
        let Some(linear_method) = method.as_linear() else {
            continue;
        };
        let (run, estimate) = run_linear(problem, method, linear_method);
        spectral.push((method, estimate));
        runs.push((method, run));
    }

    Ok(collect(session, runs, spectral))
}

/// Reruns a family-wide linear comparison once per policy.
///
/// Every run of every policy is appended to `session`.
///
/// # Errors
///
/// Returns an error only if `selected` is not a linear method.
pub fn compare_linear_policies(
    session: &mut Session,
    problem: &LinearProblem,
    selected: Method,
    policies: &[ErrorPolicy],
) -> Result<Vec<PolicyReport>, CompareError> {
    policies
        .iter()
        .map(|&policy| {
            let variant = problem.with_config(problem.config().with_policy(policy));
            let comparison = compare_linear(session, &variant, selected, Scope::Family)?;
            if let Some(best) = comparison.best() {
                log::info!("best under {policy} error: {}", best.method);
            }
            Ok(PolicyReport { policy, comparison })
        })
        .collect()
}

fn scoped(selected: Method, scope: Scope, family: Family) -> Result<Vec<Method>, CompareError> {
    if selected.family() != family {
        return Err(CompareError::WrongFamily {
            method: selected,
            expected: family,
        });
    }

    let mut methods = vec![selected];
    if scope == Scope::Family {
        methods.extend(Method::in_family(family).filter(|&m| m != selected));
    }
    Ok(methods)
}

fn collect(
    session: &mut Session,
    runs: impl IntoIterator<Item = (Method, Result<RunSummary, Skipped>)>,
    spectral: Vec<(Method, SpectralEstimate)>,
) -> Comparison {
    let mut comparison = Comparison {
        spectral,
        ..Comparison::default()
    };

    for (method, run) in runs {
        match run {
            Ok(summary) => {
                log::debug!("{summary}");
                session.push(summary.clone());
                comparison.ranked.push(summary);
            }
            Err(skipped) => {
                log::warn!("skipping {method}: {}", skipped.reason);
                comparison.skipped.push(skipped);
            }
        }
    }

    comparison.ranked.sort_by(rank);
    comparison
}

/// Orders by final error (NaN last), then iterations, then method order.
fn rank(a: &RunSummary, b: &RunSummary) -> Ordering {
    a.error
        .is_nan()
        .cmp(&b.error.is_nan())
        .then_with(|| a.error.total_cmp(&b.error))
        .then_with(|| a.iters.cmp(&b.iters))
        .then_with(|| a.method.cmp(&b.method))
}

fn relaxation(problem: &LinearProblem) -> f64 {
    problem.omega.unwrap_or(1.0)
}

/// Runs one linear method, returning its summary and spectral estimate.
///
/// A successful run already carries its estimate; the oracle is consulted
/// directly only for runs that failed.
fn run_linear(
    problem: &LinearProblem,
    method: Method,
    linear_method: linear::Method,
) -> (Result<RunSummary, Skipped>, SpectralEstimate) {
    let (a, b, x0) = (&problem.a, &problem.b, &problem.x0);
    let config = problem.config();
    let omega = relaxation(problem);

    let solution = match linear_method {
        linear::Method::Jacobi => jacobi::solve_unobserved(a, b, x0, config),
        linear::Method::GaussSeidel => gauss_seidel::solve_unobserved(a, b, x0, config),
        linear::Method::Sor => sor::solve_unobserved(a, b, x0, omega, config),
    };

    match solution {
        Ok(solution) => {
            let summary = summarize(method, &solution, config.policy());
            (Ok(summary), solution.convergence)
        }
        Err(error) => {
            let omega = (linear_method == linear::Method::Sor).then_some(omega);
            let estimate = linear::estimate_convergence(a, linear_method, omega);
            (Err(Skipped::from_error(method)(error)), estimate)
        }
    }
}

/// Exact derivatives when the problem has them, finite differences otherwise.
enum Slopes<'p> {
    Exact(Analytic<&'p dyn Fn(f64) -> f64>),
    Estimated(CentralDifference),
}

impl<'p> Slopes<'p> {
    fn of(problem: &'p ScalarProblem) -> Self {
        match &problem.derivative {
            Some(derivative) => Slopes::Exact(Analytic::new(derivative.as_ref())),
            None => Slopes::Estimated(CentralDifference::default()),
        }
    }
}

impl Derivatives for Slopes<'_> {
    fn first<F: Evaluable + ?Sized>(&self, f: &F, x: f64) -> f64 {
        match self {
            Slopes::Exact(d) => d.first(f, x),
            Slopes::Estimated(d) => d.first(f, x),
        }
    }

    fn second<F: Evaluable + ?Sized>(&self, f: &F, x: f64) -> f64 {
        match self {
            Slopes::Exact(d) => d.second(f, x),
            Slopes::Estimated(d) => d.second(f, x),
        }
    }
}

/// Initial conditions resolved for one scalar method.
#[derive(Default)]
struct ScalarInputs<'p> {
    bracket: Option<[f64; 2]>,
    x0: Option<f64>,
    pair: Option<[f64; 2]>,
    map: Option<Box<dyn Fn(f64) -> f64 + 'p>>,
}

impl ScalarInputs<'_> {
    fn missing(method: Method, what: &str) -> Skipped {
        Skipped::new(method, ErrorKind::InvalidInput, format!("no {what} available"))
    }
}

fn resolve<'p>(problem: &'p ScalarProblem, method: Method) -> Result<ScalarInputs<'p>, Skipped> {
    let mut inputs = ScalarInputs::default();
    let mut wants_map = false;

    for parameter in method.parameters() {
        match parameter.role {
            ParamRole::BracketLower | ParamRole::BracketUpper if inputs.bracket.is_none() => {
                inputs.bracket = Some(find_bracket(problem, method)?);
            }
            ParamRole::InitialGuess => {
                let x0 = problem.x0.or_else(|| problem.bracket.map(midpoint));
                inputs.x0 = Some(x0.ok_or_else(|| ScalarInputs::missing(method, "initial guess"))?);
            }
            ParamRole::SecondGuess => inputs.pair = Some(secant_pair(problem, method)?),
            ParamRole::Map => wants_map = true,
            _ => {}
        }
    }

    if wants_map {
        let x0 = inputs.x0.ok_or_else(|| ScalarInputs::missing(method, "initial guess"))?;
        let map: Box<dyn Fn(f64) -> f64 + 'p> = match &problem.map {
            Some(map) => Box::new(move |x| map(x)),
            None => chord_map(problem, x0),
        };
        inputs.map = Some(map);
    }

    Ok(inputs)
}

fn midpoint([a, b]: [f64; 2]) -> f64 {
    0.5 * (a + b)
}

fn find_bracket(problem: &ScalarProblem, method: Method) -> Result<[f64; 2], Skipped> {
    if let Some(bracket) = problem.bracket {
        return Ok(bracket);
    }

    let x0 = problem
        .x0
        .ok_or_else(|| ScalarInputs::missing(method, "bracket or initial guess"))?;
    let max_steps = problem.config.max_iters();
    let scan = incremental::solve_unobserved(problem.f.as_ref(), x0, problem.search_step, max_steps)
        .map_err(Skipped::from_error(method))?;

    scan.bracket().ok_or_else(|| {
        Skipped::new(
            method,
            ErrorKind::InvalidInput,
            format!("no sign change within {max_steps} steps of {x0}"),
        )
    })
}

fn secant_pair(problem: &ScalarProblem, method: Method) -> Result<[f64; 2], Skipped> {
    match (problem.x0, problem.x1, problem.bracket) {
        (Some(x0), Some(x1), _) => Ok([x0, x1]),
        (_, _, Some(bracket)) => Ok(bracket),
        (Some(x0), None, None) => Ok([x0, x0 + problem.search_step]),
        (None, _, None) => Err(ScalarInputs::missing(method, "starting pair")),
    }
}

/// `g(x) = x − f(x) / f'(x0)`, or `x − f(x)` when the slope at `x0` is flat.
fn chord_map(problem: &ScalarProblem, x0: f64) -> Box<dyn Fn(f64) -> f64 + '_> {
    let f = problem.f.as_ref();
    let slope = Slopes::of(problem).first(f, x0);
    if slope.is_finite() && slope != 0.0 {
        Box::new(move |x| x - f(x) / slope)
    } else {
        log::debug!("chord map: f'({x0}) = {slope}, using g(x) = x - f(x)");
        Box::new(move |x| x - f(x))
    }
}

fn run_scalar(problem: &ScalarProblem, method: Method) -> Result<RunSummary, Skipped> {
    let inputs = resolve(problem, method)?;
    let f = problem.f.as_ref();
    let config = &problem.config;
    let policy = config.policy();
    let missing = |what: &str| ScalarInputs::missing(method, what);

    let summary = match method {
        Method::Bisection => {
            let bracket = inputs.bracket.ok_or_else(|| missing("bracket"))?;
            let solution = bisection::solve_unobserved(f, bracket, config)
                .map_err(Skipped::from_error(method))?;
            summarize(method, &solution, policy)
        }
        Method::FalsePosition => {
            let bracket = inputs.bracket.ok_or_else(|| missing("bracket"))?;
            let solution = false_position::solve_unobserved(f, bracket, config)
                .map_err(Skipped::from_error(method))?;
            summarize(method, &solution, policy)
        }
        Method::Newton => {
            let x0 = inputs.x0.ok_or_else(|| missing("initial guess"))?;
            let slopes = Slopes::of(problem);
            let solution = newton::solve_unobserved(f, &slopes, x0, config)
                .map_err(Skipped::from_error(method))?;
            summarize(method, &solution, policy)
        }
        Method::Secant => {
            let pair = inputs.pair.ok_or_else(|| missing("starting pair"))?;
            let solution =
                secant::solve_unobserved(f, pair, config).map_err(Skipped::from_error(method))?;
            summarize(method, &solution, policy)
        }
        Method::FixedPoint => {
            let x0 = inputs.x0.ok_or_else(|| missing("initial guess"))?;
            let map = inputs.map.ok_or_else(|| missing("map"))?;
            let solution = fixed_point::solve_unobserved(map.as_ref(), x0, config)
                .map_err(Skipped::from_error(method))?;
            summarize(method, &solution, policy)
        }
        Method::MultipleRoots => {
            let x0 = inputs.x0.ok_or_else(|| missing("initial guess"))?;
            let slopes = Slopes::of(problem);
            let solution = multiple_roots::solve_unobserved(f, &slopes, x0, config)
                .map_err(Skipped::from_error(method))?;
            summarize(method, &solution, policy)
        }
        Method::Jacobi | Method::GaussSeidel | Method::Sor => {
            return Err(Skipped::new(
                method,
                ErrorKind::InvalidInput,
                "not a root finder",
            ));
        }
    };

    Ok(summary)
}
