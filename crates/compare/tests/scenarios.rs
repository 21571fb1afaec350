use approx::assert_relative_eq;
use ndarray::array;
use pivot_compare::{
    LinearProblem, Method, ScalarProblem, Scope, Session, compare_linear,
    compare_linear_policies, compare_roots, extract_rows, summarize, tabulate,
};
use pivot_core::{Analytic, Config, ErrorKind, ErrorPolicy, Status};
use pivot_solvers::root::newton;

fn position(ranked: &[pivot_compare::RunSummary], method: Method) -> usize {
    ranked
        .iter()
        .position(|summary| summary.method == method)
        .unwrap_or_else(|| panic!("{method} was not ranked"))
}

fn sqrt_two(config: Config) -> ScalarProblem {
    ScalarProblem::new(|x| x * x - 2.0, config)
        .with_bracket([0.0, 2.0])
        .with_derivative(|x| 2.0 * x)
}

#[test]
fn open_methods_outrank_bisection_on_a_simple_root() {
    let config = Config::new(1e-6, 100, ErrorPolicy::Absolute).unwrap();
    let problem = sqrt_two(config);
    let mut session = Session::new();

    let comparison =
        compare_roots(&mut session, &problem, Method::Bisection, Scope::Family).unwrap();

    assert!(comparison.skipped.is_empty(), "{:?}", comparison.skipped);
    assert_eq!(comparison.ranked.len(), 6);
    assert_eq!(session.len(), 6);

    let bisection = position(&comparison.ranked, Method::Bisection);
    assert!(position(&comparison.ranked, Method::Newton) < bisection);
    assert!(position(&comparison.ranked, Method::Secant) < bisection);

    let best = comparison.best().unwrap();
    assert_eq!(best.status, Status::Converged);
    assert_relative_eq!(best.estimate.as_scalar().unwrap(), 2.0_f64.sqrt(), epsilon = 1e-9);

    for summary in &comparison.ranked {
        assert_eq!(summary.status, Status::Converged, "{}", summary.method);
        assert!(summary.error < 1e-6, "{}", summary.method);
    }
}

#[test]
fn selected_scope_runs_one_method() {
    let problem = sqrt_two(Config::default());
    let mut session = Session::new();

    let comparison = compare_roots(&mut session, &problem, Method::Secant, Scope::Selected).unwrap();

    assert_eq!(comparison.ranked.len(), 1);
    assert_eq!(comparison.ranked[0].method, Method::Secant);
    assert_eq!(session.summaries(), comparison.ranked.as_slice());
}

#[test]
fn bracket_is_found_from_a_guess() {
    let config = Config::new(1e-8, 200, ErrorPolicy::Absolute).unwrap();
    let problem = ScalarProblem::new(|x| x - 2.25, config)
        .with_guess(1.0)
        .with_search_step(0.5);
    let mut session = Session::new();

    let comparison =
        compare_roots(&mut session, &problem, Method::Bisection, Scope::Selected).unwrap();

    let best = comparison.best().expect("bisection ran on a searched bracket");
    assert_relative_eq!(best.estimate.as_scalar().unwrap(), 2.25, epsilon = 1e-7);
}

#[test]
fn failing_methods_are_skipped_not_fatal() {
    let config = Config::new(1e-8, 50, ErrorPolicy::Absolute).unwrap();
    let problem = ScalarProblem::new(|x| x * x + 1.0, config)
        .with_guess(0.0)
        .with_derivative(|x| 2.0 * x);
    let mut session = Session::new();

    let comparison = compare_roots(&mut session, &problem, Method::Newton, Scope::Family).unwrap();

    let skipped = |method: Method| comparison.skipped.iter().find(|s| s.method == method);
    assert_eq!(skipped(Method::Bisection).unwrap().kind, ErrorKind::InvalidInput);
    assert_eq!(skipped(Method::FalsePosition).unwrap().kind, ErrorKind::InvalidInput);
    assert_eq!(skipped(Method::Newton).unwrap().kind, ErrorKind::Degenerate);

    assert_eq!(
        comparison.ranked.len() + comparison.skipped.len(),
        Method::in_family(pivot_compare::Family::Scalar).count()
    );
    assert_eq!(session.len(), comparison.ranked.len());
}

fn dominant_system(config: Config) -> LinearProblem {
    LinearProblem::new(
        array![[4.0, 1.0], [1.0, 3.0]],
        array![1.0, 2.0],
        array![0.0, 0.0],
        config,
    )
}

#[test]
fn linear_family_converges_and_reports_spectral_radius() {
    let config = Config::new(1e-8, 100, ErrorPolicy::Absolute).unwrap();
    let problem = dominant_system(config);
    let mut session = Session::new();

    let comparison = compare_linear(&mut session, &problem, Method::Jacobi, Scope::Family).unwrap();

    assert!(comparison.skipped.is_empty());
    assert_eq!(comparison.ranked.len(), 3);
    assert_eq!(comparison.spectral.len(), 3);
    for (method, estimate) in &comparison.spectral {
        assert_eq!(estimate.predicts_convergence(), Some(true), "{method}");
    }

    for summary in &comparison.ranked {
        let x = summary.estimate.as_vector().unwrap();
        assert_relative_eq!(x[0], 1.0 / 11.0, epsilon = 1e-7);
        assert_relative_eq!(x[1], 7.0 / 11.0, epsilon = 1e-7);
    }

    // SOR with the default factor repeats Gauss-Seidel exactly, and ties go
    // to the earlier method.
    let gauss_seidel = position(&comparison.ranked, Method::GaussSeidel);
    let sor = position(&comparison.ranked, Method::Sor);
    assert!(gauss_seidel < sor);
    assert_eq!(
        comparison.ranked[gauss_seidel].iters,
        comparison.ranked[sor].iters
    );
}

#[test]
fn every_policy_gets_its_own_ranking() {
    let problem = dominant_system(Config::default());
    let mut session = Session::new();

    let reports =
        compare_linear_policies(&mut session, &problem, Method::Sor, &ErrorPolicy::ALL).unwrap();

    assert_eq!(reports.len(), ErrorPolicy::ALL.len());
    assert_eq!(session.len(), 9);
    for report in &reports {
        let best = report.best().unwrap();
        assert_eq!(best.policy, report.policy);
        assert_eq!(best.status, Status::Converged);
    }
}

#[test]
fn root_finder_is_not_a_linear_method() {
    let problem = dominant_system(Config::default());
    let mut session = Session::new();

    assert!(compare_linear(&mut session, &problem, Method::Newton, Scope::Family).is_err());
    assert!(session.is_empty());
}

#[test]
fn tabular_extraction_agrees_with_typed_summary() {
    let config = Config::new(1e-10, 50, ErrorPolicy::Relative).unwrap();
    let f = |x: f64| x * x * x - 2.0 * x - 5.0;
    let derivative = Analytic::new(|x: f64| 3.0 * x * x - 2.0);

    let solution = newton::solve_unobserved(&f, &derivative, 2.0, &config).unwrap();
    let typed = summarize(Method::Newton, &solution, config.policy());

    let rows = tabulate(&solution.history);
    let tabular = extract_rows(Method::Newton.name(), &rows, config.policy()).unwrap();

    assert_eq!(tabular.estimate, typed.estimate);
    assert_eq!(tabular.iters, typed.iters);
    assert_relative_eq!(tabular.error, typed.error);
}
