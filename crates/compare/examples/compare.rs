//! Side-by-side comparisons of the pivot solvers.
//!
//! # Usage
//!
//! ```text
//! cargo run --example compare -- roots
//! cargo run --example compare -- linear
//! RUST_LOG=trace cargo run --example compare -- roots
//! ```
//!
//! # Modes
//!
//! - **roots** — Find √2 as the root of x² − 2 on \[0, 2\] with every root
//!   finder, then a double root of (x − 1)²(x + 2) where multiple-root
//!   Newton pulls ahead.
//!
//! - **linear** — Solve a diagonally dominant 3×3 system with Jacobi,
//!   Gauss-Seidel and SOR under each error policy, with the spectral radius
//!   of each iteration matrix.

use std::error::Error;

use ndarray::array;
use pivot_compare::{
    Comparison, LinearProblem, Method, ScalarProblem, Scope, Session, compare_linear_policies,
    compare_roots,
};
use pivot_core::{Config, ErrorPolicy};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init()?;

    let mut session = Session::new();
    let mode = std::env::args().nth(1).unwrap_or_else(|| "roots".into());
    match mode.as_str() {
        "roots" => roots(&mut session)?,
        "linear" => linear(&mut session)?,
        other => return Err(format!("unknown mode: {other} (expected roots or linear)").into()),
    }

    println!("\n{} runs recorded in this session", session.len());
    Ok(())
}

fn roots(session: &mut Session) -> Result<(), Box<dyn Error>> {
    let config = Config::new(1e-10, 100, ErrorPolicy::Absolute)?;

    let simple = ScalarProblem::new(|x| x * x - 2.0, config)
        .with_bracket([0.0, 2.0])
        .with_derivative(|x| 2.0 * x);
    report("x^2 - 2", &compare_roots(session, &simple, Method::Newton, Scope::Family)?);

    let double = ScalarProblem::new(|x| (x - 1.0).powi(2) * (x + 2.0), config)
        .with_guess(2.0)
        .with_derivative(|x| 3.0 * (x * x - 1.0));
    report(
        "(x - 1)^2 (x + 2)",
        &compare_roots(session, &double, Method::MultipleRoots, Scope::Family)?,
    );

    Ok(())
}

fn linear(session: &mut Session) -> Result<(), Box<dyn Error>> {
    let problem = LinearProblem::new(
        array![[4.0, -1.0, 0.0], [-1.0, 4.0, -1.0], [0.0, -1.0, 4.0]],
        array![15.0, 10.0, 10.0],
        array![0.0, 0.0, 0.0],
        Config::new(1e-10, 200, ErrorPolicy::Absolute)?,
    )
    .with_relaxation(1.1);

    let reports = compare_linear_policies(session, &problem, Method::Jacobi, &ErrorPolicy::ALL)?;
    for policy_report in &reports {
        report(&format!("{} error", policy_report.policy), &policy_report.comparison);
    }
    Ok(())
}

fn report(title: &str, comparison: &Comparison) {
    println!("\n== {title} ==");
    for summary in &comparison.ranked {
        println!("{summary}");
    }
    for skipped in &comparison.skipped {
        println!("{:<15} skipped ({:?}): {}", skipped.method, skipped.kind, skipped.reason);
    }
    for (method, estimate) in &comparison.spectral {
        println!("{method}:\n{estimate}");
    }
}
