//! Tests for the solution pool and the exhaustive backend.

use mipsampler_config::SolverOptions;
use mipsampler_config::options::{POOL_SEARCH_MODE, POOL_SOLUTION_LIMIT, TIME_LIMIT_SECONDS};
use mipsampler_core::{SamplerError, SolveStatus};

use super::*;
use crate::model::{ConstraintSense, LinearConstraint, LinearExpr, ObjectiveSense, QuadraticExpr};

/// Minimize `x0 - 2 x1 + 3 x0 x1`.
fn small_model() -> (SolverModel, VarId, VarId) {
    let mut model = SolverModel::new();
    let x0 = model.add_binary_variable("x0");
    let x1 = model.add_binary_variable("x1");
    let mut objective = QuadraticExpr::new();
    objective.add_term(x0, 1.0);
    objective.add_term(x1, -2.0);
    objective.add_product(x0, x1, 3.0);
    model.set_objective(ObjectiveSense::Minimize, objective);
    (model, x0, x1)
}

fn options(limit: usize) -> SolverOptions {
    SolverOptions::default().with(POOL_SOLUTION_LIMIT, limit)
}

#[test]
fn test_pool_accessors() {
    let pool = SolutionPool::new(SolveStatus::Optimal)
        .with_solution(vec![0.0, 1.0], -2.0)
        .with_solution(vec![1.0, 0.0], 1.0);

    assert_eq!(pool.count(), 2);
    assert_eq!(pool.value_of(0, VarId::from_index(1)), Some(1.0));
    assert_eq!(pool.value_of(1, VarId::from_index(5)), None);
    assert_eq!(pool.value_of(2, VarId::from_index(0)), None);
    assert_eq!(pool.objective_value(1), Some(1.0));
    assert_eq!(pool.objective_value(2), None);
}

#[test]
fn test_exhaustive_ranks_all_assignments() {
    let (model, x0, x1) = small_model();
    let pool = ExhaustiveBackend::new().solve(&model, &options(4)).unwrap();

    assert_eq!(pool.status(), SolveStatus::Optimal);
    assert_eq!(pool.count(), 4);
    let objectives: Vec<f64> = (0..4).map(|i| pool.objective_value(i).unwrap()).collect();
    assert_eq!(objectives, vec![-2.0, 0.0, 1.0, 2.0]);
    assert_eq!(pool.value_of(0, x0), Some(0.0));
    assert_eq!(pool.value_of(0, x1), Some(1.0));
}

#[test]
fn test_exhaustive_respects_pool_limit() {
    let (model, _, _) = small_model();
    let pool = ExhaustiveBackend::new().solve(&model, &options(2)).unwrap();
    assert_eq!(pool.count(), 2);
    assert_eq!(pool.objective_value(1), Some(0.0));
}

#[test]
fn test_pool_search_mode_zero_keeps_optimum_only() {
    let (model, _, _) = small_model();
    let opts = options(4).with(POOL_SEARCH_MODE, 0);
    let pool = ExhaustiveBackend::new().solve(&model, &opts).unwrap();
    assert_eq!(pool.count(), 1);
    assert_eq!(pool.objective_value(0), Some(-2.0));
}

#[test]
fn test_pool_search_modes_one_and_two_agree() {
    let (model, _, _) = small_model();
    let backend = ExhaustiveBackend::new();
    let one = backend.solve(&model, &options(3).with(POOL_SEARCH_MODE, 1)).unwrap();
    let two = backend.solve(&model, &options(3).with(POOL_SEARCH_MODE, 2)).unwrap();
    assert_eq!(one.count(), 3);
    assert_eq!(
        one.iter().collect::<Vec<_>>(),
        two.iter().collect::<Vec<_>>()
    );
}

#[test]
fn test_exhaustive_maximize() {
    let (mut model, _, _) = small_model();
    let expr = model.objective().expr.clone();
    model.set_objective(ObjectiveSense::Maximize, expr);

    let pool = ExhaustiveBackend::new().solve(&model, &options(1)).unwrap();
    assert_eq!(pool.objective_value(0), Some(2.0));
}

#[test]
fn test_exhaustive_honors_constraints() {
    let (mut model, x0, x1) = small_model();
    model.add_linear_constraint(LinearConstraint::new(
        "x1_off",
        LinearExpr::from(x1),
        ConstraintSense::Equal,
        0.0,
    ));

    let pool = ExhaustiveBackend::new().solve(&model, &options(4)).unwrap();
    assert_eq!(pool.count(), 2);
    for i in 0..pool.count() {
        assert_eq!(pool.value_of(i, x1), Some(0.0));
    }
    assert_eq!(pool.value_of(0, x0), Some(0.0));
}

#[test]
fn test_exhaustive_reports_infeasible() {
    let (mut model, x0, _) = small_model();
    model.add_linear_constraint(LinearConstraint::new(
        "impossible",
        LinearExpr::from(x0),
        ConstraintSense::GreaterEqual,
        2.0,
    ));

    let pool = ExhaustiveBackend::new().solve(&model, &options(4)).unwrap();
    assert_eq!(pool.status(), SolveStatus::Infeasible);
    assert!(pool.is_empty());
}

#[test]
fn test_exhaustive_rejects_large_models() {
    let (model, _, _) = small_model();
    let err = ExhaustiveBackend::new()
        .with_max_variables(1)
        .solve(&model, &options(1))
        .unwrap_err();
    assert!(matches!(err, SamplerError::Backend(_)));
}

#[test]
fn test_exhaustive_rejects_unknown_variables() {
    let (mut model, x0, _) = small_model();
    let mut objective = model.objective().expr.clone();
    objective.add_product(x0, VarId::from_index(7), 1.0);
    model.set_objective(ObjectiveSense::Minimize, objective);

    let err = ExhaustiveBackend::new()
        .solve(&model, &options(1))
        .unwrap_err();
    assert!(matches!(err, SamplerError::Backend(_)));
}

#[test]
fn test_exhaustive_stops_at_time_limit() {
    let mut model = SolverModel::new();
    let mut objective = QuadraticExpr::new();
    for i in 0..24 {
        let x = model.add_binary_variable(format!("x{i}"));
        objective.add_term(x, 1.0);
    }
    model.set_objective(ObjectiveSense::Minimize, objective);

    let opts = options(3).with(TIME_LIMIT_SECONDS, 0);
    let pool = ExhaustiveBackend::new().solve(&model, &opts).unwrap();
    assert_eq!(pool.status(), SolveStatus::TimeLimit);
    assert!(pool.count() <= 3);
}
