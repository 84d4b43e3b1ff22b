use super::*;

#[test]
fn test_variable_ids_are_sequential() {
    let mut model = SolverModel::new();
    let a = model.add_binary_variable("a");
    let b = model.add_binary_variable("b");

    assert_eq!(a.index(), 0);
    assert_eq!(b.index(), 1);
    assert_eq!(model.variable(b).unwrap().name, "b");
    assert_eq!(model.variable(b).unwrap().upper, 1.0);
}

#[test]
fn test_quadratic_expr_evaluate() {
    let mut model = SolverModel::new();
    let a = model.add_binary_variable("a");
    let b = model.add_binary_variable("b");

    let mut expr = QuadraticExpr::new();
    expr.add_term(a, 1.5);
    expr.add_product(a, b, -4.0);
    expr.add_constant(0.25);

    assert!(!expr.is_linear());
    assert_eq!(expr.evaluate(&[0.0, 0.0]), 0.25);
    assert_eq!(expr.evaluate(&[1.0, 0.0]), 1.75);
    assert_eq!(expr.evaluate(&[1.0, 1.0]), -2.25);
}

#[test]
fn test_constraint_senses() {
    let mut model = SolverModel::new();
    let a = model.add_binary_variable("a");
    let expr = LinearExpr::from(a);

    let le = LinearConstraint::new("le", expr.clone(), ConstraintSense::LessEqual, 0.0);
    let ge = LinearConstraint::new("ge", expr.clone(), ConstraintSense::GreaterEqual, 1.0);
    let eq = LinearConstraint::new("eq", expr, ConstraintSense::Equal, 0.0);

    assert!(le.is_satisfied(&[0.0], 0.0));
    assert!(!le.is_satisfied(&[1.0], 0.0));
    assert!(ge.is_satisfied(&[1.0], 0.0));
    assert!(!ge.is_satisfied(&[0.0], 0.0));
    assert!(eq.is_satisfied(&[1e-9], 1e-6));
}

#[test]
fn test_feasibility_checks_bounds_and_length() {
    let mut model = SolverModel::new();
    model.add_binary_variable("a");

    assert!(model.is_feasible(&[1.0], 0.0));
    assert!(!model.is_feasible(&[2.0], 1e-6));
    assert!(!model.is_feasible(&[], 0.0));
}

#[test]
fn test_constraint_display() {
    let mut model = SolverModel::new();
    let a = model.add_binary_variable("a");
    let b = model.add_binary_variable("b");
    let c = LinearConstraint::new(
        "pin",
        LinearExpr::new().term(a, 1.0).term(b, -1.0),
        ConstraintSense::Equal,
        0.0,
    );
    assert_eq!(c.to_string(), "pin: +1*v0 -1*v1 == 0");
}

#[test]
fn test_find_unknown_variable() {
    let mut model = SolverModel::new();
    let a = model.add_binary_variable("a");
    model.add_linear_constraint(LinearConstraint::new(
        "a_on",
        LinearExpr::from(a),
        ConstraintSense::Equal,
        1.0,
    ));
    assert_eq!(model.find_unknown_variable(), None);

    let mut objective = QuadraticExpr::new();
    objective.add_term(a, 1.0);
    objective.add_product(a, VarId::from_index(3), 2.0);
    model.set_objective(ObjectiveSense::Minimize, objective);
    assert_eq!(model.find_unknown_variable(), Some(VarId::from_index(3)));
}
