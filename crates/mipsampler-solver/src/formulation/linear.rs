//! Linear formulation with one link variable per interaction.

use std::collections::BTreeMap;

use mipsampler_core::{Method, QuadraticModel, Variable};

use super::{add_decision_variables, linear_objective, Formulation, VariableMap};
use crate::model::{ConstraintSense, LinearConstraint, LinearExpr, QuadraticExpr, SolverModel};

/// Replaces every product `x_u * x_v` by a binary `y_uv` constrained by
///
/// ```text
/// y_uv >= x_u + x_v - 1
/// y_uv <= x_u
/// y_uv <= x_v
/// ```
///
/// For binary `x_u, x_v` the three inequalities leave exactly one feasible
/// value for `y_uv`, equal to `x_u AND x_v`. The reformulation is exact only
/// while the solver enforces integrality on `y_uv` as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearFormulation;

impl Formulation for LinearFormulation {
    fn method(&self) -> Method {
        Method::Linear
    }

    fn build<V: Variable>(
        &self,
        model: &QuadraticModel<V>,
        solver: &mut SolverModel,
    ) -> VariableMap<V> {
        let decision = add_decision_variables(model, solver);

        let mut links = BTreeMap::new();
        for (pair, _) in model.iter_quadratic() {
            let (u, v) = pair.as_tuple();
            let y = solver.add_binary_variable(format!("link_{u}_{v}"));
            links.insert(pair.clone(), y);
        }

        for (pair, &y) in &links {
            let (u, v) = pair.as_tuple();
            let (xu, xv) = (decision[u], decision[v]);

            solver.add_linear_constraint(LinearConstraint::new(
                format!("link_{u}_{v}_lower"),
                LinearExpr::new().term(y, 1.0).term(xu, -1.0).term(xv, -1.0),
                ConstraintSense::GreaterEqual,
                -1.0,
            ));
            solver.add_linear_constraint(LinearConstraint::new(
                format!("link_{u}_{v}_upper_{u}"),
                LinearExpr::new().term(y, 1.0).term(xu, -1.0),
                ConstraintSense::LessEqual,
                0.0,
            ));
            solver.add_linear_constraint(LinearConstraint::new(
                format!("link_{u}_{v}_upper_{v}"),
                LinearExpr::new().term(y, 1.0).term(xv, -1.0),
                ConstraintSense::LessEqual,
                0.0,
            ));
        }

        tracing::debug!(
            event = "formulation_built",
            method = "linear",
            decision_variables = decision.len(),
            link_variables = links.len(),
            constraints = 3 * links.len(),
        );

        VariableMap { decision, links }
    }

    fn assemble_objective<V: Variable>(
        &self,
        model: &QuadraticModel<V>,
        vars: &VariableMap<V>,
    ) -> QuadraticExpr {
        let mut expr = linear_objective(model, vars);
        for (pair, bias) in model.iter_quadratic() {
            if let Some(&y) = vars.links.get(pair) {
                expr.add_term(y, bias);
            }
        }
        expr
    }
}
