//! Quadratic formulation: products go straight into the objective.

use std::collections::BTreeMap;

use mipsampler_core::{Method, QuadraticModel, Variable};

use super::{add_decision_variables, linear_objective, Formulation, VariableMap};
use crate::model::{QuadraticExpr, SolverModel};

/// Leaves `x_u * x_v` in the objective. No auxiliary variables or
/// constraints; the backend must accept a quadratic objective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadraticFormulation;

impl Formulation for QuadraticFormulation {
    fn method(&self) -> Method {
        Method::Quadratic
    }

    fn build<V: Variable>(
        &self,
        model: &QuadraticModel<V>,
        solver: &mut SolverModel,
    ) -> VariableMap<V> {
        let decision = add_decision_variables(model, solver);
        tracing::debug!(
            event = "formulation_built",
            method = "quadratic",
            decision_variables = decision.len(),
        );
        VariableMap {
            decision,
            links: BTreeMap::new(),
        }
    }

    fn assemble_objective<V: Variable>(
        &self,
        model: &QuadraticModel<V>,
        vars: &VariableMap<V>,
    ) -> QuadraticExpr {
        let mut expr = linear_objective(model, vars);
        for (pair, bias) in model.iter_quadratic() {
            let (u, v) = pair.as_tuple();
            if let (Some(xu), Some(xv)) = (vars.decision(u), vars.decision(v)) {
                expr.add_product(xu, xv, bias);
            }
        }
        expr
    }
}
