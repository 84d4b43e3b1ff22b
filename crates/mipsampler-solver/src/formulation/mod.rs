//! Integer-program formulations of a binary quadratic model.
//!
//! Both formulations create one binary decision variable per model variable
//! and minimize `sum(a_v * x_v) + sum(b_uv * p_uv)`. They differ in how the
//! product `p_uv = x_u * x_v` reaches the solver:
//!
//! - [`LinearFormulation`]: an auxiliary link variable `y_uv` per interaction,
//!   tied to the product by `y >= x_u + x_v - 1`, `y <= x_u`, `y <= x_v`.
//!   At integer points these force `y_uv = x_u AND x_v` exactly.
//! - [`QuadraticFormulation`]: the product enters the objective directly.
//!
//! The model's offset never enters the solver objective; it is added back
//! when energies are computed from pooled solutions.

mod linear;
mod quadratic;


use std::collections::{BTreeMap, HashMap};

use mipsampler_core::{Method, Pair, QuadraticModel, Variable};

use crate::model::{QuadraticExpr, SolverModel, VarId};

pub use linear::LinearFormulation;
pub use quadratic::QuadraticFormulation;

/// Mapping from model labels to solver variables.
#[derive(Debug, Clone)]
pub struct VariableMap<V: Variable> {
    decision: HashMap<V, VarId>,
    links: BTreeMap<Pair<V>, VarId>,
}

impl<V: Variable> VariableMap<V> {
    /// Decision variable of `v`.
    pub fn decision(&self, v: &V) -> Option<VarId> {
        self.decision.get(v).copied()
    }

    /// Link variable of the interaction between `u` and `v`.
    pub fn link(&self, u: &V, v: &V) -> Option<VarId> {
        let pair = Pair::new(u.clone(), v.clone())?;
        self.links.get(&pair).copied()
    }

    pub fn num_decision(&self) -> usize {
        self.decision.len()
    }

    pub fn num_links(&self) -> usize {
        self.links.len()
    }
}

/// A strategy for turning a binary quadratic model into a solver model.
pub trait Formulation {
    /// The method this formulation implements.
    fn method(&self) -> Method;

    /// Adds variables and structural constraints to `solver`.
    ///
    /// `model` must already be in the `BINARY` encoding.
    fn build<V: Variable>(
        &self,
        model: &QuadraticModel<V>,
        solver: &mut SolverModel,
    ) -> VariableMap<V>;

    /// Builds the objective over the variables created by [`Formulation::build`].
    fn assemble_objective<V: Variable>(
        &self,
        model: &QuadraticModel<V>,
        vars: &VariableMap<V>,
    ) -> QuadraticExpr;
}

/// Either formulation, selected once from a [`Method`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EitherFormulation {
    Linear(LinearFormulation),
    Quadratic(QuadraticFormulation),
}

impl EitherFormulation {
    pub fn for_method(method: Method) -> Self {
        match method {
            Method::Linear => Self::Linear(LinearFormulation),
            Method::Quadratic => Self::Quadratic(QuadraticFormulation),
        }
    }
}

impl From<Method> for EitherFormulation {
    fn from(method: Method) -> Self {
        Self::for_method(method)
    }
}

impl Formulation for EitherFormulation {
    fn method(&self) -> Method {
        match self {
            Self::Linear(f) => f.method(),
            Self::Quadratic(f) => f.method(),
        }
    }

    fn build<V: Variable>(
        &self,
        model: &QuadraticModel<V>,
        solver: &mut SolverModel,
    ) -> VariableMap<V> {
        match self {
            Self::Linear(f) => f.build(model, solver),
            Self::Quadratic(f) => f.build(model, solver),
        }
    }

    fn assemble_objective<V: Variable>(
        &self,
        model: &QuadraticModel<V>,
        vars: &VariableMap<V>,
    ) -> QuadraticExpr {
        match self {
            Self::Linear(f) => f.assemble_objective(model, vars),
            Self::Quadratic(f) => f.assemble_objective(model, vars),
        }
    }
}

/// One `var_<label>` binary per model variable, in model order.
fn add_decision_variables<V: Variable>(
    model: &QuadraticModel<V>,
    solver: &mut SolverModel,
) -> HashMap<V, VarId> {
    model
        .variables()
        .iter()
        .map(|v| (v.clone(), solver.add_binary_variable(format!("var_{v}"))))
        .collect()
}

/// Linear part of the objective, shared by both formulations.
fn linear_objective<V: Variable>(model: &QuadraticModel<V>, vars: &VariableMap<V>) -> QuadraticExpr {
    let mut expr = QuadraticExpr::new();
    for (v, bias) in model.iter_linear() {
        if let Some(x) = vars.decision(v) {
            expr.add_term(x, bias);
        }
    }
    expr
}
