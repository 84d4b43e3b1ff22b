//! Solver-facing integer program.
//!
//! A [`SolverModel`] is built fresh for every sampling call and handed to a
//! [`MipBackend`](crate::backend::MipBackend). It only knows binary variables,
//! linear constraints and a (possibly quadratic) objective; nothing in it
//! refers to the labels of the input model.

#[cfg(test)]
mod tests;

use std::fmt;

/// Handle to a variable of a [`SolverModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    /// Wraps a raw column index, e.g. when mapping backend columns back.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        VarId(index)
    }

    /// Position of the variable in [`SolverModel::variables`].
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A binary variable with bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct MipVariable {
    pub name: String,
    pub lower: f64,
    pub upper: f64,
}

/// Affine expression `constant + sum(coef * var)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
    constant: f64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`LinearExpr::add_term`].
    pub fn term(mut self, var: VarId, coef: f64) -> Self {
        self.add_term(var, coef);
        self
    }

    pub fn add_term(&mut self, var: VarId, coef: f64) {
        self.terms.push((var, coef));
    }

    pub fn add_constant(&mut self, value: f64) {
        self.constant += value;
    }

    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Largest variable index referenced, if any.
    pub fn last_var(&self) -> Option<VarId> {
        self.terms.iter().map(|&(v, _)| v).max()
    }

    /// Evaluates the expression; `values` is indexed by [`VarId::index`].
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .fold(self.constant, |acc, &(v, c)| acc + c * values[v.index()])
    }
}

impl From<VarId> for LinearExpr {
    fn from(var: VarId) -> Self {
        LinearExpr::new().term(var, 1.0)
    }
}

/// Linear part plus `sum(coef * a * b)` product terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuadraticExpr {
    linear: LinearExpr,
    products: Vec<(VarId, VarId, f64)>,
}

impl QuadraticExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_term(&mut self, var: VarId, coef: f64) {
        self.linear.add_term(var, coef);
    }

    pub fn add_product(&mut self, a: VarId, b: VarId, coef: f64) {
        self.products.push((a, b, coef));
    }

    pub fn add_constant(&mut self, value: f64) {
        self.linear.add_constant(value);
    }

    pub fn linear(&self) -> &LinearExpr {
        &self.linear
    }

    pub fn products(&self) -> &[(VarId, VarId, f64)] {
        &self.products
    }

    /// True when there are no product terms.
    pub fn is_linear(&self) -> bool {
        self.products.is_empty()
    }

    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.products.iter().fold(
            self.linear.evaluate(values),
            |acc, &(a, b, c)| acc + c * values[a.index()] * values[b.index()],
        )
    }
}

impl From<LinearExpr> for QuadraticExpr {
    fn from(linear: LinearExpr) -> Self {
        Self {
            linear,
            products: Vec::new(),
        }
    }
}

/// Relation between a constraint's expression and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSense {
    LessEqual,
    GreaterEqual,
    Equal,
}

impl fmt::Display for ConstraintSense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConstraintSense::LessEqual => "<=",
            ConstraintSense::GreaterEqual => ">=",
            ConstraintSense::Equal => "==",
        })
    }
}

/// `expr (<=|>=|==) rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub name: String,
    pub expr: LinearExpr,
    pub sense: ConstraintSense,
    pub rhs: f64,
}

impl LinearConstraint {
    pub fn new(
        name: impl Into<String>,
        expr: LinearExpr,
        sense: ConstraintSense,
        rhs: f64,
    ) -> Self {
        Self {
            name: name.into(),
            expr,
            sense,
            rhs,
        }
    }

    /// Checks the constraint at `values` with absolute slack `tolerance`.
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.sense {
            ConstraintSense::LessEqual => lhs <= self.rhs + tolerance,
            ConstraintSense::GreaterEqual => lhs >= self.rhs - tolerance,
            ConstraintSense::Equal => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

impl fmt::Display for LinearConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name)?;
        for (var, coef) in self.expr.terms() {
            write!(f, " {coef:+}*v{}", var.index())?;
        }
        if self.expr.constant() != 0.0 {
            write!(f, " {:+}", self.expr.constant())?;
        }
        write!(f, " {} {}", self.sense, self.rhs)
    }
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectiveSense {
    #[default]
    Minimize,
    Maximize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Objective {
    pub sense: ObjectiveSense,
    pub expr: QuadraticExpr,
}

/// Binary integer program: variables, linear constraints and an objective.
///
/// # Examples
///
/// ```
/// use mipsampler_solver::model::{
///     ConstraintSense, LinearConstraint, LinearExpr, ObjectiveSense, QuadraticExpr, SolverModel,
/// };
///
/// let mut model = SolverModel::new();
/// let x = model.add_binary_variable("x");
/// let y = model.add_binary_variable("y");
/// model.add_linear_constraint(LinearConstraint::new(
///     "at_most_one",
///     LinearExpr::new().term(x, 1.0).term(y, 1.0),
///     ConstraintSense::LessEqual,
///     1.0,
/// ));
///
/// let mut objective = QuadraticExpr::new();
/// objective.add_term(x, -1.0);
/// objective.add_term(y, -2.0);
/// model.set_objective(ObjectiveSense::Minimize, objective);
///
/// assert!(model.is_feasible(&[0.0, 1.0], 1e-9));
/// assert!(!model.is_feasible(&[1.0, 1.0], 1e-9));
/// assert_eq!(model.evaluate_objective(&[0.0, 1.0]), -2.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverModel {
    variables: Vec<MipVariable>,
    constraints: Vec<LinearConstraint>,
    objective: Objective,
}

impl SolverModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable restricted to {0, 1}.
    pub fn add_binary_variable(&mut self, name: impl Into<String>) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(MipVariable {
            name: name.into(),
            lower: 0.0,
            upper: 1.0,
        });
        id
    }

    /// Adds a constraint.
    ///
    /// Every variable in `constraint` must come from
    /// [`SolverModel::add_binary_variable`] on this model. Backends reject
    /// models that break this, see [`SolverModel::find_unknown_variable`].
    pub fn add_linear_constraint(&mut self, constraint: LinearConstraint) {
        debug_assert!(
            constraint
                .expr
                .last_var()
                .map_or(true, |v| v.index() < self.variables.len()),
            "constraint {} refers to an unknown variable",
            constraint.name
        );
        self.constraints.push(constraint);
    }

    /// Replaces the objective. The same variable rule as for constraints
    /// applies.
    pub fn set_objective(&mut self, sense: ObjectiveSense, expr: QuadraticExpr) {
        self.objective = Objective { sense, expr };
    }

    pub fn variables(&self) -> &[MipVariable] {
        &self.variables
    }

    pub fn variable(&self, id: VarId) -> Option<&MipVariable> {
        self.variables.get(id.index())
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    /// First variable referenced by a constraint or the objective that does
    /// not belong to this model.
    pub fn find_unknown_variable(&self) -> Option<VarId> {
        let n = self.variables.len();
        let objective = &self.objective.expr;
        self.constraints
            .iter()
            .flat_map(|c| c.expr.terms().iter().map(|&(v, _)| v))
            .chain(objective.linear().terms().iter().map(|&(v, _)| v))
            .chain(objective.products().iter().flat_map(|&(a, b, _)| [a, b]))
            .find(|v| v.index() >= n)
    }

    /// Objective value at `values`, indexed by [`VarId::index`].
    pub fn evaluate_objective(&self, values: &[f64]) -> f64 {
        self.objective.expr.evaluate(values)
    }

    /// True if `values` respects every bound and constraint.
    pub fn is_feasible(&self, values: &[f64], tolerance: f64) -> bool {
        values.len() == self.variables.len()
            && self
                .variables
                .iter()
                .zip(values)
                .all(|(var, &x)| x >= var.lower - tolerance && x <= var.upper + tolerance)
            && self
                .constraints
                .iter()
                .all(|c| c.is_satisfied(values, tolerance))
    }
}
