//! Quadratic pseudo-Boolean model.
//!
//! A [`QuadraticModel`] holds linear biases, pairwise interactions between
//! distinct variables, and a constant offset, all interpreted under a single
//! [`Vartype`]. Interaction keys are stored as canonical [`Pair`]s so that
//! `(i, j)` and `(j, i)` can never coexist.
//!
//! # Examples
//!
//! ```
//! use std::collections::BTreeMap;
//! use mipsampler_core::{QuadraticModel, Vartype};
//!
//! let mut model = QuadraticModel::new(Vartype::Binary);
//! model.add_linear(0, 1.0);
//! model.add_linear(1, -1.0);
//! model.add_quadratic(0, 1, 2.0).unwrap();
//! model.set_offset(0.5);
//!
//! let assignment = BTreeMap::from([(0, 0), (1, 1)]);
//! assert_eq!(model.energy(&assignment).unwrap(), -0.5);
//! ```

mod convert;


use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{Result, SamplerError};
use crate::sample::Assignment;
use crate::variable::{Pair, Variable};
use crate::vartype::Vartype;

/// A quadratic model over two-valued variables.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticModel<V: Variable> {
    /// Variables in insertion order.
    variables: Vec<V>,
    /// Position of each variable in `variables`.
    index: HashMap<V, usize>,
    /// Linear bias per variable, parallel to `variables`.
    linear: Vec<f64>,
    quadratic: BTreeMap<Pair<V>, f64>,
    offset: f64,
    vartype: Vartype,
}

impl<V: Variable> QuadraticModel<V> {
    /// Creates an empty model.
    pub fn new(vartype: Vartype) -> Self {
        Self {
            variables: Vec::new(),
            index: HashMap::new(),
            linear: Vec::new(),
            quadratic: BTreeMap::new(),
            offset: 0.0,
            vartype,
        }
    }

    /// Builds a `SPIN` model from fields `h` and couplings `j`.
    ///
    /// Repeated couplings accumulate. A coupling of a variable with itself
    /// is rejected.
    pub fn from_ising(
        h: impl IntoIterator<Item = (V, f64)>,
        j: impl IntoIterator<Item = ((V, V), f64)>,
        offset: f64,
    ) -> Result<Self> {
        let mut model = Self::new(Vartype::Spin);
        for (v, bias) in h {
            model.add_linear(v, bias);
        }
        for ((u, v), bias) in j {
            model.add_quadratic(u, v, bias)?;
        }
        model.offset = offset;
        Ok(model)
    }

    /// Builds a `BINARY` model from a QUBO coefficient map.
    ///
    /// Diagonal entries `(v, v)` become linear biases since `x * x == x`
    /// for binary `x`.
    pub fn from_qubo(q: impl IntoIterator<Item = ((V, V), f64)>, offset: f64) -> Self {
        let mut model = Self::new(Vartype::Binary);
        for ((u, v), bias) in q {
            if u == v {
                model.add_linear(u, bias);
            } else if let Some(pair) = Pair::new(u, v) {
                model.add_variable(pair.first().clone());
                model.add_variable(pair.second().clone());
                *model.quadratic.entry(pair).or_insert(0.0) += bias;
            }
        }
        model.offset = offset;
        model
    }

    /// Builds a model from explicit parts, enforcing every structural invariant.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError::InvalidArgument`] when a variable is listed twice,
    /// a linear or quadratic key is repeated (pairs are compared unordered),
    /// a quadratic key pairs a variable with itself, or a coefficient refers
    /// to a variable missing from `variables`.
    pub fn try_from_parts(
        variables: impl IntoIterator<Item = V>,
        linear: impl IntoIterator<Item = (V, f64)>,
        quadratic: impl IntoIterator<Item = ((V, V), f64)>,
        offset: f64,
        vartype: Vartype,
    ) -> Result<Self> {
        let mut model = Self::new(vartype);
        for v in variables {
            if !model.add_variable(v.clone()) {
                return Err(SamplerError::invalid(format!("variable {v} listed twice")));
            }
        }

        let mut seen_linear = HashSet::new();
        for (v, bias) in linear {
            let Some(&idx) = model.index.get(&v) else {
                return Err(SamplerError::invalid(format!(
                    "linear bias refers to unknown variable {v}"
                )));
            };
            if !seen_linear.insert(idx) {
                return Err(SamplerError::invalid(format!(
                    "duplicate linear bias for variable {v}"
                )));
            }
            model.linear[idx] = bias;
        }

        for ((u, v), bias) in quadratic {
            for x in [&u, &v] {
                if !model.index.contains_key(x) {
                    return Err(SamplerError::invalid(format!(
                        "interaction ({u}, {v}) refers to unknown variable {x}"
                    )));
                }
            }
            let pair = Pair::new(u.clone(), v.clone()).ok_or_else(|| {
                SamplerError::invalid(format!("self-interaction on variable {u}"))
            })?;
            if model.quadratic.insert(pair, bias).is_some() {
                return Err(SamplerError::invalid(format!(
                    "duplicate interaction ({u}, {v})"
                )));
            }
        }

        model.offset = offset;
        Ok(model)
    }

    /// Adds a variable with zero bias. Returns false if it already existed.
    pub fn add_variable(&mut self, v: V) -> bool {
        if self.index.contains_key(&v) {
            return false;
        }
        self.index.insert(v.clone(), self.variables.len());
        self.variables.push(v);
        self.linear.push(0.0);
        true
    }

    /// Adds `bias` to the linear coefficient of `v`, creating `v` if needed.
    pub fn add_linear(&mut self, v: V, bias: f64) {
        let idx = match self.index.get(&v) {
            Some(&idx) => idx,
            None => {
                self.add_variable(v);
                self.variables.len() - 1
            }
        };
        self.linear[idx] += bias;
    }

    /// Adds `bias` to the interaction between `u` and `v`, creating both
    /// variables if needed.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError::InvalidArgument`] when `u == v`.
    pub fn add_quadratic(&mut self, u: V, v: V, bias: f64) -> Result<()> {
        let pair = Pair::new(u.clone(), v.clone())
            .ok_or_else(|| SamplerError::invalid(format!("self-interaction on variable {u}")))?;
        self.add_variable(u);
        self.add_variable(v);
        *self.quadratic.entry(pair).or_insert(0.0) += bias;
        Ok(())
    }

    /// Replaces the constant offset.
    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    /// Adds to the constant offset.
    pub fn add_offset(&mut self, delta: f64) {
        self.offset += delta;
    }

    pub fn vartype(&self) -> Vartype {
        self.vartype
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Variables in insertion order.
    pub fn variables(&self) -> &[V] {
        &self.variables
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_interactions(&self) -> usize {
        self.quadratic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn contains(&self, v: &V) -> bool {
        self.index.contains_key(v)
    }

    /// Linear bias of `v`, or `None` if `v` is not in the model.
    pub fn linear(&self, v: &V) -> Option<f64> {
        self.index.get(v).map(|&idx| self.linear[idx])
    }

    /// Interaction bias between `u` and `v` in either order.
    pub fn quadratic(&self, u: &V, v: &V) -> Option<f64> {
        let pair = Pair::new(u.clone(), v.clone())?;
        self.quadratic.get(&pair).copied()
    }

    /// Iterates `(variable, bias)` in insertion order, including zero biases.
    pub fn iter_linear(&self) -> impl Iterator<Item = (&V, f64)> + '_ {
        self.variables.iter().zip(self.linear.iter().copied())
    }

    /// Iterates `(pair, bias)` in canonical pair order.
    pub fn iter_quadratic(&self) -> impl Iterator<Item = (&Pair<V>, f64)> + '_ {
        self.quadratic.iter().map(|(pair, &bias)| (pair, bias))
    }

    /// Evaluates the energy of a complete assignment.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError::InvalidArgument`] when a model variable is
    /// unassigned or a value is not admissible under the model's vartype.
    pub fn energy(&self, assignment: &Assignment<V>) -> Result<f64> {
        let mut values = Vec::with_capacity(self.variables.len());
        for v in &self.variables {
            let value = *assignment
                .get(v)
                .ok_or_else(|| SamplerError::invalid(format!("variable {v} is unassigned")))?;
            if !self.vartype.contains(value) {
                return Err(SamplerError::invalid(format!(
                    "value {value} for variable {v} is not {}",
                    self.vartype
                )));
            }
            values.push(f64::from(value));
        }

        let mut energy = self.offset;
        for (bias, value) in self.linear.iter().zip(&values) {
            energy += bias * value;
        }
        for (pair, bias) in &self.quadratic {
            let (u, v) = pair.as_tuple();
            energy += bias * values[self.index[u]] * values[self.index[v]];
        }
        Ok(energy)
    }

    /// Evaluates the energy of every assignment in order.
    pub fn energies<'a>(
        &self,
        assignments: impl IntoIterator<Item = &'a Assignment<V>>,
    ) -> Result<Vec<f64>>
    where
        V: 'a,
    {
        assignments.into_iter().map(|a| self.energy(a)).collect()
    }
}
