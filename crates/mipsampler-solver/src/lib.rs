//! mipsampler solver - formulation, backend boundary and extraction
//!
//! Turns a [`QuadraticModel`](mipsampler_core::QuadraticModel) into a binary
//! integer program, hands it to a [`MipBackend`], and reads the solution pool
//! back as a [`SampleSet`](mipsampler_core::SampleSet).
//!
//! # Module Organization
//!
//! - [`model`] - solver-facing variables, constraints and objectives
//! - [`formulation`] - linear and quadratic encodings of the products
//! - [`symmetry`] - global spin-flip symmetry breaking
//! - [`backend`] - the solver trait, solution pools, exhaustive reference
//! - [`extract`] - pooled solutions to aggregated samples
//! - [`sampler`] - [`MipSampler`], the entry point

pub mod backend;
pub mod extract;
pub mod formulation;
pub mod model;
pub mod sampler;
pub mod symmetry;

#[cfg(test)]
pub mod test_utils;

pub use backend::{ExhaustiveBackend, MipBackend, PooledSolution, SolutionPool};
pub use extract::{extract_samples, round_binary, ExtractOptions};
pub use formulation::{
    EitherFormulation, Formulation, LinearFormulation, QuadraticFormulation, VariableMap,
};
pub use model::{
    ConstraintSense, LinearConstraint, LinearExpr, ObjectiveSense, QuadraticExpr, SolverModel,
    VarId,
};
pub use sampler::{BuiltModel, MipSampler};
pub use symmetry::{break_spin_symmetry, detect_spin_symmetry};
