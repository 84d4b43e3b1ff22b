//! Boundary to the external mixed-integer solver.
//!
//! A backend receives a fully built [`SolverModel`] plus the merged
//! [`SolverOptions`], runs to completion or to its time limit, and returns a
//! [`SolutionPool`]. Branch-and-bound, cuts and relaxations all live behind
//! this trait.

mod exhaustive;

#[cfg(test)]
mod tests;

use std::fmt::Debug;
use std::time::Duration;

use mipsampler_config::SolverOptions;
use mipsampler_core::{Result, SolveStatus};

use crate::model::{SolverModel, VarId};

pub use exhaustive::{ExhaustiveBackend, DEFAULT_MAX_VARIABLES};

/// Common interface for mixed-integer solvers.
///
/// Implementations must not keep per-solve state in `self`; every call gets
/// its own model, so one backend can serve concurrent sampling calls.
pub trait MipBackend: Send + Sync + Debug {
    /// Backend name for logging and sample set info.
    fn name(&self) -> &str;

    /// Whether objectives with product terms are accepted.
    fn supports_quadratic_objective(&self) -> bool {
        true
    }

    /// Solves `model` and returns every pooled solution.
    ///
    /// Options the backend does not understand should be ignored.
    ///
    /// # Errors
    ///
    /// Returns [`mipsampler_core::SamplerError::Backend`] when the model cannot
    /// be solved at all. Running out of time is not an error: return whatever
    /// the pool holds with [`SolveStatus::TimeLimit`].
    fn solve(&self, model: &SolverModel, options: &SolverOptions) -> Result<SolutionPool>;
}

impl<B: MipBackend + ?Sized> MipBackend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn supports_quadratic_objective(&self) -> bool {
        (**self).supports_quadratic_objective()
    }

    fn solve(&self, model: &SolverModel, options: &SolverOptions) -> Result<SolutionPool> {
        (**self).solve(model, options)
    }
}

/// One feasible assignment reported by the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct PooledSolution {
    /// Value per solver variable, indexed by [`VarId::index`].
    pub values: Vec<f64>,
    /// Objective value of this particular solution.
    pub objective: f64,
}

/// Solutions collected by a solve, best first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionPool {
    solutions: Vec<PooledSolution>,
    status: SolveStatus,
    solve_time: Duration,
}

impl SolutionPool {
    pub fn new(status: SolveStatus) -> Self {
        Self {
            solutions: Vec::new(),
            status,
            solve_time: Duration::ZERO,
        }
    }

    pub fn push(&mut self, values: Vec<f64>, objective: f64) {
        self.solutions.push(PooledSolution { values, objective });
    }

    /// Builder form of [`SolutionPool::push`].
    pub fn with_solution(mut self, values: Vec<f64>, objective: f64) -> Self {
        self.push(values, objective);
        self
    }

    pub fn with_solve_time(mut self, solve_time: Duration) -> Self {
        self.solve_time = solve_time;
        self
    }

    /// Number of pooled solutions.
    pub fn count(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Value of `var` in solution `index`.
    pub fn value_of(&self, index: usize, var: VarId) -> Option<f64> {
        self.solutions
            .get(index)
            .and_then(|s| s.values.get(var.index()))
            .copied()
    }

    /// Objective value of solution `index`.
    pub fn objective_value(&self, index: usize) -> Option<f64> {
        self.solutions.get(index).map(|s| s.objective)
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    pub fn solve_time(&self) -> Duration {
        self.solve_time
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PooledSolution> {
        self.solutions.iter()
    }
}
