//! Reference backend that enumerates every binary assignment.
//!
//! Depth-first over variables in index order, trying 0 before 1. A
//! constraint is checked as soon as its highest-index variable is assigned,
//! so link variables (created after the decision variables they depend on)
//! never branch more than once. Exponential in the number of free variables;
//! meant for small models, tests, and cross-checking real solvers.

use std::time::Instant;

use mipsampler_config::SolverOptions;
use mipsampler_core::{Result, SamplerError, SolveStatus};
use tracing::{debug, info, trace};

use super::{MipBackend, PooledSolution, SolutionPool};
use crate::model::{ObjectiveSense, SolverModel};

/// Default cap on solver variables (decision plus link).
pub const DEFAULT_MAX_VARIABLES: usize = 40;

/// Pool size used when no `pool_solution_limit` is given.
const DEFAULT_POOL_SOLUTIONS: usize = 10;

/// Nodes between deadline checks.
const TIME_CHECK_INTERVAL: u64 = 1024;

const FEASIBILITY_TOLERANCE: f64 = 1e-9;

/// Exhaustive enumeration backend.
///
/// Honors `time_limit_seconds`, `pool_solution_limit`, `pool_search_mode`
/// and `verbose_output`. Mode 0 keeps only the optimum; modes 1 and 2 both
/// keep the best `pool_solution_limit` solutions, since enumeration finds
/// them all anyway. Other options are ignored.
///
/// # Examples
///
/// ```
/// use mipsampler_config::SolverOptions;
/// use mipsampler_core::SolveStatus;
/// use mipsampler_solver::backend::{ExhaustiveBackend, MipBackend};
/// use mipsampler_solver::model::{ObjectiveSense, QuadraticExpr, SolverModel};
///
/// let mut model = SolverModel::new();
/// let x = model.add_binary_variable("x");
/// let mut objective = QuadraticExpr::new();
/// objective.add_term(x, -1.0);
/// model.set_objective(ObjectiveSense::Minimize, objective);
///
/// let pool = ExhaustiveBackend::new().solve(&model, &SolverOptions::default()).unwrap();
/// assert_eq!(pool.status(), SolveStatus::Optimal);
/// assert_eq!(pool.objective_value(0), Some(-1.0));
/// assert_eq!(pool.value_of(0, x), Some(1.0));
/// ```
#[derive(Debug, Clone)]
pub struct ExhaustiveBackend {
    max_variables: usize,
}

impl Default for ExhaustiveBackend {
    fn default() -> Self {
        Self {
            max_variables: DEFAULT_MAX_VARIABLES,
        }
    }
}

impl ExhaustiveBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the largest model this backend will attempt.
    pub fn with_max_variables(mut self, max_variables: usize) -> Self {
        self.max_variables = max_variables;
        self
    }
}

impl MipBackend for ExhaustiveBackend {
    fn name(&self) -> &str {
        "exhaustive"
    }

    fn solve(&self, model: &SolverModel, options: &SolverOptions) -> Result<SolutionPool> {
        let n = model.num_variables();
        if n > self.max_variables {
            return Err(SamplerError::Backend(format!(
                "exhaustive backend accepts at most {} variables, model has {n}",
                self.max_variables
            )));
        }
        if let Some(var) = model.find_unknown_variable() {
            return Err(SamplerError::Backend(format!(
                "model refers to variable v{} but has only {n} variables",
                var.index()
            )));
        }

        let start = Instant::now();
        let verbose = options.verbose_output();
        let limit = match options.pool_search_mode() {
            Some(0) => 1,
            _ => options
                .pool_solution_limit()
                .unwrap_or(DEFAULT_POOL_SOLUTIONS)
                .max(1),
        };
        let deadline = options.time_limit().and_then(|d| start.checked_add(d));

        if options.thread_count().is_some_and(|t| t > 1) {
            debug!("exhaustive backend is single-threaded, ignoring thread_count");
        }
        for (key, value) in options.passthrough() {
            trace!(option = key, value = %value, "ignoring solver option");
        }

        // Constraints indexed by the last variable they mention.
        let mut checks = vec![Vec::new(); n];
        for (i, constraint) in model.constraints().iter().enumerate() {
            match constraint.expr.last_var() {
                Some(var) => checks[var.index()].push(i),
                None if !constraint.is_satisfied(&[], FEASIBILITY_TOLERANCE) => {
                    debug!(constraint = %constraint, "constant constraint is violated");
                    return Ok(SolutionPool::new(SolveStatus::Infeasible)
                        .with_solve_time(start.elapsed()));
                }
                None => {}
            }
        }

        let mut search = Search {
            model,
            checks,
            values: vec![0.0; n],
            pool: Vec::new(),
            limit,
            sign: match model.objective().sense {
                ObjectiveSense::Minimize => 1.0,
                ObjectiveSense::Maximize => -1.0,
            },
            deadline,
            nodes: 0,
            timed_out: false,
        };
        search.descend(0);

        let status = if search.timed_out {
            SolveStatus::TimeLimit
        } else if search.pool.is_empty() {
            SolveStatus::Infeasible
        } else {
            SolveStatus::Optimal
        };

        let solve_time = start.elapsed();
        if verbose {
            info!(
                event = "exhaustive_end",
                variables = n,
                nodes = search.nodes,
                pool_size = search.pool.len(),
                status = %status,
                elapsed_ms = solve_time.as_millis() as u64,
            );
        } else {
            debug!(
                event = "exhaustive_end",
                variables = n,
                nodes = search.nodes,
                pool_size = search.pool.len(),
                status = %status,
            );
        }

        let mut pool = SolutionPool::new(status).with_solve_time(solve_time);
        for PooledSolution { values, objective } in search.pool {
            pool.push(values, objective);
        }
        Ok(pool)
    }
}

struct Search<'a> {
    model: &'a SolverModel,
    checks: Vec<Vec<usize>>,
    values: Vec<f64>,
    /// Best solutions so far, best first.
    pool: Vec<PooledSolution>,
    limit: usize,
    /// 1 to minimize, -1 to maximize.
    sign: f64,
    deadline: Option<Instant>,
    nodes: u64,
    timed_out: bool,
}

impl Search<'_> {
    fn descend(&mut self, depth: usize) {
        if self.timed_out {
            return;
        }
        self.nodes += 1;
        if self.nodes % TIME_CHECK_INTERVAL == 0
            && self.deadline.is_some_and(|d| Instant::now() >= d)
        {
            self.timed_out = true;
            return;
        }

        if depth == self.values.len() {
            self.offer();
            return;
        }

        let (lower, upper) = {
            let var = &self.model.variables()[depth];
            (var.lower, var.upper)
        };
        for value in [0.0, 1.0] {
            if value < lower - FEASIBILITY_TOLERANCE || value > upper + FEASIBILITY_TOLERANCE {
                continue;
            }
            self.values[depth] = value;
            let constraints = self.model.constraints();
            let feasible = self.checks[depth]
                .iter()
                .all(|&i| constraints[i].is_satisfied(&self.values, FEASIBILITY_TOLERANCE));
            if feasible {
                self.descend(depth + 1);
            }
        }
    }

    /// Inserts the current leaf if it ranks within the pool limit.
    /// Equal objectives keep enumeration order.
    fn offer(&mut self) {
        let objective = self.model.evaluate_objective(&self.values);
        let key = self.sign * objective;
        let pos = self
            .pool
            .partition_point(|s| self.sign * s.objective <= key);
        if pos >= self.limit {
            return;
        }
        self.pool.insert(
            pos,
            PooledSolution {
                values: self.values.clone(),
                objective,
            },
        );
        self.pool.truncate(self.limit);
    }
}
