//! Test utilities for mipsampler-solver
//!
//! Re-exports the shared fixtures and adds a backend that replays a canned
//! solution pool.

use std::sync::atomic::{AtomicUsize, Ordering};

use mipsampler_config::SolverOptions;
use mipsampler_core::Result;

use crate::backend::{MipBackend, SolutionPool};
use crate::model::SolverModel;

pub use mipsampler_test::fixtures::{
    biased_spin_model, ferromagnetic_chain, frustrated_triangle, two_variable_model,
};
pub use mipsampler_test::{exact_samples, ground_state_energy, random_model};

/// Backend that ignores the model and returns a fixed pool.
#[derive(Debug)]
pub struct FixedPoolBackend {
    pool: SolutionPool,
    quadratic: bool,
    calls: AtomicUsize,
}

impl FixedPoolBackend {
    pub fn new(pool: SolutionPool) -> Self {
        Self {
            pool,
            quadratic: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Reports no support for quadratic objectives.
    pub fn linear_only(mut self) -> Self {
        self.quadratic = false;
        self
    }

    /// Number of times `solve` was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MipBackend for FixedPoolBackend {
    fn name(&self) -> &str {
        "fixed"
    }

    fn supports_quadratic_objective(&self) -> bool {
        self.quadratic
    }

    fn solve(&self, _model: &SolverModel, _options: &SolverOptions) -> Result<SolutionPool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.pool.clone())
    }
}

/// Backend that records the options it was called with.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    seen: std::sync::Mutex<Vec<SolverOptions>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options of the most recent call.
    pub fn last_options(&self) -> Option<SolverOptions> {
        self.seen.lock().ok()?.last().cloned()
    }
}

impl MipBackend for RecordingBackend {
    fn name(&self) -> &str {
        "recording"
    }

    fn solve(&self, _model: &SolverModel, options: &SolverOptions) -> Result<SolutionPool> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(options.clone());
        }
        Ok(SolutionPool::new(mipsampler_core::SolveStatus::Infeasible))
    }
}
