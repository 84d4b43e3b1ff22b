//! The sampling entry point.
//!
//! [`MipSampler::sample`] converts the model to `BINARY`, builds a fresh
//! [`SolverModel`] with the selected formulation, optionally pins one
//! variable to break global spin-flip symmetry, hands the model to the
//! backend, and reads the pool back into a [`SampleSet`] in the model's own
//! vartype.
//!
//! Logging levels:
//! - **INFO**: sample start/end with problem scale and pool size
//! - **WARN**: symmetry pins, empty pools, energy disagreements
//! - **DEBUG**: formulation details and merged solver options


use std::time::Instant;

use mipsampler_config::options::POOL_SOLUTION_LIMIT;
use mipsampler_config::{OptionOverrides, SamplerConfig, SolverOptions};
use mipsampler_core::{
    Method, QuadraticModel, Result, SampleSet, SampleSetInfo, SamplerError, SamplingWarning,
    Variable, Vartype,
};
use tracing::{debug, info, warn};

use crate::backend::MipBackend;
use crate::extract::{extract_samples, ExtractOptions};
use crate::formulation::{EitherFormulation, Formulation, VariableMap};
use crate::model::{ObjectiveSense, SolverModel};
use crate::symmetry::break_spin_symmetry;

/// Everything built for one sampling call before the solver runs.
#[derive(Debug, Clone)]
pub struct BuiltModel<V: Variable> {
    pub method: Method,
    /// The input model in the `BINARY` encoding.
    pub binary: QuadraticModel<V>,
    pub solver_model: SolverModel,
    pub variables: VariableMap<V>,
    /// Warnings raised while building, e.g. a symmetry pin.
    pub warnings: Vec<SamplingWarning>,
}

/// Samples quadratic models through a mixed-integer backend.
///
/// The sampler holds no per-call state: every call to
/// [`sample`](MipSampler::sample) builds and owns its own solver model, so a
/// shared sampler can be used from several threads at once.
///
/// # Examples
///
/// ```
/// use mipsampler_config::OptionOverrides;
/// use mipsampler_core::{Method, QuadraticModel, Vartype};
/// use mipsampler_solver::{ExhaustiveBackend, MipSampler};
///
/// let mut model = QuadraticModel::new(Vartype::Binary);
/// model.add_linear(0, 1.0);
/// model.add_linear(1, -1.0);
/// model.add_quadratic(0, 1, 2.0).unwrap();
/// model.set_offset(0.5);
///
/// let sampler = MipSampler::new(ExhaustiveBackend::new());
/// let samples = sampler
///     .sample(&model, Method::Quadratic, 4, &OptionOverrides::new())
///     .unwrap();
///
/// let best = samples.first().unwrap();
/// assert_eq!(best.value(&0), Some(0));
/// assert_eq!(best.value(&1), Some(1));
/// assert_eq!(best.energy, -0.5);
/// assert_eq!(samples.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct MipSampler<B: MipBackend> {
    backend: B,
    config: SamplerConfig,
}

impl<B: MipBackend> MipSampler<B> {
    /// Creates a sampler with the default configuration.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, SamplerConfig::default())
    }

    pub fn with_config(backend: B, config: SamplerConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Samples with the configured method and read count and no overrides.
    pub fn sample_default<V: Variable>(&self, model: &QuadraticModel<V>) -> Result<SampleSet<V>> {
        self.sample(
            model,
            self.config.method,
            self.config.num_reads,
            &OptionOverrides::new(),
        )
    }

    /// Samples `model` and returns up to `num_reads` distinct assignments,
    /// lowest energy first, in the model's vartype.
    ///
    /// `overrides` replace configured solver options of the same name;
    /// unrecognized names reach the backend unchanged. Unless set explicitly,
    /// `pool_solution_limit` equals `num_reads`.
    ///
    /// # Errors
    ///
    /// - [`SamplerError::InvalidArgument`] for `num_reads == 0`, an invalid
    ///   sampler configuration, a mistyped recognized option, a non-finite
    ///   coefficient, or a quadratic method on a backend without quadratic
    ///   objectives. Nothing is solved in that case.
    /// - [`SamplerError::SolverOutput`] if a pooled value is not binary.
    /// - [`SamplerError::Backend`] if the backend fails.
    ///
    /// An empty pool is not an error: the result is empty and carries a
    /// [`SamplingWarning::EmptySolutionPool`].
    pub fn sample<V: Variable>(
        &self,
        model: &QuadraticModel<V>,
        method: Method,
        num_reads: usize,
        overrides: &OptionOverrides,
    ) -> Result<SampleSet<V>> {
        if num_reads == 0 {
            return Err(SamplerError::invalid("num_reads must be a positive integer"));
        }
        self.config.validate()?;
        let options = self.solver_options(num_reads, overrides)?;
        if method == Method::Quadratic && !self.backend.supports_quadratic_objective() {
            return Err(SamplerError::invalid(format!(
                "backend '{}' does not accept quadratic objectives, use the linear method",
                self.backend.name()
            )));
        }

        let built = self.build(model, method)?;

        info!(
            event = "sample_start",
            backend = self.backend.name(),
            method = %method,
            num_reads,
            variables = model.num_variables(),
            interactions = model.num_interactions(),
            solver_variables = built.solver_model.num_variables(),
            constraints = built.solver_model.constraints().len(),
        );

        let start = Instant::now();
        let pool = self.backend.solve(&built.solver_model, &options)?;
        let solve_time = if pool.solve_time().is_zero() {
            start.elapsed()
        } else {
            pool.solve_time()
        };

        let mut warnings = built.warnings;
        if pool.is_empty() {
            let warning = SamplingWarning::EmptySolutionPool {
                status: pool.status(),
            };
            warn!(event = "empty_solution_pool", status = %pool.status(), "{warning}");
            warnings.push(warning);
        }

        let (samples, extract_warnings) = extract_samples(
            &pool,
            &built.binary,
            &built.variables,
            ExtractOptions {
                integrality_tolerance: self.config.integrality_tolerance,
                energy_tolerance: self.config.energy_tolerance,
            },
        )?;
        warnings.extend(extract_warnings);

        let info = SampleSetInfo {
            backend: self.backend.name().to_string(),
            method: Some(method),
            status: pool.status(),
            solve_time,
            decision_variables: built.variables.num_decision(),
            link_variables: built.variables.num_links(),
            constraints: built.solver_model.constraints().len(),
            pool_size: pool.count(),
        };

        let sample_set = SampleSet::from_aggregated(samples, Vartype::Binary)
            .with_warnings(warnings)
            .with_info(info)
            .change_vartype(model.vartype());

        info!(
            event = "sample_end",
            status = %pool.status(),
            pool_size = pool.count(),
            samples = sample_set.len(),
            best_energy = sample_set.first().map(|s| s.energy),
            solve_ms = solve_time.as_millis() as u64,
        );
        Ok(sample_set)
    }

    /// Builds the solver model for `model` without solving it.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError::InvalidArgument`] if any coefficient or the
    /// offset is NaN or infinite.
    pub fn build<V: Variable>(
        &self,
        model: &QuadraticModel<V>,
        method: Method,
    ) -> Result<BuiltModel<V>> {
        validate_coefficients(model)?;

        let binary = model.change_vartype(Vartype::Binary);
        let formulation = EitherFormulation::for_method(method);

        let mut solver_model = SolverModel::new();
        let variables = formulation.build(&binary, &mut solver_model);

        let mut warnings = Vec::new();
        if self.config.symmetry_breaking {
            warnings.extend(break_spin_symmetry(model, &variables, &mut solver_model));
        }

        let objective = formulation.assemble_objective(&binary, &variables);
        solver_model.set_objective(ObjectiveSense::Minimize, objective);

        Ok(BuiltModel {
            method,
            binary,
            solver_model,
            variables,
            warnings,
        })
    }

    /// Configured options merged with `overrides`, with the pool limit
    /// defaulted to `num_reads`.
    fn solver_options(&self, num_reads: usize, overrides: &OptionOverrides) -> Result<SolverOptions> {
        let mut options = self.config.solver.merged(overrides);
        options.set_default(POOL_SOLUTION_LIMIT, num_reads);
        options.validate()?;
        debug!(event = "solver_options", options = ?options);
        Ok(options)
    }
}

fn validate_coefficients<V: Variable>(model: &QuadraticModel<V>) -> Result<()> {
    if !model.offset().is_finite() {
        return Err(SamplerError::invalid("offset is not finite"));
    }
    if let Some((v, bias)) = model.iter_linear().find(|(_, b)| !b.is_finite()) {
        return Err(SamplerError::invalid(format!(
            "linear bias {bias} of variable {v} is not finite"
        )));
    }
    if let Some((pair, bias)) = model.iter_quadratic().find(|(_, b)| !b.is_finite()) {
        let (u, v) = pair.as_tuple();
        return Err(SamplerError::invalid(format!(
            "interaction ({u}, {v}) has non-finite bias {bias}"
        )));
    }
    Ok(())
}
