//! mipsampler - sample quadratic models with a mixed-integer solver
//!
//! Build a [`QuadraticModel`] in either encoding, pick a [`Method`], and ask a
//! [`MipSampler`] for the lowest-energy assignments.
//!
//! # Example
//!
//! ```rust
//! use mipsampler::prelude::*;
//!
//! let model = QuadraticModel::from_ising([(0, 0.5), (1, -0.25)], [((0, 1), -1.0)], 0.0)?;
//! let sampler = MipSampler::new(ExhaustiveBackend::new());
//! let samples = sampler.sample(&model, Method::Linear, 2, &OptionOverrides::new())?;
//!
//! assert_eq!(samples.vartype(), Vartype::Spin);
//! assert_eq!(samples.energies(), vec![-1.25, -0.75]);
//! # Ok::<(), SamplerError>(())
//! ```

// Models, encodings and results
pub use mipsampler_core::{
    Assignment, Method, Pair, QuadraticModel, Result, Sample, SampleSet, SampleSetInfo,
    SamplerError, SamplingWarning, SolveStatus, Variable, Vartype,
};

// Configuration
pub use mipsampler_config::{
    ConfigError, OptionOverrides, OptionValue, SamplerConfig, SolverOptions,
};

// Sampler and solver boundary
pub use mipsampler_solver::{
    ExhaustiveBackend, MipBackend, MipSampler, SolutionPool, SolverModel,
};

/// Lower-level building blocks, for backend implementors.
pub mod solver {
    pub use mipsampler_solver::{backend, extract, formulation, model, symmetry};
}

/// Option key constants.
pub mod options {
    pub use mipsampler_config::options::*;
}

pub mod prelude {
    pub use super::{
        ExhaustiveBackend, Method, MipBackend, MipSampler, OptionOverrides, OptionValue,
        QuadraticModel, SampleSet, SamplerConfig, SamplerError, Vartype,
    };
}
