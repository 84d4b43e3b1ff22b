//! mipsampler core - models, encodings and samples
//!
//! This crate provides the data layer shared by the rest of the workspace:
//! - [`QuadraticModel`] with canonical interaction keys and vartype conversion
//! - [`Vartype`] encodings and per-value conversion
//! - [`SampleSet`] and [`Aggregator`] for ranked, deduplicated results
//! - [`SamplerError`] and [`SamplingWarning`]

pub mod error;
pub mod method;
pub mod model;
pub mod sample;
pub mod variable;
pub mod vartype;

pub use error::{Result, SamplerError};
pub use method::Method;
pub use model::QuadraticModel;
pub use sample::{
    energies_agree, Aggregator, Assignment, Sample, SampleSet, SampleSetInfo, SamplingWarning,
    SolveStatus, DEFAULT_ENERGY_TOLERANCE,
};
pub use variable::{Pair, Variable};
pub use vartype::Vartype;
