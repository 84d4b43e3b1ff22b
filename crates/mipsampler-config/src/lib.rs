//! Configuration system for mipsampler.
//!
//! Load sampler configuration from TOML or YAML to pick the formulation,
//! the number of reads, tolerances, and solver-level options without code
//! changes. Defaults are an ordinary value; nothing here is process-global.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use std::time::Duration;
//! use mipsampler_config::SamplerConfig;
//! use mipsampler_core::Method;
//!
//! let config = SamplerConfig::from_toml_str(r#"
//!     method = "linear"
//!     num_reads = 20
//!
//!     [solver]
//!     time_limit_seconds = 5
//!     presolve = 2
//! "#).unwrap();
//!
//! assert_eq!(config.method, Method::Linear);
//! assert_eq!(config.solver.time_limit(), Some(Duration::from_secs(5)));
//! // untouched defaults survive
//! assert_eq!(config.solver.thread_count(), Some(12));
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use mipsampler_config::SamplerConfig;
//!
//! let config = SamplerConfig::load("sampler.toml").unwrap_or_default();
//! ```

pub mod options;

#[cfg(test)]
mod tests;

use std::path::Path;

use mipsampler_core::{Method, SamplerError, DEFAULT_ENERGY_TOLERANCE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use options::{is_recognized, OptionOverrides, OptionValue, SolverOptions, RECOGNIZED_KEYS};

/// Default distance from {0, 1} tolerated when reading solver values.
pub const DEFAULT_INTEGRALITY_TOLERANCE: f64 = 1e-5;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for SamplerError {
    fn from(err: ConfigError) -> Self {
        SamplerError::InvalidArgument(err.to_string())
    }
}

/// Main sampler configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct SamplerConfig {
    /// Formulation used when the caller does not pass one.
    pub method: Method,

    /// Reads requested when the caller does not pass a count.
    pub num_reads: usize,

    /// Maximum distance from {0, 1} accepted for a solver value.
    pub integrality_tolerance: f64,

    /// Relative tolerance for energy agreement between duplicate samples.
    pub energy_tolerance: f64,

    /// Pin one variable when the model has global spin-flip symmetry.
    pub symmetry_breaking: bool,

    /// Solver-level options, defaults included.
    pub solver: SolverOptions,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            method: Method::default(),
            num_reads: 1,
            integrality_tolerance: DEFAULT_INTEGRALITY_TOLERANCE,
            energy_tolerance: DEFAULT_ENERGY_TOLERANCE,
            symmetry_breaking: true,
            solver: SolverOptions::default(),
        }
    }
}

impl SamplerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges and recognized solver option types.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_reads == 0 {
            return Err(ConfigError::Invalid("num_reads must be positive".into()));
        }
        if !(self.integrality_tolerance >= 0.0 && self.integrality_tolerance < 0.5) {
            return Err(ConfigError::Invalid(format!(
                "integrality_tolerance must lie in [0, 0.5), got {}",
                self.integrality_tolerance
            )));
        }
        if !(self.energy_tolerance >= 0.0 && self.energy_tolerance.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "energy_tolerance must be finite and non-negative, got {}",
                self.energy_tolerance
            )));
        }
        self.solver.validate()
    }

    /// Sets the default formulation.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the default number of reads.
    pub fn with_num_reads(mut self, num_reads: usize) -> Self {
        self.num_reads = num_reads;
        self
    }

    /// Sets the solver time limit.
    pub fn with_time_limit_seconds(mut self, seconds: u64) -> Self {
        self.solver.set(
            options::TIME_LIMIT_SECONDS,
            i64::try_from(seconds).unwrap_or(i64::MAX),
        );
        self
    }

    /// Sets a solver option.
    pub fn with_solver_option(
        mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Self {
        self.solver.set(key, value);
        self
    }

    /// Enables or disables spin-symmetry breaking.
    pub fn with_symmetry_breaking(mut self, enabled: bool) -> Self {
        self.symmetry_breaking = enabled;
        self
    }

    pub fn with_integrality_tolerance(mut self, tolerance: f64) -> Self {
        self.integrality_tolerance = tolerance;
        self
    }
}
