//! Error types for mipsampler

use thiserror::Error;

/// Main error type for sampling operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SamplerError {
    /// Unsupported argument or structurally invalid model.
    ///
    /// Raised before any solver resources are committed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The solver returned a value that cannot be read as binary
    #[error("Solver output error: {0}")]
    SolverOutput(String),

    /// The solver backend refused or failed to solve the model
    #[error("Backend error: {0}")]
    Backend(String),
}

impl SamplerError {
    /// Shorthand for building an [`SamplerError::InvalidArgument`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        SamplerError::InvalidArgument(msg.into())
    }

    /// Returns true for errors raised before the solver was invoked.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, SamplerError::InvalidArgument(_))
    }
}

/// Result type alias for sampling operations
pub type Result<T> = std::result::Result<T, SamplerError>;
