//! Diagnostics attached to a sample set.

use std::fmt;
use std::time::Duration;

use crate::method::Method;

/// Terminal state reported by a solver backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SolveStatus {
    /// Search completed and the best pooled solution is proven optimal.
    Optimal,
    /// The wall-clock limit was reached.
    TimeLimit,
    /// The pool limit was reached before the search completed.
    SolutionLimit,
    /// No feasible assignment exists.
    Infeasible,
    /// The solve was interrupted externally.
    Interrupted,
    #[default]
    Unknown,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::TimeLimit => "time_limit",
            SolveStatus::SolutionLimit => "solution_limit",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Interrupted => "interrupted",
            SolveStatus::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Non-fatal condition observed while sampling.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SamplingWarning {
    /// Every spin-encoded linear bias is zero; `variable` was pinned to
    /// binary 0 to remove mirrored solutions.
    SymmetryDetected { variable: String },

    /// The solver pool was empty.
    EmptySolutionPool { status: SolveStatus },

    /// Two pool entries with the same assignment reported energies further
    /// apart than the tolerance. The lower one was kept.
    EnergyMismatch { kept: f64, discarded: f64 },
}

impl fmt::Display for SamplingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingWarning::SymmetryDetected { variable } => write!(
                f,
                "detected spin symmetry, pinned variable {variable} to 0"
            ),
            SamplingWarning::EmptySolutionPool { status } => {
                write!(f, "solver returned no solutions (status: {status})")
            }
            SamplingWarning::EnergyMismatch { kept, discarded } => write!(
                f,
                "identical assignments disagree on energy: kept {kept}, discarded {discarded}"
            ),
        }
    }
}

/// Facts about the solve that produced a sample set.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleSetInfo {
    /// Name of the backend that ran the solve.
    pub backend: String,
    pub method: Option<Method>,
    pub status: SolveStatus,
    /// Wall time spent inside the backend.
    pub solve_time: Duration,
    pub decision_variables: usize,
    /// Auxiliary product variables (linear method only).
    pub link_variables: usize,
    pub constraints: usize,
    /// Raw pool size before aggregation.
    pub pool_size: usize,
}
