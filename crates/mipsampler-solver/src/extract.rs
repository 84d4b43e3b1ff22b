//! Reading pooled solutions back into samples.
//!
//! Every pooled solution becomes one binary assignment over the input
//! labels with `energy = objective + offset`. Identical assignments are
//! merged by an [`Aggregator`], and the result is sorted by energy.

use mipsampler_core::{
    Aggregator, Assignment, QuadraticModel, Result, Sample, SamplerError, SamplingWarning,
    Variable, Vartype,
};
use tracing::{trace, warn};

use crate::backend::SolutionPool;
use crate::formulation::VariableMap;

/// Tolerances applied while reading solver output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractOptions {
    /// Maximum distance from 0 or 1 for a value to count as binary.
    pub integrality_tolerance: f64,
    /// Relative tolerance for energies of identical assignments.
    pub energy_tolerance: f64,
}

/// Rounds a solver value to 0 or 1, or returns `None` if it is further
/// than `tolerance` from both.
///
/// # Examples
///
/// ```
/// use mipsampler_solver::extract::round_binary;
///
/// assert_eq!(round_binary(0.999_999_9, 1e-5), Some(1));
/// assert_eq!(round_binary(-1e-7, 1e-5), Some(0));
/// assert_eq!(round_binary(0.5, 1e-5), None);
/// assert_eq!(round_binary(f64::NAN, 1e-5), None);
/// ```
pub fn round_binary(value: f64, tolerance: f64) -> Option<i8> {
    let rounded = value.round();
    if (rounded == 0.0 || rounded == 1.0) && (value - rounded).abs() <= tolerance {
        Some(rounded as i8)
    } else {
        None
    }
}

/// Turns every pooled solution into an aggregated, energy-sorted sample list.
///
/// `model` must be the `BINARY` model the solver model was built from; its
/// offset is added to each pooled objective value.
///
/// # Errors
///
/// Returns [`SamplerError::SolverOutput`] if a decision variable is missing
/// from a pooled solution or its value is not binary within tolerance.
pub fn extract_samples<V: Variable>(
    pool: &SolutionPool,
    model: &QuadraticModel<V>,
    vars: &VariableMap<V>,
    options: ExtractOptions,
) -> Result<(Vec<Sample<V>>, Vec<SamplingWarning>)> {
    debug_assert_eq!(model.vartype(), Vartype::Binary);

    let mut aggregator = Aggregator::new(options.energy_tolerance);
    for index in 0..pool.count() {
        let mut assignment = Assignment::new();
        for v in model.variables() {
            let var = vars.decision(v).ok_or_else(|| {
                SamplerError::SolverOutput(format!("variable {v} has no decision variable"))
            })?;
            let raw = pool.value_of(index, var).ok_or_else(|| {
                SamplerError::SolverOutput(format!(
                    "solution {index} has no value for variable {v}"
                ))
            })?;
            let value = round_binary(raw, options.integrality_tolerance).ok_or_else(|| {
                SamplerError::SolverOutput(format!(
                    "solution {index} assigns {raw} to variable {v}, which is not binary \
                     within {}",
                    options.integrality_tolerance
                ))
            })?;
            assignment.insert(v.clone(), value);
        }

        let objective = pool.objective_value(index).ok_or_else(|| {
            SamplerError::SolverOutput(format!("solution {index} has no objective value"))
        })?;
        let energy = objective + model.offset();
        trace!(solution = index, objective, energy, "read pooled solution");
        aggregator.push(assignment, energy);
    }

    let (samples, warnings) = aggregator.finish();
    for warning in &warnings {
        warn!(event = "energy_mismatch", "{warning}");
    }
    Ok((samples, warnings))
}

#[cfg(test)]
mod tests {
    use mipsampler_core::{Method, SolveStatus};
    use mipsampler_test::fixtures::two_variable_model;

    use super::*;
    use crate::formulation::{EitherFormulation, Formulation};
    use crate::model::SolverModel;

    const OPTIONS: ExtractOptions = ExtractOptions {
        integrality_tolerance: 1e-5,
        energy_tolerance: 1e-6,
    };

    fn build(method: Method) -> (QuadraticModel<u32>, VariableMap<u32>) {
        let model = two_variable_model();
        let mut solver = SolverModel::new();
        let vars = EitherFormulation::for_method(method).build(&model, &mut solver);
        (model, vars)
    }

    #[test]
    fn test_duplicates_collapse_with_occurrences() {
        let (model, vars) = build(Method::Quadratic);
        let pool = SolutionPool::new(SolveStatus::Optimal)
            .with_solution(vec![0.0, 1.0], -1.0)
            .with_solution(vec![1.0, 0.0], 1.0)
            .with_solution(vec![1e-7, 0.999_999_5], -1.0);

        let (samples, warnings) = extract_samples(&pool, &model, &vars, OPTIONS).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].assignment, Assignment::from([(0, 0), (1, 1)]));
        assert_eq!(samples[0].num_occurrences, 2);
        assert_eq!(samples[0].energy, -0.5);
        assert_eq!(samples[1].energy, 1.5);
    }

    #[test]
    fn test_link_values_are_not_read() {
        let (model, vars) = build(Method::Linear);
        // third column is the link variable; garbage there is irrelevant
        let pool = SolutionPool::new(SolveStatus::Optimal).with_solution(vec![1.0, 1.0, 0.5], 2.0);

        let (samples, _) = extract_samples(&pool, &model, &vars, OPTIONS).unwrap();
        assert_eq!(samples[0].energy, 2.5);
    }

    #[test]
    fn test_fractional_value_is_rejected() {
        let (model, vars) = build(Method::Quadratic);
        let pool = SolutionPool::new(SolveStatus::Optimal).with_solution(vec![0.5, 1.0], 0.0);

        let err = extract_samples(&pool, &model, &vars, OPTIONS).unwrap_err();
        assert!(matches!(err, SamplerError::SolverOutput(_)));
    }

    #[test]
    fn test_missing_value_is_rejected() {
        let (model, vars) = build(Method::Quadratic);
        let pool = SolutionPool::new(SolveStatus::Optimal).with_solution(vec![0.0], 0.0);

        let err = extract_samples(&pool, &model, &vars, OPTIONS).unwrap_err();
        assert!(matches!(err, SamplerError::SolverOutput(_)));
    }

    #[test]
    fn test_disagreeing_duplicates_warn_and_keep_minimum() {
        let (model, vars) = build(Method::Quadratic);
        let pool = SolutionPool::new(SolveStatus::TimeLimit)
            .with_solution(vec![1.0, 1.0], 2.0)
            .with_solution(vec![1.0, 1.0], 1.0);

        let (samples, warnings) = extract_samples(&pool, &model, &vars, OPTIONS).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].energy, 1.5);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_empty_pool_gives_no_samples() {
        let (model, vars) = build(Method::Quadratic);
        let pool = SolutionPool::new(SolveStatus::Infeasible);
        let (samples, warnings) = extract_samples(&pool, &model, &vars, OPTIONS).unwrap();
        assert!(samples.is_empty());
        assert!(warnings.is_empty());
    }
}
