//! Global spin-flip symmetry breaking.
//!
//! A model whose `SPIN` encoding has no linear bias at all has the same
//! energy at an assignment and at its total complement. Pinning one decision
//! variable to 0 halves the search space without losing any energy level.
//!
//! Only the sufficient condition "every spin-encoded linear bias is exactly
//! zero" is checked. Partial or local symmetries are not detected.

use mipsampler_core::{QuadraticModel, SamplingWarning, Variable, Vartype};
use tracing::warn;

use crate::formulation::VariableMap;
use crate::model::{ConstraintSense, LinearConstraint, LinearExpr, SolverModel};

/// Returns the variable to pin if `model` has global spin-flip symmetry.
///
/// The designated variable is the first one in model order. A model with no
/// variables has nothing to pin.
///
/// # Examples
///
/// ```
/// use mipsampler_core::QuadraticModel;
/// use mipsampler_solver::symmetry::detect_spin_symmetry;
///
/// let symmetric = QuadraticModel::from_ising([], [((0, 1), 1.0)], 0.0).unwrap();
/// assert_eq!(detect_spin_symmetry(&symmetric), Some(&0));
///
/// let biased = QuadraticModel::from_ising([(1, 0.5)], [((0, 1), 1.0)], 0.0).unwrap();
/// assert_eq!(detect_spin_symmetry(&biased), None);
/// ```
pub fn detect_spin_symmetry<V: Variable>(model: &QuadraticModel<V>) -> Option<&V> {
    let spin_biases_zero = match model.vartype() {
        Vartype::Spin => model.iter_linear().all(|(_, h)| h == 0.0),
        Vartype::Binary => model.spin().iter_linear().all(|(_, h)| h == 0.0),
    };
    if spin_biases_zero {
        model.variables().first()
    } else {
        None
    }
}

/// Adds `x_v == 0` for the designated variable when the symmetry is present.
///
/// Returns the warning describing the pin, which is also logged.
pub fn break_spin_symmetry<V: Variable>(
    model: &QuadraticModel<V>,
    vars: &VariableMap<V>,
    solver: &mut SolverModel,
) -> Option<SamplingWarning> {
    let v = detect_spin_symmetry(model)?;
    let x = vars.decision(v)?;

    solver.add_linear_constraint(LinearConstraint::new(
        format!("symmetry_{v}"),
        LinearExpr::from(x),
        ConstraintSense::Equal,
        0.0,
    ));

    let warning = SamplingWarning::SymmetryDetected {
        variable: v.to_string(),
    };
    warn!(event = "symmetry_detected", variable = %v, "{warning}");
    Some(warning)
}

#[cfg(test)]
mod tests {
    use mipsampler_test::fixtures::{biased_spin_model, frustrated_triangle};

    use super::*;
    use crate::formulation::{EitherFormulation, Formulation};
    use mipsampler_core::Method;

    fn pins(model: &QuadraticModel<u32>) -> (SolverModel, Option<SamplingWarning>) {
        let binary = model.binary();
        let mut solver = SolverModel::new();
        let vars = EitherFormulation::for_method(Method::Quadratic).build(&binary, &mut solver);
        let warning = break_spin_symmetry(model, &vars, &mut solver);
        (solver, warning)
    }

    #[test]
    fn test_zero_field_model_gets_one_pin() {
        let (solver, warning) = pins(&frustrated_triangle());

        assert_eq!(solver.constraints().len(), 1);
        let pin = &solver.constraints()[0];
        assert_eq!(pin.sense, ConstraintSense::Equal);
        assert_eq!(pin.rhs, 0.0);
        assert_eq!(pin.expr.terms().len(), 1);
        assert_eq!(pin.expr.terms()[0].1, 1.0);
        assert_eq!(
            warning,
            Some(SamplingWarning::SymmetryDetected {
                variable: "0".into()
            })
        );
    }

    #[test]
    fn test_biased_model_is_left_alone() {
        let (solver, warning) = pins(&biased_spin_model());
        assert!(solver.constraints().is_empty());
        assert!(warning.is_none());
    }

    #[test]
    fn test_detection_works_from_binary_encoding() {
        let binary = frustrated_triangle().binary();
        assert_eq!(detect_spin_symmetry(&binary), Some(&0));
    }

    #[test]
    fn test_empty_model_has_nothing_to_pin() {
        let empty = QuadraticModel::<u32>::new(Vartype::Spin);
        assert_eq!(detect_spin_symmetry(&empty), None);
    }
}
