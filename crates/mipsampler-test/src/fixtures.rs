//! Small hand-written models with known optima.

use mipsampler_core::{QuadraticModel, Vartype};

/// `BINARY` model `x0 - x1 + 2 x0 x1 + 0.5`.
///
/// Energies: `(0,0) = 0.5`, `(0,1) = -0.5`, `(1,0) = 1.5`, `(1,1) = 2.5`.
/// Variables are inserted in the order `0, 1`.
pub fn two_variable_model() -> QuadraticModel<u32> {
    let mut model = QuadraticModel::new(Vartype::Binary);
    model.add_linear(0, 1.0);
    model.add_linear(1, -1.0);
    model
        .add_quadratic(0, 1, 2.0)
        .expect("distinct variables");
    model.set_offset(0.5);
    model
}

/// Antiferromagnetic `SPIN` triangle with zero fields.
///
/// Every ground state leaves exactly one edge unsatisfied, at energy -1.
/// There are six of them, closed under a global spin flip.
pub fn frustrated_triangle() -> QuadraticModel<u32> {
    QuadraticModel::from_ising(
        [(0, 0.0), (1, 0.0), (2, 0.0)],
        [((0, 1), 1.0), ((1, 2), 1.0), ((0, 2), 1.0)],
        0.0,
    )
    .expect("valid couplings")
}

/// Ferromagnetic `SPIN` chain `0 - 1 - ... - (n-1)` with zero fields.
///
/// The two ground states are all `+1` and all `-1`, at energy `-(n-1)`.
pub fn ferromagnetic_chain(n: u32) -> QuadraticModel<u32> {
    let h = (0..n).map(|v| (v, 0.0));
    let j = (1..n).map(|v| ((v - 1, v), -1.0));
    QuadraticModel::from_ising(h, j, 0.0).expect("valid couplings")
}

/// Two-spin `SPIN` model with nonzero fields and no spin-flip symmetry.
///
/// The unique ground state is `{0: -1, 1: -1}` at energy -1.25.
pub fn biased_spin_model() -> QuadraticModel<u32> {
    QuadraticModel::from_ising([(0, 0.5), (1, -0.25)], [((0, 1), -1.0)], 0.0)
        .expect("valid couplings")
}
