//! Brute-force reference sampler.

use mipsampler_core::{Assignment, QuadraticModel, Variable};

/// Every assignment of `model` with its energy, lowest first.
///
/// Ties keep enumeration order, where the first variable changes slowest
/// and the lower value of the vartype comes first. Intended for models with
/// at most ~20 variables.
pub fn exact_samples<V: Variable>(model: &QuadraticModel<V>) -> Vec<(Assignment<V>, f64)> {
    let variables = model.variables();
    let n = variables.len();
    let [low, high] = model.vartype().values();

    let mut samples = Vec::with_capacity(1 << n);
    for bits in 0u64..(1 << n) {
        let assignment: Assignment<V> = variables
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let set = bits >> (n - 1 - i) & 1 == 1;
                (v.clone(), if set { high } else { low })
            })
            .collect();
        let energy = model
            .energy(&assignment)
            .expect("assignment covers every variable");
        samples.push((assignment, energy));
    }
    samples.sort_by(|a, b| a.1.total_cmp(&b.1));
    samples
}

/// Lowest energy of `model`, or `None` for a model without variables.
pub fn ground_state_energy<V: Variable>(model: &QuadraticModel<V>) -> Option<f64> {
    if model.is_empty() {
        return None;
    }
    exact_samples(model).first().map(|(_, e)| *e)
}
