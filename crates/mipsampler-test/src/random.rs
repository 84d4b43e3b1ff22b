//! Seeded random models.

use mipsampler_core::{QuadraticModel, Vartype};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A random model over variables `0..n`.
///
/// Each pair interacts with probability `density`. Biases and the offset are
/// multiples of 0.25 in `[-2, 2]`, so energies are exact in `f64` and can be
/// compared with `==` across encodings.
pub fn random_model(seed: u64, n: u32, density: f64, vartype: Vartype) -> QuadraticModel<u32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut model = QuadraticModel::new(vartype);

    for v in 0..n {
        model.add_linear(v, quarter(&mut rng));
    }
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.random_bool(density) {
                let bias = quarter(&mut rng);
                model
                    .add_quadratic(u, v, bias)
                    .expect("distinct variables");
            }
        }
    }
    model.set_offset(quarter(&mut rng));
    model
}

fn quarter(rng: &mut ChaCha8Rng) -> f64 {
    f64::from(rng.random_range(-8i32..=8)) / 4.0
}
