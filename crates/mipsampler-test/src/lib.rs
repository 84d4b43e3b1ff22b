//! Shared test fixtures for mipsampler crates.
//!
//! This crate only depends on `mipsampler-core` so that every other crate can
//! pull it in as a dev-dependency without cycles.
//!
//! - [`fixtures`] - small hand-written models with known optima
//! - [`random`] - seeded random models
//! - [`exact`] - brute-force reference sampler
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! mipsampler-test = { workspace = true }
//! ```

pub mod exact;
pub mod fixtures;
pub mod random;

pub use exact::{exact_samples, ground_state_energy};
pub use fixtures::{biased_spin_model, ferromagnetic_chain, frustrated_triangle, two_variable_model};
pub use random::random_model;
