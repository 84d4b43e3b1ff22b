//! Sampling through the public API with file-style configuration.

use mipsampler::options::TIME_LIMIT_SECONDS;
use mipsampler::prelude::*;
use mipsampler::{SamplingWarning, SolveStatus};
use mipsampler_test::fixtures::{frustrated_triangle, two_variable_model};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

#[test]
fn test_toml_config_drives_defaults() {
    init_logging();
    let config = SamplerConfig::from_toml_str(
        r#"
        method = "mip"
        num_reads = 2

        [solver]
        time_limit_seconds = 5
        presolve = 1
        "#,
    )
    .unwrap();
    assert_eq!(config.method, Method::Linear);

    let sampler = MipSampler::with_config(ExhaustiveBackend::new(), config);
    let samples = sampler.sample_default(&two_variable_model()).unwrap();

    assert_eq!(samples.energies(), vec![-0.5, 0.5]);
    assert_eq!(samples.info().method, Some(Method::Linear));
    assert_eq!(samples.info().status, SolveStatus::Optimal);
}

#[test]
fn test_yaml_config_disables_symmetry_breaking() {
    init_logging();
    let config = SamplerConfig::from_yaml_str(
        "method: miqp\nnum_reads: 8\nsymmetry_breaking: false\n",
    )
    .unwrap();
    let sampler = MipSampler::with_config(ExhaustiveBackend::new(), config);

    let samples = sampler.sample_default(&frustrated_triangle()).unwrap();
    assert_eq!(samples.len(), 8);
    assert!(!samples
        .warnings()
        .iter()
        .any(|w| matches!(w, SamplingWarning::SymmetryDetected { .. })));
}

#[test]
fn test_string_keyed_models() {
    let mut model = QuadraticModel::new(Vartype::Binary);
    model.add_linear("a".to_string(), -1.0);
    model.add_linear("b".to_string(), -1.0);
    model
        .add_quadratic("a".to_string(), "b".to_string(), 3.0)
        .unwrap();

    let overrides = OptionOverrides::from([(TIME_LIMIT_SECONDS.to_string(), OptionValue::Int(1))]);
    let samples = MipSampler::new(ExhaustiveBackend::new())
        .sample(&model, Method::Quadratic, 4, &overrides)
        .unwrap();

    assert_eq!(samples.energies(), vec![-1.0, -1.0, 0.0, 1.0]);
    let best = samples.first().unwrap();
    assert_eq!(best.value(&"a".to_string()), Some(0));
    assert_eq!(best.value(&"b".to_string()), Some(1));
}

#[test]
fn test_invalid_config_is_reported() {
    let err = SamplerConfig::from_toml_str("num_reads = 0").unwrap_err();
    let err: SamplerError = err.into();
    assert!(err.is_invalid_argument());
}
