//! Tests for sampler configuration.

use std::time::Duration;

use super::*;
use crate::options::{POOL_SEARCH_MODE, POOL_SOLUTION_LIMIT, THREAD_COUNT, VERBOSE_OUTPUT};

#[test]
fn test_defaults() {
    let config = SamplerConfig::default();
    assert_eq!(config.method, Method::Quadratic);
    assert_eq!(config.num_reads, 1);
    assert!(config.symmetry_breaking);

    let solver = &config.solver;
    assert!(!solver.verbose_output());
    assert_eq!(solver.time_limit(), Some(Duration::from_secs(60)));
    assert_eq!(solver.thread_count(), Some(12));
    assert_eq!(solver.cut_generation_level(), Some(1));
    assert_eq!(solver.search_focus(), Some(2));
    assert_eq!(solver.pool_search_mode(), Some(2));
    assert_eq!(solver.pool_solution_limit(), None);
}

#[test]
fn test_toml_parsing() {
    let toml = r#"
        method = "linear"
        num_reads = 8
        symmetry_breaking = false

        [solver]
        time_limit_seconds = 2.5
        thread_count = 4
        node_file_start = 0.5
    "#;

    let config = SamplerConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.method, Method::Linear);
    assert_eq!(config.num_reads, 8);
    assert!(!config.symmetry_breaking);
    assert_eq!(config.solver.time_limit(), Some(Duration::from_millis(2500)));
    assert_eq!(config.solver.thread_count(), Some(4));
    assert_eq!(config.solver.search_focus(), Some(2));
    assert_eq!(
        config.solver.get("node_file_start"),
        Some(&OptionValue::Float(0.5))
    );
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        method: quadratic
        num_reads: 3
        solver:
          verbose_output: true
          pool_search_mode: 1
    "#;

    let config = SamplerConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.method, Method::Quadratic);
    assert!(config.solver.verbose_output());
    assert_eq!(config.solver.pool_search_mode(), Some(1));
    assert_eq!(config.solver.thread_count(), Some(12));
}

#[test]
fn test_unknown_method_is_rejected() {
    let err = SamplerConfig::from_toml_str(r#"method = "annealing""#).unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_mistyped_recognized_option_is_rejected() {
    let err = SamplerConfig::from_toml_str(
        r#"
        [solver]
        thread_count = "many"
    "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_zero_reads_is_rejected() {
    let err = SamplerConfig::from_toml_str("num_reads = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_overrides_replace_defaults_and_pass_through_unknown() {
    let overrides = OptionOverrides::from([
        (THREAD_COUNT.to_string(), OptionValue::Int(1)),
        ("mip_gap".to_string(), OptionValue::Float(0.01)),
    ]);
    let merged = SolverOptions::default().merged(&overrides);

    assert_eq!(merged.thread_count(), Some(1));
    assert_eq!(merged.time_limit(), Some(Duration::from_secs(60)));
    let passthrough: Vec<_> = merged.passthrough().collect();
    assert_eq!(passthrough, vec![("mip_gap", &OptionValue::Float(0.01))]);
}

#[test]
fn test_set_default_does_not_override() {
    let mut options = SolverOptions::default().with(POOL_SOLUTION_LIMIT, 3usize);
    options.set_default(POOL_SOLUTION_LIMIT, 10usize);
    assert_eq!(options.pool_solution_limit(), Some(3));

    let mut options = SolverOptions::default();
    options.set_default(POOL_SOLUTION_LIMIT, 10usize);
    assert_eq!(options.pool_solution_limit(), Some(10));
}

#[test]
fn test_validate_ranges() {
    assert!(SolverOptions::default().validate().is_ok());
    assert!(SolverOptions::default()
        .with(POOL_SEARCH_MODE, 3)
        .validate()
        .is_err());
    assert!(SolverOptions::default()
        .with(POOL_SOLUTION_LIMIT, 0)
        .validate()
        .is_err());
    assert!(SolverOptions::default()
        .with(VERBOSE_OUTPUT, 1)
        .validate()
        .is_ok());
    assert!(SolverOptions::default()
        .with("anything", "goes")
        .validate()
        .is_ok());
}

#[test]
fn test_builder() {
    let config = SamplerConfig::new()
        .with_method(Method::Linear)
        .with_num_reads(5)
        .with_time_limit_seconds(10)
        .with_solver_option("seed", 7)
        .with_symmetry_breaking(false);

    assert_eq!(config.method, Method::Linear);
    assert_eq!(config.num_reads, 5);
    assert_eq!(config.solver.time_limit(), Some(Duration::from_secs(10)));
    assert_eq!(config.solver.get("seed"), Some(&OptionValue::Int(7)));
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_error_converts_to_invalid_argument() {
    let err: SamplerError = ConfigError::Invalid("bad".into()).into();
    assert!(err.is_invalid_argument());
}

#[test]
fn test_huge_time_limit_saturates() {
    let config = SamplerConfig::new().with_time_limit_seconds(u64::MAX);
    assert_eq!(
        config.solver.get(crate::options::TIME_LIMIT_SECONDS),
        Some(&OptionValue::Int(i64::MAX))
    );
    assert!(config.validate().is_ok());
}
