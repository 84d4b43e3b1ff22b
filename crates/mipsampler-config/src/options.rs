//! Solver-level option map.
//!
//! Options are an ordered `name -> value` map. A fresh [`SolverOptions`]
//! carries the documented defaults; caller overrides replace entries of the
//! same name and any name the sampler does not recognize is passed through
//! to the backend untouched.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Controls solver console output.
pub const VERBOSE_OUTPUT: &str = "verbose_output";
/// Wall-clock cap on the solve, in seconds.
pub const TIME_LIMIT_SECONDS: &str = "time_limit_seconds";
/// Parallelism hint for the backend.
pub const THREAD_COUNT: &str = "thread_count";
/// Cutting-plane aggressiveness.
pub const CUT_GENERATION_LEVEL: &str = "cut_generation_level";
/// Heuristic focus (feasibility vs. optimality bias).
pub const SEARCH_FOCUS: &str = "search_focus";
/// 0 asks only for the optimum; 1 and 2 ask for up to `pool_solution_limit`
/// solutions. How 1 differs from 2 is up to the backend.
pub const POOL_SEARCH_MODE: &str = "pool_search_mode";
/// Maximum number of pooled solutions returned.
pub const POOL_SOLUTION_LIMIT: &str = "pool_solution_limit";

/// Keys the sampler understands and type-checks.
pub const RECOGNIZED_KEYS: [&str; 7] = [
    VERBOSE_OUTPUT,
    TIME_LIMIT_SECONDS,
    THREAD_COUNT,
    CUT_GENERATION_LEVEL,
    SEARCH_FOCUS,
    POOL_SEARCH_MODE,
    POOL_SOLUTION_LIMIT,
];

/// Caller-supplied overrides, merged over the configured options per call.
pub type OptionOverrides = BTreeMap<String, OptionValue>;

/// A single option value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl OptionValue {
    /// Booleans, plus the integers 0 and 1.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            OptionValue::Bool(b) => Some(b),
            OptionValue::Int(0) => Some(false),
            OptionValue::Int(1) => Some(true),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            OptionValue::Int(i) => Some(i),
            _ => None,
        }
    }

    /// Floats, plus integers widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            OptionValue::Int(i) => Some(i as f64),
            OptionValue::Float(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Int(i) => write!(f, "{i}"),
            OptionValue::Float(x) => write!(f, "{x}"),
            OptionValue::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<i64> for OptionValue {
    fn from(i: i64) -> Self {
        OptionValue::Int(i)
    }
}

impl From<i32> for OptionValue {
    fn from(i: i32) -> Self {
        OptionValue::Int(i64::from(i))
    }
}

impl From<u32> for OptionValue {
    fn from(i: u32) -> Self {
        OptionValue::Int(i64::from(i))
    }
}

impl From<usize> for OptionValue {
    fn from(i: usize) -> Self {
        OptionValue::Int(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl From<f64> for OptionValue {
    fn from(x: f64) -> Self {
        OptionValue::Float(x)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Str(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Str(s)
    }
}

/// Ordered solver option map with defaults.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use mipsampler_config::{OptionOverrides, OptionValue, SolverOptions};
///
/// let defaults = SolverOptions::default();
/// assert_eq!(defaults.time_limit(), Some(Duration::from_secs(60)));
/// assert_eq!(defaults.thread_count(), Some(12));
///
/// let overrides = OptionOverrides::from([
///     ("time_limit_seconds".to_string(), OptionValue::Int(1)),
///     ("presolve".to_string(), OptionValue::Int(2)),
/// ]);
/// let merged = defaults.merged(&overrides);
/// assert_eq!(merged.time_limit(), Some(Duration::from_secs(1)));
/// assert_eq!(merged.get("presolve"), Some(&OptionValue::Int(2)));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(
    from = "BTreeMap<String, OptionValue>",
    into = "BTreeMap<String, OptionValue>"
)]
pub struct SolverOptions {
    values: BTreeMap<String, OptionValue>,
}

impl Default for SolverOptions {
    fn default() -> Self {
        let mut options = Self::empty();
        options.set(VERBOSE_OUTPUT, false);
        options.set(TIME_LIMIT_SECONDS, 60);
        options.set(THREAD_COUNT, 12);
        options.set(CUT_GENERATION_LEVEL, 1);
        options.set(SEARCH_FOCUS, 2);
        options.set(POOL_SEARCH_MODE, 2);
        options
    }
}

impl From<BTreeMap<String, OptionValue>> for SolverOptions {
    /// Overlays `values` on the defaults.
    fn from(values: BTreeMap<String, OptionValue>) -> Self {
        Self::default().merged(&values)
    }
}

impl From<SolverOptions> for BTreeMap<String, OptionValue> {
    fn from(options: SolverOptions) -> Self {
        options.values
    }
}

impl SolverOptions {
    /// Creates options populated with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options with no entries at all.
    pub fn empty() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Sets an option, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder form of [`SolverOptions::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets an option only if it is not present yet.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.values.entry(key.into()).or_insert_with(|| value.into());
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries the sampler does not interpret.
    pub fn passthrough(&self) -> impl Iterator<Item = (&str, &OptionValue)> + '_ {
        self.iter().filter(|(k, _)| !is_recognized(k))
    }

    /// Replaces entries with `overrides`, keeping everything else.
    pub fn merge(&mut self, overrides: &OptionOverrides) {
        for (key, value) in overrides {
            if !is_recognized(key) {
                tracing::debug!(option = %key, value = %value, "passing through unrecognized solver option");
            }
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Returns a copy with `overrides` applied.
    pub fn merged(&self, overrides: &OptionOverrides) -> Self {
        let mut out = self.clone();
        out.merge(overrides);
        out
    }

    /// Type-checks every recognized key. Unrecognized keys are not inspected.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in &self.values {
            let ok = match key.as_str() {
                VERBOSE_OUTPUT => value.as_bool().is_some(),
                TIME_LIMIT_SECONDS => value.as_f64().is_some_and(|x| x >= 0.0 && x.is_finite()),
                THREAD_COUNT => value.as_i64().is_some_and(|n| n >= 0),
                CUT_GENERATION_LEVEL | SEARCH_FOCUS => value.as_i64().is_some(),
                POOL_SEARCH_MODE => value.as_i64().is_some_and(|m| (0..=2).contains(&m)),
                POOL_SOLUTION_LIMIT => value.as_i64().is_some_and(|n| n > 0),
                _ => true,
            };
            if !ok {
                return Err(ConfigError::Invalid(format!(
                    "solver option '{key}' has unsupported value {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn verbose_output(&self) -> bool {
        self.get(VERBOSE_OUTPUT)
            .and_then(OptionValue::as_bool)
            .unwrap_or(false)
    }

    /// The wall-clock limit, if one is set.
    pub fn time_limit(&self) -> Option<Duration> {
        self.get(TIME_LIMIT_SECONDS)
            .and_then(OptionValue::as_f64)
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    pub fn thread_count(&self) -> Option<usize> {
        self.get_usize(THREAD_COUNT)
    }

    pub fn cut_generation_level(&self) -> Option<i64> {
        self.get(CUT_GENERATION_LEVEL).and_then(OptionValue::as_i64)
    }

    pub fn search_focus(&self) -> Option<i64> {
        self.get(SEARCH_FOCUS).and_then(OptionValue::as_i64)
    }

    pub fn pool_search_mode(&self) -> Option<i64> {
        self.get(POOL_SEARCH_MODE).and_then(OptionValue::as_i64)
    }

    pub fn pool_solution_limit(&self) -> Option<usize> {
        self.get_usize(POOL_SOLUTION_LIMIT)
    }

    fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key)
            .and_then(OptionValue::as_i64)
            .and_then(|n| usize::try_from(n).ok())
    }
}

/// Returns true if the sampler interprets `key` itself.
pub fn is_recognized(key: &str) -> bool {
    RECOGNIZED_KEYS.contains(&key)
}
