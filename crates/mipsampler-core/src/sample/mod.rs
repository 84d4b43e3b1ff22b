//! Samples and ranked sample sets.
//!
//! A [`SampleSet`] is ordered by ascending energy. Identical assignments are
//! merged by [`Aggregator`], which counts occurrences and keeps the lowest
//! energy seen for the group.

mod info;


use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use crate::error::{Result, SamplerError};
use crate::variable::Variable;
use crate::vartype::Vartype;

pub use info::{SampleSetInfo, SamplingWarning, SolveStatus};

/// Complete mapping from variable to value.
pub type Assignment<V> = BTreeMap<V, i8>;

/// Default relative tolerance for energy agreement between duplicates.
pub const DEFAULT_ENERGY_TOLERANCE: f64 = 1e-6;

/// One assignment with its energy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample<V: Variable> {
    pub assignment: Assignment<V>,
    pub energy: f64,
    /// Number of raw records that collapsed into this sample.
    pub num_occurrences: usize,
}

impl<V: Variable> Sample<V> {
    pub fn new(assignment: Assignment<V>, energy: f64) -> Self {
        Self {
            assignment,
            energy,
            num_occurrences: 1,
        }
    }

    /// Value of `v` in this sample.
    pub fn value(&self, v: &V) -> Option<i8> {
        self.assignment.get(v).copied()
    }

    fn convert(&mut self, from: Vartype, to: Vartype) {
        for value in self.assignment.values_mut() {
            if let Some(converted) = from.convert_value(*value, to) {
                *value = converted;
            }
        }
    }
}

/// Returns true if `a` and `b` agree within `tolerance`, scaled by their
/// magnitude once it exceeds 1.
pub fn energies_agree(a: f64, b: f64, tolerance: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= tolerance * scale
}

/// Merges identical assignments while preserving first-seen order.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use mipsampler_core::Aggregator;
///
/// let mut agg = Aggregator::new(1e-6);
/// agg.push(BTreeMap::from([("a", 1)]), 2.0);
/// agg.push(BTreeMap::from([("a", 0)]), 1.0);
/// agg.push(BTreeMap::from([("a", 1)]), 2.0);
///
/// let (samples, warnings) = agg.finish();
/// assert_eq!(samples.len(), 2);
/// assert_eq!(samples[0].energy, 1.0);
/// assert_eq!(samples[1].num_occurrences, 2);
/// assert!(warnings.is_empty());
/// ```
#[derive(Debug)]
pub struct Aggregator<V: Variable> {
    tolerance: f64,
    samples: Vec<Sample<V>>,
    groups: HashMap<Assignment<V>, usize>,
    warnings: Vec<SamplingWarning>,
}

impl<V: Variable> Aggregator<V> {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            samples: Vec::new(),
            groups: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    /// Records one raw assignment.
    pub fn push(&mut self, assignment: Assignment<V>, energy: f64) {
        match self.groups.entry(assignment) {
            Entry::Occupied(slot) => {
                let sample = &mut self.samples[*slot.get()];
                sample.num_occurrences += 1;
                if !energies_agree(sample.energy, energy, self.tolerance) {
                    let (kept, discarded) = if energy < sample.energy {
                        (energy, sample.energy)
                    } else {
                        (sample.energy, energy)
                    };
                    self.warnings
                        .push(SamplingWarning::EnergyMismatch { kept, discarded });
                }
                if energy < sample.energy {
                    sample.energy = energy;
                }
            }
            Entry::Vacant(slot) => {
                let assignment = slot.key().clone();
                slot.insert(self.samples.len());
                self.samples.push(Sample::new(assignment, energy));
            }
        }
    }

    /// Number of distinct assignments seen so far.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the merged samples sorted by ascending energy, plus any
    /// energy disagreements observed. Equal energies keep first-seen order.
    pub fn finish(self) -> (Vec<Sample<V>>, Vec<SamplingWarning>) {
        let mut samples = self.samples;
        samples.sort_by(|a, b| a.energy.total_cmp(&b.energy));
        (samples, self.warnings)
    }
}

/// An ordered collection of samples, lowest energy first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleSet<V: Variable> {
    samples: Vec<Sample<V>>,
    vartype: Vartype,
    warnings: Vec<SamplingWarning>,
    info: SampleSetInfo,
}

impl<V: Variable> SampleSet<V> {
    /// Creates an empty sample set.
    pub fn empty(vartype: Vartype) -> Self {
        Self {
            samples: Vec::new(),
            vartype,
            warnings: Vec::new(),
            info: SampleSetInfo::default(),
        }
    }

    /// Builds a sample set from raw `(assignment, energy)` records.
    ///
    /// Records are sorted by ascending energy. With `aggregate`, identical
    /// assignments are merged first.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError::InvalidArgument`] if any value is not
    /// admissible under `vartype`.
    pub fn from_samples(
        records: impl IntoIterator<Item = (Assignment<V>, f64)>,
        vartype: Vartype,
        aggregate: bool,
    ) -> Result<Self> {
        let mut aggregator = Aggregator::new(DEFAULT_ENERGY_TOLERANCE);
        let mut raw = Vec::new();
        for (assignment, energy) in records {
            if let Some((v, value)) = assignment.iter().find(|(_, &x)| !vartype.contains(x)) {
                return Err(SamplerError::invalid(format!(
                    "value {value} for variable {v} is not {vartype}"
                )));
            }
            if aggregate {
                aggregator.push(assignment, energy);
            } else {
                raw.push(Sample::new(assignment, energy));
            }
        }

        let (samples, warnings) = if aggregate {
            aggregator.finish()
        } else {
            raw.sort_by(|a, b| a.energy.total_cmp(&b.energy));
            (raw, Vec::new())
        };

        Ok(Self {
            samples,
            vartype,
            warnings,
            info: SampleSetInfo::default(),
        })
    }

    /// Wraps already-sorted samples produced by an [`Aggregator`].
    pub fn from_aggregated(samples: Vec<Sample<V>>, vartype: Vartype) -> Self {
        debug_assert!(samples.windows(2).all(|w| w[0].energy <= w[1].energy));
        Self {
            samples,
            vartype,
            warnings: Vec::new(),
            info: SampleSetInfo::default(),
        }
    }

    pub fn with_info(mut self, info: SampleSetInfo) -> Self {
        self.info = info;
        self
    }

    pub fn with_warnings(mut self, warnings: impl IntoIterator<Item = SamplingWarning>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    /// Returns an equivalent sample set under `target`. Energies are unchanged.
    pub fn change_vartype(mut self, target: Vartype) -> Self {
        if self.vartype != target {
            for sample in &mut self.samples {
                sample.convert(self.vartype, target);
            }
            self.vartype = target;
        }
        self
    }

    /// Keeps only the `n` lowest-energy samples.
    pub fn truncate(&mut self, n: usize) {
        self.samples.truncate(n);
    }

    /// The lowest-energy sample.
    pub fn first(&self) -> Option<&Sample<V>> {
        self.samples.first()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample<V>> {
        self.samples.iter()
    }

    pub fn samples(&self) -> &[Sample<V>] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<Sample<V>> {
        self.samples
    }

    pub fn energies(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.energy).collect()
    }

    /// Sum of occurrences over all samples.
    pub fn total_occurrences(&self) -> usize {
        self.samples.iter().map(|s| s.num_occurrences).sum()
    }

    pub fn vartype(&self) -> Vartype {
        self.vartype
    }

    pub fn warnings(&self) -> &[SamplingWarning] {
        &self.warnings
    }

    pub fn info(&self) -> &SampleSetInfo {
        &self.info
    }
}

impl<'a, V: Variable> IntoIterator for &'a SampleSet<V> {
    type Item = &'a Sample<V>;
    type IntoIter = std::slice::Iter<'a, Sample<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
