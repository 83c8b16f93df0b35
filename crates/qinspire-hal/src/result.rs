//! Raw execution results.
//!
//! An executor reports an outcome histogram keyed by register value: the
//! integer whose binary representation, most significant qubit first, is
//! the measured register. Weights are either raw counts or fractions of
//! the shot count.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};
use crate::job::Job;

/// Weight of one histogram entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Weight {
    /// Number of shots that produced the outcome.
    Count(u64),
    /// Fraction of all shots that produced the outcome.
    Fraction(f64),
}

impl Weight {
    /// Convert to a shot count. Fractions are scaled by `shots` and rounded.
    ///
    /// Returns `None` for negative or non-finite fractions.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn to_count(self, shots: u32) -> Option<u64> {
        match self {
            Weight::Count(count) => Some(count),
            Weight::Fraction(f) if f.is_finite() && f >= 0.0 => {
                Some((f * f64::from(shots)).round() as u64)
            }
            Weight::Fraction(_) => None,
        }
    }
}

impl From<u64> for Weight {
    fn from(count: u64) -> Self {
        Weight::Count(count)
    }
}

impl From<f64> for Weight {
    fn from(fraction: f64) -> Self {
        Weight::Fraction(fraction)
    }
}

/// Outcome histogram keyed by register value.
///
/// Serializes as a map from decimal register value to weight, the shape the
/// Quantum Inspire API returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Weight>",
    into = "BTreeMap<String, Weight>"
)]
pub struct Histogram {
    entries: Vec<(u64, Weight)>,
}

impl Histogram {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(register value, weight)` pairs.
    pub fn from_registers<W: Into<Weight>>(iter: impl IntoIterator<Item = (u64, W)>) -> Self {
        Self {
            entries: iter.into_iter().map(|(r, w)| (r, w.into())).collect(),
        }
    }

    /// Build from binary outcome strings, most significant qubit first.
    pub fn from_bitstrings<'a, W: Into<Weight>>(
        iter: impl IntoIterator<Item = (&'a str, W)>,
    ) -> HalResult<Self> {
        let mut histogram = Self::new();
        for (bits, weight) in iter {
            let register = u64::from_str_radix(bits, 2).map_err(|_| {
                HalError::MalformedResult(format!("'{bits}' is not a binary outcome"))
            })?;
            histogram.push(register, weight);
        }
        Ok(histogram)
    }

    /// Append an entry.
    pub fn push(&mut self, register: u64, weight: impl Into<Weight>) {
        self.entries.push((register, weight.into()));
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, Weight)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the histogram has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<BTreeMap<String, Weight>> for Histogram {
    type Error = HalError;

    fn try_from(map: BTreeMap<String, Weight>) -> HalResult<Self> {
        let mut histogram = Self::new();
        for (key, weight) in map {
            let register = key.trim().parse::<u64>().map_err(|_| {
                HalError::MalformedResult(format!("'{key}' is not a register value"))
            })?;
            histogram.push(register, weight);
        }
        Ok(histogram)
    }
}

impl From<Histogram> for BTreeMap<String, Weight> {
    fn from(histogram: Histogram) -> Self {
        histogram
            .entries
            .into_iter()
            .map(|(r, w)| (r.to_string(), w))
            .collect()
    }
}

/// What an executor returns for one program.
#[derive(Debug, Clone, Default)]
pub struct RawResult {
    /// Outcome histogram.
    pub histogram: Histogram,
    /// Raw backend output, kept for diagnostics.
    pub raw_text: String,
    /// Register width the backend reports, if any.
    pub number_of_qubits: Option<u32>,
    /// The remote job that produced the result, if any.
    pub job: Option<Job>,
}

impl RawResult {
    /// Create a result from a histogram.
    pub fn new(histogram: Histogram) -> Self {
        Self {
            histogram,
            ..Self::default()
        }
    }

    /// Attach the raw backend output.
    #[must_use]
    pub fn with_raw_text(mut self, raw_text: impl Into<String>) -> Self {
        self.raw_text = raw_text.into();
        self
    }

    /// Attach the reported register width.
    #[must_use]
    pub fn with_number_of_qubits(mut self, n: u32) -> Self {
        self.number_of_qubits = Some(n);
        self
    }

    /// Attach the job record.
    #[must_use]
    pub fn with_job(mut self, job: Job) -> Self {
        self.job = Some(job);
        self
    }
}

/// Measurement counts keyed by bitstring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create counts from `(bitstring, count)` pairs, summing duplicates.
    pub fn from_pairs(iter: impl IntoIterator<Item = (impl Into<String>, u64)>) -> Self {
        let mut counts = Self::new();
        for (k, v) in iter {
            counts.insert(k, v);
        }
        counts
    }

    /// Add to the count of a bitstring.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_default() += count;
    }

    /// Count for a bitstring.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Iterate over `(bitstring, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    /// Sum of all counts.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// The most frequent bitstring.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        self.counts.iter().max_by_key(|&(_, count)| count)
    }

    /// Counts sorted by count, descending, then by bitstring.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut items: Vec<_> = self.counts.iter().collect();
        items.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        items
    }

    /// Number of distinct bitstrings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether there are no counts.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
