//! Histogram interpretation and outcome sampling.
//!
//! Executors report outcomes as register values whose binary form lists the
//! most significant qubit first. The caller's convention is the opposite:
//! character `i` of an outcome string is the bit of physical qubit `i`. The
//! interpreter therefore reverses every padded key exactly once.

use std::collections::BTreeMap;

use qinspire_hal::Histogram;
use rand::Rng;
use tracing::warn;

use crate::error::{EngineError, EngineResult};

/// Convert a raw histogram into zero-padded binary keys with shot counts.
///
/// Keys are `width` characters long, most significant qubit first. Fractional
/// weights are scaled by `shots` and rounded. Entries that map onto the same
/// key are summed.
pub fn format_histogram(
    histogram: &Histogram,
    width: u32,
    shots: u32,
) -> EngineResult<BTreeMap<String, u64>> {
    let mut counts = BTreeMap::new();
    for (register, weight) in histogram.iter() {
        if width < 64 && register >> width != 0 {
            return Err(EngineError::BackendResult(format!(
                "register value {register} does not fit in {width} qubits"
            )));
        }
        let count = weight.to_count(shots).ok_or_else(|| {
            EngineError::BackendResult(format!(
                "invalid weight {weight:?} for register value {register}"
            ))
        })?;
        let key = format!("{register:0w$b}", w = width as usize);
        *counts.entry(key).or_insert(0) += count;
    }
    Ok(counts)
}

/// Outcome probabilities in the caller's bit order.
///
/// Iteration order is the lexicographic order of the outcome strings; the
/// sampler walks the distribution in this order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distribution {
    probabilities: BTreeMap<String, f64>,
    width: usize,
}

impl Distribution {
    /// Build from MSB-first counts as produced by [`format_histogram`].
    ///
    /// Each key is reversed and its probability is its count divided by the
    /// sum of all counts, not by `shots`. Rounded fractional weights rarely
    /// add up to exactly `shots`, and dividing by the actual sum keeps the
    /// probabilities summing to one. A mismatch is logged as a warning.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_counts(counts: &BTreeMap<String, u64>, shots: u32) -> EngineResult<Self> {
        let total: u64 = counts.values().sum();
        if total == 0 {
            return Err(EngineError::BackendResult(
                "histogram has no outcome with a non-zero count".into(),
            ));
        }
        if total != u64::from(shots) {
            warn!(total, shots, "histogram total differs from shot count");
        }

        let mut probabilities = BTreeMap::new();
        let mut width = 0;
        for (state, &count) in counts {
            let reversed: String = state.chars().rev().collect();
            width = width.max(reversed.len());
            *probabilities.entry(reversed).or_insert(0.0) += count as f64 / total as f64;
        }
        Ok(Self {
            probabilities,
            width,
        })
    }

    /// Probability of an outcome string, zero if absent.
    pub fn get(&self, state: &str) -> f64 {
        self.probabilities.get(state).copied().unwrap_or(0.0)
    }

    /// Iterate over `(outcome, probability)` in sampling order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.probabilities.iter().map(|(s, &p)| (s.as_str(), p))
    }

    /// Number of outcomes.
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// Whether there are no outcomes.
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Length of the outcome strings.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Sum of all probabilities.
    pub fn total(&self) -> f64 {
        self.probabilities.values().sum()
    }

    /// The underlying map.
    pub fn as_map(&self) -> &BTreeMap<String, f64> {
        &self.probabilities
    }

    /// Draw one outcome by inverse-CDF sampling.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.select(rng.r#gen::<f64>())
    }

    /// The first outcome whose cumulative probability reaches `p`.
    ///
    /// Outcomes with zero probability are never selected. If rounding keeps
    /// the cumulative sum below `p`, the last non-zero outcome is returned.
    pub fn select(&self, p: f64) -> Option<&str> {
        let mut cumulative = 0.0;
        let mut last = None;
        for (state, probability) in self.iter() {
            if probability <= 0.0 {
                continue;
            }
            cumulative += probability;
            last = Some(state);
            if cumulative >= p {
                return Some(state);
            }
        }
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use qinspire_hal::Weight;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_format_histogram_pads_and_scales() {
        let h = Histogram::from_registers([(0u64, 0.25f64), (3, 0.75)]);
        let counts = format_histogram(&h, 4, 1000).unwrap();
        assert_eq!(counts.get("0000"), Some(&250));
        assert_eq!(counts.get("0011"), Some(&750));
    }

    #[test]
    fn test_format_histogram_counts_pass_through() {
        let h = Histogram::from_registers([(1u64, 7u64)]);
        let counts = format_histogram(&h, 2, 1024).unwrap();
        assert_eq!(counts.get("01"), Some(&7));
    }

    #[test]
    fn test_format_histogram_rejects_wide_register() {
        let h = Histogram::from_registers([(4u64, 1u64)]);
        let err = format_histogram(&h, 2, 1).unwrap_err();
        assert!(matches!(err, EngineError::BackendResult(_)));
    }

    #[test]
    fn test_format_histogram_rejects_bad_weight() {
        let mut h = Histogram::new();
        h.push(0, Weight::Fraction(-1.0));
        assert!(format_histogram(&h, 1, 10).is_err());
    }

    #[test]
    fn test_reversal_applied_once() {
        let counts = BTreeMap::from([("001".to_string(), 3u64), ("110".to_string(), 1)]);
        let dist = Distribution::from_counts(&counts, 4).unwrap();
        assert_eq!(dist.get("100"), 0.75);
        assert_eq!(dist.get("011"), 0.25);
        assert_eq!(dist.get("001"), 0.0);
        assert_eq!(dist.width(), 3);
    }

    #[test]
    fn test_normalizes_by_total_count_not_shots() {
        let third = 1.0 / 3.0;
        let h = Histogram::from_registers([(0u64, third), (1, third), (2, third)]);
        let counts = format_histogram(&h, 2, 1024).unwrap();
        assert_eq!(counts.values().sum::<u64>(), 1023);
        let dist = Distribution::from_counts(&counts, 1024).unwrap();
        assert!((dist.total() - 1.0).abs() < 1e-12);
        for state in ["00", "10", "01"] {
            assert!((dist.get(state) - third).abs() < 1e-12, "{state}");
        }
    }

    #[test]
    fn test_all_zero_counts_rejected() {
        let counts = BTreeMap::from([("0".to_string(), 0u64)]);
        assert!(Distribution::from_counts(&counts, 10).is_err());
    }

    #[test]
    fn test_select_walks_cdf() {
        let counts = BTreeMap::from([("00".to_string(), 1u64), ("11".to_string(), 3)]);
        let dist = Distribution::from_counts(&counts, 4).unwrap();
        assert_eq!(dist.select(0.0), Some("00"));
        assert_eq!(dist.select(0.25), Some("00"));
        assert_eq!(dist.select(0.2500001), Some("11"));
        assert_eq!(dist.select(0.999_999), Some("11"));
    }

    #[test]
    fn test_select_skips_zero_mass() {
        let counts = BTreeMap::from([("00".to_string(), 0u64), ("01".to_string(), 5)]);
        let dist = Distribution::from_counts(&counts, 5).unwrap();
        assert_eq!(dist.select(0.0), Some("10"));
    }

    #[test]
    fn test_select_falls_back_to_last_nonzero() {
        let counts = BTreeMap::from([("0".to_string(), 1u64), ("1".to_string(), 1)]);
        let dist = Distribution::from_counts(&counts, 2).unwrap();
        assert_eq!(dist.select(1.5), Some("1"));
    }

    #[test]
    fn test_certain_outcome_always_sampled() {
        let h = Histogram::from_registers([(2u64, 1.0f64)]);
        let counts = format_histogram(&h, 3, 1024).unwrap();
        let dist = Distribution::from_counts(&counts, 1024).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert_eq!(dist.sample(&mut rng), Some("010"));
        }
    }

    proptest! {
        #[test]
        fn prop_probabilities_sum_to_one(
            width in 1u32..=16,
            raw in prop::collection::vec((any::<u64>(), 0u64..10_000), 1..64),
        ) {
            let mask = (1u64 << width) - 1;
            let h = Histogram::from_registers(raw.iter().map(|&(r, c)| (r & mask, c.max(1))));
            let counts = format_histogram(&h, width, 1024).unwrap();
            let dist = Distribution::from_counts(&counts, 1024).unwrap();
            prop_assert!((dist.total() - 1.0).abs() < 1e-9);
            prop_assert!(dist.iter().all(|(s, _)| s.len() == width as usize));
        }

        #[test]
        fn prop_sample_has_mass(
            raw in prop::collection::vec((0u64..16, 0u64..100), 1..16),
            seed in any::<u64>(),
        ) {
            let h = Histogram::from_registers(raw.iter().copied());
            prop_assume!(raw.iter().any(|&(_, c)| c > 0));
            let counts = format_histogram(&h, 4, 100).unwrap();
            let dist = Distribution::from_counts(&counts, 100).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let sampled = dist.sample(&mut rng).unwrap();
            prop_assert!(dist.get(sampled) > 0.0);
        }
    }
}
