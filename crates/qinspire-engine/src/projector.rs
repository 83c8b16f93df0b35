//! Mapping outcomes back to the caller's qubit order.

use std::collections::BTreeMap;

use qinspire_ir::{QubitId, QubitMapping};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::histogram::Distribution;

/// Physical positions of `qubits`, checked against the outcome width.
///
/// A position the outcome does not cover cannot be read, so the qubit is
/// reported as unresolved just like an unmapped one.
fn positions(
    qubits: &[QubitId],
    mapping: &dyn QubitMapping,
    width: usize,
) -> EngineResult<Vec<usize>> {
    qubits
        .iter()
        .map(|&q| {
            let physical = mapping.resolve(q)? as usize;
            if physical >= width {
                debug!("{q} sits at physical position {physical}, outside the {width}-qubit result");
                return Err(EngineError::UnresolvedQubit(q));
            }
            Ok(physical)
        })
        .collect()
}

/// Probabilities over the bits of `qubits`, in the order given.
///
/// The first requested qubit is the leftmost character of every key.
/// Outcomes that agree on the requested bits are summed.
pub fn project(
    distribution: &Distribution,
    qubits: &[QubitId],
    mapping: &dyn QubitMapping,
) -> EngineResult<BTreeMap<String, f64>> {
    if distribution.is_empty() {
        return Err(EngineError::PrematureRead("run the circuit first"));
    }
    let positions = positions(qubits, mapping, distribution.width())?;

    let mut projected = BTreeMap::new();
    for (state, probability) in distribution.iter() {
        let bytes = state.as_bytes();
        let key: String = positions.iter().map(|&p| char::from(bytes[p])).collect();
        *projected.entry(key).or_insert(0.0) += probability;
    }
    Ok(projected)
}

/// The bit of each measured qubit in a sampled outcome.
pub fn measured_bits(
    sampled: &str,
    measured: &[QubitId],
    mapping: &dyn QubitMapping,
) -> EngineResult<Vec<(QubitId, bool)>> {
    let positions = positions(measured, mapping, sampled.len())?;
    let bytes = sampled.as_bytes();
    Ok(measured
        .iter()
        .zip(positions)
        .map(|(&q, p)| (q, bytes[p] == b'1'))
        .collect())
}
