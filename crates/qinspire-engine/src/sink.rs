//! Where measurement results go.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use qinspire_ir::QubitId;
use rustc_hash::FxHashMap;

/// Receives the measured value of each logical qubit after a run.
pub trait MeasurementSink: Send + Sync {
    /// Record the measured value of `qubit`.
    fn set_measurement_result(&self, qubit: QubitId, value: bool);
}

impl<S: MeasurementSink + ?Sized> MeasurementSink for Arc<S> {
    fn set_measurement_result(&self, qubit: QubitId, value: bool) {
        (**self).set_measurement_result(qubit, value);
    }
}

/// Thread-safe in-memory sink.
#[derive(Debug, Default)]
pub struct MeasurementStore {
    results: Mutex<FxHashMap<QubitId, bool>>,
}

impl MeasurementStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last recorded value of `qubit`.
    pub fn get(&self, qubit: QubitId) -> Option<bool> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&qubit)
            .copied()
    }

    /// All recorded values, ordered by qubit id.
    pub fn snapshot(&self) -> BTreeMap<QubitId, bool> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(&q, &v)| (q, v))
            .collect()
    }

    /// Number of qubits with a recorded value.
    pub fn len(&self) -> usize {
        self.results.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget all values.
    pub fn clear(&self) {
        self.results.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl MeasurementSink for MeasurementStore {
    fn set_measurement_result(&self, qubit: QubitId, value: bool) {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(qubit, value);
    }
}
