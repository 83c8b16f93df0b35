//! Live-qubit bookkeeping for the program being built.

use qinspire_ir::QubitId;
use rustc_hash::FxHashSet;

/// Tracks the live logical qubits and the highest id ever allocated.
///
/// The maximum is monotonic between resets: deallocation never shrinks the
/// register the program declares.
#[derive(Debug, Clone, Default)]
pub struct AllocationLedger {
    live: FxHashSet<QubitId>,
    max_id: Option<QubitId>,
}

impl AllocationLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an allocation.
    pub fn allocate(&mut self, id: QubitId) {
        self.live.insert(id);
        self.max_id = Some(self.max_id.map_or(id, |max| max.max(id)));
    }

    /// Record a deallocation. The maximum is left untouched.
    pub fn deallocate(&mut self, id: QubitId) {
        self.live.remove(&id);
    }

    /// Forget everything.
    pub fn reset(&mut self) {
        self.live.clear();
        self.max_id = None;
    }

    /// Whether the qubit is currently allocated.
    pub fn is_live(&self, id: QubitId) -> bool {
        self.live.contains(&id)
    }

    /// Number of live qubits.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Highest id allocated since the last reset.
    pub fn max_id(&self) -> Option<QubitId> {
        self.max_id
    }

    /// Register width the program must declare.
    pub fn declared_qubits(&self) -> u32 {
        self.max_id.map_or(0, |id| id.0 + 1)
    }
}
