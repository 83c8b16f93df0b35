//! Logical-to-physical qubit mapping.
//!
//! The mapper stage upstream decides where each logical qubit lives in the
//! physical register. The translator only reads that decision, so the
//! mapping is a shared read-only collaborator behind a trait.

use rustc_hash::FxHashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// Resolves logical qubit ids to physical register positions.
pub trait QubitMapping: Send + Sync {
    /// Physical position of a logical qubit, if it is mapped.
    fn physical(&self, logical: QubitId) -> Option<u32>;

    /// Physical position of a logical qubit, or an error if it is not mapped.
    fn resolve(&self, logical: QubitId) -> IrResult<u32> {
        self.physical(logical)
            .ok_or(IrError::UnresolvedQubit(logical))
    }
}

/// Maps every logical id to the position with the same index.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMapping;

impl QubitMapping for IdentityMapping {
    fn physical(&self, logical: QubitId) -> Option<u32> {
        Some(logical.0)
    }
}

/// An explicit mapping table that the mapper stage may update between runs.
#[derive(Debug, Default)]
pub struct MappingTable {
    table: RwLock<FxHashMap<QubitId, u32>>,
}

impl MappingTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from `(logical, physical)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (QubitId, u32)>) -> Self {
        Self {
            table: RwLock::new(pairs.into_iter().collect()),
        }
    }

    /// Map a logical qubit, returning the previous position.
    pub fn insert(&self, logical: QubitId, physical: u32) -> Option<u32> {
        self.table
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(logical, physical)
    }

    /// Remove a logical qubit from the table.
    pub fn remove(&self, logical: QubitId) -> Option<u32> {
        self.table
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&logical)
    }

    /// Replace the whole table.
    pub fn replace(&self, pairs: impl IntoIterator<Item = (QubitId, u32)>) {
        *self.table.write().unwrap_or_else(PoisonError::into_inner) =
            pairs.into_iter().collect();
    }

    /// Number of mapped qubits.
    pub fn len(&self) -> usize {
        self.table.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether no qubit is mapped.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl QubitMapping for MappingTable {
    fn physical(&self, logical: QubitId) -> Option<u32> {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&logical)
            .copied()
    }
}

impl<M: QubitMapping + ?Sized> QubitMapping for std::sync::Arc<M> {
    fn physical(&self, logical: QubitId) -> Option<u32> {
        (**self).physical(logical)
    }
}
