//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// The mapping has no physical position for a logical qubit.
    #[error("Qubit {0} has no physical position in the current mapping")]
    UnresolvedQubit(QubitId),

    /// A command carries the wrong number of target qubits.
    #[error("Gate '{gate_name}' requires {expected} target qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
