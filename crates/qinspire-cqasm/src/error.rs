//! Error types for cQASM generation.

use qinspire_ir::IrError;
use thiserror::Error;

/// Errors that can occur while translating to cQASM.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CqasmError {
    /// The command has no cQASM encoding.
    #[error("Cannot translate '{command}' to cQASM: {reason}")]
    UnsupportedGate {
        /// The offending command or operation.
        command: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A measurement is missing its logical qubit id tag.
    #[error("Measure command '{0}' carries no logical qubit id tag")]
    MissingLogicalId(String),

    /// A compiled operation has the wrong number of qubits or parameters.
    #[error("Operation '{name}' expects {expected} {what}, got {got}")]
    WrongArity {
        /// Operation name.
        name: String,
        /// `"qubits"` or `"parameters"`.
        what: &'static str,
        /// Expected count.
        expected: usize,
        /// Actual count.
        got: usize,
    },

    /// A compiled operation addresses a qubit outside the declared register.
    #[error("Operation '{name}' addresses qubit {index} outside a register of {size}")]
    QubitOutOfRange {
        /// Operation name.
        name: String,
        /// The offending index.
        index: u32,
        /// Declared register width.
        size: u32,
    },

    /// IR error, e.g. an unresolved physical position.
    #[error(transparent)]
    Ir(#[from] IrError),
}

impl CqasmError {
    pub(crate) fn unsupported(command: impl ToString, reason: impl Into<String>) -> Self {
        CqasmError::UnsupportedGate {
            command: command.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for cQASM generation.
pub type CqasmResult<T> = Result<T, CqasmError>;
