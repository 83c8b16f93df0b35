//! Error types for the engine.

use qinspire_cqasm::CqasmError;
use qinspire_hal::HalError;
use qinspire_ir::{IrError, QubitId};
use thiserror::Error;

/// Errors surfaced by the engine and the batch runner.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// A command or operation has no cQASM encoding.
    #[error("Unsupported gate: {0}")]
    UnsupportedGate(String),

    /// A measurement lacks its logical qubit id tag.
    #[error("Tagging error: {0}")]
    Tagging(String),

    /// A logical qubit has no physical position in the current mapping.
    #[error(
        "Unknown qubit id {0}. Make sure flush was called and that the qubit was not eliminated during optimization"
    )]
    UnresolvedQubit(QubitId),

    /// The executor returned an empty or malformed result.
    #[error("Backend result error: {0}")]
    BackendResult(String),

    /// A result accessor was called before any run completed.
    #[error("No result available: {0}")]
    PrematureRead(&'static str),

    /// Invalid shot count.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// Execution collaborator failure.
    #[error(transparent)]
    Backend(#[from] HalError),
}

impl From<IrError> for EngineError {
    fn from(err: IrError) -> Self {
        match err {
            IrError::UnresolvedQubit(qubit) => EngineError::UnresolvedQubit(qubit),
            other => EngineError::UnsupportedGate(other.to_string()),
        }
    }
}

impl From<CqasmError> for EngineError {
    fn from(err: CqasmError) -> Self {
        match err {
            CqasmError::MissingLogicalId(command) => EngineError::Tagging(format!(
                "measure command '{command}' carries no logical qubit id tag"
            )),
            CqasmError::Ir(ir) => ir.into(),
            other => EngineError::UnsupportedGate(other.to_string()),
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_qubit_passes_through_cqasm() {
        let err: EngineError = CqasmError::Ir(IrError::UnresolvedQubit(QubitId(3))).into();
        assert!(matches!(err, EngineError::UnresolvedQubit(QubitId(3))));
        assert!(err.to_string().contains("q3"));
    }

    #[test]
    fn test_missing_tag_maps_to_tagging() {
        let err: EngineError = CqasmError::MissingLogicalId("Measure | q0".into()).into();
        assert!(matches!(err, EngineError::Tagging(_)));
    }

    #[test]
    fn test_count_mismatch_maps_to_unsupported() {
        let err: EngineError = IrError::QubitCountMismatch {
            gate_name: "Swap".into(),
            expected: 2,
            got: 1,
        }
        .into();
        assert!(matches!(err, EngineError::UnsupportedGate(_)));
    }

    #[test]
    fn test_hal_error_wraps() {
        let err: EngineError = HalError::JobCancelled("509".into()).into();
        assert!(matches!(err, EngineError::Backend(HalError::JobCancelled(_))));
    }
}
