//! Gate kinds carried by commands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of operations a [`Command`](crate::Command) can carry.
///
/// Controlled variants are expressed through the command's control list:
/// a NOT with one control is `Gate::X` with one control qubit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// Qubit allocation.
    Allocate,
    /// Qubit deallocation.
    Deallocate,
    /// Computational-basis measurement.
    Measure,
    /// Ordering barrier across the target qubits.
    Barrier,
    /// End of a circuit; triggers execution.
    Flush,
    /// Pauli-X (NOT).
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
    /// Hadamard.
    H,
    /// Phase gate S.
    S,
    /// Inverse of S.
    Sdag,
    /// T gate.
    T,
    /// Inverse of T.
    Tdag,
    /// Two-qubit swap.
    Swap,
    /// Rotation about X.
    Rx(f64),
    /// Rotation about Y.
    Ry(f64),
    /// Rotation about Z.
    Rz(f64),
    /// Phase shift.
    Ph(f64),
}

impl Gate {
    /// Short name used in log messages and error reports.
    pub fn short_name(&self) -> &'static str {
        match self {
            Gate::Allocate => "Allocate",
            Gate::Deallocate => "Deallocate",
            Gate::Measure => "Measure",
            Gate::Barrier => "Barrier",
            Gate::Flush => "Flush",
            Gate::X => "X",
            Gate::Y => "Y",
            Gate::Z => "Z",
            Gate::H => "H",
            Gate::S => "S",
            Gate::Sdag => "Sdag",
            Gate::T => "T",
            Gate::Tdag => "Tdag",
            Gate::Swap => "Swap",
            Gate::Rx(_) => "Rx",
            Gate::Ry(_) => "Ry",
            Gate::Rz(_) => "Rz",
            Gate::Ph(_) => "Ph",
        }
    }

    /// Rotation angle, for parameterized gates.
    pub fn angle(&self) -> Option<f64> {
        match self {
            Gate::Rx(a) | Gate::Ry(a) | Gate::Rz(a) | Gate::Ph(a) => Some(*a),
            _ => None,
        }
    }

    /// Whether this is one of the single-axis rotations Rx, Ry or Rz.
    pub fn is_rotation(&self) -> bool {
        matches!(self, Gate::Rx(_) | Gate::Ry(_) | Gate::Rz(_))
    }

    /// Whether this is a bookkeeping operation rather than a unitary.
    pub fn is_meta(&self) -> bool {
        matches!(
            self,
            Gate::Allocate | Gate::Deallocate | Gate::Measure | Gate::Barrier | Gate::Flush
        )
    }

    /// Whether this is a fixed single-qubit gate with no parameter.
    pub fn is_fixed_single_qubit(&self) -> bool {
        matches!(
            self,
            Gate::X | Gate::Y | Gate::Z | Gate::H | Gate::S | Gate::Sdag | Gate::T | Gate::Tdag
        )
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.angle() {
            Some(angle) => write!(f, "{}({angle})", self.short_name()),
            None => f.write_str(self.short_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_names() {
        assert_eq!(Gate::Sdag.short_name(), "Sdag");
        assert_eq!(Gate::Rz(0.1).short_name(), "Rz");
        assert_eq!(Gate::Flush.short_name(), "Flush");
    }

    #[test]
    fn test_display_includes_angle() {
        assert_eq!(Gate::Rx(0.5).to_string(), "Rx(0.5)");
        assert_eq!(Gate::H.to_string(), "H");
    }

    #[test]
    fn test_classification() {
        assert!(Gate::Ry(1.0).is_rotation());
        assert!(!Gate::Ph(1.0).is_rotation());
        assert!(Gate::Barrier.is_meta());
        assert!(Gate::Tdag.is_fixed_single_qubit());
        assert!(!Gate::Swap.is_fixed_single_qubit());
    }

    #[test]
    fn test_serde_shape() {
        assert_eq!(serde_json::to_string(&Gate::H).unwrap(), "\"H\"");
        assert_eq!(serde_json::to_string(&Gate::Rz(0.25)).unwrap(), "{\"Rz\":0.25}");
        let gate: Gate = serde_json::from_str("{\"Ph\":1.5}").unwrap();
        assert_eq!(gate, Gate::Ph(1.5));
    }
}
