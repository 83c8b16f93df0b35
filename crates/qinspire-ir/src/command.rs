//! Commands of the streaming interface.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::qubit::QubitId;

/// Metadata attached to a command by upstream compiler stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandTag {
    /// The logical qubit a measurement result belongs to.
    LogicalQubitId(QubitId),
}

/// A single gate application in the command stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// The operation.
    pub gate: Gate,
    /// Target qubits.
    #[serde(default)]
    pub targets: Vec<QubitId>,
    /// Control qubits.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub controls: Vec<QubitId>,
    /// Tags from earlier stages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<CommandTag>,
}

impl Command {
    /// Create an uncontrolled, untagged command.
    pub fn new(gate: Gate, targets: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            gate,
            targets: targets.into_iter().collect(),
            controls: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Allocate a qubit.
    pub fn allocate(qubit: QubitId) -> Self {
        Self::new(Gate::Allocate, [qubit])
    }

    /// Deallocate a qubit.
    pub fn deallocate(qubit: QubitId) -> Self {
        Self::new(Gate::Deallocate, [qubit])
    }

    /// Measure a qubit, tagged with its own id as the logical qubit.
    pub fn measure(qubit: QubitId) -> Self {
        Self::new(Gate::Measure, [qubit]).with_tag(CommandTag::LogicalQubitId(qubit))
    }

    /// Apply an uncontrolled gate to one target.
    pub fn gate(gate: Gate, target: QubitId) -> Self {
        Self::new(gate, [target])
    }

    /// Apply a gate to one target under the given controls.
    pub fn controlled(
        gate: Gate,
        controls: impl IntoIterator<Item = QubitId>,
        target: QubitId,
    ) -> Self {
        Self::new(gate, [target]).with_controls(controls)
    }

    /// Swap two qubits.
    pub fn swap(a: QubitId, b: QubitId) -> Self {
        Self::new(Gate::Swap, [a, b])
    }

    /// Barrier across the given qubits.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::new(Gate::Barrier, qubits)
    }

    /// End-of-circuit marker.
    pub fn flush() -> Self {
        Self::new(Gate::Flush, [])
    }

    /// Replace the control list.
    #[must_use]
    pub fn with_controls(mut self, controls: impl IntoIterator<Item = QubitId>) -> Self {
        self.controls = controls.into_iter().collect();
        self
    }

    /// Append a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: CommandTag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Number of control qubits.
    pub fn control_count(&self) -> usize {
        self.controls.len()
    }

    /// The logical qubit id recorded in the tags, if any.
    pub fn logical_qubit_id(&self) -> Option<QubitId> {
        self.tags.iter().find_map(|tag| match tag {
            CommandTag::LogicalQubitId(id) => Some(*id),
        })
    }

    /// The single target of a one-target command.
    pub fn single_target(&self) -> IrResult<QubitId> {
        match self.targets.as_slice() {
            [q] => Ok(*q),
            other => Err(self.count_mismatch(1, other.len())),
        }
    }

    /// The two targets of a two-target command.
    pub fn target_pair(&self) -> IrResult<(QubitId, QubitId)> {
        match self.targets.as_slice() {
            [a, b] => Ok((*a, *b)),
            other => Err(self.count_mismatch(2, other.len())),
        }
    }

    /// Controls followed by targets.
    pub fn all_qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.controls.iter().chain(self.targets.iter()).copied()
    }

    fn count_mismatch(&self, expected: u32, got: usize) -> IrError {
        IrError::QubitCountMismatch {
            gate_name: self.gate.short_name().to_string(),
            expected,
            got: u32::try_from(got).unwrap_or(u32::MAX),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.controls.is_empty() {
            write!(f, "C{}-", self.controls.len())?;
        }
        write!(f, "{} |", self.gate)?;
        for q in self.all_qubits() {
            write!(f, " {q}")?;
        }
        Ok(())
    }
}
