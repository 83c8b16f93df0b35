//! Precompiled circuits submitted as a batch job.
//!
//! A batch job is a list of circuits that an upstream toolchain has already
//! compiled into flat operation lists. Each operation names its gate by a
//! lowercase mnemonic (`h`, `cx`, `u3`, ...) and addresses qubits by
//! register index.

use serde::{Deserialize, Serialize};

/// One precompiled gate application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Gate mnemonic, e.g. `cx` or `u3`.
    pub name: String,
    /// Qubit indices.
    #[serde(default)]
    pub qubits: Vec<u32>,
    /// Numeric parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<f64>,
    /// Classical bit indices, for measurements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clbits: Vec<u32>,
}

impl Operation {
    /// Create an operation without parameters.
    pub fn new(name: impl Into<String>, qubits: impl IntoIterator<Item = u32>) -> Self {
        Self {
            name: name.into(),
            qubits: qubits.into_iter().collect(),
            params: Vec::new(),
            clbits: Vec::new(),
        }
    }

    /// Attach parameters.
    #[must_use]
    pub fn with_params(mut self, params: impl IntoIterator<Item = f64>) -> Self {
        self.params = params.into_iter().collect();
        self
    }

    /// Attach classical bits.
    #[must_use]
    pub fn with_clbits(mut self, clbits: impl IntoIterator<Item = u32>) -> Self {
        self.clbits = clbits.into_iter().collect();
        self
    }

    /// Whether this operation is a measurement.
    pub fn is_measure(&self) -> bool {
        self.name == "measure"
    }
}

/// Header of a compiled circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitHeader {
    /// Width of the quantum register.
    pub number_of_qubits: u32,
}

/// A circuit already lowered to a flat list of operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledCircuit {
    /// Register information.
    pub header: CircuitHeader,
    /// Operations in program order.
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl CompiledCircuit {
    /// Create a compiled circuit.
    pub fn new(number_of_qubits: u32, operations: Vec<Operation>) -> Self {
        Self {
            header: CircuitHeader { number_of_qubits },
            operations,
        }
    }

    /// Width of the quantum register.
    pub fn number_of_qubits(&self) -> u32 {
        self.header.number_of_qubits
    }

    /// Whether any operation is a measurement.
    pub fn has_measurement(&self) -> bool {
        self.operations.iter().any(Operation::is_measure)
    }
}

/// A named entry in a batch job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchCircuit {
    /// Circuit name, echoed in the result.
    pub name: String,
    /// The compiled form.
    pub compiled_circuit: CompiledCircuit,
}

/// Run configuration shared by every circuit in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Number of shots per circuit.
    pub shots: u32,
}

/// A batch of compiled circuits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchJob {
    /// Caller-chosen job identifier.
    pub id: String,
    /// Run configuration.
    pub config: BatchConfig,
    /// Circuits in submission order.
    pub circuits: Vec<BatchCircuit>,
}

impl BatchJob {
    /// Number of shots per circuit.
    pub fn shots(&self) -> u32 {
        self.config.shots
    }
}
