//! Running batches of precompiled circuits.

use std::sync::Arc;
use std::time::Instant;

use qinspire_cqasm::emit_compiled;
use qinspire_hal::{BackendSelector, Counts, Executor};
use qinspire_ir::{BatchCircuit, BatchJob};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::histogram::format_histogram;

/// Overall status of a finished batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    /// Every circuit ran.
    Completed,
}

/// Status of one circuit in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CircuitStatus {
    /// The circuit ran.
    Done,
}

/// Result of one circuit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitResult {
    /// Circuit name from the job.
    pub name: String,
    /// Shots executed.
    pub shots: u32,
    /// Shot counts keyed by zero-padded binary outcome, MSB first.
    pub counts: Counts,
    /// The program that was executed.
    pub compiled_cqasm: String,
    /// Circuit status.
    pub status: CircuitStatus,
    /// Whether the circuit succeeded.
    pub success: bool,
    /// Wall-clock seconds spent on this circuit.
    pub time_taken: f64,
}

/// Result of a whole batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// Backend type the batch ran on.
    pub backend: String,
    /// Job id supplied by the caller.
    pub id: String,
    /// Identifier generated for this execution.
    pub job_id: String,
    /// Per-circuit results in submission order.
    pub results: Vec<CircuitResult>,
    /// Batch status.
    pub status: BatchStatus,
    /// Whether the batch succeeded.
    pub success: bool,
    /// Wall-clock seconds spent on the batch.
    pub time_taken: f64,
}

impl BatchResult {
    /// Result of the circuit with the given name.
    pub fn circuit(&self, name: &str) -> Option<&CircuitResult> {
        self.results.iter().find(|r| r.name == name)
    }
}

/// Runs [`BatchJob`]s through an executor.
pub struct BatchRunner {
    executor: Arc<dyn Executor>,
    backend: BackendSelector,
}

impl BatchRunner {
    /// Create a runner for the given backend type.
    pub fn new(executor: Arc<dyn Executor>, backend: BackendSelector) -> Self {
        Self { executor, backend }
    }

    /// Check the job before anything is generated.
    ///
    /// A single-shot job is rejected. Circuits without a measurement only
    /// produce a warning.
    pub fn validate(job: &BatchJob) -> EngineResult<()> {
        match job.shots() {
            0 => {
                return Err(EngineError::InvalidShots(
                    "shot count must be positive".into(),
                ));
            }
            1 => {
                error!("single-shot execution is not supported; use a statevector simulator");
                return Err(EngineError::InvalidShots(
                    "single shot execution not possible".into(),
                ));
            }
            _ => {}
        }
        for circuit in &job.circuits {
            if !circuit.compiled_circuit.has_measurement() {
                warn!(
                    circuit = %circuit.name,
                    "no measurements in circuit, classical register will remain all zeros"
                );
            }
        }
        Ok(())
    }

    /// Run every circuit of the job in order.
    #[instrument(skip(self, job), fields(id = %job.id, circuits = job.circuits.len()))]
    pub async fn run(&self, job: &BatchJob) -> EngineResult<BatchResult> {
        let start = Instant::now();
        Self::validate(job)?;

        let job_id = Uuid::new_v4().to_string();
        let mut results = Vec::with_capacity(job.circuits.len());
        for circuit in &job.circuits {
            results.push(self.run_circuit(circuit, job.shots()).await?);
        }

        Ok(BatchResult {
            backend: self.backend.to_string(),
            id: job.id.clone(),
            job_id,
            results,
            status: BatchStatus::Completed,
            success: true,
            time_taken: start.elapsed().as_secs_f64(),
        })
    }

    async fn run_circuit(&self, circuit: &BatchCircuit, shots: u32) -> EngineResult<CircuitResult> {
        let start = Instant::now();
        info!(circuit = %circuit.name, shots, "running circuit");

        let compiled_cqasm = emit_compiled(&circuit.compiled_circuit)?;
        let raw = self
            .executor
            .execute(&compiled_cqasm, &self.backend, shots)
            .await?;
        if raw.histogram.is_empty() {
            return Err(EngineError::BackendResult(
                "result from backend contains no histogram data".into(),
            ));
        }

        let width = circuit.compiled_circuit.number_of_qubits();
        let counts = format_histogram(&raw.histogram, width, shots)?
            .into_iter()
            .collect::<Counts>();

        let time_taken = start.elapsed().as_secs_f64();
        info!(circuit = %circuit.name, "execution done in {time_taken:.2} seconds");
        Ok(CircuitResult {
            name: circuit.name.clone(),
            shots,
            counts,
            compiled_cqasm,
            status: CircuitStatus::Done,
            success: true,
            time_taken,
        })
    }
}
