//! Engine configuration.

use qinspire_hal::BackendSelector;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Default number of shots per run.
pub const DEFAULT_SHOTS: u32 = 1024;

/// Default register width used to pad outcome keys.
pub const DEFAULT_NUM_QUBITS: u32 = 8;

/// Settings for an [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of shots per run.
    pub shots: u32,
    /// Minimum register width of interpreted outcomes.
    pub num_qubits: u32,
    /// Backend type to run on.
    pub backend: BackendSelector,
    /// When false, programs are generated but never executed.
    pub perform_execution: bool,
    /// Seed for outcome sampling; entropy-seeded when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            shots: DEFAULT_SHOTS,
            num_qubits: DEFAULT_NUM_QUBITS,
            backend: BackendSelector::Default,
            perform_execution: true,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Set the shot count.
    #[must_use]
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Set the register width.
    #[must_use]
    pub fn with_num_qubits(mut self, num_qubits: u32) -> Self {
        self.num_qubits = num_qubits;
        self
    }

    /// Set the backend selector.
    #[must_use]
    pub fn with_backend(mut self, backend: BackendSelector) -> Self {
        self.backend = backend;
        self
    }

    /// Enable or disable execution.
    #[must_use]
    pub fn with_execution(mut self, perform_execution: bool) -> Self {
        self.perform_execution = perform_execution;
        self
    }

    /// Seed the sampler.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the settings.
    pub fn validate(&self) -> EngineResult<()> {
        if self.shots == 0 {
            return Err(EngineError::InvalidShots(
                "shot count must be positive".into(),
            ));
        }
        Ok(())
    }
}
