//! The command-stream engine.
//!
//! [`Engine`] receives commands one at a time, translates them with a
//! [`Translator`], and on a flush runs the finished program through an
//! [`Executor`]. The returned histogram becomes a [`Distribution`]; one
//! outcome is sampled from it and each measured qubit's bit in that outcome
//! is written to the [`MeasurementSink`].
//!
//! A single sample is shared by every measured qubit of a run. This models
//! one collapse of the whole register per run and is an approximation: it
//! does not draw qubits independently.

use std::collections::BTreeMap;
use std::sync::Arc;

use qinspire_cqasm::{Translator, is_command_supported};
use qinspire_hal::{Executor, HalError, RawResult};
use qinspire_ir::{Command, Gate, QubitId, QubitMapping};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument, trace};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::histogram::{Distribution, format_histogram};
use crate::projector::{measured_bits, project};
use crate::sink::MeasurementSink;

/// Generator name written into program headers.
const GENERATOR: &str = "qinspire Engine";

/// Translates command streams to cQASM and interprets their results.
pub struct Engine {
    config: EngineConfig,
    translator: Translator,
    mapping: Arc<dyn QubitMapping>,
    sink: Arc<dyn MeasurementSink>,
    executor: Option<Arc<dyn Executor>>,
    rng: StdRng,
    distribution: Option<Distribution>,
    sampled: Option<String>,
    last_result: Option<RawResult>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("state", &self.translator.state())
            .field("executor", &self.executor.as_ref().map(|e| e.name().to_string()))
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Create an engine without an executor.
    ///
    /// Without an executor only program generation is possible; set
    /// `perform_execution` to false or attach one with
    /// [`with_executor`](Self::with_executor).
    pub fn new(
        config: EngineConfig,
        mapping: Arc<dyn QubitMapping>,
        sink: Arc<dyn MeasurementSink>,
    ) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            config,
            translator: Translator::with_generator(GENERATOR),
            mapping,
            sink,
            executor: None,
            rng,
            distribution: None,
            sampled: None,
            last_result: None,
        }
    }

    /// Attach the executor that runs programs.
    #[must_use]
    pub fn with_executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Replace the sampling source.
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether the command can be executed without decomposition.
    pub fn is_available(&self, cmd: &Command) -> bool {
        let available = is_command_supported(cmd);
        trace!(command = %cmd, available, "availability check");
        available
    }

    /// Receive commands in order, running the circuit on every flush.
    ///
    /// On error the partially built circuit is dropped so that the next
    /// command starts a new one.
    pub async fn receive(
        &mut self,
        commands: impl IntoIterator<Item = Command>,
    ) -> EngineResult<()> {
        for cmd in commands {
            let outcome = if cmd.gate == Gate::Flush {
                self.run().await
            } else {
                self.store(&cmd)
            };
            if let Err(err) = outcome {
                self.translator.reset();
                return Err(err);
            }
        }
        Ok(())
    }

    /// Run whatever has been received so far.
    pub async fn flush(&mut self) -> EngineResult<()> {
        self.receive([Command::flush()]).await
    }

    fn store(&mut self, cmd: &Command) -> EngineResult<()> {
        if self.translator.is_clear() {
            self.distribution = None;
            self.sampled = None;
        }
        debug!(command = %cmd, "store");
        self.translator.store(cmd)?;
        Ok(())
    }

    #[instrument(skip(self), fields(shots = self.config.shots, backend = %self.config.backend))]
    async fn run(&mut self) -> EngineResult<()> {
        let Some(program) = self.translator.finalize(self.mapping.as_ref())? else {
            debug!("empty circuit, nothing to run");
            self.translator.reset();
            return Ok(());
        };

        if !self.config.perform_execution {
            info!(qubits = program.num_qubits(), "execution disabled, program generated only");
            self.translator.reset();
            return Ok(());
        }

        self.config.validate()?;
        let executor = self.executor.clone().ok_or_else(|| {
            HalError::Configuration("no executor attached to the engine".into())
        })?;

        let raw = executor
            .execute(program.text(), &self.config.backend, self.config.shots)
            .await?;
        if raw.histogram.is_empty() {
            let raw_text = if raw.raw_text.is_empty() {
                "no raw_text in result structure"
            } else {
                raw.raw_text.as_str()
            };
            return Err(EngineError::BackendResult(format!(
                "result structure does not contain a proper histogram. raw_text field: {raw_text}"
            )));
        }

        let width = self.config.num_qubits.max(program.num_qubits());
        let counts = format_histogram(&raw.histogram, width, self.config.shots)?;
        debug!(?counts, "counts");
        let distribution = Distribution::from_counts(&counts, self.config.shots)?;

        let sampled = distribution
            .sample(&mut self.rng)
            .ok_or_else(|| EngineError::BackendResult("no outcome to sample".into()))?
            .to_string();
        for (state, probability) in distribution.iter().filter(|(_, p)| *p > 0.0) {
            let star = if state == sampled { "*" } else { "" };
            trace!("{state} with p = {probability}{star}");
        }

        let bits = measured_bits(&sampled, program.measured(), self.mapping.as_ref())?;
        for (qubit, value) in bits {
            self.sink.set_measurement_result(qubit, value);
        }
        debug!(%sampled, "measured");

        self.distribution = Some(distribution);
        self.sampled = Some(sampled);
        self.last_result = Some(raw);
        self.translator.reset();
        Ok(())
    }

    /// The last generated program.
    pub fn cqasm(&self) -> EngineResult<&str> {
        self.translator
            .cqasm()
            .map(|p| p.text())
            .ok_or(EngineError::PrematureRead("no program has been generated"))
    }

    /// Outcome probabilities of the last run, in physical bit order.
    pub fn distribution(&self) -> EngineResult<&Distribution> {
        self.distribution
            .as_ref()
            .filter(|d| !d.is_empty())
            .ok_or(EngineError::PrematureRead("run the circuit first"))
    }

    /// Probabilities over `qubits`, leftmost character for the first qubit.
    pub fn probabilities(&self, qubits: &[QubitId]) -> EngineResult<BTreeMap<String, f64>> {
        project(self.distribution()?, qubits, self.mapping.as_ref())
    }

    /// The outcome sampled in the last run.
    pub fn sampled(&self) -> EngineResult<&str> {
        self.sampled
            .as_deref()
            .ok_or(EngineError::PrematureRead("run the circuit first"))
    }

    /// The raw executor result of the last run.
    pub fn last_result(&self) -> EngineResult<&RawResult> {
        self.last_result
            .as_ref()
            .ok_or(EngineError::PrematureRead("no execution has completed"))
    }
}
