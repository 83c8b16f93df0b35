//! Run command implementation.

use std::sync::Arc;

use anyhow::Result;
use console::style;

use qinspire_engine::{Engine, MeasurementStore};
use qinspire_hal::Executor;
use qinspire_ir::IdentityMapping;

use super::common::{
    backend_selector, build_executor, load_commands, print_distribution, print_measurements,
    spinner,
};
use crate::config::CliConfig;

/// Command-line overrides of the engine configuration.
#[derive(Debug, Default)]
pub struct RunOptions<'a> {
    pub shots: Option<u32>,
    pub backend: Option<&'a str>,
    pub seed: Option<u64>,
    pub num_qubits: Option<u32>,
}

/// Execute the run command.
pub async fn execute(input: &str, options: RunOptions<'_>, config: &CliConfig) -> Result<()> {
    let mut engine_config = config
        .engine
        .clone()
        .with_backend(backend_selector(options.backend, config))
        .with_execution(true);
    if let Some(shots) = options.shots {
        engine_config = engine_config.with_shots(shots);
    }
    if let Some(seed) = options.seed {
        engine_config = engine_config.with_seed(seed);
    }
    if let Some(n) = options.num_qubits {
        engine_config = engine_config.with_num_qubits(n);
    }
    engine_config.validate()?;

    println!(
        "{} Running {} on {} ({} shots)",
        style("→").cyan().bold(),
        style(input).green(),
        style(&engine_config.backend).yellow(),
        engine_config.shots
    );

    let commands = load_commands(input)?;
    println!("  Loaded: {} commands", commands.len());

    let executor: Arc<dyn Executor> = Arc::new(build_executor(config)?);
    let store = Arc::new(MeasurementStore::new());
    let shots = engine_config.shots;
    let mut engine = Engine::new(engine_config, Arc::new(IdentityMapping), store.clone())
        .with_executor(executor);

    let progress = spinner("Running on Quantum Inspire...");
    let outcome = async {
        engine.receive(commands).await?;
        engine.flush().await
    }
    .await;
    progress.finish_and_clear();
    outcome?;

    let distribution = engine.distribution()?;
    print_distribution(distribution, engine.sampled()?, shots);

    let measurements: Vec<_> = store.snapshot().into_iter().collect();
    print_measurements(&measurements);

    if let Some(job) = engine.last_result().ok().and_then(|r| r.job.as_ref()) {
        let elapsed = job
            .elapsed()
            .map(|d| format!(" in {:.3}s", d.num_milliseconds() as f64 / 1000.0))
            .unwrap_or_default();
        println!(
            "\n  Job: {} on {} ({}{})",
            style(job.id).yellow(),
            job.backend,
            job.status,
            elapsed
        );
    }

    Ok(())
}
