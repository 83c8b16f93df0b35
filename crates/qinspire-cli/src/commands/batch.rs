//! Batch command implementation.

use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use console::style;

use qinspire_engine::BatchRunner;
use qinspire_hal::Executor;

use super::common::{backend_selector, build_executor, load_batch_job, spinner};
use crate::config::CliConfig;

/// Execute the batch command.
pub async fn execute(
    input: &str,
    backend: Option<&str>,
    output: Option<&str>,
    config: &CliConfig,
) -> Result<()> {
    let job = load_batch_job(input)?;
    BatchRunner::validate(&job)?;

    let selector = backend_selector(backend, config);
    eprintln!(
        "{} Running batch {} ({} circuits, {} shots) on {}",
        style("→").cyan().bold(),
        style(&job.id).green(),
        job.circuits.len(),
        job.shots(),
        style(&selector).yellow()
    );

    let executor: Arc<dyn Executor> = Arc::new(build_executor(config)?);
    let runner = BatchRunner::new(executor, selector);

    let progress = spinner("Running circuits...");
    let result = runner.run(&job).await;
    progress.finish_and_clear();
    let result = result?;

    let json = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
    match output {
        Some(path) => {
            fs::write(path, &json).with_context(|| format!("Failed to write file: {path}"))?;
            eprintln!(
                "{} {} circuits in {:.2}s, written to {}",
                style("✓").green().bold(),
                result.results.len(),
                result.time_taken,
                style(path).green()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}
