//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use qinspire_adapter_qi::QiExecutor;
use qinspire_engine::Distribution;
use qinspire_hal::{BackendSelector, ExecutorFactory};
use qinspire_ir::{BatchJob, Command, QubitId};

use crate::config::CliConfig;

/// Rows shown before the probability table is cut off.
const MAX_ROWS: usize = 16;

fn read_file(path: &str) -> Result<String> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
}

/// Load a JSON array of commands.
pub fn load_commands(path: &str) -> Result<Vec<Command>> {
    let source = read_file(path)?;
    let commands: Vec<Command> = serde_json::from_str(&source)
        .with_context(|| format!("Invalid command stream: {path}"))?;
    debug!("Loaded {} commands from {}", commands.len(), path);
    Ok(commands)
}

/// Load a compiled batch job description.
pub fn load_batch_job(path: &str) -> Result<BatchJob> {
    let source = read_file(path)?;
    let job: BatchJob =
        serde_json::from_str(&source).with_context(|| format!("Invalid batch job: {path}"))?;
    debug!("Loaded batch job {} with {} circuits", job.id, job.circuits.len());
    Ok(job)
}

/// Parse a `--backend` value, falling back to the configured selector.
pub fn backend_selector(flag: Option<&str>, config: &CliConfig) -> BackendSelector {
    flag.map_or_else(
        || config.engine.backend.clone(),
        |s| s.parse().unwrap_or_default(),
    )
}

/// Build the Quantum Inspire executor from configuration.
pub fn build_executor(config: &CliConfig) -> Result<QiExecutor> {
    QiExecutor::from_config(config.backend_config())
        .context("Failed to configure Quantum Inspire. Set QI_TOKEN, or QI_EMAIL and QI_PASSWORD")
}

/// Spinner shown while waiting on the platform.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Print outcome probabilities as a bar chart, marking the sampled outcome.
pub fn print_distribution(distribution: &Distribution, sampled: &str, shots: u32) {
    println!(
        "\n{} Results ({} shots, physical qubit 0 leftmost):",
        style("✓").green().bold(),
        shots
    );

    let mut rows: Vec<(&str, f64)> = distribution.iter().filter(|(_, p)| *p > 0.0).collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    for (state, probability) in rows.iter().take(MAX_ROWS) {
        let percent = probability * 100.0;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let bar_len = (percent / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);
        let marker = if *state == sampled { "*" } else { " " };

        println!(
            "  {}{} {:>6.2}% {}",
            style(state).cyan(),
            style(marker).yellow().bold(),
            percent,
            style(bar).green()
        );
    }

    if rows.len() > MAX_ROWS {
        println!("  ... and {} more outcomes", rows.len() - MAX_ROWS);
    }
}

/// Print the measured value of every qubit.
pub fn print_measurements(measurements: &[(QubitId, bool)]) {
    if measurements.is_empty() {
        return;
    }
    println!("\n  Measured:");
    for (qubit, value) in measurements {
        println!("    {} = {}", style(qubit).cyan(), u8::from(*value));
    }
}
