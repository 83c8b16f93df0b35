//! Compile command implementation.

use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use console::style;

use qinspire_engine::{Engine, EngineConfig, MeasurementStore};
use qinspire_ir::IdentityMapping;

use super::common::load_commands;

/// Translate a command stream to cQASM without executing it.
///
/// With several flushed circuits in the stream, the last one is returned.
pub async fn translate(path: &str) -> Result<String> {
    let commands = load_commands(path)?;

    let config = EngineConfig::default().with_execution(false);
    let mut engine = Engine::new(
        config,
        Arc::new(IdentityMapping),
        Arc::new(MeasurementStore::new()),
    );

    engine.receive(commands).await?;
    // Streams without a trailing flush still compile.
    engine.flush().await?;
    let program = engine
        .cqasm()
        .context("The command stream contains no gates")?;
    Ok(program.to_string())
}

/// Execute the compile command.
pub async fn execute(input: &str, output: Option<&str>) -> Result<()> {
    let program = translate(input).await?;

    match output {
        Some(path) => {
            fs::write(path, &program).with_context(|| format!("Failed to write file: {path}"))?;
            println!(
                "{} Compiled {} to {}",
                style("✓").green().bold(),
                style(input).green(),
                style(path).green()
            );
        }
        None => print!("{program}"),
    }

    Ok(())
}
