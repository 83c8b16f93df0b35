//! Backends command implementation.

use anyhow::Result;
use console::style;

use super::common::{build_executor, spinner};
use crate::config::CliConfig;

/// List the backend types visible to the account.
pub async fn execute(config: &CliConfig) -> Result<()> {
    let executor = build_executor(config)?;

    let progress = spinner("Fetching backend types...");
    let listing = executor.list_backend_types().await;
    let default = executor.client().default_backend_type().await.ok();
    progress.finish_and_clear();
    let types = listing?;

    println!("{} Quantum Inspire backend types:\n", style("qinspire").cyan().bold());

    for backend_type in &types {
        let is_default = default.as_ref().is_some_and(|d| d.url == backend_type.url);
        println!(
            "  {} {} {}{}",
            if backend_type.is_allowed {
                style("●").green()
            } else {
                style("○").red()
            },
            style(&backend_type.name).bold(),
            backend_type
                .id()
                .map(|id| format!("(#{id})"))
                .unwrap_or_default(),
            if is_default { " [default]" } else { "" }
        );
        println!("    Qubits: {}", backend_type.number_of_qubits);
        println!(
            "    Kind: {}",
            if backend_type.is_hardware_backend {
                "hardware"
            } else {
                "simulator"
            }
        );
        if !backend_type.description.is_empty() {
            println!("    {}", style(&backend_type.description).dim());
        }
        println!();
    }

    if types.is_empty() {
        println!("  No backend types available for this account.");
    }

    Ok(())
}
