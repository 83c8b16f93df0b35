//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - cQASM generation and execution for Quantum Inspire",
        style("qinspire").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qinspire-ir          Commands, gates and qubit mappings");
    println!("  qinspire-cqasm       cQASM translation and batch emission");
    println!("  qinspire-hal         Executor contract and raw results");
    println!("  qinspire-engine      Histogram sampling and result projection");
    println!("  qinspire-adapter-qi  Quantum Inspire REST executor");
    println!("  qinspire-cli         Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style(env!("CARGO_PKG_REPOSITORY")).underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
