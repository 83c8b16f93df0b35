//! qinspire Command-Line Interface
//!
//! Translates quantum command streams and compiled batch jobs to cQASM and
//! runs them on Quantum Inspire.
//!
//! ```text
//!   commands.json ──→ compile ──→ program.cq
//!                 └─→ run ─────→ probabilities + measured bits
//!   job.json ─────→ batch ─────→ BatchResult (JSON)
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{backends, batch, compile, run, version};
use config::CliConfig;

/// qinspire - cQASM generation and execution for Quantum Inspire
#[derive(Parser)]
#[command(name = "qinspire")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to ~/.qinspire/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a JSON command stream to cQASM
    Compile {
        /// Input file (JSON array of commands)
        #[arg(short, long)]
        input: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Run a JSON command stream on Quantum Inspire
    Run {
        /// Input file (JSON array of commands)
        #[arg(short, long)]
        input: String,

        /// Number of shots
        #[arg(short, long)]
        shots: Option<u32>,

        /// Backend type: default, an id, or a name
        #[arg(short, long)]
        backend: Option<String>,

        /// Seed for outcome sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Minimum register width of reported outcomes
        #[arg(long)]
        num_qubits: Option<u32>,
    },

    /// Run a compiled batch job and print the JSON result
    Batch {
        /// Input file (JSON batch job)
        #[arg(short, long)]
        input: String,

        /// Backend type: default, an id, or a name
        #[arg(short, long)]
        backend: Option<String>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List available backend types
    Backends,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Compile { input, output } => compile::execute(&input, output.as_deref()).await,

        Commands::Version => {
            version::execute();
            Ok(())
        }

        command => match CliConfig::load(cli.config.as_deref()) {
            Ok(config) => dispatch(command, &config).await,
            Err(e) => Err(e),
        },
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

/// Commands that need the loaded configuration.
async fn dispatch(command: Commands, config: &CliConfig) -> anyhow::Result<()> {
    match command {
        Commands::Run {
            input,
            shots,
            backend,
            seed,
            num_qubits,
        } => {
            let options = run::RunOptions {
                shots,
                backend: backend.as_deref(),
                seed,
                num_qubits,
            };
            run::execute(&input, options, config).await
        }

        Commands::Batch {
            input,
            backend,
            output,
        } => batch::execute(&input, backend.as_deref(), output.as_deref(), config).await,

        Commands::Backends => backends::execute(config).await,

        Commands::Compile { .. } | Commands::Version => Ok(()),
    }
}
