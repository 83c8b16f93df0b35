//! CLI command parsing and input format tests.
//!
//! The CLI is a binary crate, so argument parsing is checked on mirror
//! structs via clap `try_parse_from`, and the input formats are checked by
//! calling into the library crates the commands use.

// ============================================================================
// Command stream input
// ============================================================================

mod command_stream {
    use std::sync::Arc;

    use qinspire_engine::{Engine, EngineConfig, MeasurementStore};
    use qinspire_ir::{Command, Gate, IdentityMapping, QubitId};

    const BELL: &str = r#"[
        {"gate": "Allocate", "targets": [0]},
        {"gate": "Allocate", "targets": [1]},
        {"gate": "H", "targets": [0]},
        {"gate": "X", "targets": [1], "controls": [0]},
        {"gate": "Measure", "targets": [0], "tags": [{"LogicalQubitId": 0}]},
        {"gate": "Measure", "targets": [1], "tags": [{"LogicalQubitId": 1}]},
        {"gate": "Flush"}
    ]"#;

    async fn compile(commands: Vec<Command>) -> String {
        let mut engine = Engine::new(
            EngineConfig::default().with_execution(false),
            Arc::new(IdentityMapping),
            Arc::new(MeasurementStore::new()),
        );
        engine.receive(commands).await.unwrap();
        engine.cqasm().unwrap().to_string()
    }

    #[test]
    fn test_parse_bell_stream() {
        let commands: Vec<Command> = serde_json::from_str(BELL).unwrap();
        assert_eq!(commands.len(), 7);
        assert_eq!(commands[3].gate, Gate::X);
        assert_eq!(commands[3].controls, vec![QubitId(0)]);
        assert_eq!(commands[4].logical_qubit_id(), Some(QubitId(0)));
    }

    #[test]
    fn test_parse_rotation_angle() {
        let cmd: Command = serde_json::from_str(r#"{"gate": {"Rz": 0.5}, "targets": [2]}"#).unwrap();
        assert_eq!(cmd.gate, Gate::Rz(0.5));
        assert!(cmd.controls.is_empty());
    }

    #[test]
    fn test_parse_unknown_gate_fails() {
        let result: Result<Command, _> =
            serde_json::from_str(r#"{"gate": "Frobnicate", "targets": [0]}"#);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_compile_bell_stream() {
        let commands: Vec<Command> = serde_json::from_str(BELL).unwrap();
        let program = compile(commands).await;
        assert!(program.starts_with("version 1.0\n"));
        assert!(program.contains("qubits 2\n"));
        assert!(program.contains("h q[0]\nCNOT q[0], q[1]\nmeasure q[0]\nmeasure q[1]\n"));
    }

    #[tokio::test]
    async fn test_compile_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bell.json");
        let output = dir.path().join("bell.cq");
        std::fs::write(&input, BELL).unwrap();

        let source = std::fs::read_to_string(&input).unwrap();
        let commands: Vec<Command> = serde_json::from_str(&source).unwrap();
        std::fs::write(&output, compile(commands).await).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.ends_with("measure q[1]\n"));
    }
}

// ============================================================================
// Batch job input
// ============================================================================

mod batch_job {
    use qinspire_cqasm::emit_compiled;
    use qinspire_engine::BatchRunner;
    use qinspire_ir::BatchJob;

    const JOB: &str = r#"{
        "id": "job-1",
        "config": {"shots": 1024},
        "circuits": [
            {
                "name": "bell",
                "compiled_circuit": {
                    "header": {"number_of_qubits": 2},
                    "operations": [
                        {"name": "h", "qubits": [0]},
                        {"name": "cx", "qubits": [0, 1]},
                        {"name": "measure", "qubits": [0], "clbits": [0]},
                        {"name": "measure", "qubits": [1], "clbits": [1]}
                    ]
                }
            }
        ]
    }"#;

    #[test]
    fn test_parse_batch_job() {
        let job: BatchJob = serde_json::from_str(JOB).unwrap();
        assert_eq!(job.id, "job-1");
        assert_eq!(job.shots(), 1024);
        assert_eq!(job.circuits.len(), 1);
        assert!(BatchRunner::validate(&job).is_ok());
    }

    #[test]
    fn test_emit_batch_circuit() {
        let job: BatchJob = serde_json::from_str(JOB).unwrap();
        let text = emit_compiled(&job.circuits[0].compiled_circuit).unwrap();
        assert!(text.contains("qubits 2\n"));
        assert!(text.contains("H q[0]\n"));
        assert!(text.contains("CNOT q[0], q[1]\n"));
        assert!(text.ends_with(".measurement\n   measure q[0]\n   measure q[1]\n"));
    }

    #[test]
    fn test_single_shot_job_rejected() {
        let mut job: BatchJob = serde_json::from_str(JOB).unwrap();
        job.config.shots = 1;
        assert!(BatchRunner::validate(&job).is_err());
    }
}

// ============================================================================
// Configuration file
// ============================================================================

mod config_file {
    use qinspire_engine::EngineConfig;
    use qinspire_hal::BackendSelector;

    #[test]
    fn test_engine_section_yaml() {
        let yaml = "shots: 512\nbackend:\n  id: 2\nseed: 42\n";
        let config: EngineConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.shots, 512);
        assert_eq!(config.backend, BackendSelector::Id(2));
        assert_eq!(config.seed, Some(42));
        assert!(config.perform_execution);
    }

    #[test]
    fn test_backend_flag_values() {
        assert_eq!(
            "default".parse::<BackendSelector>().unwrap(),
            BackendSelector::Default
        );
        assert_eq!(
            "#4".parse::<BackendSelector>().unwrap(),
            BackendSelector::Id(4)
        );
        assert_eq!(
            "QX Single-node Simulator".parse::<BackendSelector>().unwrap(),
            BackendSelector::Name("QX Single-node Simulator".into())
        );
    }
}

// ============================================================================
// Clap argument parsing (test via try_parse_from on equivalent structs)
// ============================================================================

mod clap_parsing {
    use std::path::PathBuf;

    use clap::{Parser, Subcommand};

    // Mirror the CLI struct for testing (since main.rs is a binary)
    #[derive(Parser)]
    #[command(name = "qinspire")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,
        #[arg(long, global = true)]
        config: Option<PathBuf>,
        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Compile {
            #[arg(short, long)]
            input: String,
            #[arg(short, long)]
            output: Option<String>,
        },
        Run {
            #[arg(short, long)]
            input: String,
            #[arg(short, long)]
            shots: Option<u32>,
            #[arg(short, long)]
            backend: Option<String>,
            #[arg(long)]
            seed: Option<u64>,
            #[arg(long)]
            num_qubits: Option<u32>,
        },
        Batch {
            #[arg(short, long)]
            input: String,
            #[arg(short, long)]
            backend: Option<String>,
            #[arg(short, long)]
            output: Option<String>,
        },
        Backends,
        Version,
    }

    // --- Compile command ---

    #[test]
    fn test_parse_compile_minimal() {
        let cli = TestCli::try_parse_from(["qinspire", "compile", "-i", "bell.json"]).unwrap();
        match cli.command {
            TestCommands::Compile { input, output } => {
                assert_eq!(input, "bell.json");
                assert!(output.is_none());
            }
            _ => panic!("Expected Compile command"),
        }
    }

    #[test]
    fn test_parse_compile_with_output() {
        let cli =
            TestCli::try_parse_from(["qinspire", "compile", "-i", "bell.json", "-o", "bell.cq"])
                .unwrap();
        match cli.command {
            TestCommands::Compile { output, .. } => assert_eq!(output.unwrap(), "bell.cq"),
            _ => panic!("Expected Compile command"),
        }
    }

    #[test]
    fn test_parse_compile_missing_input() {
        assert!(TestCli::try_parse_from(["qinspire", "compile"]).is_err());
    }

    // --- Run command ---

    #[test]
    fn test_parse_run_minimal() {
        let cli = TestCli::try_parse_from(["qinspire", "run", "-i", "bell.json"]).unwrap();
        match cli.command {
            TestCommands::Run {
                input,
                shots,
                backend,
                seed,
                num_qubits,
            } => {
                assert_eq!(input, "bell.json");
                assert!(shots.is_none());
                assert!(backend.is_none());
                assert!(seed.is_none());
                assert!(num_qubits.is_none());
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_parse_run_with_all_args() {
        let cli = TestCli::try_parse_from([
            "qinspire",
            "run",
            "-i",
            "bell.json",
            "-s",
            "4096",
            "-b",
            "QX Single-node Simulator",
            "--seed",
            "7",
            "--num-qubits",
            "5",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Run {
                shots,
                backend,
                seed,
                num_qubits,
                ..
            } => {
                assert_eq!(shots, Some(4096));
                assert_eq!(backend.as_deref(), Some("QX Single-node Simulator"));
                assert_eq!(seed, Some(7));
                assert_eq!(num_qubits, Some(5));
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_parse_run_invalid_shots() {
        let result = TestCli::try_parse_from(["qinspire", "run", "-i", "b.json", "-s", "many"]);
        assert!(result.is_err());
    }

    // --- Batch command ---

    #[test]
    fn test_parse_batch() {
        let cli =
            TestCli::try_parse_from(["qinspire", "batch", "-i", "job.json", "-b", "2"]).unwrap();
        match cli.command {
            TestCommands::Batch {
                input,
                backend,
                output,
            } => {
                assert_eq!(input, "job.json");
                assert_eq!(backend.as_deref(), Some("2"));
                assert!(output.is_none());
            }
            _ => panic!("Expected Batch command"),
        }
    }

    // --- Global flags ---

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = TestCli::try_parse_from([
            "qinspire",
            "backends",
            "-vv",
            "--config",
            "/tmp/qi.yaml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/qi.yaml")));
        assert!(matches!(cli.command, TestCommands::Backends));
    }

    #[test]
    fn test_parse_version() {
        let cli = TestCli::try_parse_from(["qinspire", "version"]).unwrap();
        assert!(matches!(cli.command, TestCommands::Version));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(TestCli::try_parse_from(["qinspire", "submit"]).is_err());
    }
}
