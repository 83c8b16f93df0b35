//! cQASM generation for Quantum Inspire
//!
//! This crate turns a stream of [`qinspire_ir::Command`]s, or a precompiled
//! [`qinspire_ir::CompiledCircuit`], into cQASM 1.0 text.
//!
//! # Components
//!
//! | Component | Purpose |
//! |-----------|---------|
//! | [`is_supported`] | Decides whether a gate/control-count pair is native |
//! | [`AllocationLedger`] | Tracks live qubits and the register width to declare |
//! | [`Translator`] | Command-stream state machine emitting one line per gate |
//! | [`CqasmProgram`] | Frozen program with header and deferred measurements |
//! | [`emit_compiled`] | Formatting table for precompiled circuits |
//!
//! # Emitted gate lines
//!
//! | Command | Line |
//! |---------|------|
//! | X with one control | `CNOT q[c], q[t]` |
//! | Swap | `swap q[a], q[b]` |
//! | X with two controls | `Toffoli q[c1], q[c2], q[t]` |
//! | Z with one control | `CZ q[c], q[t]` |
//! | Barrier | `# barrier gate q[a], q[b];` |
//! | Rz with one control | `CR q[c],q[t],0.500000000000` |
//! | Rx / Ry / Rz | `Rx q[t],0.5` |
//! | X Y Z H S T | `x q[t]`, `h q[t]`, ... |
//! | Sdag / Tdag | `Sdag q[t]`, `Tdag q[t]` |
//!
//! # Example
//!
//! ```rust
//! use qinspire_cqasm::Translator;
//! use qinspire_ir::{Command, Gate, IdentityMapping, QubitId};
//!
//! let mut translator = Translator::new();
//! for cmd in [
//!     Command::allocate(QubitId(0)),
//!     Command::allocate(QubitId(1)),
//!     Command::gate(Gate::H, QubitId(0)),
//!     Command::controlled(Gate::X, [QubitId(0)], QubitId(1)),
//!     Command::measure(QubitId(0)),
//!     Command::measure(QubitId(1)),
//! ] {
//!     translator.store(&cmd).unwrap();
//! }
//!
//! let program = translator.finalize(&IdentityMapping).unwrap().unwrap();
//! assert!(program.text().starts_with("version 1.0\n"));
//! assert!(program.text().contains("qubits 2\n"));
//! assert!(program.text().ends_with("CNOT q[0], q[1]\nmeasure q[0]\nmeasure q[1]\n"));
//! ```

pub mod batch;
pub mod error;
pub mod format;
pub mod ledger;
pub mod legality;
pub mod program;
pub mod translator;

pub use batch::emit_compiled;
pub use error::{CqasmError, CqasmResult};
pub use ledger::AllocationLedger;
pub use legality::{is_command_supported, is_supported};
pub use program::CqasmProgram;
pub use translator::{Translator, TranslatorState};
