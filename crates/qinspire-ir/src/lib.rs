//! qinspire command-stream IR
//!
//! This crate provides the data model shared by the cQASM translator, the
//! execution engine and the Quantum Inspire adapter.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] addresses a logical qubit in the command stream
//! - **Gates**: [`Gate`], the closed set of operations the translator understands
//! - **Commands**: [`Command`] combining a gate with targets, controls and tags
//! - **Mapping**: [`QubitMapping`] resolves logical ids to physical register positions
//! - **Batch circuits**: [`BatchJob`], [`CompiledCircuit`] and [`Operation`] describe
//!   precompiled circuits submitted as a batch
//!
//! # Example: A Bell-pair command stream
//!
//! ```rust
//! use qinspire_ir::{Command, Gate, QubitId};
//!
//! let q0 = QubitId(0);
//! let q1 = QubitId(1);
//!
//! let stream = vec![
//!     Command::allocate(q0),
//!     Command::allocate(q1),
//!     Command::gate(Gate::H, q0),
//!     Command::controlled(Gate::X, [q0], q1),
//!     Command::measure(q0),
//!     Command::measure(q1),
//!     Command::flush(),
//! ];
//!
//! assert_eq!(stream[3].control_count(), 1);
//! assert_eq!(stream[4].logical_qubit_id(), Some(q0));
//! ```
//!
//! # Example: Resolving physical positions
//!
//! ```rust
//! use qinspire_ir::{MappingTable, QubitId, QubitMapping};
//!
//! let mapping = MappingTable::from_pairs([(QubitId(0), 2), (QubitId(1), 0)]);
//! assert_eq!(mapping.resolve(QubitId(0)).unwrap(), 2);
//! assert!(mapping.resolve(QubitId(7)).is_err());
//! ```

pub mod command;
pub mod error;
pub mod gate;
pub mod mapping;
pub mod operation;
pub mod qubit;

pub use command::{Command, CommandTag};
pub use error::{IrError, IrResult};
pub use gate::Gate;
pub use mapping::{IdentityMapping, MappingTable, QubitMapping};
pub use operation::{BatchCircuit, BatchConfig, BatchJob, CircuitHeader, CompiledCircuit, Operation};
pub use qubit::QubitId;
