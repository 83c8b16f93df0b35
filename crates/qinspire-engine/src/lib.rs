//! qinspire execution engine
//!
//! Ties cQASM generation to an [`Executor`](qinspire_hal::Executor) and turns
//! the returned histograms into measurement results and probabilities.
//!
//! # Overview
//!
//! - [`Engine`]: receives a command stream, runs each circuit on flush, and
//!   writes the sampled measurement of every measured qubit to a
//!   [`MeasurementSink`]
//! - [`format_histogram`] and [`Distribution`]: histogram interpretation with
//!   the bit-order reversal and inverse-CDF sampling
//! - [`project`]: probabilities over a caller-chosen list of qubits
//! - [`BatchRunner`]: executes precompiled batch jobs
//! - [`EngineConfig`]: shots, register width, backend type, execution switch
//!
//! # Bit order
//!
//! Executors report register values with the most significant qubit first.
//! Outcome strings held by a [`Distribution`] are reversed, so character `i`
//! is the bit of physical qubit `i`. [`project`] then picks characters by
//! each requested qubit's physical position.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use qinspire_engine::{Engine, EngineConfig, MeasurementStore};
//! use qinspire_ir::{Command, Gate, IdentityMapping, QubitId};
//!
//! # tokio_test();
//! # fn tokio_test() {
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let store = Arc::new(MeasurementStore::new());
//! let config = EngineConfig::default().with_execution(false);
//! let mut engine = Engine::new(config, Arc::new(IdentityMapping), store);
//!
//! engine
//!     .receive([
//!         Command::allocate(QubitId(0)),
//!         Command::gate(Gate::H, QubitId(0)),
//!         Command::measure(QubitId(0)),
//!         Command::flush(),
//!     ])
//!     .await
//!     .unwrap();
//!
//! assert!(engine.cqasm().unwrap().contains("h q[0]\nmeasure q[0]\n"));
//! # });
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod engine;
pub mod error;
pub mod histogram;
pub mod projector;
pub mod sink;

pub use batch::{BatchResult, BatchRunner, BatchStatus, CircuitResult, CircuitStatus};
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use histogram::{Distribution, format_histogram};
pub use projector::{measured_bits, project};
pub use sink::{MeasurementSink, MeasurementStore};
